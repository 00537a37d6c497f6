use crate::entities::game_actions::ActionType;

#[derive(Debug, Clone)]
pub struct ActionCreate {
    pub room_id: i64,
    pub card_id: Option<i64>,
    pub user_id: Option<i64>,
    pub action_type: ActionType,
    pub action_data: Option<String>,
}

impl ActionCreate {
    /// Marker row that starts a fresh deck cycle for the room.
    pub fn round_reset(room_id: i64) -> Self {
        Self {
            room_id,
            card_id: None,
            user_id: None,
            action_type: ActionType::RoundReset,
            action_data: None,
        }
    }
}
