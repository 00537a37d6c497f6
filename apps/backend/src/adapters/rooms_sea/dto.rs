#[derive(Debug, Clone)]
pub struct RoomCreate {
    pub code: String,
    pub admin_id: i64,
    pub name: String,
    pub capacity: i32,
}

/// Fields that change while a room lives; `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct RoomUpdate {
    pub admin_id: Option<i64>,
    pub is_active: Option<bool>,
    pub is_game_started: Option<bool>,
    /// `Some(None)` clears the current card
    pub current_card_id: Option<Option<i64>>,
}
