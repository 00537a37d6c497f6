use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::games_sea;
use crate::entities::games;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub id: i64,
    pub room_id: i64,
    pub started_at: OffsetDateTime,
    pub ended_at: Option<OffsetDateTime>,
}

impl From<games::Model> for GameSession {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            room_id: model.room_id,
            started_at: model.started_at,
            ended_at: model.ended_at,
        }
    }
}

pub async fn start_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<GameSession, DomainError> {
    Ok(games_sea::create_game(conn, room_id).await?.into())
}

/// Stamp `ended_at` on the room's open session, if there is one.
pub async fn close_open_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Option<GameSession>, DomainError> {
    match games_sea::find_open(conn, room_id).await? {
        Some(open) => Ok(Some(games_sea::close_game(conn, open).await?.into())),
        None => Ok(None),
    }
}
