//! Game mode catalog and per-room enablement.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::game_modes_sea as modes_adapter;
use crate::entities::game_modes::{self, GameModeKind};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameMode {
    pub id: i64,
    pub slug: GameModeKind,
    pub display_name: String,
    pub description: String,
}

impl From<game_modes::Model> for GameMode {
    fn from(model: game_modes::Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            display_name: model.display_name,
            description: model.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomModeSetting {
    #[serde(flatten)]
    pub mode: GameMode,
    pub enabled: bool,
}

pub async fn list_modes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<GameMode>, DomainError> {
    let rows = modes_adapter::list_modes(conn).await?;
    Ok(rows.into_iter().map(GameMode::from).collect())
}

pub async fn require_mode<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mode_id: i64,
) -> Result<GameMode, DomainError> {
    modes_adapter::find_mode(conn, mode_id)
        .await?
        .map(GameMode::from)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::GameMode,
                format!("Game mode {mode_id} not found"),
            )
        })
}

/// Every catalog mode with the room's flag; modes without a row count as disabled.
pub async fn room_settings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Vec<RoomModeSetting>, DomainError> {
    let modes = list_modes(conn).await?;
    let rows = modes_adapter::list_room_modes(conn, room_id).await?;
    Ok(modes
        .into_iter()
        .map(|mode| {
            let enabled = rows
                .iter()
                .any(|r| r.game_mode_id == mode.id && r.is_enabled);
            RoomModeSetting { mode, enabled }
        })
        .collect())
}

pub async fn enabled_mode_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(modes_adapter::enabled_mode_ids(conn, room_id).await?)
}

pub async fn set_enabled<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    mode_id: i64,
    enabled: bool,
) -> Result<(), DomainError> {
    modes_adapter::set_room_mode(conn, room_id, mode_id, enabled).await?;
    Ok(())
}
