//! Action log access. The log is append-only; "since the last reset" is
//! always measured by log id.

use std::collections::HashSet;

use sea_orm::ConnectionTrait;

use crate::adapters::game_actions_sea::{self as actions_adapter, ActionCreate};
use crate::domain::actions::{ActionData, LoggedAction};
use crate::entities::game_actions::ActionType;
use crate::errors::domain::DomainError;

/// Append one entry; returns its log id.
pub async fn append<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    card_id: i64,
    user_id: i64,
    action_type: ActionType,
    data: &ActionData,
) -> Result<i64, DomainError> {
    let dto = ActionCreate {
        room_id,
        card_id: Some(card_id),
        user_id: Some(user_id),
        action_type,
        action_data: data.encode()?,
    };
    Ok(actions_adapter::append(conn, dto).await?.id)
}

pub async fn append_round_reset<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<i64, DomainError> {
    Ok(actions_adapter::append(conn, ActionCreate::round_reset(room_id))
        .await?
        .id)
}

/// Log id of the latest reset marker, `0` when the room never reset.
pub async fn last_reset_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<i64, DomainError> {
    Ok(actions_adapter::last_reset_id(conn, room_id)
        .await?
        .unwrap_or(0))
}

/// Cards already played in the current deck cycle.
pub async fn played_since_reset<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<HashSet<i64>, DomainError> {
    let after = last_reset_id(conn, room_id).await?;
    let ids = actions_adapter::played_card_ids_since(conn, room_id, after).await?;
    Ok(ids.into_iter().collect())
}

pub async fn last_played_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Option<i64>, DomainError> {
    Ok(actions_adapter::last_card_id(conn, room_id).await?)
}

/// Entries for `card_id` in the current deck cycle, oldest first.
pub async fn card_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    card_id: i64,
) -> Result<Vec<LoggedAction>, DomainError> {
    let after = last_reset_id(conn, room_id).await?;
    let rows = actions_adapter::list_for_card_since(conn, room_id, card_id, after).await?;
    rows.into_iter()
        .map(|row| {
            Ok(LoggedAction {
                user_id: row.user_id,
                action_type: row.action_type,
                data: ActionData::decode(row.action_data.as_deref())?,
            })
        })
        .collect()
}
