//! Transactional orchestration over repos and pure domain rules.
//!
//! Every method takes the caller's transaction; services never begin or
//! commit one themselves.

pub mod deck;
pub mod game_flow;
pub mod rooms;
pub mod stats;

use std::collections::HashMap;

use sea_orm::ConnectionTrait;

use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::memberships::{self, Membership};
use crate::repos::rooms::{self as room_repo, Room};

/// The caller's membership together with their room, row-locked.
pub(crate) async fn locked_room_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<(Membership, Room), DomainError> {
    let membership = memberships::require_membership(conn, user_id).await?;
    let room = room_repo::lock_room(conn, membership.room_id).await?;
    Ok((membership, room))
}

pub(crate) fn ensure_admin(room: &Room, user_id: i64) -> Result<(), DomainError> {
    if room.admin_id != user_id {
        return Err(DomainError::not_authorized(
            "Only the room admin can do that",
        ));
    }
    Ok(())
}

pub(crate) fn ensure_started(room: &Room) -> Result<(), DomainError> {
    if !room.is_game_started {
        return Err(DomainError::conflict(
            ConflictKind::GameNotStarted,
            "The game has not started",
        ));
    }
    Ok(())
}

/// Membership row id per user id.
pub(crate) fn membership_ids(members: &[Membership]) -> HashMap<i64, i64> {
    members.iter().map(|m| (m.user_id, m.id)).collect()
}
