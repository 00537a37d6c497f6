//! Room membership repository functions.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::room_players_sea as players_adapter;
use crate::domain::modes::{ScoreEffect, StatOutcome};
use crate::domain::ranking::MemberScore;
use crate::entities::room_players;
use crate::errors::domain::{ConflictKind, DomainError};

pub use players_adapter::ScoreDelta;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: i64,
    pub room_id: i64,
    pub user_id: i64,
    pub points: i32,
    pub drinks: i32,
    pub cards_completed: i32,
    pub cards_failed: i32,
    pub joined_at: OffsetDateTime,
}

impl Membership {
    pub fn score(&self) -> MemberScore {
        MemberScore {
            user_id: self.user_id,
            membership_id: self.id,
            points: self.points,
            drinks: self.drinks,
            joined_at: self.joined_at,
        }
    }
}

impl From<room_players::Model> for Membership {
    fn from(model: room_players::Model) -> Self {
        Self {
            id: model.id,
            room_id: model.room_id,
            user_id: model.user_id,
            points: model.points,
            drinks: model.drinks,
            cards_completed: model.cards_completed,
            cards_failed: model.cards_failed,
            joined_at: model.joined_at,
        }
    }
}

impl From<&ScoreEffect> for ScoreDelta {
    fn from(effect: &ScoreEffect) -> Self {
        Self {
            points: effect.points,
            drinks: effect.drinks,
            completed: i32::from(effect.outcome == Some(StatOutcome::Completed)),
            failed: i32::from(effect.outcome == Some(StatOutcome::Failed)),
        }
    }
}

pub async fn find_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<Membership>, DomainError> {
    Ok(players_adapter::find_by_user(conn, user_id)
        .await?
        .map(Membership::from))
}

/// The caller's membership, or `NotInRoom`.
pub async fn require_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Membership, DomainError> {
    find_by_user(conn, user_id).await?.ok_or_else(|| {
        DomainError::conflict(ConflictKind::NotInRoom, "You are not in a room")
    })
}

/// Members of the room in join order.
pub async fn list_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Vec<Membership>, DomainError> {
    let rows = players_adapter::list_by_room(conn, room_id).await?;
    Ok(rows.into_iter().map(Membership::from).collect())
}

pub async fn count_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<u64, DomainError> {
    Ok(players_adapter::count_by_room(conn, room_id).await?)
}

pub async fn create_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    user_id: i64,
) -> Result<Membership, DomainError> {
    Ok(players_adapter::create_membership(conn, room_id, user_id)
        .await?
        .into())
}

/// Returns whether a membership row was removed.
pub async fn remove_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<bool, DomainError> {
    Ok(players_adapter::delete_by_user(conn, user_id).await? > 0)
}

pub async fn apply_delta<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    membership_id: i64,
    delta: ScoreDelta,
) -> Result<(), DomainError> {
    Ok(players_adapter::apply_delta(conn, membership_id, delta).await?)
}

pub async fn set_drinks<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    membership_id: i64,
    drinks: i32,
) -> Result<(), DomainError> {
    Ok(players_adapter::set_drinks(conn, membership_id, drinks).await?)
}

pub async fn reset_scores<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<(), DomainError> {
    Ok(players_adapter::reset_scores(conn, room_id).await?)
}
