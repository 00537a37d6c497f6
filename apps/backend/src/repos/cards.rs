use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::cards_sea as cards_adapter;
use crate::entities::cards;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: i64,
    pub game_mode_id: i64,
    pub title: String,
    pub content: String,
    pub points: i32,
    pub difficulty: i32,
    pub timer_seconds: Option<i32>,
}

impl From<cards::Model> for Card {
    fn from(model: cards::Model) -> Self {
        Self {
            id: model.id,
            game_mode_id: model.game_mode_id,
            title: model.title,
            content: model.content,
            points: model.points,
            difficulty: model.difficulty,
            timer_seconds: model.timer_seconds,
        }
    }
}

pub async fn require_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<Card, DomainError> {
    cards_adapter::find_by_id(conn, card_id)
        .await?
        .map(Card::from)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Card, format!("Card {card_id} not found"))
        })
}

pub async fn find_many<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_ids: &[i64],
) -> Result<Vec<Card>, DomainError> {
    let rows = cards_adapter::find_by_ids(conn, card_ids).await?;
    Ok(rows.into_iter().map(Card::from).collect())
}

/// The eligible pool for a room: every card of the given modes.
pub async fn ids_for_modes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mode_ids: &[i64],
) -> Result<Vec<i64>, DomainError> {
    Ok(cards_adapter::ids_for_modes(conn, mode_ids).await?)
}
