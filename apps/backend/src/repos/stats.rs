//! Lifetime player statistics and per-card counters.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::{card_stats_sea, game_modes_sea, player_stats_sea};
use crate::domain::modes::StatOutcome;
use crate::errors::domain::DomainError;
use crate::repos::cards;

pub use card_stats_sea::CardTally;
pub use player_stats_sea::GameTotals;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    pub games_played: i32,
    pub games_won: i32,
    pub total_points: i32,
    pub max_points_in_game: i32,
    pub cards_completed: i32,
    pub cards_failed: i32,
    pub total_drinks: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardStatLine {
    pub card_id: i64,
    pub title: String,
    pub mode_name: String,
    pub times_drawn: i32,
    pub times_completed: i32,
    pub times_failed: i32,
}

impl From<StatOutcome> for CardTally {
    fn from(outcome: StatOutcome) -> Self {
        Self {
            drawn: 1,
            completed: i32::from(outcome == StatOutcome::Completed),
            failed: i32::from(outcome == StatOutcome::Failed),
        }
    }
}

pub async fn player_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<PlayerStats, DomainError> {
    let stats = player_stats_sea::find(conn, user_id)
        .await?
        .map(|row| PlayerStats {
            games_played: row.games_played,
            games_won: row.games_won,
            total_points: row.total_points,
            max_points_in_game: row.max_points_in_game,
            cards_completed: row.cards_completed,
            cards_failed: row.cards_failed,
            total_drinks: row.total_drinks,
        })
        .unwrap_or_default();
    Ok(stats)
}

pub async fn fold_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    totals: GameTotals,
) -> Result<(), DomainError> {
    player_stats_sea::fold_game(conn, user_id, totals).await?;
    Ok(())
}

pub async fn record_card_outcome<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    card_id: i64,
    outcome: StatOutcome,
) -> Result<(), DomainError> {
    card_stats_sea::bump(conn, user_id, card_id, outcome.into()).await?;
    Ok(())
}

/// The user's most-drawn cards with the mode each belongs to.
pub async fn top_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    limit: u64,
) -> Result<Vec<CardStatLine>, DomainError> {
    let rows = card_stats_sea::top_for_user(conn, user_id, limit).await?;
    let card_ids: Vec<i64> = rows.iter().map(|r| r.card_id).collect();
    let cards: HashMap<i64, cards::Card> = cards::find_many(conn, &card_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let mode_names: HashMap<i64, String> = game_modes_sea::list_modes(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, m.display_name))
        .collect();

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let card = cards.get(&row.card_id)?;
            Some(CardStatLine {
                card_id: row.card_id,
                title: card.title.clone(),
                mode_name: mode_names
                    .get(&card.game_mode_id)
                    .cloned()
                    .unwrap_or_default(),
                times_drawn: row.times_drawn,
                times_completed: row.times_completed,
                times_failed: row.times_failed,
            })
        })
        .collect())
}
