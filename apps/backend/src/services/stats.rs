//! End-of-game standings and lifetime statistics.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use tracing::info;

use super::{ensure_admin, locked_room_of};
use crate::domain::ranking::rank_members;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::memberships::{self, Membership};
use crate::repos::stats::{self, CardStatLine, GameTotals, PlayerStats};
use crate::repos::{games, rooms, users};

const TOP_CARDS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalStanding {
    pub user_id: i64,
    pub display_name: String,
    pub rank: u32,
    pub points: i32,
    pub drinks: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub room_id: i64,
    pub game_id: Option<i64>,
    pub standings: Vec<FinalStanding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStatsView {
    #[serde(flatten)]
    pub totals: PlayerStats,
    pub top_cards: Vec<CardStatLine>,
}

#[derive(Clone, Default)]
pub struct StatsService;

impl StatsService {
    pub fn new() -> Self {
        Self
    }

    /// End the running game: rank members, fold their totals into lifetime
    /// stats, close the session and put the room back in the lobby.
    pub async fn end_game(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
    ) -> Result<GameSummary, AppError> {
        let (_, room) = locked_room_of(txn, user_id).await?;
        ensure_admin(&room, user_id)?;
        if !room.is_game_started {
            return Err(DomainError::not_authorized("There is no game in progress to end").into());
        }

        let members = memberships::list_by_room(txn, room.id).await?;
        let scores: Vec<_> = members.iter().map(Membership::score).collect();
        let ranked = rank_members(&scores);
        let by_user: HashMap<i64, &Membership> = members.iter().map(|m| (m.user_id, m)).collect();

        for standing in &ranked {
            let Some(member) = by_user.get(&standing.user_id) else {
                continue;
            };
            let totals = GameTotals {
                won: standing.rank == 1,
                points: member.points,
                drinks: member.drinks,
                completed: member.cards_completed,
                failed: member.cards_failed,
            };
            stats::fold_game(txn, member.user_id, totals).await?;
        }

        let game = games::close_open_session(txn, room.id).await?;
        rooms::set_game_started(txn, room.id, false).await?;

        let ids: Vec<i64> = ranked.iter().map(|s| s.user_id).collect();
        let names = users::display_names(txn, &ids).await?;
        let standings: Vec<FinalStanding> = ranked
            .into_iter()
            .map(|s| FinalStanding {
                display_name: names.get(&s.user_id).cloned().unwrap_or_default(),
                user_id: s.user_id,
                rank: s.rank,
                points: s.points,
                drinks: s.drinks,
            })
            .collect();

        info!(
            room_id = room.id,
            game_id = game.as_ref().map(|g| g.id),
            winner_id = standings.first().map(|s| s.user_id),
            players = standings.len(),
            "game_ended"
        );
        Ok(GameSummary {
            room_id: room.id,
            game_id: game.map(|g| g.id),
            standings,
        })
    }

    /// Lifetime totals (zeros for a newcomer) and the most-drawn cards.
    pub async fn player_stats<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<PlayerStatsView, AppError> {
        let totals = stats::player_stats(conn, user_id).await?;
        let top_cards = stats::top_cards(conn, user_id, TOP_CARDS).await?;
        Ok(PlayerStatsView { totals, top_cards })
    }
}
