use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::player_stats;

/// Totals folded into a user's lifetime record at the end of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTotals {
    pub won: bool,
    pub points: i32,
    pub drinks: i32,
    pub completed: i32,
    pub failed: i32,
}

pub async fn find<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<player_stats::Model>, sea_orm::DbErr> {
    player_stats::Entity::find_by_id(user_id).one(conn).await
}

pub async fn fold_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    totals: GameTotals,
) -> Result<player_stats::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let won = i32::from(totals.won);
    match find(conn, user_id).await? {
        Some(row) => {
            let mut active: player_stats::ActiveModel = row.clone().into();
            active.games_played = Set(row.games_played + 1);
            active.games_won = Set(row.games_won + won);
            active.total_points = Set(row.total_points + totals.points);
            active.max_points_in_game = Set(row.max_points_in_game.max(totals.points));
            active.cards_completed = Set(row.cards_completed + totals.completed);
            active.cards_failed = Set(row.cards_failed + totals.failed);
            active.total_drinks = Set(row.total_drinks + totals.drinks);
            active.updated_at = Set(now);
            active.update(conn).await
        }
        None => {
            player_stats::ActiveModel {
                user_id: Set(user_id),
                games_played: Set(1),
                games_won: Set(won),
                total_points: Set(totals.points),
                max_points_in_game: Set(totals.points.max(0)),
                cards_completed: Set(totals.completed),
                cards_failed: Set(totals.failed),
                total_drinks: Set(totals.drinks),
                updated_at: Set(now),
            }
            .insert(conn)
            .await
        }
    }
}
