use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::card_stats;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardTally {
    pub drawn: i32,
    pub completed: i32,
    pub failed: i32,
}

pub async fn bump<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    card_id: i64,
    tally: CardTally,
) -> Result<card_stats::Model, sea_orm::DbErr> {
    let existing = card_stats::Entity::find()
        .filter(card_stats::Column::UserId.eq(user_id))
        .filter(card_stats::Column::CardId.eq(card_id))
        .one(conn)
        .await?;
    match existing {
        Some(row) => {
            let mut active: card_stats::ActiveModel = row.clone().into();
            active.times_drawn = Set(row.times_drawn + tally.drawn);
            active.times_completed = Set(row.times_completed + tally.completed);
            active.times_failed = Set(row.times_failed + tally.failed);
            active.update(conn).await
        }
        None => {
            card_stats::ActiveModel {
                id: NotSet,
                user_id: Set(user_id),
                card_id: Set(card_id),
                times_drawn: Set(tally.drawn),
                times_completed: Set(tally.completed),
                times_failed: Set(tally.failed),
            }
            .insert(conn)
            .await
        }
    }
}

/// Most-drawn cards for a user, ties broken by card id.
pub async fn top_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    limit: u64,
) -> Result<Vec<card_stats::Model>, sea_orm::DbErr> {
    card_stats::Entity::find()
        .filter(card_stats::Column::UserId.eq(user_id))
        .order_by_desc(card_stats::Column::TimesDrawn)
        .order_by_asc(card_stats::Column::CardId)
        .limit(limit)
        .all(conn)
        .await
}
