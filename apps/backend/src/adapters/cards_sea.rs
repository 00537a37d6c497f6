use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::entities::cards;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_id: i64,
) -> Result<Option<cards::Model>, sea_orm::DbErr> {
    cards::Entity::find_by_id(card_id).one(conn).await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    card_ids: &[i64],
) -> Result<Vec<cards::Model>, sea_orm::DbErr> {
    if card_ids.is_empty() {
        return Ok(Vec::new());
    }
    cards::Entity::find()
        .filter(cards::Column::Id.is_in(card_ids.iter().copied()))
        .all(conn)
        .await
}

/// Ids of every card belonging to one of `mode_ids`, ascending.
pub async fn ids_for_modes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mode_ids: &[i64],
) -> Result<Vec<i64>, sea_orm::DbErr> {
    if mode_ids.is_empty() {
        return Ok(Vec::new());
    }
    cards::Entity::find()
        .filter(cards::Column::GameModeId.is_in(mode_ids.iter().copied()))
        .select_only()
        .column(cards::Column::Id)
        .order_by_asc(cards::Column::Id)
        .into_tuple::<i64>()
        .all(conn)
        .await
}
