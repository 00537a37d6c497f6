//! Append-only action log. Rows are never updated or deleted.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::game_actions::{self, ActionType};

pub mod dto;

pub use dto::ActionCreate;

pub async fn append<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ActionCreate,
) -> Result<game_actions::Model, sea_orm::DbErr> {
    game_actions::ActiveModel {
        id: NotSet,
        room_id: Set(dto.room_id),
        card_id: Set(dto.card_id),
        user_id: Set(dto.user_id),
        action_type: Set(dto.action_type),
        action_data: Set(dto.action_data),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

/// Id of the most recent round-reset marker for the room, if any.
pub async fn last_reset_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Option<i64>, sea_orm::DbErr> {
    game_actions::Entity::find()
        .filter(game_actions::Column::RoomId.eq(room_id))
        .filter(game_actions::Column::ActionType.eq(ActionType::RoundReset))
        .select_only()
        .column(game_actions::Column::Id)
        .order_by_desc(game_actions::Column::Id)
        .into_tuple::<i64>()
        .one(conn)
        .await
}

/// Distinct cards that received any action after log id `after_id`.
pub async fn played_card_ids_since<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    after_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    let rows = game_actions::Entity::find()
        .filter(game_actions::Column::RoomId.eq(room_id))
        .filter(game_actions::Column::Id.gt(after_id))
        .filter(game_actions::Column::ActionType.ne(ActionType::RoundReset))
        .filter(game_actions::Column::CardId.is_not_null())
        .select_only()
        .column(game_actions::Column::CardId)
        .distinct()
        .into_tuple::<Option<i64>>()
        .all(conn)
        .await?;
    Ok(rows.into_iter().flatten().collect())
}

/// Card of the room's most recent non-reset action.
pub async fn last_card_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Option<i64>, sea_orm::DbErr> {
    let row = game_actions::Entity::find()
        .filter(game_actions::Column::RoomId.eq(room_id))
        .filter(game_actions::Column::ActionType.ne(ActionType::RoundReset))
        .filter(game_actions::Column::CardId.is_not_null())
        .select_only()
        .column(game_actions::Column::CardId)
        .order_by_desc(game_actions::Column::Id)
        .into_tuple::<Option<i64>>()
        .one(conn)
        .await?;
    Ok(row.flatten())
}

/// Actions on `card_id` after log id `after_id`, oldest first.
pub async fn list_for_card_since<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    card_id: i64,
    after_id: i64,
) -> Result<Vec<game_actions::Model>, sea_orm::DbErr> {
    game_actions::Entity::find()
        .filter(game_actions::Column::RoomId.eq(room_id))
        .filter(game_actions::Column::CardId.eq(card_id))
        .filter(game_actions::Column::Id.gt(after_id))
        .order_by_asc(game_actions::Column::Id)
        .all(conn)
        .await
}
