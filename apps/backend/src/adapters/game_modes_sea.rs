//! Mode catalog plus the per-room enablement table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{game_modes, room_game_modes};

pub async fn list_modes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<game_modes::Model>, sea_orm::DbErr> {
    game_modes::Entity::find()
        .order_by_asc(game_modes::Column::Id)
        .all(conn)
        .await
}

pub async fn find_mode<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    mode_id: i64,
) -> Result<Option<game_modes::Model>, sea_orm::DbErr> {
    game_modes::Entity::find_by_id(mode_id).one(conn).await
}

pub async fn list_room_modes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Vec<room_game_modes::Model>, sea_orm::DbErr> {
    room_game_modes::Entity::find()
        .filter(room_game_modes::Column::RoomId.eq(room_id))
        .order_by_asc(room_game_modes::Column::GameModeId)
        .all(conn)
        .await
}

pub async fn enabled_mode_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    room_game_modes::Entity::find()
        .filter(room_game_modes::Column::RoomId.eq(room_id))
        .filter(room_game_modes::Column::IsEnabled.eq(true))
        .select_only()
        .column(room_game_modes::Column::GameModeId)
        .order_by_asc(room_game_modes::Column::GameModeId)
        .into_tuple::<i64>()
        .all(conn)
        .await
}

/// Insert or flip the enablement row for `(room, mode)`.
pub async fn set_room_mode<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    mode_id: i64,
    enabled: bool,
) -> Result<room_game_modes::Model, sea_orm::DbErr> {
    let existing = room_game_modes::Entity::find()
        .filter(room_game_modes::Column::RoomId.eq(room_id))
        .filter(room_game_modes::Column::GameModeId.eq(mode_id))
        .one(conn)
        .await?;
    match existing {
        Some(row) => {
            let mut active: room_game_modes::ActiveModel = row.into();
            active.is_enabled = Set(enabled);
            active.update(conn).await
        }
        None => {
            room_game_modes::ActiveModel {
                id: NotSet,
                room_id: Set(room_id),
                game_mode_id: Set(mode_id),
                is_enabled: Set(enabled),
            }
            .insert(conn)
            .await
        }
    }
}
