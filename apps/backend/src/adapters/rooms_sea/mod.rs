//! SeaORM adapter for rooms.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::rooms;

pub mod dto;

pub use dto::{RoomCreate, RoomUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find_by_id(room_id).one(conn).await
}

/// `SELECT ... FOR UPDATE` on Postgres. SQLite has no row locks; its single
/// writer already serializes the transaction.
pub async fn lock_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find_by_id(room_id)
        .lock_exclusive()
        .one(conn)
        .await
}

pub async fn find_active_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find()
        .filter(rooms::Column::Code.eq(code))
        .filter(rooms::Column::IsActive.eq(true))
        .one(conn)
        .await
}

/// Active rooms still in the lobby, newest first.
pub async fn list_joinable<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find()
        .filter(rooms::Column::IsActive.eq(true))
        .filter(rooms::Column::IsGameStarted.eq(false))
        .order_by_desc(rooms::Column::Id)
        .all(conn)
        .await
}

pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomCreate,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    rooms::ActiveModel {
        id: NotSet,
        code: Set(dto.code),
        admin_id: Set(dto.admin_id),
        name: Set(dto.name),
        capacity: Set(dto.capacity),
        is_active: Set(true),
        is_game_started: Set(false),
        current_card_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn update_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    dto: RoomUpdate,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let mut room = rooms::ActiveModel {
        id: sea_orm::ActiveValue::Unchanged(room_id),
        updated_at: Set(time::OffsetDateTime::now_utc()),
        ..Default::default()
    };
    if let Some(admin_id) = dto.admin_id {
        room.admin_id = Set(admin_id);
    }
    if let Some(is_active) = dto.is_active {
        room.is_active = Set(is_active);
    }
    if let Some(started) = dto.is_game_started {
        room.is_game_started = Set(started);
    }
    if let Some(card) = dto.current_card_id {
        room.current_card_id = Set(card);
    }
    room.update(conn).await
}
