use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::games;

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    games::ActiveModel {
        id: NotSet,
        room_id: Set(room_id),
        started_at: Set(time::OffsetDateTime::now_utc()),
        ended_at: Set(None),
    }
    .insert(conn)
    .await
}

/// The game with no end timestamp, newest first if several leaked.
pub async fn find_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::RoomId.eq(room_id))
        .filter(games::Column::EndedAt.is_null())
        .order_by_desc(games::Column::Id)
        .one(conn)
        .await
}

pub async fn close_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: games::Model,
) -> Result<games::Model, sea_orm::DbErr> {
    let mut active: games::ActiveModel = game.into();
    active.ended_at = Set(Some(time::OffsetDateTime::now_utc()));
    active.update(conn).await
}
