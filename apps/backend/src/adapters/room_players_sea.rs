//! SeaORM adapter for room memberships.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::room_players;

/// Signed deltas applied to one membership's running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreDelta {
    pub points: i32,
    pub drinks: i32,
    pub completed: i32,
    pub failed: i32,
}

pub async fn find_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<room_players::Model>, sea_orm::DbErr> {
    room_players::Entity::find()
        .filter(room_players::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

/// Members in join order.
pub async fn list_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Vec<room_players::Model>, sea_orm::DbErr> {
    room_players::Entity::find()
        .filter(room_players::Column::RoomId.eq(room_id))
        .order_by_asc(room_players::Column::JoinedAt)
        .order_by_asc(room_players::Column::Id)
        .all(conn)
        .await
}

pub async fn count_by_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    room_players::Entity::find()
        .filter(room_players::Column::RoomId.eq(room_id))
        .count(conn)
        .await
}

pub async fn create_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    user_id: i64,
) -> Result<room_players::Model, sea_orm::DbErr> {
    room_players::ActiveModel {
        id: NotSet,
        room_id: Set(room_id),
        user_id: Set(user_id),
        points: Set(0),
        drinks: Set(0),
        cards_completed: Set(0),
        cards_failed: Set(0),
        joined_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn delete_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = room_players::Entity::delete_many()
        .filter(room_players::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

/// Adds `delta` in a single UPDATE so concurrent writers never lose increments.
pub async fn apply_delta<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    membership_id: i64,
    delta: ScoreDelta,
) -> Result<(), sea_orm::DbErr> {
    room_players::Entity::update_many()
        .col_expr(
            room_players::Column::Points,
            Expr::col(room_players::Column::Points).add(delta.points),
        )
        .col_expr(
            room_players::Column::Drinks,
            Expr::col(room_players::Column::Drinks).add(delta.drinks),
        )
        .col_expr(
            room_players::Column::CardsCompleted,
            Expr::col(room_players::Column::CardsCompleted).add(delta.completed),
        )
        .col_expr(
            room_players::Column::CardsFailed,
            Expr::col(room_players::Column::CardsFailed).add(delta.failed),
        )
        .filter(room_players::Column::Id.eq(membership_id))
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn set_drinks<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    membership_id: i64,
    drinks: i32,
) -> Result<(), sea_orm::DbErr> {
    room_players::Entity::update_many()
        .col_expr(room_players::Column::Drinks, Expr::value(drinks))
        .filter(room_players::Column::Id.eq(membership_id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Zero every running total in the room (new game).
pub async fn reset_scores<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<(), sea_orm::DbErr> {
    room_players::Entity::update_many()
        .col_expr(room_players::Column::Points, Expr::value(0))
        .col_expr(room_players::Column::Drinks, Expr::value(0))
        .col_expr(room_players::Column::CardsCompleted, Expr::value(0))
        .col_expr(room_players::Column::CardsFailed, Expr::value(0))
        .filter(room_players::Column::RoomId.eq(room_id))
        .exec(conn)
        .await?;
    Ok(())
}
