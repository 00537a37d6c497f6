//! Room repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::rooms_sea::{self as rooms_adapter, RoomCreate, RoomUpdate};
use crate::entities::rooms;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: i64,
    pub code: String,
    pub admin_id: i64,
    pub name: String,
    pub capacity: i32,
    pub is_active: bool,
    pub is_game_started: bool,
    pub current_card_id: Option<i64>,
    pub created_at: OffsetDateTime,
}

impl Room {
    pub fn is_joinable(&self) -> bool {
        self.is_active && !self.is_game_started
    }
}

impl From<rooms::Model> for Room {
    fn from(model: rooms::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            admin_id: model.admin_id,
            name: model.name,
            capacity: model.capacity,
            is_active: model.is_active,
            is_game_started: model.is_game_started,
            current_card_id: model.current_card_id,
            created_at: model.created_at,
        }
    }
}

fn room_not_found(room_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Room, format!("Room {room_id} not found"))
}

pub async fn require_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Room, DomainError> {
    rooms_adapter::find_by_id(conn, room_id)
        .await?
        .map(Room::from)
        .ok_or_else(|| room_not_found(room_id))
}

/// Load the room and hold its row lock until the transaction ends.
pub async fn lock_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Room, DomainError> {
    rooms_adapter::lock_by_id(conn, room_id)
        .await?
        .map(Room::from)
        .ok_or_else(|| room_not_found(room_id))
}

pub async fn find_active_by_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<Room>, DomainError> {
    Ok(rooms_adapter::find_active_by_code(conn, code)
        .await?
        .map(Room::from))
}

pub async fn list_joinable<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Room>, DomainError> {
    let rows = rooms_adapter::list_joinable(conn).await?;
    Ok(rows.into_iter().map(Room::from).collect())
}

pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: String,
    admin_id: i64,
    name: String,
    capacity: i32,
) -> Result<Room, DomainError> {
    let dto = RoomCreate {
        code,
        admin_id,
        name,
        capacity,
    };
    Ok(rooms_adapter::create_room(conn, dto).await?.into())
}

pub async fn set_admin<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    admin_id: i64,
) -> Result<Room, DomainError> {
    let dto = RoomUpdate {
        admin_id: Some(admin_id),
        ..Default::default()
    };
    Ok(rooms_adapter::update_room(conn, room_id, dto).await?.into())
}

/// Last member left: the room is closed for good.
pub async fn deactivate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Room, DomainError> {
    let dto = RoomUpdate {
        is_active: Some(false),
        is_game_started: Some(false),
        current_card_id: Some(None),
        ..Default::default()
    };
    Ok(rooms_adapter::update_room(conn, room_id, dto).await?.into())
}

/// Flip the started flag; the current card is cleared either way.
pub async fn set_game_started<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    started: bool,
) -> Result<Room, DomainError> {
    let dto = RoomUpdate {
        is_game_started: Some(started),
        current_card_id: Some(None),
        ..Default::default()
    };
    Ok(rooms_adapter::update_room(conn, room_id, dto).await?.into())
}

pub async fn set_current_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    card_id: Option<i64>,
) -> Result<Room, DomainError> {
    let dto = RoomUpdate {
        current_card_id: Some(card_id),
        ..Default::default()
    };
    Ok(rooms_adapter::update_room(conn, room_id, dto).await?.into())
}
