//! Room lifecycle: create, join, leave, admin handoff, mode toggles, kicks
//! and game start.

use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ensure_admin, locked_room_of};
use crate::config::game::{GameConfig, ROOM_CODE_ALPHABET};
use crate::domain::rng::RandomSource;
use crate::domain::room_code::{generate_room_code, normalize_room_code};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
use crate::repos::game_modes::{self, RoomModeSetting};
use crate::repos::memberships::{self, Membership};
use crate::repos::rooms::{self, Room};
use crate::repos::users::{self, User};
use crate::repos::{game_actions, games};
use crate::web::rfc3339;

const MAX_ROOM_NAME_CHARS: usize = 64;
const MIN_PLAYERS: u64 = 2;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
}

/// What happened to the room when a member left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LeaveOutcome {
    Left { room_id: i64 },
    AdminTransferred { room_id: i64, new_admin_id: i64 },
    RoomClosed { room_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub admin_id: i64,
    pub capacity: i32,
    pub member_count: usize,
    pub is_active: bool,
    pub is_game_started: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberView {
    pub user_id: i64,
    pub display_name: String,
    pub is_admin: bool,
    pub points: i32,
    pub drinks: i32,
    pub cards_completed: i32,
    pub cards_failed: i32,
    pub joined_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomInfo {
    pub room: RoomSummary,
    /// Join order
    pub members: Vec<MemberView>,
    pub game_modes: Vec<RoomModeSetting>,
    pub me: MemberView,
}

/// Lobby listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomListing {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub admin_name: String,
    pub capacity: i32,
    pub member_count: usize,
    pub created_at: String,
}

/// Room lifecycle service.
#[derive(Clone)]
pub struct RoomService {
    config: GameConfig,
    rng: Arc<dyn RandomSource>,
}

impl RoomService {
    pub fn new(config: GameConfig, rng: Arc<dyn RandomSource>) -> Self {
        Self { config, rng }
    }

    /// Create a room with `user` as admin and every known mode enabled.
    pub async fn create_room(
        &self,
        txn: &DatabaseTransaction,
        user: &User,
        req: CreateRoomRequest,
    ) -> Result<Room, AppError> {
        if memberships::find_by_user(txn, user.id).await?.is_some() {
            return Err(already_in_room().into());
        }

        let name = room_name(req.name.as_deref(), &user.display_name)?;
        let capacity = self.config.effective_capacity(req.capacity);
        let code = self.unused_code(txn).await?;

        let room = rooms::create_room(txn, code, user.id, name, capacity).await?;
        memberships::create_membership(txn, room.id, user.id).await?;
        for mode in game_modes::list_modes(txn).await? {
            game_modes::set_enabled(txn, room.id, mode.id, true).await?;
        }

        info!(room_id = room.id, user_id = user.id, code = %room.code, capacity, "room_created");
        Ok(room)
    }

    pub async fn join_room(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        raw_code: &str,
    ) -> Result<Room, AppError> {
        let code = normalize_room_code(raw_code);
        if code.is_empty() {
            return Err(DomainError::invalid_payload("Room code is required").into());
        }
        if memberships::find_by_user(txn, user_id).await?.is_some() {
            return Err(already_in_room().into());
        }

        let found = rooms::find_active_by_code(txn, &code)
            .await?
            .ok_or_else(|| room_not_found(&code))?;
        // Lock before counting so concurrent joins cannot overfill the room.
        let room = rooms::lock_room(txn, found.id).await?;
        if !room.is_joinable() {
            return Err(room_not_found(&code).into());
        }

        let count = memberships::count_by_room(txn, room.id).await?;
        if count >= room.capacity.max(0) as u64 {
            return Err(DomainError::conflict(
                ConflictKind::RoomFull,
                format!("Room {code} is full ({} players)", room.capacity),
            )
            .into());
        }

        memberships::create_membership(txn, room.id, user_id).await?;
        info!(room_id = room.id, user_id, members = count + 1, "player_joined");
        Ok(room)
    }

    /// Remove the caller; hand admin to the earliest remaining member, or
    /// close the room when nobody is left.
    pub async fn leave_room(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
    ) -> Result<LeaveOutcome, AppError> {
        let (membership, room) = locked_room_of(txn, user_id).await?;
        memberships::remove_membership(txn, user_id).await?;
        info!(room_id = room.id, user_id, "player_left");

        let remaining = memberships::list_by_room(txn, room.id).await?;
        let Some(successor) = remaining.first() else {
            if let Some(game) = games::close_open_session(txn, room.id).await? {
                debug!(room_id = room.id, game_id = game.id, "open game closed with empty room");
            }
            rooms::deactivate(txn, room.id).await?;
            info!(room_id = room.id, "room_closed");
            return Ok(LeaveOutcome::RoomClosed {
                room_id: membership.room_id,
            });
        };

        if room.admin_id != user_id {
            return Ok(LeaveOutcome::Left { room_id: room.id });
        }

        rooms::set_admin(txn, room.id, successor.user_id).await?;
        info!(
            room_id = room.id,
            previous_admin_id = user_id,
            new_admin_id = successor.user_id,
            "admin_transferred"
        );
        Ok(LeaveOutcome::AdminTransferred {
            room_id: room.id,
            new_admin_id: successor.user_id,
        })
    }

    pub async fn room_info<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<RoomInfo, AppError> {
        let membership = memberships::require_membership(conn, user_id).await?;
        let room = rooms::require_room(conn, membership.room_id).await?;
        let members = memberships::list_by_room(conn, room.id).await?;
        let game_modes = game_modes::room_settings(conn, room.id).await?;

        let ids: Vec<i64> = members.iter().map(|m| m.user_id).collect();
        let names = users::display_names(conn, &ids).await?;
        let views: Vec<MemberView> = members
            .iter()
            .map(|m| member_view(m, &room, names.get(&m.user_id)))
            .collect();
        let me = member_view(&membership, &room, names.get(&user_id));

        Ok(RoomInfo {
            room: summary(&room, views.len()),
            members: views,
            game_modes,
            me,
        })
    }

    /// Active rooms still in the lobby, read straight from the store.
    pub async fn list_active_rooms<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<RoomListing>, AppError> {
        let rooms = rooms::list_joinable(conn).await?;
        let admin_ids: Vec<i64> = rooms.iter().map(|r| r.admin_id).collect();
        let names = users::display_names(conn, &admin_ids).await?;

        let mut listings = Vec::with_capacity(rooms.len());
        for room in rooms {
            let member_count = memberships::count_by_room(conn, room.id).await? as usize;
            listings.push(RoomListing {
                id: room.id,
                code: room.code,
                name: room.name,
                admin_name: names.get(&room.admin_id).cloned().unwrap_or_default(),
                capacity: room.capacity,
                member_count,
                created_at: rfc3339(room.created_at),
            });
        }
        Ok(listings)
    }

    pub async fn toggle_game_mode(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        mode_id: i64,
        enabled: bool,
    ) -> Result<Vec<RoomModeSetting>, AppError> {
        let (_, room) = locked_room_of(txn, user_id).await?;
        ensure_admin(&room, user_id)?;
        let mode = game_modes::require_mode(txn, mode_id).await?;

        game_modes::set_enabled(txn, room.id, mode.id, enabled).await?;
        info!(room_id = room.id, mode = ?mode.slug, enabled, "game_mode_toggled");
        Ok(game_modes::room_settings(txn, room.id).await?)
    }

    pub async fn kick_player(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        target_user_id: i64,
    ) -> Result<(), AppError> {
        let (_, room) = locked_room_of(txn, user_id).await?;
        ensure_admin(&room, user_id)?;
        if target_user_id == user_id {
            return Err(DomainError::validation(
                ValidationKind::SelfKick,
                "You cannot kick yourself",
            )
            .into());
        }

        match memberships::find_by_user(txn, target_user_id).await? {
            Some(target) if target.room_id == room.id => {
                memberships::remove_membership(txn, target_user_id).await?;
                info!(room_id = room.id, user_id = target_user_id, admin_id = user_id, "player_kicked");
                Ok(())
            }
            _ => Err(DomainError::conflict(
                ConflictKind::NotInRoom,
                format!("User {target_user_id} is not in this room"),
            )
            .into()),
        }
    }

    /// Start a game: needs two members and one enabled mode. Scores are
    /// zeroed and the deck starts a fresh cycle.
    pub async fn start_game(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
    ) -> Result<Room, AppError> {
        let (_, room) = locked_room_of(txn, user_id).await?;
        ensure_admin(&room, user_id)?;
        if room.is_game_started {
            debug!(room_id = room.id, "start requested for a running game");
            return Ok(room);
        }

        let count = memberships::count_by_room(txn, room.id).await?;
        if count < MIN_PLAYERS {
            return Err(DomainError::conflict(
                ConflictKind::InsufficientPlayers,
                format!("At least 2 players are needed, the room has {count}"),
            )
            .into());
        }
        if game_modes::enabled_mode_ids(txn, room.id).await?.is_empty() {
            return Err(DomainError::conflict(
                ConflictKind::NoEnabledModes,
                "Enable at least one game mode before starting",
            )
            .into());
        }

        memberships::reset_scores(txn, room.id).await?;
        game_actions::append_round_reset(txn, room.id).await?;
        let game = games::start_session(txn, room.id).await?;
        let room = rooms::set_game_started(txn, room.id, true).await?;
        info!(room_id = room.id, game_id = game.id, players = count, "game_started");
        Ok(room)
    }

    /// Random code not used by any active room.
    async fn unused_code(&self, txn: &DatabaseTransaction) -> Result<String, DomainError> {
        for attempt in 1..=self.config.room_code_attempts {
            let code = generate_room_code(
                self.rng.as_ref(),
                ROOM_CODE_ALPHABET,
                self.config.room_code_length,
            );
            if rooms::find_active_by_code(txn, &code).await?.is_none() {
                return Ok(code);
            }
            debug!(attempt, "room code collision");
        }
        Err(DomainError::infra(
            InfraErrorKind::CodeGenerationExhausted,
            "Could not allocate a room code, try again",
        ))
    }
}

fn already_in_room() -> DomainError {
    DomainError::conflict(ConflictKind::AlreadyInRoom, "You are already in a room")
}

fn room_not_found(code: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Room, format!("No open room with code {code}"))
}

fn room_name(requested: Option<&str>, display_name: &str) -> Result<String, DomainError> {
    let name = requested.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Ok(format!("{display_name}'s room"));
    }
    if name.chars().count() > MAX_ROOM_NAME_CHARS {
        return Err(DomainError::invalid_payload(format!(
            "Room name must be at most {MAX_ROOM_NAME_CHARS} characters"
        )));
    }
    Ok(name.to_string())
}

pub(crate) fn summary(room: &Room, member_count: usize) -> RoomSummary {
    RoomSummary {
        id: room.id,
        code: room.code.clone(),
        name: room.name.clone(),
        admin_id: room.admin_id,
        capacity: room.capacity,
        member_count,
        is_active: room.is_active,
        is_game_started: room.is_game_started,
        created_at: rfc3339(room.created_at),
    }
}

fn member_view(m: &Membership, room: &Room, name: Option<&String>) -> MemberView {
    MemberView {
        user_id: m.user_id,
        display_name: name.cloned().unwrap_or_default(),
        is_admin: m.user_id == room.admin_id,
        points: m.points,
        drinks: m.drinks,
        cards_completed: m.cards_completed,
        cards_failed: m.cards_failed,
        joined_at: rfc3339(m.joined_at),
    }
}
