//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert here so that higher layers
//! only ever see `DomainError`. Details returned to callers never include the
//! raw driver message.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::web::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract `table.column` from SQLite "UNIQUE constraint failed: table.column".
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == ',' || c == '"')
        .next()
        .filter(|s| !s.is_empty())
}

fn map_unique_to_conflict(error_msg: &str) -> (ConflictKind, &'static str) {
    let sqlite_column = extract_sqlite_table_column(error_msg);
    let is = |sqlite: &str, pg_index: &str| {
        sqlite_column == Some(sqlite) || error_msg.contains(pg_index)
    };

    if is("room_players.user_id", "idx_room_players_user_unique") {
        return (ConflictKind::AlreadyInRoom, "User is already in a room");
    }
    if is("room_game_modes.room_id", "idx_room_game_modes_room_mode_unique") {
        return (
            ConflictKind::Unique("room_game_modes".into()),
            "Game mode already configured for room",
        );
    }
    if is("card_stats.user_id", "idx_card_stats_user_card_unique") {
        return (
            ConflictKind::Unique("card_stats".into()),
            "Card statistics already exist",
        );
    }
    if is("users.sub", "idx_users_sub_unique") {
        return (ConflictKind::Unique("users.sub".into()), "User already exists");
    }
    (
        ConflictKind::Unique("unknown".into()),
        "Unique constraint violation",
    )
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            return DomainError::not_found(
                NotFoundKind::Other(what.clone()),
                "Record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::StoreUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        let (kind, detail) = map_unique_to_conflict(&error_msg);
        return DomainError::conflict(kind, detail);
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::invalid_payload("Referenced record does not exist");
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Check constraint violation");
        return DomainError::invalid_payload("Value out of allowed range");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("database is locked")
        || error_msg.contains("unavailable")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
