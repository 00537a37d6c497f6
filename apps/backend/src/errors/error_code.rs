//! Error codes for the party room API.
//!
//! Every failure that reaches a client carries one of these codes. Add new
//! codes here; never pass ad-hoc strings as error codes.

use core::fmt;

/// Stable SCREAMING_SNAKE_CASE codes that appear in Problem Details bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    Unauthorized,
    UnauthorizedMissingBearer,
    UnauthorizedInvalidJwt,
    UnauthorizedExpiredJwt,
    ForbiddenUserNotFound,

    // Room lifecycle
    AlreadyInRoom,
    NotInRoom,
    RoomNotFound,
    RoomFull,
    /// Caller is not the room admin
    NotAuthorized,
    SelfKick,
    InsufficientPlayers,
    NoEnabledModes,
    CodeGenerationExhausted,

    // Game flow
    GameNotStarted,
    NoActiveCard,
    AlreadyActed,
    OutOfTurn,
    InvalidPayload,

    // Lookups
    UserNotFound,
    GameModeNotFound,
    CardNotFound,
    NotFound,

    // Infrastructure
    StoreUnavailable,
    UniqueViolation,
    ConfigError,
    Internal,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::AlreadyInRoom => "ALREADY_IN_ROOM",
            Self::NotInRoom => "NOT_IN_ROOM",
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::RoomFull => "ROOM_FULL",
            Self::NotAuthorized => "NOT_AUTHORIZED",
            Self::SelfKick => "SELF_KICK",
            Self::InsufficientPlayers => "INSUFFICIENT_PLAYERS",
            Self::NoEnabledModes => "NO_ENABLED_MODES",
            Self::CodeGenerationExhausted => "CODE_GENERATION_EXHAUSTED",
            Self::GameNotStarted => "GAME_NOT_STARTED",
            Self::NoActiveCard => "NO_ACTIVE_CARD",
            Self::AlreadyActed => "ALREADY_ACTED",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::InvalidPayload => "INVALID_PAYLOAD",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::GameModeNotFound => "GAME_MODE_NOT_FOUND",
            Self::CardNotFound => "CARD_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
