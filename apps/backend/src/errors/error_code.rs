//! Error codes for the scrawl operation boundary.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// A new game needs a starting label
    LabelRequired,
    /// A new game needs at least one other player
    PlayersRequired,
    /// A player id in a new game does not exist
    UnknownPlayer,
    /// Registration without a display name
    DisplayNameRequired,
    /// Password shorter than the configured minimum
    PasswordTooShort,
    /// Password does not match the stored credential
    InvalidPassword,
    /// Turn body is inconsistent (e.g. drawing flag without a drawing)
    InvalidTurn,
    /// General validation error
    ValidationError,

    // Resource Not Found
    AccountNotFound,
    SessionNotFound,
    GameNotFound,
    InboxEntryNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Turn is not the caller's current turn
    NotYourTurn,
    /// Display name already registered
    DisplayNameTaken,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
    ConfigError,
    Internal,
}

impl ErrorCode {
    /// Returns the canonical string representation of this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LabelRequired => "LABEL_REQUIRED",
            Self::PlayersRequired => "PLAYERS_REQUIRED",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::DisplayNameRequired => "DISPLAY_NAME_REQUIRED",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidTurn => "INVALID_TURN",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::InboxEntryNotFound => "INBOX_ENTRY_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::DisplayNameTaken => "DISPLAY_NAME_TAKEN",
            Self::Conflict => "CONFLICT",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
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
