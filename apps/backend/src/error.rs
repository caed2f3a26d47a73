use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::errors::ErrorCode;
use crate::protocol::message::{Errors, Message, NewGameErrors, UserErrors};

/// Which part of the wire `errors` object an error is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    User,
    NewGame,
    Application,
}

/// Caller-facing error produced by the operation boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        subject: Subject,
        field: Option<&'static str>,
        detail: String,
    },
    #[error("Not found: {detail}")]
    NotFound {
        code: ErrorCode,
        subject: Subject,
        field: Option<&'static str>,
        detail: String,
    },
    #[error("Conflict: {detail}")]
    Conflict {
        code: ErrorCode,
        subject: Subject,
        field: Option<&'static str>,
        detail: String,
    },
    #[error("Database error: {detail}")]
    Db { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Db { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::Validation { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Db { detail, .. }
            | AppError::Internal { detail }
            | AppError::Config { detail } => detail,
        }
    }

    pub fn subject(&self) -> Subject {
        match self {
            AppError::Validation { subject, .. }
            | AppError::NotFound { subject, .. }
            | AppError::Conflict { subject, .. } => *subject,
            _ => Subject::Application,
        }
    }

    fn field(&self) -> Option<&'static str> {
        match self {
            AppError::Validation { field, .. }
            | AppError::NotFound { field, .. }
            | AppError::Conflict { field, .. } => *field,
            _ => None,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            subject: Subject::Application,
            field: None,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// Render into the wire `errors` object, keyed by subject and field.
    ///
    /// Storage, internal and configuration failures only ever show their
    /// generic detail under `application`.
    pub fn to_errors(&self) -> Errors {
        let message = vec![self.detail().to_string()];
        let mut errors = Errors::default();

        match (self.subject(), self.field()) {
            (Subject::User, Some("id")) => {
                errors.user = Some(UserErrors {
                    id: message,
                    ..UserErrors::default()
                })
            }
            (Subject::User, Some("password")) => {
                errors.user = Some(UserErrors {
                    password: message,
                    ..UserErrors::default()
                })
            }
            (Subject::User, _) => {
                errors.user = Some(UserErrors {
                    display_name: message,
                    ..UserErrors::default()
                })
            }
            (Subject::NewGame, Some("label")) => {
                errors.new_game = Some(NewGameErrors {
                    label: message,
                    ..NewGameErrors::default()
                })
            }
            (Subject::NewGame, _) => {
                errors.new_game = Some(NewGameErrors {
                    players: message,
                    ..NewGameErrors::default()
                })
            }
            (Subject::Application, _) => errors.application = message,
        }

        errors
    }

    /// Wrap into a full response envelope.
    pub fn to_message(&self) -> Message {
        Message {
            errors: Some(self.to_errors()),
            ..Message::default()
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(kind, detail) => {
                let (code, subject, field) = match kind {
                    ValidationKind::LabelRequired => {
                        (ErrorCode::LabelRequired, Subject::NewGame, Some("label"))
                    }
                    ValidationKind::PlayersRequired => {
                        (ErrorCode::PlayersRequired, Subject::NewGame, Some("players"))
                    }
                    ValidationKind::UnknownPlayer(_) => {
                        (ErrorCode::UnknownPlayer, Subject::NewGame, Some("players"))
                    }
                    ValidationKind::DisplayNameRequired => (
                        ErrorCode::DisplayNameRequired,
                        Subject::User,
                        Some("display_name"),
                    ),
                    ValidationKind::PasswordTooShort => {
                        (ErrorCode::PasswordTooShort, Subject::User, Some("password"))
                    }
                    ValidationKind::InvalidPassword => {
                        (ErrorCode::InvalidPassword, Subject::User, Some("password"))
                    }
                    ValidationKind::InvalidTurn => {
                        (ErrorCode::InvalidTurn, Subject::Application, None)
                    }
                    _ => (ErrorCode::ValidationError, Subject::Application, None),
                };
                AppError::Validation {
                    code,
                    subject,
                    field,
                    detail,
                }
            }
            DomainError::NotFound(kind, detail) => {
                let (code, subject, field) = match kind {
                    NotFoundKind::Account => {
                        (ErrorCode::AccountNotFound, Subject::User, Some("display_name"))
                    }
                    NotFoundKind::Session => (ErrorCode::SessionNotFound, Subject::Application, None),
                    NotFoundKind::Game => (ErrorCode::GameNotFound, Subject::Application, None),
                    NotFoundKind::InboxEntry => {
                        (ErrorCode::InboxEntryNotFound, Subject::Application, None)
                    }
                    _ => (ErrorCode::NotFound, Subject::Application, None),
                };
                AppError::NotFound {
                    code,
                    subject,
                    field,
                    detail,
                }
            }
            DomainError::Conflict(kind, detail) => {
                let (code, subject, field) = match kind {
                    ConflictKind::NotYourTurn => (ErrorCode::NotYourTurn, Subject::Application, None),
                    ConflictKind::DisplayNameTaken => (
                        ErrorCode::DisplayNameTaken,
                        Subject::User,
                        Some("display_name"),
                    ),
                    _ => (ErrorCode::Conflict, Subject::Application, None),
                };
                AppError::Conflict {
                    code,
                    subject,
                    field,
                    detail,
                }
            }
            DomainError::Infra(kind, detail) => {
                let code = match kind {
                    InfraErrorKind::DbUnavailable => ErrorCode::DbUnavailable,
                    InfraErrorKind::Timeout => ErrorCode::DbTimeout,
                    InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
                    _ => ErrorCode::DbError,
                };
                AppError::Db { code, detail }
            }
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(crate::infra::db_errors::map_db_err(e))
    }
}
