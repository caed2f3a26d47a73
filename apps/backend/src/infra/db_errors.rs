//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos and services convert it into
//! `crate::errors::domain::DomainError` here, and the operation boundary then
//! maps `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == '"' || c == ',')
        .next()
        .filter(|s| !s.is_empty())
}

/// Map a unique violation to the caller-facing conflict it represents.
fn map_unique_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    let display_name_taken = match extract_sqlite_table_column(error_msg) {
        Some(table_column) => table_column == "accounts.display_name",
        None => error_msg.contains("accounts_display_name_key"),
    };
    if display_name_taken {
        return Some((ConflictKind::DisplayNameTaken, "Display name already taken."));
    }
    None
}

/// True when the error is a foreign key violation on either backend.
pub fn is_fk_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    mentions_sqlstate(&msg, "23503") || msg.contains("FOREIGN KEY constraint failed")
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
///
/// Raw driver text is only ever logged (redacted), never returned.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::Json(_) | sea_orm::DbErr::Type(_) => {
            error!(raw_error = %Redacted(&error_msg), "Stored row could not be decoded");
            return DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is invalid");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if let Some((kind, detail)) = map_unique_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if is_fk_violation(&e) {
        warn!(raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") {
        warn!(raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("timed out")
        || error_msg.contains("database is locked")
    {
        warn!(raw_error = %Redacted(&error_msg), "Database timeout or lock contention");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
