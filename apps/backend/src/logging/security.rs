use tracing::warn;

use crate::logging::pii::Redacted;

/// Log a security-relevant login failure event.
pub fn login_failed(reason: &str, display_name: &str) {
    warn!(
        event = "SECURITY_LOGIN_FAILED",
        display_name = %Redacted(display_name),
        reason,
        "Authentication failure"
    );
}

/// Log a rejected session token lookup.
pub fn session_rejected(token: &str) {
    warn!(
        event = "SECURITY_SESSION_REJECTED",
        token = %Redacted(token),
        "Unknown or expired session token"
    );
}
