//! DTOs for accounts_sea adapter.

use time::OffsetDateTime;

/// DTO for creating an account. The digest is already computed.
#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub display_name: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}
