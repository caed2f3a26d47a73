//! Test helpers for generating unique test data
//!
//! Display names are unique across the whole accounts table, so every test
//! that registers an account derives its name from a ULID.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique display name for a test account.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_display_name;
///
/// let name = unique_display_name("alice");
/// assert!(name.starts_with("alice-"));
/// assert_ne!(name, unique_display_name("alice"));
/// ```
pub fn unique_display_name(prefix: &str) -> String {
    unique_str(prefix).to_lowercase()
}
