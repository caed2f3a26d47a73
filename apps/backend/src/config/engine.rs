use time::Duration;

/// Timing and policy knobs for the game engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Age after which a session token stops resolving
    pub session_ttl: Duration,
    /// Deadline granted to a new game, and the extension added after every turn
    pub turn_window: Duration,
    pub min_password_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::days(7),
            turn_window: Duration::days(2),
            min_password_len: 8,
        }
    }
}
