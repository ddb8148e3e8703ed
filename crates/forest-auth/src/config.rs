use super::*;
use forest_core::*;
use std::time::Duration;

/// Tunables for the auth core.
#[derive(Debug, Clone, Copy)]
pub struct AuthConfig {
    /// Lifetime of a newly issued session.
    pub ttl: Duration,
    /// Deadline for each database round trip.
    pub timeout: Duration,
    /// Work factor for new password digests.
    pub cost: Cost,
    /// Reject sessions past their expiry. When false, expiry is recorded
    /// but ignored, and sessions live until logout or replacement.
    pub strict_expiry: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            ttl: SESSION_TTL,
            timeout: DB_TIMEOUT,
            cost: Cost::default(),
            strict_expiry: true,
        }
    }
}
