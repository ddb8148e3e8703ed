use super::Token;
use std::time::Duration;
use std::time::SystemTime;

/// Persisted login session for one username.
///
/// Keyed by the digest of its token; the token itself is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    digest: String,
    username: String,
    expires: SystemTime,
}

impl Session {
    /// Mints a fresh token and the session row it unlocks.
    pub fn mint(username: &str, ttl: Duration) -> Result<(Token, Self), String> {
        let token = Token::random()?;
        let session = Self {
            digest: token.digest(),
            username: username.to_string(),
            expires: SystemTime::now() + ttl,
        };
        Ok((token, session))
    }
    pub fn hydrate(digest: String, username: String, expires: SystemTime) -> Self {
        Self {
            digest,
            username,
            expires,
        }
    }
    pub fn digest(&self) -> &str {
        &self.digest
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn expires_at(&self) -> SystemTime {
        self.expires
    }
    pub fn expired(&self) -> bool {
        self.expires <= SystemTime::now()
    }
}

mod schema {
    use super::*;
    use forest_pg::*;

    /// The unique username column is what enforces one live session per
    /// user; inserts go through `ON CONFLICT (username)`.
    impl Schema for Session {
        fn name() -> &'static str {
            SESSIONS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                SESSIONS,
                " (
                    id          TEXT PRIMARY KEY,
                    username    VARCHAR(32) UNIQUE NOT NULL,
                    expiry      TIMESTAMPTZ NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_sessions_expiry ON ",
                SESSIONS,
                " (expiry);"
            )
        }
    }
}
