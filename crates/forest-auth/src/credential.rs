use super::Profile;
use forest_core::ID;

/// Password digest owned by exactly one profile.
///
/// Written once at sign-up and never updated; it disappears only when its
/// profile is deleted.
#[derive(Debug, Clone)]
pub struct Credential {
    profile: ID<Profile>,
    hashword: String,
}

impl Credential {
    pub fn new(profile: ID<Profile>, hashword: String) -> Self {
        Self { profile, hashword }
    }
    pub fn profile(&self) -> ID<Profile> {
        self.profile
    }
    pub fn hashword(&self) -> &str {
        &self.hashword
    }
}

mod schema {
    use super::*;
    use forest_pg::*;

    /// Schema implementation for Credential (users table).
    /// Keyed by profile id, so a user id and a profile id are the same UUID.
    impl Schema for Credential {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    profile_id      UUID PRIMARY KEY REFERENCES ",
                PROFILES,
                "(id) ON DELETE CASCADE,
                    password_hash   TEXT NOT NULL,
                    created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
                    updated_at      TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            ""
        }
    }
}
