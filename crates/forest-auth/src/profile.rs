use forest_core::ID;
use forest_core::Unique;
use std::time::SystemTime;

/// Display theme chosen by a user.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Forest,
    Dark,
    Standard,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forest => "forest",
            Self::Dark => "dark",
            Self::Standard => "standard",
        }
    }
}

impl TryFrom<&str> for Theme {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "forest" => Ok(Self::Forest),
            "dark" => Ok(Self::Dark),
            "standard" => Ok(Self::Standard),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Durable user identity, independent of any session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    id: ID<Self>,
    username: String,
    nickname: String,
    email: String,
    theme: Theme,
    created_at: SystemTime,
    updated_at: SystemTime,
}

impl Profile {
    pub fn new(username: String, nickname: String, email: String) -> Self {
        let now = SystemTime::now();
        Self {
            id: ID::default(),
            username,
            nickname,
            email,
            theme: Theme::default(),
            created_at: now,
            updated_at: now,
        }
    }
    pub fn hydrate(
        id: ID<Self>,
        username: String,
        nickname: String,
        email: String,
        theme: Theme,
        created_at: SystemTime,
        updated_at: SystemTime,
    ) -> Self {
        Self {
            id,
            username,
            nickname,
            email,
            theme,
            created_at,
            updated_at,
        }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn nickname(&self) -> &str {
        &self.nickname
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn theme(&self) -> Theme {
        self.theme
    }
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }
    pub fn updated_at(&self) -> SystemTime {
        self.updated_at
    }
}

impl Unique for Profile {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

mod schema {
    use super::*;
    use forest_pg::*;

    impl Schema for Profile {
        fn name() -> &'static str {
            PROFILES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                PROFILES,
                " (
                    id          UUID PRIMARY KEY,
                    username    VARCHAR(32) UNIQUE NOT NULL,
                    nickname    VARCHAR(64) NOT NULL,
                    email       VARCHAR(255) UNIQUE NOT NULL,
                    theme       VARCHAR(16) NOT NULL DEFAULT 'forest',
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_profiles_username ON ",
                PROFILES,
                " (username);"
            )
        }
    }
}
