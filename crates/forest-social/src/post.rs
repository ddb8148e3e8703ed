use forest_auth::Fault;
use forest_auth::Profile;
use forest_core::ID;
use forest_core::POST_MAX;
use forest_core::Unique;
use serde::Deserialize;
use std::time::SystemTime;

/// Text and optional image URL submitted when creating or editing a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Draft {
    pub text: String,
    #[serde(default)]
    pub image: String,
}

impl Draft {
    pub fn new(text: &str, image: &str) -> Self {
        Self {
            text: text.to_string(),
            image: image.to_string(),
        }
    }
    /// Trimmed copy, or `BadRequest` if the text is empty or too long.
    pub fn validated(&self) -> Result<Self, Fault> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(Fault::bad("text is required"));
        }
        if text.chars().count() > POST_MAX {
            return Err(Fault::bad("text must be at most 2000 characters"));
        }
        Ok(Self::new(text, self.image.trim()))
    }
}

/// A post authored by one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: ID<Self>,
    text: String,
    image: String,
    author: ID<Profile>,
    created_at: SystemTime,
    updated_at: SystemTime,
}

impl Post {
    pub fn new(author: ID<Profile>, draft: Draft) -> Self {
        let now = SystemTime::now();
        Self {
            id: ID::default(),
            text: draft.text,
            image: draft.image,
            author,
            created_at: now,
            updated_at: now,
        }
    }
    pub fn hydrate(
        id: ID<Self>,
        text: String,
        image: String,
        author: ID<Profile>,
        created_at: SystemTime,
        updated_at: SystemTime,
    ) -> Self {
        Self {
            id,
            text,
            image,
            author,
            created_at,
            updated_at,
        }
    }
    /// Same post with new content and a fresh `updated_at`.
    pub fn revised(&self, draft: Draft) -> Self {
        Self {
            text: draft.text,
            image: draft.image,
            updated_at: SystemTime::now(),
            ..self.clone()
        }
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn image(&self) -> &str {
        &self.image
    }
    pub fn author(&self) -> ID<Profile> {
        self.author
    }
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }
    pub fn updated_at(&self) -> SystemTime {
        self.updated_at
    }
}

impl Unique for Post {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

mod schema {
    use super::*;
    use forest_pg::*;

    impl Schema for Post {
        fn name() -> &'static str {
            POSTS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                POSTS,
                " (
                    id          UUID PRIMARY KEY,
                    text        TEXT NOT NULL,
                    image       TEXT NOT NULL DEFAULT '',
                    author_id   UUID NOT NULL REFERENCES ",
                PROFILES,
                "(id) ON DELETE CASCADE,
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_posts_author ON ",
                POSTS,
                " (author_id, created_at DESC);"
            )
        }
    }
}
