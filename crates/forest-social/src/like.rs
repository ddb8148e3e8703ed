use super::Post;
use forest_auth::Profile;
use forest_core::ID;

/// One profile liking one post. The pair is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Like {
    post: ID<Post>,
    user: ID<Profile>,
}

impl Like {
    pub fn new(post: ID<Post>, user: ID<Profile>) -> Self {
        Self { post, user }
    }
    pub fn post(&self) -> ID<Post> {
        self.post
    }
    pub fn user(&self) -> ID<Profile> {
        self.user
    }
}

mod schema {
    use super::*;
    use forest_pg::*;

    impl Schema for Like {
        fn name() -> &'static str {
            LIKES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                LIKES,
                " (
                    post_id     UUID NOT NULL REFERENCES ",
                POSTS,
                "(id) ON DELETE CASCADE,
                    user_id     UUID NOT NULL REFERENCES ",
                PROFILES,
                "(id) ON DELETE CASCADE,
                    PRIMARY KEY (post_id, user_id)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_post_likes_user ON ",
                LIKES,
                " (user_id);"
            )
        }
    }
}
