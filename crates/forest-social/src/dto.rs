use super::*;
use forest_auth::unix;
use forest_core::Unique;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PostInfo {
    pub id: String,
    pub text: String,
    pub image: String,
    pub author_id: String,
    pub created_at: u64,
    pub updated_at: u64,
}

impl From<&Post> for PostInfo {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id().to_string(),
            text: post.text().to_string(),
            image: post.image().to_string(),
            author_id: post.author().to_string(),
            created_at: unix(post.created_at()),
            updated_at: unix(post.updated_at()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthorQuery {
    #[serde(default)]
    pub author_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub user_id: String,
}
