use super::*;
use forest_auth::Profile;
use forest_auth::Theme;
use forest_core::ID;
use forest_core::Unique;
use forest_pg::*;
use std::sync::Arc;
use std::time::SystemTime;
use tokio_postgres::Client;
use tokio_postgres::Row;

/// Repository trait for posts, likes, follows, and profile reads.
///
/// Ownership checks live in the SQL: edits and deletes match on both the
/// post id and the author id, so a non-author simply matches no row.
#[allow(async_fn_in_trait)]
pub trait SocialRepository {
    async fn profile(&self, id: ID<Profile>) -> Result<Option<Profile>, StoreError>;
    /// Newest first.
    async fn posts(&self, author: ID<Profile>) -> Result<Vec<Post>, StoreError>;
    async fn post(&self, id: ID<Post>) -> Result<Option<Post>, StoreError>;
    async fn publish(&self, post: &Post) -> Result<(), StoreError>;
    /// Applies the revision if `post.author()` wrote it; returns whether it did.
    async fn revise(&self, post: &Post) -> Result<bool, StoreError>;
    async fn retract(&self, id: ID<Post>, author: ID<Profile>) -> Result<bool, StoreError>;
    async fn like(&self, like: &Like) -> Result<(), StoreError>;
    async fn unlike(&self, like: &Like) -> Result<bool, StoreError>;
    async fn follow(&self, follow: &Follow) -> Result<(), StoreError>;
    async fn unfollow(&self, follow: &Follow) -> Result<bool, StoreError>;
}

fn hydrate_post(row: &Row) -> Post {
    Post::hydrate(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        ID::from(row.get::<_, uuid::Uuid>(3)),
        row.get::<_, SystemTime>(4),
        row.get::<_, SystemTime>(5),
    )
}

fn hydrate_profile(row: &Row) -> Profile {
    Profile::hydrate(
        ID::from(row.get::<_, uuid::Uuid>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
        row.get::<_, String>(3),
        Theme::try_from(row.get::<_, &str>(4)).unwrap_or_default(),
        row.get::<_, SystemTime>(5),
        row.get::<_, SystemTime>(6),
    )
}

impl SocialRepository for Arc<Client> {
    async fn profile(&self, id: ID<Profile>) -> Result<Option<Profile>, StoreError> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, username, nickname, email, theme, created_at, updated_at FROM ",
                PROFILES,
                " WHERE id = $1"
            ),
            &[&id.inner()],
        )
        .await
        .map(|opt| opt.as_ref().map(hydrate_profile))
        .map_err(StoreError::from)
    }

    async fn posts(&self, author: ID<Profile>) -> Result<Vec<Post>, StoreError> {
        self.query(
            const_format::concatcp!(
                "SELECT id, text, image, author_id, created_at, updated_at FROM ",
                POSTS,
                " WHERE author_id = $1 ORDER BY created_at DESC"
            ),
            &[&author.inner()],
        )
        .await
        .map(|rows| rows.iter().map(hydrate_post).collect())
        .map_err(StoreError::from)
    }

    async fn post(&self, id: ID<Post>) -> Result<Option<Post>, StoreError> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, text, image, author_id, created_at, updated_at FROM ",
                POSTS,
                " WHERE id = $1"
            ),
            &[&id.inner()],
        )
        .await
        .map(|opt| opt.as_ref().map(hydrate_post))
        .map_err(StoreError::from)
    }

    async fn publish(&self, post: &Post) -> Result<(), StoreError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                POSTS,
                " (id, text, image, author_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6)"
            ),
            &[
                &post.id().inner(),
                &post.text(),
                &post.image(),
                &post.author().inner(),
                &post.created_at(),
                &post.updated_at(),
            ],
        )
        .await
        .map(|_| ())
        .map_err(StoreError::from)
    }

    async fn revise(&self, post: &Post) -> Result<bool, StoreError> {
        self.execute(
            const_format::concatcp!(
                "UPDATE ",
                POSTS,
                " SET text = $1, image = $2, updated_at = $3
                WHERE id = $4 AND author_id = $5"
            ),
            &[
                &post.text(),
                &post.image(),
                &post.updated_at(),
                &post.id().inner(),
                &post.author().inner(),
            ],
        )
        .await
        .map(|n| n > 0)
        .map_err(StoreError::from)
    }

    async fn retract(&self, id: ID<Post>, author: ID<Profile>) -> Result<bool, StoreError> {
        self.execute(
            const_format::concatcp!(
                "DELETE FROM ",
                POSTS,
                " WHERE id = $1 AND author_id = $2"
            ),
            &[&id.inner(), &author.inner()],
        )
        .await
        .map(|n| n > 0)
        .map_err(StoreError::from)
    }

    async fn like(&self, like: &Like) -> Result<(), StoreError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                LIKES,
                " (post_id, user_id) VALUES ($1, $2)"
            ),
            &[&like.post().inner(), &like.user().inner()],
        )
        .await
        .map(|_| ())
        .map_err(StoreError::from)
    }

    async fn unlike(&self, like: &Like) -> Result<bool, StoreError> {
        self.execute(
            const_format::concatcp!(
                "DELETE FROM ",
                LIKES,
                " WHERE post_id = $1 AND user_id = $2"
            ),
            &[&like.post().inner(), &like.user().inner()],
        )
        .await
        .map(|n| n > 0)
        .map_err(StoreError::from)
    }

    async fn follow(&self, follow: &Follow) -> Result<(), StoreError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                FOLLOWS,
                " (followee_id, follower_id) VALUES ($1, $2)"
            ),
            &[&follow.followee().inner(), &follow.follower().inner()],
        )
        .await
        .map(|_| ())
        .map_err(StoreError::from)
    }

    async fn unfollow(&self, follow: &Follow) -> Result<bool, StoreError> {
        self.execute(
            const_format::concatcp!(
                "DELETE FROM ",
                FOLLOWS,
                " WHERE followee_id = $1 AND follower_id = $2"
            ),
            &[&follow.followee().inner(), &follow.follower().inner()],
        )
        .await
        .map(|n| n > 0)
        .map_err(StoreError::from)
    }
}
