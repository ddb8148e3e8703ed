use super::*;
use forest_auth::Fault;
use forest_auth::Profile;
use forest_auth::Resolve;
use forest_auth::Token;
use forest_auth::deadline::bounded;
use forest_core::ID;
use forest_core::Unique;
use std::time::Duration;

/// Posts, likes, follows, and profile reads.
///
/// Reads are public. Every mutation first resolves the caller's token
/// through [`Resolve`] and acts as that identity.
#[derive(Debug, Clone)]
pub struct Social<D, R> {
    db: D,
    resolver: R,
    timeout: Duration,
}

impl<D, R> Social<D, R>
where
    D: SocialRepository,
    R: Resolve,
{
    pub fn new(db: D, resolver: R, timeout: Duration) -> Self {
        Self {
            db,
            resolver,
            timeout,
        }
    }

    pub async fn profile(&self, id: ID<Profile>) -> Result<Profile, Fault> {
        bounded(self.timeout, self.db.profile(id))
            .await?
            .ok_or(Fault::NotFound)
    }

    pub async fn posts(&self, author: ID<Profile>) -> Result<Vec<Post>, Fault> {
        bounded(self.timeout, self.db.posts(author)).await
    }

    pub async fn post(&self, id: ID<Post>) -> Result<Post, Fault> {
        bounded(self.timeout, self.db.post(id))
            .await?
            .ok_or(Fault::NotFound)
    }

    pub async fn create_post(&self, token: &Token, draft: &Draft) -> Result<Post, Fault> {
        let author = self.resolver.resolve(token).await?;
        let post = Post::new(author, draft.validated()?);
        bounded(self.timeout, self.db.publish(&post)).await?;
        log::debug!("{} published post {}", author, post.id());
        Ok(post)
    }

    /// Someone else's post looks the same as a missing one.
    pub async fn update_post(
        &self,
        token: &Token,
        id: ID<Post>,
        draft: &Draft,
    ) -> Result<Post, Fault> {
        let author = self.resolver.resolve(token).await?;
        let draft = draft.validated()?;
        let post = self.post(id).await?;
        if post.author() != author {
            return Err(Fault::NotFound);
        }
        let post = post.revised(draft);
        match bounded(self.timeout, self.db.revise(&post)).await? {
            true => Ok(post),
            false => Err(Fault::NotFound),
        }
    }

    pub async fn delete_post(&self, token: &Token, id: ID<Post>) -> Result<(), Fault> {
        let author = self.resolver.resolve(token).await?;
        match bounded(self.timeout, self.db.retract(id, author)).await? {
            true => Ok(()),
            false => Err(Fault::NotFound),
        }
    }

    pub async fn like(&self, token: &Token, post: ID<Post>) -> Result<(), Fault> {
        let user = self.resolver.resolve(token).await?;
        bounded(self.timeout, self.db.like(&Like::new(post, user))).await
    }

    /// Idempotent; reports whether a like was removed.
    pub async fn unlike(&self, token: &Token, post: ID<Post>) -> Result<bool, Fault> {
        let user = self.resolver.resolve(token).await?;
        bounded(self.timeout, self.db.unlike(&Like::new(post, user))).await
    }

    pub async fn follow(&self, token: &Token, followee: ID<Profile>) -> Result<(), Fault> {
        let follower = self.resolver.resolve(token).await?;
        let edge = Follow::new(followee, follower)?;
        bounded(self.timeout, self.db.follow(&edge)).await
    }

    /// Idempotent; reports whether an edge was removed.
    pub async fn unfollow(&self, token: &Token, followee: ID<Profile>) -> Result<bool, Fault> {
        let follower = self.resolver.resolve(token).await?;
        let edge = Follow::new(followee, follower).map_err(|_| Fault::bad("cantUnfollowSelf"))?;
        bounded(self.timeout, self.db.unfollow(&edge)).await
    }
}
