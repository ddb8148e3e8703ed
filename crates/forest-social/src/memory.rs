use super::*;
use forest_auth::Profile;
use forest_core::ID;
use forest_core::Unique;
use forest_pg::StoreError;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

#[derive(Debug, Default)]
struct Tables {
    profiles: HashMap<ID<Profile>, Profile>,
    posts: HashMap<ID<Post>, Post>,
    likes: HashSet<Like>,
    follows: HashSet<Follow>,
}

/// In-process [`SocialRepository`] that checks the same keys and
/// references as the PostgreSQL tables.
#[derive(Debug, Clone, Default)]
pub struct Memory(Arc<Mutex<Tables>>);

impl Memory {
    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.0
            .lock()
            .map_err(|_| StoreError::Backend("memory store poisoned".into()))
    }
    /// Makes a profile known, as sign-up would.
    pub fn admit(&self, profile: Profile) {
        if let Ok(mut t) = self.tables() {
            t.profiles.insert(profile.id(), profile);
        }
    }
    pub fn likes(&self, post: ID<Post>) -> usize {
        self.tables()
            .map(|t| t.likes.iter().filter(|l| l.post() == post).count())
            .unwrap_or_default()
    }
    pub fn followers(&self, followee: ID<Profile>) -> usize {
        self.tables()
            .map(|t| t.follows.iter().filter(|f| f.followee() == followee).count())
            .unwrap_or_default()
    }
}

impl SocialRepository for Memory {
    async fn profile(&self, id: ID<Profile>) -> Result<Option<Profile>, StoreError> {
        Ok(self.tables()?.profiles.get(&id).cloned())
    }

    async fn posts(&self, author: ID<Profile>) -> Result<Vec<Post>, StoreError> {
        let t = self.tables()?;
        let mut posts = t
            .posts
            .values()
            .filter(|p| p.author() == author)
            .cloned()
            .collect::<Vec<_>>();
        posts.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(posts)
    }

    async fn post(&self, id: ID<Post>) -> Result<Option<Post>, StoreError> {
        Ok(self.tables()?.posts.get(&id).cloned())
    }

    async fn publish(&self, post: &Post) -> Result<(), StoreError> {
        let mut t = self.tables()?;
        if !t.profiles.contains_key(&post.author()) {
            return Err(StoreError::Missing("posts_author_id_fkey".into()));
        }
        if t.posts.contains_key(&post.id()) {
            return Err(StoreError::Conflict("posts_pkey".into()));
        }
        t.posts.insert(post.id(), post.clone());
        Ok(())
    }

    async fn revise(&self, post: &Post) -> Result<bool, StoreError> {
        let mut t = self.tables()?;
        match t.posts.get_mut(&post.id()) {
            Some(old) if old.author() == post.author() => {
                *old = post.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn retract(&self, id: ID<Post>, author: ID<Profile>) -> Result<bool, StoreError> {
        let mut t = self.tables()?;
        match t.posts.get(&id).map(|p| p.author() == author) {
            Some(true) => {
                t.posts.remove(&id);
                t.likes.retain(|l| l.post() != id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn like(&self, like: &Like) -> Result<(), StoreError> {
        let mut t = self.tables()?;
        if !t.posts.contains_key(&like.post()) {
            return Err(StoreError::Missing("post_likes_post_id_fkey".into()));
        }
        if !t.profiles.contains_key(&like.user()) {
            return Err(StoreError::Missing("post_likes_user_id_fkey".into()));
        }
        match t.likes.insert(*like) {
            true => Ok(()),
            false => Err(StoreError::Conflict("post_likes_pkey".into())),
        }
    }

    async fn unlike(&self, like: &Like) -> Result<bool, StoreError> {
        Ok(self.tables()?.likes.remove(like))
    }

    async fn follow(&self, follow: &Follow) -> Result<(), StoreError> {
        let mut t = self.tables()?;
        if !t.profiles.contains_key(&follow.followee()) {
            return Err(StoreError::Missing(
                "follow_relationships_followee_id_fkey".into(),
            ));
        }
        if !t.profiles.contains_key(&follow.follower()) {
            return Err(StoreError::Missing(
                "follow_relationships_follower_id_fkey".into(),
            ));
        }
        match t.follows.insert(*follow) {
            true => Ok(()),
            false => Err(StoreError::Conflict("follow_relationships_pkey".into())),
        }
    }

    async fn unfollow(&self, follow: &Follow) -> Result<bool, StoreError> {
        Ok(self.tables()?.follows.remove(follow))
    }
}
