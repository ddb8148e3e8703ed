use super::*;
use forest_core::ID;

/// Maps a session token to the identity that owns it.
///
/// This is the only thing resource services know about authentication.
#[allow(async_fn_in_trait)]
pub trait Resolve {
    async fn resolve(&self, token: &Token) -> Result<ID<Profile>, Fault>;
}

/// Resolves tokens through the session table, then the profile table.
#[derive(Debug, Clone)]
pub struct Resolver<R> {
    db: R,
    sessions: SessionStore<R>,
    config: AuthConfig,
}

impl<R> Resolver<R>
where
    R: AuthRepository + Clone,
{
    pub fn new(db: R, config: AuthConfig) -> Self {
        Self {
            sessions: SessionStore::new(db.clone(), config),
            db,
            config,
        }
    }

    /// Missing, expired, and orphaned sessions are all `Unauthorized`.
    pub async fn session_identity(&self, token: &Token) -> Result<ID<Profile>, Fault> {
        let session = match self.sessions.lookup(token).await {
            Ok(session) => session,
            Err(Fault::NotFound) => return Err(Fault::Unauthorized),
            Err(e) => return Err(e),
        };
        if self.config.strict_expiry && session.expired() {
            log::debug!("rejecting expired session of {}", session.username());
            return Err(Fault::Unauthorized);
        }
        match self.user_id(session.username()).await {
            Ok(id) => Ok(id),
            Err(Fault::NotFound) => {
                log::warn!("session refers to missing user {}", session.username());
                Err(Fault::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn user_id(&self, username: &str) -> Result<ID<Profile>, Fault> {
        deadline::bounded(self.config.timeout, self.db.identify(username))
            .await?
            .ok_or(Fault::NotFound)
    }
}

impl<R> Resolve for Resolver<R>
where
    R: AuthRepository + Clone,
{
    async fn resolve(&self, token: &Token) -> Result<ID<Profile>, Fault> {
        self.session_identity(token).await
    }
}
