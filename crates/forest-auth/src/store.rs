use super::*;
use std::time::SystemTime;

/// Session lifecycle over an [`AuthRepository`].
///
/// Enforces one live session per username: [`create`](Self::create)
/// replaces whatever session the username held before.
#[derive(Debug, Clone)]
pub struct SessionStore<R> {
    db: R,
    config: AuthConfig,
}

impl<R> SessionStore<R>
where
    R: AuthRepository,
{
    pub fn new(db: R, config: AuthConfig) -> Self {
        Self { db, config }
    }

    /// Mints a token and its row without persisting anything.
    /// Used when the session must be written alongside other rows.
    pub fn mint(&self, username: &str) -> Result<(Token, Session), Fault> {
        Session::mint(username, self.config.ttl)
            .map_err(|e| Fault::Internal(format!("token generation failed: {}", e)))
    }

    pub async fn create(&self, username: &str) -> Result<(Token, SystemTime), Fault> {
        let (token, session) = self.mint(username)?;
        deadline::bounded(self.config.timeout, self.db.signin(&session)).await?;
        log::debug!("session issued for {}", username);
        Ok((token, session.expires_at()))
    }

    /// Idempotent. Reports whether a session was actually removed.
    pub async fn delete(&self, token: &Token) -> Result<bool, Fault> {
        deadline::bounded(self.config.timeout, self.db.revoke(&token.digest())).await
    }

    /// Exact match on token. Expiry is the caller's concern.
    pub async fn lookup(&self, token: &Token) -> Result<Session, Fault> {
        deadline::bounded(self.config.timeout, self.db.session(&token.digest()))
            .await?
            .ok_or(Fault::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn store() -> (Memory, SessionStore<Memory>) {
        let db = Memory::default();
        (db.clone(), SessionStore::new(db, AuthConfig::default()))
    }
    #[tokio::test]
    async fn create_then_lookup() {
        let (_, store) = store();
        let (token, expiry) = store.create("ana").await.unwrap();
        let session = store.lookup(&token).await.unwrap();
        assert_eq!(session.username(), "ana");
        assert_eq!(session.expires_at(), expiry);
    }
    #[tokio::test]
    async fn expiry_is_one_week_out() {
        let (_, store) = store();
        let before = SystemTime::now();
        let (_, expiry) = store.create("ana").await.unwrap();
        let ttl = expiry.duration_since(before).unwrap();
        assert!(ttl >= forest_core::SESSION_TTL);
        assert!(ttl < forest_core::SESSION_TTL + std::time::Duration::from_secs(5));
    }
    #[tokio::test]
    async fn create_evicts_previous_token() {
        let (db, store) = store();
        let (old, _) = store.create("ana").await.unwrap();
        let (new, _) = store.create("ana").await.unwrap();
        assert_ne!(old, new);
        assert_eq!(db.sessions("ana"), 1);
        assert_eq!(store.lookup(&old).await, Err(Fault::NotFound));
        assert!(store.lookup(&new).await.is_ok());
    }
    #[tokio::test]
    async fn sessions_are_per_username() {
        let (db, store) = store();
        store.create("ana").await.unwrap();
        store.create("bob").await.unwrap();
        assert_eq!(db.sessions("ana"), 1);
        assert_eq!(db.sessions("bob"), 1);
    }
    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_, store) = store();
        let (token, _) = store.create("ana").await.unwrap();
        assert_eq!(store.delete(&token).await, Ok(true));
        assert_eq!(store.delete(&token).await, Ok(false));
        assert_eq!(store.delete(&Token::from("never-issued")).await, Ok(false));
    }
    #[tokio::test]
    async fn lookup_of_unknown_token_is_not_found() {
        let (_, store) = store();
        assert_eq!(store.lookup(&Token::from("nope")).await, Err(Fault::NotFound));
    }
}
