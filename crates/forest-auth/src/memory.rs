use super::*;
use forest_core::ID;
use forest_core::Unique;
use forest_pg::StoreError;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Tables {
    profiles: HashMap<ID<Profile>, Profile>,
    credentials: HashMap<ID<Profile>, Credential>,
    sessions: HashMap<String, Session>,
}

/// In-process [`AuthRepository`] with the same constraints as the
/// PostgreSQL schema: unique usernames and emails, one session per
/// username. Every operation holds the lock for its whole duration,
/// which stands in for statement atomicity.
#[derive(Debug, Clone, Default)]
pub struct Memory(Arc<Mutex<Tables>>);

impl Memory {
    fn tables(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StoreError> {
        self.0
            .lock()
            .map_err(|_| StoreError::Backend("memory store poisoned".into()))
    }
    pub fn profiles(&self) -> usize {
        self.tables().map(|t| t.profiles.len()).unwrap_or_default()
    }
    pub fn credentials(&self) -> usize {
        self.tables().map(|t| t.credentials.len()).unwrap_or_default()
    }
    /// Number of session rows owned by a username.
    pub fn sessions(&self, username: &str) -> usize {
        self.tables()
            .map(|t| {
                t.sessions
                    .values()
                    .filter(|s| s.username() == username)
                    .count()
            })
            .unwrap_or_default()
    }
    /// Removes a profile and its credential, leaving sessions orphaned.
    pub fn forget(&self, username: &str) {
        if let Ok(mut t) = self.tables() {
            let id = t
                .profiles
                .values()
                .find(|p| p.username() == username)
                .map(|p| p.id());
            if let Some(id) = id {
                t.profiles.remove(&id);
                t.credentials.remove(&id);
            }
        }
    }
}

impl Tables {
    fn replace(&mut self, session: &Session) {
        self.sessions.retain(|_, s| s.username() != session.username());
        self.sessions
            .insert(session.digest().to_string(), session.clone());
    }
}

impl AuthRepository for Memory {
    async fn register(
        &self,
        profile: &Profile,
        hashword: &str,
        session: &Session,
    ) -> Result<(), StoreError> {
        let mut t = self.tables()?;
        if t.profiles.values().any(|p| p.username() == profile.username()) {
            return Err(StoreError::Conflict("profiles_username_key".into()));
        }
        if t.profiles.values().any(|p| p.email() == profile.email()) {
            return Err(StoreError::Conflict("profiles_email_key".into()));
        }
        t.profiles.insert(profile.id(), profile.clone());
        t.credentials.insert(
            profile.id(),
            Credential::new(profile.id(), hashword.to_string()),
        );
        t.replace(session);
        Ok(())
    }

    async fn hashword(&self, username: &str) -> Result<Option<String>, StoreError> {
        let t = self.tables()?;
        Ok(t.profiles
            .values()
            .find(|p| p.username() == username)
            .and_then(|p| t.credentials.get(&p.id()))
            .map(|c| c.hashword().to_string()))
    }

    async fn identify(&self, username: &str) -> Result<Option<ID<Profile>>, StoreError> {
        let t = self.tables()?;
        Ok(t.profiles
            .values()
            .find(|p| p.username() == username)
            .map(|p| p.id()))
    }

    async fn signin(&self, session: &Session) -> Result<(), StoreError> {
        self.tables()?.replace(session);
        Ok(())
    }

    async fn session(&self, digest: &str) -> Result<Option<Session>, StoreError> {
        Ok(self.tables()?.sessions.get(digest).cloned())
    }

    async fn revoke(&self, digest: &str) -> Result<bool, StoreError> {
        Ok(self.tables()?.sessions.remove(digest).is_some())
    }
}
