use super::*;
use forest_core::ID;
use forest_core::Unique;
use forest_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;

/// Repository trait for authentication database operations.
/// Abstracts SQL from the session and identity logic.
///
/// Every write here is a single statement, so PostgreSQL's per-statement
/// atomicity is the transaction boundary: a failed statement leaves no rows.
#[allow(async_fn_in_trait)]
pub trait AuthRepository {
    /// Inserts profile, credential and session together, or nothing at all.
    async fn register(
        &self,
        profile: &Profile,
        hashword: &str,
        session: &Session,
    ) -> Result<(), StoreError>;
    /// Stored digest for a username, if the user exists.
    async fn hashword(&self, username: &str) -> Result<Option<String>, StoreError>;
    /// Profile id for a username, if the user exists.
    async fn identify(&self, username: &str) -> Result<Option<ID<Profile>>, StoreError>;
    /// Stores a session, replacing any other session of the same username.
    async fn signin(&self, session: &Session) -> Result<(), StoreError>;
    /// Session stored under a token digest.
    async fn session(&self, digest: &str) -> Result<Option<Session>, StoreError>;
    /// Deletes a session; reports whether a row matched.
    async fn revoke(&self, digest: &str) -> Result<bool, StoreError>;
}

impl AuthRepository for Arc<Client> {
    async fn register(
        &self,
        profile: &Profile,
        hashword: &str,
        session: &Session,
    ) -> Result<(), StoreError> {
        const SQL: &str = const_format::concatcp!(
            "WITH profile AS (
                INSERT INTO ",
            PROFILES,
            " (id, username, nickname, email, theme, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $6)
                RETURNING id, username
            ), credential AS (
                INSERT INTO ",
            USERS,
            " (profile_id, password_hash, created_at, updated_at)
                SELECT id, $7::text, $6::timestamptz, $6::timestamptz FROM profile
            )
            INSERT INTO ",
            SESSIONS,
            " (id, username, expiry)
            SELECT $8::text, username, $9::timestamptz FROM profile
            ON CONFLICT (username) DO UPDATE SET id = EXCLUDED.id, expiry = EXCLUDED.expiry"
        );
        self.execute(
            SQL,
            &[
                &profile.id().inner(),
                &profile.username(),
                &profile.nickname(),
                &profile.email(),
                &profile.theme().as_str(),
                &profile.created_at(),
                &hashword,
                &session.digest(),
                &session.expires_at(),
            ],
        )
        .await
        .map(|_| ())
        .map_err(StoreError::from)
    }

    async fn hashword(&self, username: &str) -> Result<Option<String>, StoreError> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT u.password_hash FROM ",
                PROFILES,
                " p INNER JOIN ",
                USERS,
                " u ON p.id = u.profile_id WHERE p.username = $1"
            ),
            &[&username],
        )
        .await
        .map(|opt| opt.map(|row| row.get::<_, String>(0)))
        .map_err(StoreError::from)
    }

    async fn identify(&self, username: &str) -> Result<Option<ID<Profile>>, StoreError> {
        self.query_opt(
            const_format::concatcp!("SELECT id FROM ", PROFILES, " WHERE username = $1"),
            &[&username],
        )
        .await
        .map(|opt| opt.map(|row| ID::from(row.get::<_, uuid::Uuid>(0))))
        .map_err(StoreError::from)
    }

    async fn signin(&self, session: &Session) -> Result<(), StoreError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                SESSIONS,
                " (id, username, expiry) VALUES ($1, $2, $3)
                ON CONFLICT (username) DO UPDATE SET id = EXCLUDED.id, expiry = EXCLUDED.expiry"
            ),
            &[
                &session.digest(),
                &session.username(),
                &session.expires_at(),
            ],
        )
        .await
        .map(|_| ())
        .map_err(StoreError::from)
    }

    async fn session(&self, digest: &str) -> Result<Option<Session>, StoreError> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, username, expiry FROM ",
                SESSIONS,
                " WHERE id = $1"
            ),
            &[&digest],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                Session::hydrate(
                    row.get::<_, String>(0),
                    row.get::<_, String>(1),
                    row.get::<_, std::time::SystemTime>(2),
                )
            })
        })
        .map_err(StoreError::from)
    }

    async fn revoke(&self, digest: &str) -> Result<bool, StoreError> {
        self.execute(
            const_format::concatcp!("DELETE FROM ", SESSIONS, " WHERE id = $1"),
            &[&digest],
        )
        .await
        .map(|n| n > 0)
        .map_err(StoreError::from)
    }
}
