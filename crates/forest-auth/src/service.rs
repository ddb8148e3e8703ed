use super::*;

/// Sign-up, sign-in, refresh, and logout.
///
/// Moves a client between anonymous and authenticated. Every successful
/// transition leaves exactly one session row for the username involved,
/// and every failure leaves the tables as they were.
#[derive(Debug, Clone)]
pub struct Auth<R> {
    db: R,
    hasher: Hasher,
    decoy: String,
    sessions: SessionStore<R>,
    resolver: Resolver<R>,
    config: AuthConfig,
}

impl<R> Auth<R>
where
    R: AuthRepository + Clone,
{
    pub fn new(db: R, config: AuthConfig) -> Self {
        let hasher = Hasher::new(config.cost);
        Self {
            decoy: Self::decoy(hasher),
            hasher,
            sessions: SessionStore::new(db.clone(), config),
            resolver: Resolver::new(db.clone(), config),
            db,
            config,
        }
    }
    pub fn resolver(&self) -> &Resolver<R> {
        &self.resolver
    }
    pub fn sessions(&self) -> &SessionStore<R> {
        &self.sessions
    }

    pub async fn sign_up(&self, req: &RegisterRequest) -> Result<SessionCookie, Fault> {
        let profile = req.profile()?;
        let hashword = self.hash(req.password.clone()).await?;
        let (token, session) = self.sessions.mint(profile.username())?;
        deadline::bounded(
            self.config.timeout,
            self.db.register(&profile, &hashword, &session),
        )
        .await?;
        log::info!("registered {}", profile.username());
        Ok(SessionCookie::issue(&token, session.expires_at()))
    }

    /// Unknown usernames and wrong passwords fail identically, and both
    /// pay for one full verification against a digest of the current cost.
    pub async fn sign_in(&self, req: &LoginRequest) -> Result<SessionCookie, Fault> {
        let username = req.username.trim();
        let hashword = deadline::bounded(self.config.timeout, self.db.hashword(username)).await?;
        let known = hashword.is_some();
        let digest = hashword.unwrap_or_else(|| self.decoy.clone());
        if !self.verify(req.password.clone(), digest).await || !known {
            return Err(Fault::Unauthorized);
        }
        let (token, expires) = self.sessions.create(username).await?;
        log::info!("signed in {}", username);
        Ok(SessionCookie::issue(&token, expires))
    }

    /// Rotates the token. The old token stops working even if deleting
    /// it fails, because creating the new session evicts it.
    pub async fn refresh(&self, token: &Token) -> Result<SessionCookie, Fault> {
        let session = match self.sessions.lookup(token).await {
            Ok(session) => session,
            Err(Fault::NotFound) => return Err(Fault::Unauthorized),
            Err(e) => return Err(e),
        };
        if self.config.strict_expiry && session.expired() {
            if let Err(e) = self.sessions.delete(token).await {
                log::warn!(
                    "could not delete expired session of {} during refresh: {}",
                    session.username(),
                    e
                );
            }
            return Err(Fault::Unauthorized);
        }
        if let Err(e) = self.sessions.delete(token).await {
            log::warn!(
                "could not delete old session of {} during refresh: {}",
                session.username(),
                e
            );
        }
        let (fresh, expires) = self.sessions.create(session.username()).await?;
        log::debug!("refreshed session of {}", session.username());
        Ok(SessionCookie::issue(&fresh, expires))
    }

    /// A second logout with the same token is `NotFound`.
    pub async fn logout(&self, token: &Token) -> Result<SessionCookie, Fault> {
        match self.sessions.delete(token).await? {
            true => Ok(SessionCookie::cleared()),
            false => Err(Fault::NotFound),
        }
    }

    /// Digest verified in place of a missing credential. Empty when the
    /// cost is unusable, in which case sign-up fails before any row exists.
    fn decoy(hasher: Hasher) -> String {
        hasher
            .hash(&forest_core::ID::<Profile>::default().to_string())
            .inspect_err(|e| log::warn!("no decoy digest for sign-in: {}", e))
            .unwrap_or_default()
    }

    async fn hash(&self, secret: String) -> Result<String, Fault> {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| Fault::Internal(e.to_string()))?
            .map_err(|e| Fault::Internal(e.to_string()))
    }

    async fn verify(&self, secret: String, digest: String) -> bool {
        let hasher = self.hasher;
        tokio::task::spawn_blocking(move || hasher.verify(&secret, &digest))
            .await
            .unwrap_or(false)
    }
}

impl<R> Resolve for Auth<R>
where
    R: AuthRepository + Clone,
{
    async fn resolve(&self, token: &Token) -> Result<forest_core::ID<Profile>, Fault> {
        self.resolver.resolve(token).await
    }
}
