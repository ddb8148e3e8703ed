//! Credential hashing.
//!
//! Argon2id digests in PHC string format. The digest embeds its own salt and
//! parameters, so verification never needs to know the [`Cost`] that
//! produced it, and raising the cost later does not invalidate old digests.
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::Version;
use argon2::password_hash::SaltString;
use forest_core::SALT_BYTES;

/// Work factor for new digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cost {
    pub memory: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Cost {
    fn default() -> Self {
        Self {
            memory: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl Cost {
    /// Cheapest parameters argon2 accepts. Only for tests.
    pub fn minimal() -> Self {
        Self {
            memory: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

/// Why a digest could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    Entropy(String),
    Params(String),
    Digest(String),
}

impl std::fmt::Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entropy(s) => write!(f, "salt generation failed: {}", s),
            Self::Params(s) => write!(f, "invalid hashing parameters: {}", s),
            Self::Digest(s) => write!(f, "hashing failed: {}", s),
        }
    }
}

impl std::error::Error for HashError {}

/// Salted one-way password hasher with a tunable work factor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher {
    cost: Cost,
}

impl Hasher {
    pub fn new(cost: Cost) -> Self {
        Self { cost }
    }
    pub fn cost(&self) -> Cost {
        self.cost
    }

    fn argon(&self) -> Result<Argon2<'static>, HashError> {
        Params::new(
            self.cost.memory,
            self.cost.iterations,
            self.cost.parallelism,
            None,
        )
        .map(|params| Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
        .map_err(|e| HashError::Params(e.to_string()))
    }

    fn salt() -> Result<SaltString, HashError> {
        let bytes = crate::token::entropy::<SALT_BYTES>().map_err(HashError::Entropy)?;
        SaltString::encode_b64(&bytes).map_err(|e| HashError::Entropy(e.to_string()))
    }

    pub fn hash(&self, secret: &str) -> Result<String, HashError> {
        let salt = Self::salt()?;
        self.argon()?
            .hash_password(secret.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| HashError::Digest(e.to_string()))
    }

    /// Malformed digests verify as false rather than erroring, so callers
    /// cannot tell a corrupt row from a wrong password.
    pub fn verify(&self, secret: &str, digest: &str) -> bool {
        PasswordHash::new(digest)
            .ok()
            .as_ref()
            .map(|hash| {
                Argon2::default()
                    .verify_password(secret.as_bytes(), hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}
