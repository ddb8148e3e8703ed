//! Core identifiers, traits, and constants for forest.
//!
//! Every other crate in the workspace builds on the typed [`ID`] wrapper and
//! the session/timeout parameters declared here.

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;
use std::str::FromStr;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
/// A `ID<Profile>` can never be passed where a `ID<Post>` is expected.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Reinterpret the same UUID under another marker.
    /// Profiles and users share a key, so this is how one becomes the other.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> FromStr for ID<T> {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s.trim()).map(Self::from)
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::from(uuid::Uuid::now_v7())
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// SESSION PARAMETERS
// ============================================================================
/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";
/// Lifetime of a freshly issued session (one week).
pub const SESSION_TTL: std::time::Duration = std::time::Duration::from_secs(168 * 60 * 60);
/// Random bytes drawn for each session token (256 bits).
pub const TOKEN_BYTES: usize = 32;
/// Random bytes drawn for each password salt.
pub const SALT_BYTES: usize = 16;

// ============================================================================
// PERSISTENCE PARAMETERS
// ============================================================================
/// Upper bound on any single database round trip.
pub const DB_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(45);

// ============================================================================
// INPUT LIMITS
// ============================================================================
#[rustfmt::skip]
pub const USERNAME_MIN: usize = 3;
#[rustfmt::skip]
pub const USERNAME_MAX: usize = 32;
#[rustfmt::skip]
pub const PASSWORD_MIN: usize = 8;
#[rustfmt::skip]
pub const NICKNAME_MAX: usize = 64;
#[rustfmt::skip]
pub const EMAIL_MAX:    usize = 255;
#[rustfmt::skip]
pub const POST_MAX:     usize = 2000;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> std::io::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).map_err(std::io::Error::other)
}

/// Register Ctrl+C handler for immediate termination.
/// In-flight requests are abandoned; every write is a single statement,
/// so nothing is left half-committed.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    struct Marker;
    #[test]
    fn ids_are_unique() {
        let a = ID::<Marker>::default();
        let b = ID::<Marker>::default();
        assert_ne!(a, b);
    }
    #[test]
    fn id_parses_own_display() {
        let id = ID::<Marker>::default();
        let parsed = id.to_string().parse::<ID<Marker>>().unwrap();
        assert_eq!(id, parsed);
    }
    #[test]
    fn id_rejects_garbage() {
        assert!("not-a-uuid".parse::<ID<Marker>>().is_err());
    }
    #[test]
    fn cast_preserves_uuid() {
        let id = ID::<Marker>::default();
        assert_eq!(id.cast::<()>().inner(), id.inner());
    }
    #[test]
    fn session_lasts_a_week() {
        assert_eq!(SESSION_TTL.as_secs(), 7 * 24 * 60 * 60);
    }
}
