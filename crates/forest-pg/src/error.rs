use super::PgErr;
use tokio_postgres::error::SqlState;

/// Storage failures, classified by what the caller can do about them.
///
/// Repositories translate driver errors into this type so that services
/// never inspect SQLSTATE codes themselves, and so that in-memory
/// repositories can report the same conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    Conflict(String),
    /// A foreign key pointed at a row that does not exist.
    Missing(String),
    /// Anything else: connectivity, syntax, serialization.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(s) => write!(f, "unique constraint violated: {}", s),
            Self::Missing(s) => write!(f, "referenced row missing: {}", s),
            Self::Backend(s) => write!(f, "database error: {}", s),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<PgErr> for StoreError {
    fn from(e: PgErr) -> Self {
        let constraint = || {
            e.as_db_error()
                .and_then(|db| db.constraint())
                .unwrap_or_default()
                .to_string()
        };
        match e.code() {
            Some(code) if *code == SqlState::UNIQUE_VIOLATION => Self::Conflict(constraint()),
            Some(code) if *code == SqlState::FOREIGN_KEY_VIOLATION => Self::Missing(constraint()),
            _ => Self::Backend(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn display_names_the_cause() {
        let e = StoreError::Conflict("profiles_username_key".into());
        assert!(e.to_string().contains("profiles_username_key"));
        let e = StoreError::Backend("connection reset".into());
        assert!(e.to_string().starts_with("database error"));
    }
}
