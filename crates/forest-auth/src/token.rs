use forest_core::TOKEN_BYTES;
use rand::TryRngCore;

/// Fills `N` bytes from the operating system RNG.
pub(crate) fn entropy<const N: usize>() -> Result<[u8; N], String> {
    let mut bytes = [0u8; N];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| e.to_string())?;
    Ok(bytes)
}

/// Opaque session token as handed to the client.
///
/// Only its [`digest`](Token::digest) is ever persisted, so a leaked
/// sessions table cannot be replayed as cookies.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn random() -> Result<Self, String> {
        entropy::<TOKEN_BYTES>().map(hex::encode).map(Self)
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Storage key for this token.
    pub fn digest(&self) -> String {
        use sha2::Digest;
        hex::encode(sha2::Sha256::digest(self.0.as_bytes()))
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// tokens are credentials; keep them out of logs
impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn random_tokens_differ() {
        let a = Token::random().unwrap();
        let b = Token::random().unwrap();
        assert_ne!(a, b);
    }
    #[test]
    fn token_carries_256_bits() {
        let token = Token::random().unwrap();
        assert_eq!(token.as_str().len(), TOKEN_BYTES * 2);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
    #[test]
    fn digest_is_stable_and_distinct() {
        let token = Token::from("abc");
        assert_eq!(token.digest(), token.clone().digest());
        assert_ne!(token.digest(), "abc");
        assert_eq!(token.digest().len(), 64);
    }
    #[test]
    fn debug_hides_value() {
        let token = Token::from("supersecret");
        assert!(!format!("{:?}", token).contains("supersecret"));
    }
}
