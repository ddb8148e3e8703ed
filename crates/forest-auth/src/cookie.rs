use super::Token;
use forest_core::SESSION_COOKIE;
use std::time::SystemTime;

/// Value of the `session_token` cookie handed back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    value: String,
    expires: SystemTime,
}

impl SessionCookie {
    pub fn issue(token: &Token, expires: SystemTime) -> Self {
        Self {
            value: token.as_str().to_string(),
            expires,
        }
    }
    /// Empty and already expired, so the client drops its token.
    pub fn cleared() -> Self {
        Self {
            value: String::new(),
            expires: SystemTime::UNIX_EPOCH,
        }
    }
    pub fn name(&self) -> &'static str {
        SESSION_COOKIE
    }
    pub fn value(&self) -> &str {
        &self.value
    }
    pub fn expires(&self) -> SystemTime {
        self.expires
    }
    pub fn path(&self) -> &'static str {
        "/"
    }
    pub fn is_cleared(&self) -> bool {
        self.value.is_empty()
    }
    pub fn token(&self) -> Option<Token> {
        (!self.is_cleared()).then(|| Token::from(self.value.as_str()))
    }
}

#[cfg(feature = "server")]
impl From<&SessionCookie> for actix_web::cookie::Cookie<'static> {
    fn from(cookie: &SessionCookie) -> Self {
        use actix_web::cookie::time::OffsetDateTime;
        let mut built = actix_web::cookie::Cookie::build(cookie.name(), cookie.value.clone())
            .path(cookie.path())
            .http_only(true)
            .expires(OffsetDateTime::from(cookie.expires))
            .finish();
        if cookie.is_cleared() {
            built.set_max_age(actix_web::cookie::time::Duration::ZERO);
        }
        built
    }
}
