use super::*;
use forest_core::*;
use serde::Deserialize;
use serde::Serialize;
use std::time::SystemTime;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Checks field shapes and builds the profile to insert.
    /// A blank nickname falls back to the username.
    pub fn profile(&self) -> Result<Profile, Fault> {
        let username = self.username.trim();
        let nickname = self.nickname.trim();
        let email = self.email.trim();
        if username.len() < USERNAME_MIN || username.len() > USERNAME_MAX {
            return Err(Fault::bad("username must be 3-32 characters"));
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Fault::bad("username may only contain letters, digits and _"));
        }
        if self.password.chars().count() < PASSWORD_MIN {
            return Err(Fault::bad("password must be at least 8 characters"));
        }
        if email.len() > EMAIL_MAX || !email.contains('@') {
            return Err(Fault::bad("email is invalid"));
        }
        if nickname.chars().count() > NICKNAME_MAX {
            return Err(Fault::bad("nickname must be at most 64 characters"));
        }
        let nickname = if nickname.is_empty() { username } else { nickname };
        Ok(Profile::new(
            username.to_string(),
            nickname.to_string(),
            email.to_string(),
        ))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileInfo {
    pub id: String,
    pub username: String,
    pub nickname: String,
    pub email: String,
    pub theme: Theme,
    pub created_at: u64,
    pub updated_at: u64,
}

impl From<&Profile> for ProfileInfo {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id().to_string(),
            username: profile.username().to_string(),
            nickname: profile.nickname().to_string(),
            email: profile.email().to_string(),
            theme: profile.theme(),
            created_at: unix(profile.created_at()),
            updated_at: unix(profile.updated_at()),
        }
    }
}

/// Seconds since the epoch, clamped at zero.
pub fn unix(time: SystemTime) -> u64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    fn request(username: &str, password: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            nickname: String::new(),
            email: email.into(),
            password: password.into(),
        }
    }
    #[test]
    fn accepts_well_formed_registration() {
        let profile = request("ana", "secret123", "a@x.com").profile().unwrap();
        assert_eq!(profile.username(), "ana");
        assert_eq!(profile.nickname(), "ana");
        assert_eq!(profile.email(), "a@x.com");
    }
    #[test]
    fn rejects_short_username() {
        assert!(matches!(
            request("an", "secret123", "a@x.com").profile(),
            Err(Fault::BadRequest(_))
        ));
    }
    #[test]
    fn rejects_odd_characters_in_username() {
        assert!(request("an a", "secret123", "a@x.com").profile().is_err());
        assert!(request("ana;--", "secret123", "a@x.com").profile().is_err());
    }
    #[test]
    fn rejects_short_password() {
        assert!(request("ana", "short", "a@x.com").profile().is_err());
    }
    #[test]
    fn rejects_email_without_at() {
        assert!(request("ana", "secret123", "ax.com").profile().is_err());
    }
    #[test]
    fn keeps_explicit_nickname() {
        let mut req = request("ana", "secret123", "a@x.com");
        req.nickname = "  Ana B  ".into();
        assert_eq!(req.profile().unwrap().nickname(), "Ana B");
    }
    #[test]
    fn nickname_is_optional_in_json() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"ana","password":"secret123","email":"a@x.com"}"#,
        )
        .unwrap();
        assert!(req.nickname.is_empty());
    }
}
