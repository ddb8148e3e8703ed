use forest_pg::StoreError;

/// Failure kinds surfaced by the auth core and the resource services.
///
/// Callers map these to transport status codes. `Internal` carries detail
/// for the server log only; its public message is always `serverError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    Unauthorized,
    BadRequest(String),
    Conflict,
    NotFound,
    Internal(String),
    Timeout,
}

impl Fault {
    pub fn bad(reason: &str) -> Self {
        Self::BadRequest(reason.to_string())
    }
    /// Message safe to show to the caller.
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::BadRequest(reason) => reason,
            Self::Conflict => "conflict",
            Self::NotFound => "notFound",
            Self::Internal(_) => "serverError",
            Self::Timeout => "timeout",
        }
    }
    /// Timeouts may succeed on retry; nothing else will.
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::BadRequest(s) => write!(f, "bad request: {}", s),
            Self::Conflict => write!(f, "conflict"),
            Self::NotFound => write!(f, "not found"),
            Self::Internal(s) => write!(f, "internal error: {}", s),
            Self::Timeout => write!(f, "operation timed out"),
        }
    }
}

impl std::error::Error for Fault {}

impl From<StoreError> for Fault {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(_) => Self::Conflict,
            StoreError::Missing(_) => Self::NotFound,
            StoreError::Backend(s) => Self::Internal(s),
        }
    }
}

#[cfg(feature = "server")]
mod response {
    use super::*;
    use actix_web::HttpResponse;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    impl ResponseError for Fault {
        fn status_code(&self) -> StatusCode {
            match self {
                Fault::Unauthorized => StatusCode::UNAUTHORIZED,
                Fault::BadRequest(_) => StatusCode::BAD_REQUEST,
                Fault::Conflict => StatusCode::CONFLICT,
                Fault::NotFound => StatusCode::NOT_FOUND,
                Fault::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                Fault::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            }
        }
        fn error_response(&self) -> HttpResponse {
            if let Fault::Internal(detail) = self {
                log::error!("{}", detail);
            }
            HttpResponse::build(self.status_code()).json(serde_json::json!({
                "error": true,
                "message": self.message(),
            }))
        }
    }
}
