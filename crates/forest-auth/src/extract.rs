use super::*;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::cookie::Cookie;
use actix_web::dev::Payload;
use actix_web::http::header;
use forest_core::SESSION_COOKIE;
use std::future::Ready;
use std::future::ready;

/// Pulls the session token out of the `session_token` cookie.
/// A missing cookie is `Unauthorized`; an unparseable header is `BadRequest`.
impl FromRequest for Token {
    type Error = Fault;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<Token, Fault> {
    let mut token = None;
    for value in req.headers().get_all(header::COOKIE) {
        let value = value.to_str().map_err(|_| Fault::bad("bad request"))?;
        for pair in value.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let cookie = Cookie::parse_encoded(pair).map_err(|_| Fault::bad("bad request"))?;
            if token.is_none() && cookie.name() == SESSION_COOKIE {
                token = Some(Token::from(cookie.value()));
            }
        }
    }
    token.filter(|t| !t.is_empty()).ok_or(Fault::Unauthorized)
}
