use super::*;
use actix_web::HttpResponse;
use actix_web::cookie::Cookie;
use actix_web::web;

fn respond(cookie: &SessionCookie, status: &str) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(Cookie::from(cookie))
        .json(serde_json::json!({ "status": status }))
}

pub async fn register<R>(
    auth: web::Data<Auth<R>>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, Fault>
where
    R: AuthRepository + Clone + 'static,
{
    let cookie = auth.sign_up(&req).await?;
    Ok(respond(&cookie, "registered"))
}

pub async fn login<R>(
    auth: web::Data<Auth<R>>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, Fault>
where
    R: AuthRepository + Clone + 'static,
{
    let cookie = auth.sign_in(&req).await?;
    Ok(respond(&cookie, "logged_in"))
}

pub async fn refresh<R>(auth: web::Data<Auth<R>>, token: Token) -> Result<HttpResponse, Fault>
where
    R: AuthRepository + Clone + 'static,
{
    let cookie = auth.refresh(&token).await?;
    Ok(respond(&cookie, "refreshed"))
}

pub async fn logout<R>(auth: web::Data<Auth<R>>, token: Token) -> Result<HttpResponse, Fault>
where
    R: AuthRepository + Clone + 'static,
{
    let cookie = auth.logout(&token).await?;
    Ok(respond(&cookie, "logged_out"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::test;

    fn service() -> web::Data<Auth<Memory>> {
        let config = AuthConfig {
            cost: Cost::minimal(),
            ..AuthConfig::default()
        };
        web::Data::new(Auth::new(Memory::default(), config))
    }

    macro_rules! app {
        ($auth:expr) => {
            test::init_service(
                App::new()
                    .app_data($auth.clone())
                    .route("/register", web::post().to(register::<Memory>))
                    .route("/login", web::post().to(login::<Memory>))
                    .route("/refresh", web::post().to(refresh::<Memory>))
                    .route("/logout", web::post().to(logout::<Memory>)),
            )
            .await
        };
    }

    fn ana() -> serde_json::Value {
        serde_json::json!({
            "username": "ana",
            "nickname": "Ana",
            "email": "a@x.com",
            "password": "secret123",
        })
    }

    #[actix_web::test]
    async fn register_sets_http_only_cookie() {
        let auth = service();
        let app = app!(auth);
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(ana())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "session_token")
            .expect("session cookie");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.value().len(), 64);
    }

    #[actix_web::test]
    async fn duplicate_register_is_conflict() {
        let auth = service();
        let app = app!(auth);
        for expected in [StatusCode::OK, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/register")
                .set_json(ana())
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }
    }

    #[actix_web::test]
    async fn bad_login_has_error_envelope() {
        let auth = service();
        let app = app!(auth);
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({"username": "ghost", "password": "secret123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "unauthorized");
    }

    #[actix_web::test]
    async fn refresh_without_cookie_is_unauthorized() {
        let auth = service();
        let app = app!(auth);
        let req = test::TestRequest::post().uri("/refresh").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_with_garbled_cookie_is_bad_request() {
        let auth = service();
        let app = app!(auth);
        let req = test::TestRequest::post()
            .uri("/logout")
            .insert_header((header::COOKIE, "garbage"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn logout_clears_then_not_found() {
        let auth = service();
        let app = app!(auth);
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(ana())
            .to_request();
        let resp = test::call_service(&app, req).await;
        let token = resp
            .response()
            .cookies()
            .find(|c| c.name() == "session_token")
            .map(|c| c.value().to_string())
            .expect("session cookie");
        let cookie = format!("session_token={}", token);
        let req = test::TestRequest::post()
            .uri("/logout")
            .insert_header((header::COOKIE, cookie.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cleared = resp
            .response()
            .cookies()
            .find(|c| c.name() == "session_token")
            .expect("cleared cookie");
        assert!(cleared.value().is_empty());
        let req = test::TestRequest::post()
            .uri("/logout")
            .insert_header((header::COOKIE, cookie.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
