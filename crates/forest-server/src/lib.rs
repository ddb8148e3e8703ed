//! Forest HTTP server.
//!
//! Wires the auth and social services to actix-web routes under
//! `/api/v1`, sharing one PostgreSQL client across every worker.
//!
//! ## Submodules
//!
//! - [`args`] - Command line and environment configuration
mod args;

pub use args::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::web;
use forest_auth::Auth;
use forest_auth::AuthRepository;
use forest_auth::Credential;
use forest_auth::Profile;
use forest_auth::Resolve;
use forest_auth::Resolver;
use forest_auth::Session;
use forest_pg::migrate;
use forest_social::Follow;
use forest_social::Like;
use forest_social::Post;
use forest_social::Social;
use forest_social::SocialRepository;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_postgres::Client;

/// Runs a database call outside the request services under a deadline.
async fn bounded<T, E, F>(limit: Duration, what: &str, op: F) -> anyhow::Result<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    match tokio::time::timeout(limit, op).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(anyhow::anyhow!("{} exceeded {:?}", what, limit)),
    }
}

/// Database handle and deadline for the liveness probe.
struct Health {
    client: Arc<Client>,
    timeout: Duration,
}

async fn health(health: web::Data<Health>) -> impl Responder {
    match bounded(health.timeout, "health check", health.client.execute("SELECT 1", &[]))
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

/// Browser clients on any http(s) origin, with credentials.
fn cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|origin, _| {
            let origin = origin.as_bytes();
            origin.starts_with(b"http://") || origin.starts_with(b"https://")
        })
        .allowed_methods(["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([header::LINK])
        .supports_credentials()
        .max_age(300)
}

/// Creates every table in dependency order.
pub async fn schema(client: &Client) -> Result<(), forest_pg::PgErr> {
    migrate::<Profile>(client).await?;
    migrate::<Credential>(client).await?;
    migrate::<Session>(client).await?;
    migrate::<Post>(client).await?;
    migrate::<Like>(client).await?;
    migrate::<Follow>(client).await?;
    Ok(())
}

/// Mounts the `/api/v1` routes. Expects `Auth<A>` and `Social<D, R>`
/// in app data.
#[rustfmt::skip]
pub fn routes<A, D, R>(cfg: &mut web::ServiceConfig)
where
    A: AuthRepository + Clone + 'static,
    D: SocialRepository + 'static,
    R: Resolve + 'static,
{
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(forest_auth::register::<A>))
                    .route("/login",    web::post().to(forest_auth::login::<A>))
                    .route("/refresh",  web::post().to(forest_auth::refresh::<A>))
                    .route("/logout",   web::post().to(forest_auth::logout::<A>)),
            )
            .route("/profile", web::get().to(forest_social::profile::<D, R>))
            .service(
                web::scope("/posts")
                    .route("",             web::get().to(forest_social::posts::<D, R>))
                    .route("",             web::post().to(forest_social::create_post::<D, R>))
                    .route("/{id}",        web::get().to(forest_social::post::<D, R>))
                    .route("/{id}",        web::put().to(forest_social::update_post::<D, R>))
                    .route("/{id}",        web::delete().to(forest_social::delete_post::<D, R>))
                    .route("/{id}/like",   web::post().to(forest_social::like::<D, R>))
                    .route("/{id}/unlike", web::post().to(forest_social::unlike::<D, R>)),
            )
            .service(
                web::scope("/users")
                    .route("/{id}/follow",   web::post().to(forest_social::follow::<D, R>))
                    .route("/{id}/unfollow", web::post().to(forest_social::unfollow::<D, R>)),
            ),
    );
}

type Db = Arc<Client>;

pub async fn run(args: Args) -> anyhow::Result<()> {
    let client = forest_pg::db(&args.db).await?;
    bounded(args.timeout(), "schema migration", schema(&client)).await?;
    let config = args.auth();
    let auth = web::Data::new(Auth::new(client.clone(), config));
    let social = web::Data::new(Social::new(
        client.clone(),
        Resolver::new(client.clone(), config),
        args.timeout(),
    ));
    let health = web::Data::new(Health {
        client,
        timeout: args.timeout(),
    });
    log::info!("starting forest server on {}", args.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(cors())
            .app_data(auth.clone())
            .app_data(social.clone())
            .app_data(health.clone())
            .route("/health", web::get().to(self::health))
            .configure(routes::<Db, Db, Resolver<Db>>)
    })
    .workers(args.workers)
    .bind(&args.bind)?
    .run()
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use forest_auth::AuthConfig;
    use forest_auth::Cost;

    type Accounts = forest_auth::Memory;
    type Board = forest_social::Memory;
    type Sessions = Resolver<Accounts>;

    macro_rules! app {
        () => {{
            let accounts = Accounts::default();
            let config = AuthConfig {
                cost: Cost::minimal(),
                ..AuthConfig::default()
            };
            let auth = web::Data::new(Auth::new(accounts.clone(), config));
            let social = web::Data::new(Social::new(
                Board::default(),
                Resolver::new(accounts, config),
                Duration::from_secs(1),
            ));
            test::init_service(
                App::new()
                    .app_data(auth)
                    .app_data(social)
                    .configure(routes::<Accounts, Board, Sessions>),
            )
            .await
        }};
    }

    fn session(resp: &actix_web::dev::ServiceResponse) -> String {
        resp.response()
            .cookies()
            .find(|c| c.name() == "session_token")
            .map(|c| format!("session_token={}", c.value()))
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn register_refresh_logout() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(serde_json::json!({
                "username": "ana",
                "nickname": "Ana",
                "email": "a@x.com",
                "password": "secret123",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let first = session(&resp);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .insert_header((header::COOKIE, first.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let second = session(&resp);
        assert_ne!(first, second);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header((header::COOKIE, first.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header((header::COOKIE, second.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn social_writes_need_a_session() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/posts")
            .insert_header((header::COOKIE, "session_token=forged"))
            .set_json(serde_json::json!({ "text": "hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/v1/users/0190a8a4-0000-7000-8000-000000000000/follow")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unknown_post_is_not_found() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/posts/0190a8a4-0000-7000-8000-000000000000")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "notFound");
    }

    #[actix_web::test]
    async fn bounded_names_the_stalled_call() {
        let stalled = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, std::io::Error>(())
        };
        let err = bounded(Duration::from_millis(10), "health check", stalled)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("health check exceeded"));
        let fast = bounded(Duration::from_secs(1), "schema migration", async {
            Ok::<_, std::io::Error>(7)
        });
        assert_eq!(fast.await.unwrap(), 7);
    }
}
