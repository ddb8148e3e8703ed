use super::*;
use actix_web::HttpResponse;
use actix_web::web;
use forest_auth::Fault;
use forest_auth::ProfileInfo;
use forest_auth::Resolve;
use forest_auth::Token;
use forest_core::ID;

/// Parses a path or query identifier, naming the field on failure.
fn parse<T>(raw: &str, field: &str) -> Result<ID<T>, Fault> {
    match raw.trim() {
        "" => Err(Fault::BadRequest(format!("{} is required", field))),
        s => s
            .parse()
            .map_err(|_| Fault::BadRequest(format!("{} is invalid", field))),
    }
}

fn status(status: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": status }))
}

pub async fn profile<D, R>(
    social: web::Data<Social<D, R>>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, Fault>
where
    D: SocialRepository + 'static,
    R: Resolve + 'static,
{
    let id = parse(&query.user_id, "user_id")?;
    let profile = social.profile(id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "profile": ProfileInfo::from(&profile) })))
}

pub async fn posts<D, R>(
    social: web::Data<Social<D, R>>,
    query: web::Query<AuthorQuery>,
) -> Result<HttpResponse, Fault>
where
    D: SocialRepository + 'static,
    R: Resolve + 'static,
{
    let author = parse(&query.author_id, "author_id")?;
    let posts = social.posts(author).await?;
    let posts = posts.iter().map(PostInfo::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "posts": posts })))
}

pub async fn post<D, R>(
    social: web::Data<Social<D, R>>,
    path: web::Path<String>,
) -> Result<HttpResponse, Fault>
where
    D: SocialRepository + 'static,
    R: Resolve + 'static,
{
    let id = parse(&path, "id")?;
    let post = social.post(id).await?;
    Ok(HttpResponse::Ok().json(PostInfo::from(&post)))
}

pub async fn create_post<D, R>(
    social: web::Data<Social<D, R>>,
    token: Token,
    draft: web::Json<Draft>,
) -> Result<HttpResponse, Fault>
where
    D: SocialRepository + 'static,
    R: Resolve + 'static,
{
    let post = social.create_post(&token, &draft).await?;
    Ok(HttpResponse::Created().json(PostInfo::from(&post)))
}

pub async fn update_post<D, R>(
    social: web::Data<Social<D, R>>,
    token: Token,
    path: web::Path<String>,
    draft: web::Json<Draft>,
) -> Result<HttpResponse, Fault>
where
    D: SocialRepository + 'static,
    R: Resolve + 'static,
{
    let id = parse(&path, "id")?;
    let post = social.update_post(&token, id, &draft).await?;
    Ok(HttpResponse::Ok().json(PostInfo::from(&post)))
}

pub async fn delete_post<D, R>(
    social: web::Data<Social<D, R>>,
    token: Token,
    path: web::Path<String>,
) -> Result<HttpResponse, Fault>
where
    D: SocialRepository + 'static,
    R: Resolve + 'static,
{
    let id = parse(&path, "id")?;
    social.delete_post(&token, id).await?;
    Ok(status("deleted"))
}

pub async fn like<D, R>(
    social: web::Data<Social<D, R>>,
    token: Token,
    path: web::Path<String>,
) -> Result<HttpResponse, Fault>
where
    D: SocialRepository + 'static,
    R: Resolve + 'static,
{
    let id = parse(&path, "id")?;
    social.like(&token, id).await?;
    Ok(status("liked"))
}

pub async fn unlike<D, R>(
    social: web::Data<Social<D, R>>,
    token: Token,
    path: web::Path<String>,
) -> Result<HttpResponse, Fault>
where
    D: SocialRepository + 'static,
    R: Resolve + 'static,
{
    let id = parse(&path, "id")?;
    social.unlike(&token, id).await?;
    Ok(status("unliked"))
}

pub async fn follow<D, R>(
    social: web::Data<Social<D, R>>,
    token: Token,
    path: web::Path<String>,
) -> Result<HttpResponse, Fault>
where
    D: SocialRepository + 'static,
    R: Resolve + 'static,
{
    let id = parse(&path, "id")?;
    social.follow(&token, id).await?;
    Ok(status("followed"))
}

pub async fn unfollow<D, R>(
    social: web::Data<Social<D, R>>,
    token: Token,
    path: web::Path<String>,
) -> Result<HttpResponse, Fault>
where
    D: SocialRepository + 'static,
    R: Resolve + 'static,
{
    let id = parse(&path, "id")?;
    social.unfollow(&token, id).await?;
    Ok(status("unfollowed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::test;
    use forest_auth::Profile;
    use forest_core::Unique;
    use std::time::Duration;

    /// Accepts exactly one token, for one profile.
    struct Single(String, ID<Profile>);
    impl Resolve for Single {
        async fn resolve(&self, token: &Token) -> Result<ID<Profile>, Fault> {
            match token.as_str() == self.0 {
                true => Ok(self.1),
                false => Err(Fault::Unauthorized),
            }
        }
    }

    type Service = Social<Memory, Single>;

    fn service() -> (web::Data<Service>, ID<Profile>) {
        let db = Memory::default();
        let ana = Profile::new("ana".into(), "Ana".into(), "a@x.com".into());
        let id = ana.id();
        db.admit(ana);
        let resolver = Single("live".into(), id);
        let social = Social::new(db, resolver, Duration::from_secs(1));
        (web::Data::new(social), id)
    }

    macro_rules! app {
        ($social:expr) => {
            test::init_service(
                App::new()
                    .app_data($social.clone())
                    .route("/profile", web::get().to(profile::<Memory, Single>))
                    .route("/posts", web::get().to(posts::<Memory, Single>))
                    .route("/posts", web::post().to(create_post::<Memory, Single>))
                    .route("/posts/{id}", web::get().to(post::<Memory, Single>))
                    .route("/posts/{id}", web::put().to(update_post::<Memory, Single>))
                    .route("/posts/{id}", web::delete().to(delete_post::<Memory, Single>))
                    .route("/users/{id}/follow", web::post().to(follow::<Memory, Single>)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn parse_names_the_field() {
        assert_eq!(
            parse::<Profile>("", "user_id"),
            Err(Fault::bad("user_id is required"))
        );
        assert_eq!(
            parse::<Profile>("nope", "user_id"),
            Err(Fault::bad("user_id is invalid"))
        );
        let id = ID::<Profile>::default();
        assert_eq!(parse::<Profile>(&id.to_string(), "user_id"), Ok(id));
    }

    #[actix_web::test]
    async fn profile_envelope() {
        let (social, id) = service();
        let app = app!(social);
        let req = test::TestRequest::get()
            .uri(&format!("/profile?user_id={}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["profile"]["username"], "ana");
        assert_eq!(body["profile"]["theme"], "forest");
    }

    #[actix_web::test]
    async fn posts_require_author_id() {
        let (social, _) = service();
        let app = app!(social);
        let req = test::TestRequest::get().uri("/posts").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "author_id is required");
    }

    #[actix_web::test]
    async fn create_without_cookie_is_unauthorized() {
        let (social, _) = service();
        let app = app!(social);
        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(serde_json::json!({ "text": "hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_list_delete() {
        let (social, id) = service();
        let app = app!(social);
        let req = test::TestRequest::post()
            .uri("/posts")
            .insert_header((header::COOKIE, "session_token=live"))
            .set_json(serde_json::json!({ "text": "hello forest" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(created["author_id"], id.to_string());
        let post = created["id"].as_str().unwrap_or_default().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/posts?author_id={}", id))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["posts"].as_array().map(Vec::len), Some(1));

        let req = test::TestRequest::delete()
            .uri(&format!("/posts/{}", post))
            .insert_header((header::COOKIE, "session_token=live"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/posts/{}", post))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn follow_self_is_bad_request() {
        let (social, id) = service();
        let app = app!(social);
        let req = test::TestRequest::post()
            .uri(&format!("/users/{}/follow", id))
            .insert_header((header::COOKIE, "session_token=live"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "cantFollowSelf");
    }
}
