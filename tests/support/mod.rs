//! Request-level test harness: drives the full router with an in-memory
//! database, holding the session cookie across requests like a browser.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

use remark::db::{self, ArticleId, CommentId, UserId};
use remark::utils::hasher;

pub struct TestApp {
    router: Router,
    pub pool: SqlitePool,
    cookie: Option<String>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        db::prepare_db(&pool).await.expect("schema");

        let router = remark::routes::generate_routes(pool.clone());
        Self {
            router,
            pool,
            cookie: None,
        }
    }

    pub async fn get(&mut self, path: &str) -> Response {
        let request = Request::get(path).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.form_request("POST", path, fields).await
    }

    pub async fn patch_form(&mut self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.form_request("PATCH", path, fields).await
    }

    pub async fn delete(&mut self, path: &str) -> Response {
        let request = Request::builder()
            .method("DELETE")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn form_request(&mut self, method: &str, path: &str, fields: &[(&str, &str)]) -> Response {
        let body = serde_urlencoded::to_string(fields).unwrap();
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    async fn send(&mut self, mut request: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let raw = set_cookie.to_str().unwrap();
            self.cookie = Some(raw.split(';').next().unwrap().to_string());
        }

        response
    }

    /// Submit the login form and assert it lands on the home page.
    pub async fn login_as(&mut self, email: &str, password: &str) {
        let response = self
            .post_form("/login", &[("email", email), ("password", password)])
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    /// Assert the response is a redirect, then fetch its target.
    pub async fn follow(&mut self, response: Response) -> Response {
        assert!(
            response.status().is_redirection(),
            "expected a redirect, got {}",
            response.status()
        );
        let target = location(&response).to_string();
        self.get(&target).await
    }
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub async fn create_user(pool: &SqlitePool, email: &str, password: &str) -> UserId {
    let hash = hasher::hash_password(password).unwrap();
    db::create_user(pool, email, &hash).await.unwrap().id
}

pub async fn create_article(pool: &SqlitePool, title: &str) -> ArticleId {
    db::create_article(pool, title).await.unwrap().id
}

pub async fn create_comment(
    pool: &SqlitePool,
    message: &str,
    user_id: UserId,
    article_id: ArticleId,
) -> CommentId {
    db::create_comment(pool, message, user_id, article_id)
        .await
        .unwrap()
        .id
}
