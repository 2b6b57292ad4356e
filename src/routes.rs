use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::{get, post},
    BoxError, Router,
};
use sqlx::SqlitePool;
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{api, AppState};

pub fn generate_routes(pool: SqlitePool) -> Router {
    let state = AppState { pool };

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store).with_secure(false);

    Router::new()
        // ==== SESSION ==== //
        .route("/login", get(api::auth::login_form).post(api::auth::login))
        .route("/logout", post(api::auth::logout))
        // ==== HOME ==== //
        .route("/", get(api::home::index))
        // ==== COMMENTS ==== //
        .route(
            "/comments",
            get(api::comments::index).post(api::comments::create),
        )
        .route("/comments/new", get(api::comments::new))
        .route(
            "/comments/:id",
            get(api::comments::show)
                .patch(api::comments::update)
                .delete(api::comments::destroy)
                .post(api::comments::update_or_destroy),
        )
        .route("/comments/:id/edit", get(api::comments::edit))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Unhandled error: {err}"),
                    )
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(1024, Duration::from_secs(1)))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(session_layer),
        )
        .with_state(state)
}
