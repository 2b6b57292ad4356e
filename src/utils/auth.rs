use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::db::{self, User, UserId};

pub const USER_ID_KEY: &str = "user_id";

/// Extractor for routes behind the login gate. Resolves the session's stored
/// user id to a full `User` row; any failure along the way becomes a
/// redirect to the login page.
#[derive(Debug)]
pub struct AuthUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login"))?;

        let user_id = session
            .get::<UserId>(USER_ID_KEY)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| Redirect::to("/login"))?;

        let pool = SqlitePool::from_ref(state);
        match db::get_user(&pool, user_id).await {
            Ok(user) => Ok(AuthUser(user)),
            Err(_) => Err(Redirect::to("/login")),
        }
    }
}
