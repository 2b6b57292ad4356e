use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use validator::Validate;

use crate::{
    db,
    error::AppResult,
    utils::{
        auth::USER_ID_KEY,
        flash, hasher,
    },
};

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    flash: Option<String>,
    error: Option<String>,
    email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Email can't be blank"))]
    email: String,
    #[validate(length(min = 1, message = "Password can't be blank"))]
    password: String,
}

// GET /login
pub async fn login_form(session: Session) -> AppResult<Response> {
    // Already signed in? Straight to the home page.
    if session.get::<i64>(USER_ID_KEY).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let flash = flash::take(&session).await?;
    Ok(LoginTemplate {
        flash,
        error: None,
        email: String::new(),
    }
    .into_response())
}

// POST /login
pub async fn login(
    State(pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let rejected = |email: String| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            LoginTemplate {
                flash: None,
                error: Some("Invalid email or password.".to_string()),
                email,
            },
        )
            .into_response()
    };

    if form.validate().is_err() {
        return Ok(rejected(form.email));
    }

    let Some(user) = db::get_user_by_email(&pool, &form.email).await? else {
        return Ok(rejected(form.email));
    };

    if !hasher::verify_password(&user.hash, &form.password) {
        tracing::debug!(email = %form.email, "password verification failed");
        return Ok(rejected(form.email));
    }

    // Fresh session id on privilege change.
    session.cycle_id().await?;
    session.insert(USER_ID_KEY, user.id).await?;
    flash::set(&session, "Signed in successfully.").await?;

    Ok(Redirect::to("/").into_response())
}

// POST /logout
pub async fn logout(session: Session) -> AppResult<Response> {
    session.flush().await?;
    flash::set(&session, "Signed out successfully.").await?;
    Ok(Redirect::to("/login").into_response())
}
