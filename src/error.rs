use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum DBError {
    #[error("Email is already taken")]
    AlreadyRegistered,

    #[error("Not Found")]
    NotFound,
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Any error: {0:?}")]
    Anyhow(#[from] anyhow::Error),

    #[error("DB Error: {0:?}")]
    DBError(#[from] DBError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("SQL failed: {0:?}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Session error: {0:?}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Invalid request: {0:?}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Config error: {0}")]
    Config(String),
}

// Tell axum how to convert `AppError` into a response. The cause goes to the
// log; the client only ever sees a status page or a redirect.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:?}", self);

        match self {
            AppError::Unauthorized => Redirect::to("/login").into_response(),
            AppError::Validation(ref errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string()).into_response()
            }
            AppError::DBError(DBError::NotFound) => (
                StatusCode::NOT_FOUND,
                Html("<h1>Not Found</h1>".to_string()),
            )
                .into_response(),
            AppError::DBError(db_error) => {
                (StatusCode::UNPROCESSABLE_ENTITY, db_error.to_string()).into_response()
            }
            AppError::Anyhow(_)
            | AppError::Sqlx(_)
            | AppError::Session(_)
            | AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Something went wrong</h1>".to_string()),
            )
                .into_response(),
        }
    }
}
