use askama::Template;
use tower_sessions::Session;

use crate::{error::AppResult, utils::auth::AuthUser, utils::flash};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    flash: Option<String>,
    user_email: String,
}

// GET /
pub async fn index(AuthUser(user): AuthUser, session: Session) -> AppResult<HomeTemplate> {
    let flash = flash::take(&session).await?;
    Ok(HomeTemplate {
        flash,
        user_email: user.email,
    })
}
