use tower_sessions::Session;

use crate::error::AppResult;

const FLASH_KEY: &str = "flash";

/// Queue a notice for the next rendered page. Flash messages ride the same
/// session as the login state and survive exactly one redirect.
pub async fn set(session: &Session, message: &str) -> AppResult<()> {
    session.insert(FLASH_KEY, message.to_string()).await?;
    Ok(())
}

/// Take the pending notice, if any. Reading consumes it.
pub async fn take(session: &Session) -> AppResult<Option<String>> {
    Ok(session.remove::<String>(FLASH_KEY).await?)
}
