mod user;
pub use user::*;
mod article;
pub use article::*;
mod comment;
pub use comment::*;

use sqlx::{Executor, SqlitePool};

use crate::error::AppResult;
use crate::utils::hasher;

pub async fn prepare_db(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(include_str!("sql/schema.sql")).await?;
    Ok(())
}

/// Insert a known user and a couple of articles so a fresh database is
/// immediately usable. Idempotent: skipped when any user already exists.
pub async fn seed_demo_data(pool: &SqlitePool) -> AppResult<()> {
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if users > 0 {
        return Ok(());
    }

    let hash = hasher::hash_password("password")?;
    let user = create_user(pool, "demo@example.com", &hash).await?;
    let article = create_article(pool, "Getting started with Remark").await?;
    create_article(pool, "Release notes").await?;
    create_comment(pool, "Welcome aboard!", user.id, article.id).await?;

    tracing::info!("seeded demo data (demo@example.com / password)");
    Ok(())
}
