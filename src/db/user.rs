use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::{AppError, AppResult, DBError};

pub type UserId = i64;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip)]
    pub hash: String,
}

pub async fn get_user(pool: &SqlitePool, user_id: UserId) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>("SELECT id, email, hash FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    user.ok_or(AppError::DBError(DBError::NotFound))
}

pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, email, hash FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Users ordered by email, for the author selector on the comment forms.
pub async fn get_users(pool: &SqlitePool) -> AppResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT id, email, hash FROM users ORDER BY email")
        .fetch_all(pool)
        .await?;

    Ok(users)
}

pub async fn create_user(pool: &SqlitePool, email: &str, hash: &str) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, hash) VALUES (?, ?) RETURNING id, email, hash",
    )
    .bind(email)
    .bind(hash)
    .fetch_one(pool)
    .await;

    match user {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            Err(DBError::AlreadyRegistered.into())
        }
        Err(err) => Err(err.into()),
    }
}
