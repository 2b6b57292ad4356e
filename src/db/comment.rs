use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::{ArticleId, UserId};
use crate::error::AppResult;

pub type CommentId = i64;

#[derive(Debug, Serialize, FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub message: String,
    pub user_id: UserId,
    pub article_id: ArticleId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A comment joined with its author's email and its article's title, the
/// shape every page renders.
#[derive(Debug, Serialize, FromRow)]
pub struct CommentDetails {
    pub id: CommentId,
    pub message: String,
    pub user_id: UserId,
    pub article_id: ArticleId,
    pub user_email: String,
    pub article_title: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

const DETAILS_SELECT: &str = r#"
SELECT
    comments.id,
    comments.message,
    comments.user_id,
    comments.article_id,
    users.email AS user_email,
    articles.title AS article_title,
    comments.created_at,
    comments.updated_at
FROM comments
INNER JOIN users ON users.id = comments.user_id
INNER JOIN articles ON articles.id = comments.article_id
"#;

pub async fn get_comments(pool: &SqlitePool) -> AppResult<Vec<CommentDetails>> {
    let sql = format!("{DETAILS_SELECT} ORDER BY comments.id DESC");
    let comments = sqlx::query_as::<_, CommentDetails>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(comments)
}

pub async fn get_comment(
    pool: &SqlitePool,
    comment_id: CommentId,
) -> AppResult<Option<CommentDetails>> {
    let sql = format!("{DETAILS_SELECT} WHERE comments.id = ?");
    let comment = sqlx::query_as::<_, CommentDetails>(&sql)
        .bind(comment_id)
        .fetch_optional(pool)
        .await?;

    Ok(comment)
}

pub async fn create_comment(
    pool: &SqlitePool,
    message: &str,
    user_id: UserId,
    article_id: ArticleId,
) -> AppResult<Comment> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (message, user_id, article_id)
        VALUES (?, ?, ?)
        RETURNING id, message, user_id, article_id, created_at, updated_at
        "#,
    )
    .bind(message)
    .bind(user_id)
    .bind(article_id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Update a comment's message and, when present, reassign its user or
/// article. Returns the number of rows touched (0 when the id is stale).
pub async fn update_comment(
    pool: &SqlitePool,
    comment_id: CommentId,
    message: &str,
    user_id: Option<UserId>,
    article_id: Option<ArticleId>,
) -> AppResult<u64> {
    let updated = sqlx::query(
        r#"
        UPDATE comments
        SET message = ?,
            user_id = COALESCE(?, user_id),
            article_id = COALESCE(?, article_id),
            updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(message)
    .bind(user_id)
    .bind(article_id)
    .bind(comment_id)
    .execute(pool)
    .await?;

    Ok(updated.rows_affected())
}

pub async fn delete_comment(pool: &SqlitePool, comment_id: CommentId) -> AppResult<u64> {
    let deleted = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(deleted.rows_affected())
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::db;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::prepare_db(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let pool = test_pool().await;
        let user = db::create_user(&pool, "author@example.com", "x").await.unwrap();
        let article = db::create_article(&pool, "First post").await.unwrap();

        let comment = create_comment(&pool, "hello", user.id, article.id)
            .await
            .unwrap();

        let details = get_comment(&pool, comment.id).await.unwrap().unwrap();
        assert_eq!(details.message, "hello");
        assert_eq!(details.user_email, "author@example.com");
        assert_eq!(details.article_title, "First post");

        let other = db::create_user(&pool, "other@example.com", "x").await.unwrap();
        let touched = update_comment(&pool, comment.id, "revised", Some(other.id), None)
            .await
            .unwrap();
        assert_eq!(touched, 1);

        let details = get_comment(&pool, comment.id).await.unwrap().unwrap();
        assert_eq!(details.message, "revised");
        assert_eq!(details.user_email, "other@example.com");
        assert_eq!(details.article_title, "First post");

        assert_eq!(delete_comment(&pool, comment.id).await.unwrap(), 1);
        assert!(get_comment(&pool, comment.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stale_ids_touch_nothing() {
        let pool = test_pool().await;
        assert!(get_comment(&pool, 10_000_000).await.unwrap().is_none());
        assert_eq!(
            update_comment(&pool, 10_000_000, "x", None, None).await.unwrap(),
            0
        );
        assert_eq!(delete_comment(&pool, 10_000_000).await.unwrap(), 0);
    }
}
