use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::AppResult;

pub type ArticleId = i64;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
}

/// Articles ordered by title, for the subject selector on the comment forms.
pub async fn get_articles(pool: &SqlitePool) -> AppResult<Vec<Article>> {
    let articles = sqlx::query_as::<_, Article>("SELECT id, title FROM articles ORDER BY title")
        .fetch_all(pool)
        .await?;

    Ok(articles)
}

pub async fn create_article(pool: &SqlitePool, title: &str) -> AppResult<Article> {
    let article = sqlx::query_as::<_, Article>(
        "INSERT INTO articles (title) VALUES (?) RETURNING id, title",
    )
    .bind(title)
    .fetch_one(pool)
    .await?;

    Ok(article)
}
