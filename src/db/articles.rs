/// Article Repository
///
/// Read-only access to the article store. The recommendation pipeline only
/// ever needs two operations: a batch lookup by id and a random sample for
/// the degraded path.
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::Article;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Batch lookup. Ids that do not resolve are simply absent from the map.
    async fn find_many_by_ids(&self, ids: &[String]) -> Result<HashMap<String, Article>>;

    /// Arbitrary articles for the fallback path, no filtering.
    async fn sample_random(&self, count: usize) -> Result<Vec<Article>>;
}

#[derive(Debug, sqlx::FromRow)]
struct ArticleRow {
    id: String,
    title: String,
    #[sqlx(rename = "abstract")]
    abstract_text: String,
    topics: Vec<String>,
    authors_parsed: Json<Vec<[String; 3]>>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            id: row.id,
            title: row.title,
            abstract_text: row.abstract_text,
            topics: row.topics,
            authors_parsed: row.authors_parsed.0,
        }
    }
}

pub struct PgArticleStore {
    pool: PgPool,
}

impl PgArticleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn find_many_by_ids(&self, ids: &[String]) -> Result<HashMap<String, Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, title, abstract, topics, authors_parsed
            FROM articles
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::ArticleLookup(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| (row.id.clone(), Article::from(row)))
            .collect())
    }

    async fn sample_random(&self, count: usize) -> Result<Vec<Article>> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, title, abstract, topics, authors_parsed
            FROM articles
            ORDER BY random()
            LIMIT $1
            "#,
        )
        .bind(count as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::ArticleLookup(e.to_string()))?;

        Ok(rows.into_iter().map(Article::from).collect())
    }
}
