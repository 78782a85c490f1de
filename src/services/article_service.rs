use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Article, NewArticle};

pub struct ArticleService {
    db: PgPool,
}

impl ArticleService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Article>> {
        let articles =
            sqlx::query_as::<_, Article>("SELECT * FROM articles ORDER BY published_date DESC")
                .fetch_all(&self.db)
                .await?;

        Ok(articles)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles")
            .fetch_one(&self.db)
            .await?;

        Ok(count.0)
    }

    pub async fn create(&self, article: NewArticle) -> Result<Article> {
        let created = sqlx::query_as::<_, Article>(
            "INSERT INTO articles
                 (id, title, category, read_time, content, author, published_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&article.title)
        .bind(&article.category)
        .bind(&article.read_time)
        .bind(&article.content)
        .bind(&article.author)
        .bind(article.published_date)
        .fetch_one(&self.db)
        .await?;

        Ok(created)
    }
}
