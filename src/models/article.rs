use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub read_time: String,
    pub content: String,
    pub author: String,
    pub published_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub category: String,
    pub read_time: String,
    pub content: String,
    pub author: String,
    pub published_date: DateTime<Utc>,
}
