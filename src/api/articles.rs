use axum::{extract::State, response::Json, routing::get, Router};

use super::routes::AppState;
use super::ApiError;
use crate::models::Article;
use crate::services::ArticleService;

pub fn article_routes(state: AppState) -> Router {
    Router::new()
        .route("/articles", get(list_articles))
        .with_state(state)
}

/// Health articles, newest first
#[tracing::instrument(skip(state))]
async fn list_articles(State(state): State<AppState>) -> Result<Json<Vec<Article>>, ApiError> {
    let article_service = ArticleService::new(state.db.clone());
    let articles = article_service.list().await?;
    Ok(Json(articles))
}
