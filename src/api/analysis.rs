use axum::{extract::State, middleware, response::Json, routing::post, Router};
use serde::Deserialize;
use serde_json::Value;

use super::routes::AppState;
use crate::auth::jwt_auth_middleware;
use crate::models::AiAnalysis;

pub fn analysis_routes(state: AppState) -> Router {
    Router::new()
        .route("/analyze-health", post(analyze_health))
        .route("/health-ai-analysis", post(health_ai_analysis))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            jwt_auth_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptAnalysisRequest {
    system_prompt: String,
    user_prompt: String,
}

/// Analyze raw health assessment data. Always yields an analysis; a static
/// fallback stands in when the model output cannot be parsed.
#[tracing::instrument(skip(state, health_data))]
async fn analyze_health(
    State(state): State<AppState>,
    Json(health_data): Json<Value>,
) -> Json<AiAnalysis> {
    let analysis = state.analysis_service.analyze_health_data(&health_data).await;
    Json(analysis)
}

/// Run a caller-supplied analysis prompt pair. Falls back to a response
/// derived from keywords in the user prompt when the model is unavailable.
#[tracing::instrument(skip(state, request))]
async fn health_ai_analysis(
    State(state): State<AppState>,
    Json(request): Json<PromptAnalysisRequest>,
) -> Json<AiAnalysis> {
    let analysis = state
        .analysis_service
        .run_prompt(&request.system_prompt, &request.user_prompt)
        .await;
    Json(analysis)
}
