use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde_json::json;

use super::routes::AppState;
use super::ApiError;
use crate::auth::{jwt_auth_middleware, UserSession};
use crate::models::{QuizResult, QuizResultResponse, SubmitQuizRequest};
use crate::services::health_metrics::{ActivityLevel, Gender};
use crate::services::{calculate_health_metrics, QuizService};

pub fn quiz_routes(state: AppState) -> Router {
    Router::new()
        .route("/quiz", post(submit_quiz))
        .route("/quiz/latest", get(latest_quiz))
        .route("/quiz/history", get(quiz_history))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Submit a completed health assessment: derive the metrics, run the AI
/// analysis, and persist the result.
#[tracing::instrument(skip(state, session, request))]
async fn submit_quiz(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<SubmitQuizRequest>,
) -> Result<Json<QuizResultResponse>, ApiError> {
    if request.height_cm <= 0.0 || request.weight_kg <= 0.0 || request.age <= 0 {
        return Err(ApiError::bad_request(
            "height, weight and age must be positive",
        ));
    }

    let metrics = calculate_health_metrics(
        request.height_cm,
        request.weight_kg,
        request.age,
        Gender::from_str(&request.gender),
        ActivityLevel::from_str(&request.activity_level),
    );

    // The analysis never fails; it degrades to a deterministic fallback
    let health_data = json!({
        "answers": request.answers,
        "age": request.age,
        "gender": request.gender,
        "activityLevel": request.activity_level,
        "metrics": metrics,
    });
    let analysis = state.analysis_service.analyze_health_data(&health_data).await;

    // Persist the graded result first, then attach the full analysis
    let quiz_service = QuizService::new(state.db.clone());
    let result = quiz_service
        .save_result(
            session.user_id,
            &request.answers,
            &metrics,
            &analysis.risk_level,
            analysis.clamped_risk_score(),
            None,
        )
        .await?;
    quiz_service
        .attach_analysis(session.user_id, result.id, &analysis)
        .await?;

    Ok(Json(QuizResultResponse {
        id: result.id,
        risk_level: result.risk_level,
        risk_score: result.risk_score,
        health_metrics: metrics,
        ai_analysis: Some(analysis),
        ai_analyzed: true,
        completed_at: result.completed_at,
    }))
}

/// Most recent assessment for the authenticated user
#[tracing::instrument(skip(state, session))]
async fn latest_quiz(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<QuizResultResponse>, ApiError> {
    let quiz_service = QuizService::new(state.db.clone());
    let result = quiz_service
        .latest(session.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No quiz results yet"))?;

    Ok(Json(into_response(result)?))
}

/// All past assessments, newest first
#[tracing::instrument(skip(state, session))]
async fn quiz_history(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<QuizResultResponse>>, ApiError> {
    let quiz_service = QuizService::new(state.db.clone());
    let results = quiz_service.history(session.user_id).await?;

    let responses = results
        .into_iter()
        .map(into_response)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(responses))
}

fn into_response(result: QuizResult) -> Result<QuizResultResponse, ApiError> {
    let health_metrics = serde_json::from_value(result.health_metrics)
        .map_err(|err| ApiError::internal(format!("Corrupt stored metrics: {}", err)))?;
    let ai_analysis = result
        .ai_analysis
        .map(serde_json::from_value)
        .transpose()
        .map_err(|err| ApiError::internal(format!("Corrupt stored analysis: {}", err)))?;

    Ok(QuizResultResponse {
        id: result.id,
        risk_level: result.risk_level,
        risk_score: result.risk_score,
        health_metrics,
        ai_analysis,
        ai_analyzed: result.ai_analyzed,
        completed_at: result.completed_at,
    })
}
