use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::routes::AppState;
use super::ApiError;
use crate::auth::{jwt_auth_middleware, UserSession};
use crate::models::{DailyTask, DailyTaskList, HealthTracking};
use crate::services::UserService;

pub fn dashboard_routes(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/tasks", post(add_task))
        .route("/dashboard/tasks/:id", put(toggle_task))
        .route("/dashboard/water", put(update_water))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            jwt_auth_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardResponse {
    display_name: String,
    streak_days: i32,
    completed_goals: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest_quiz: Option<Value>,
    health_tracking: HealthTracking,
    daily_tasks: Vec<DailyTask>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskToggleResponse {
    daily_tasks: Vec<DailyTask>,
    health_tracking: HealthTracking,
    streak_days: i32,
    completed_goals: i32,
}

#[derive(Debug, Deserialize)]
struct AddTaskRequest {
    title: String,
}

#[derive(Debug, Deserialize)]
struct WaterIntakeRequest {
    glasses: i32,
}

/// Everything the dashboard shows in one response
#[tracing::instrument(skip(state, session))]
async fn get_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let user_service = UserService::new(state.db.clone());
    let user = user_service
        .get_user(session.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let tracking: HealthTracking =
        serde_json::from_value(user.health_tracking).unwrap_or_default();
    let tasks: DailyTaskList = serde_json::from_value(user.daily_tasks).unwrap_or_default();

    Ok(Json(DashboardResponse {
        display_name: user.display_name,
        streak_days: user.streak_days,
        completed_goals: user.completed_goals,
        latest_quiz: user.latest_quiz,
        health_tracking: tracking,
        daily_tasks: tasks.items,
    }))
}

/// Add a daily task
#[tracing::instrument(skip(state, session, request))]
async fn add_task(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<AddTaskRequest>,
) -> Result<Json<Vec<DailyTask>>, ApiError> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("Task title must not be empty"));
    }

    let user_service = UserService::new(state.db.clone());
    let tasks = user_service.add_task(session.user_id, &request.title).await?;
    Ok(Json(tasks))
}

/// Toggle a task's completion; returns the refreshed tracking state
#[tracing::instrument(skip(state, session))]
async fn toggle_task(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(task_id): Path<String>,
) -> Result<Json<TaskToggleResponse>, ApiError> {
    let user_service = UserService::new(state.db.clone());
    let outcome = user_service
        .toggle_task(session.user_id, &task_id)
        .await
        .map_err(|_| ApiError::not_found("Task not found"))?;

    Ok(Json(TaskToggleResponse {
        daily_tasks: outcome.tasks,
        health_tracking: outcome.tracking,
        streak_days: outcome.streak_days,
        completed_goals: outcome.completed_goals,
    }))
}

/// Record water intake as a glasses count; when the count crosses the
/// daily target the water task is toggled along with it.
#[tracing::instrument(skip(state, session, request))]
async fn update_water(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<WaterIntakeRequest>,
) -> Result<Json<TaskToggleResponse>, ApiError> {
    if request.glasses < 0 {
        return Err(ApiError::bad_request("glasses must not be negative"));
    }

    let user_service = UserService::new(state.db.clone());
    let outcome = user_service
        .set_water_glasses(session.user_id, request.glasses)
        .await?;

    Ok(Json(TaskToggleResponse {
        daily_tasks: outcome.tasks,
        health_tracking: outcome.tracking,
        streak_days: outcome.streak_days,
        completed_goals: outcome.completed_goals,
    }))
}
