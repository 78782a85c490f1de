use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::get,
    Extension, Router,
};

use super::routes::AppState;
use super::ApiError;
use crate::auth::{jwt_auth_middleware, UserSession};
use crate::models::{UpdateSettingsRequest, UserSettings};
use crate::services::UserService;

pub fn settings_routes(state: AppState) -> Router {
    Router::new()
        .route("/settings", get(get_settings).put(update_settings))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            jwt_auth_middleware,
        ))
        .with_state(state)
}

/// Current account settings
#[tracing::instrument(skip(state, session))]
async fn get_settings(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<UserSettings>, ApiError> {
    let user_service = UserService::new(state.db.clone());
    let settings = user_service.get_settings(session.user_id).await?;
    Ok(Json(settings))
}

/// Update profile fields and preference groups; omitted fields keep
/// their current values.
#[tracing::instrument(skip(state, session, request))]
async fn update_settings(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<UserSettings>, ApiError> {
    let user_service = UserService::new(state.db.clone());
    let settings = user_service
        .update_settings(session.user_id, request)
        .await?;
    Ok(Json(settings))
}
