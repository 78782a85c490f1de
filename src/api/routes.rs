use anyhow::Result;
use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use super::analysis::analysis_routes;
use super::appointments::{appointment_routes, doctor_routes};
use super::articles::article_routes;
use super::auth::auth_routes;
use super::chat::chat_routes;
use super::dashboard::dashboard_routes;
use super::health::health_check;
use super::quiz::quiz_routes;
use super::settings::settings_routes;
use crate::auth::{cors_layer, security_headers_layer, AuthService};
use crate::config::AppConfig;
use crate::services::{ChatClient, HealthAnalysisService};

/// State shared by the feature routers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth_service: AuthService,
    pub chat_client: ChatClient,
    pub analysis_service: HealthAnalysisService,
}

pub fn create_routes(db: PgPool, config: &AppConfig) -> Result<Router> {
    let auth_service = AuthService::new(db.clone(), &config.jwt_secret);
    let chat_client = ChatClient::new(&config.ai)?;
    let analysis_service = HealthAnalysisService::new(chat_client.clone());

    let state = AppState {
        db,
        auth_service: auth_service.clone(),
        chat_client,
        analysis_service,
    };

    let api = Router::new()
        .merge(chat_routes(state.clone()))
        .merge(analysis_routes(state.clone()))
        .merge(quiz_routes(state.clone()))
        .merge(doctor_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(dashboard_routes(state.clone()))
        .merge(article_routes(state.clone()))
        .merge(settings_routes(state));

    Ok(Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(auth_service))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(security_headers_layer()))
}
