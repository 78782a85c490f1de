use axum::{
    extract::{Path, Query, State},
    middleware,
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::routes::AppState;
use super::ApiError;
use crate::auth::{jwt_auth_middleware, UserSession};
use crate::models::{Appointment, BookAppointmentRequest, Doctor};
use crate::services::{AppointmentService, DoctorService};

/// Doctor listing is public; booking and managing appointments requires auth
pub fn doctor_routes(state: AppState) -> Router {
    Router::new()
        .route("/doctors", get(list_doctors))
        .with_state(state)
}

pub fn appointment_routes(state: AppState) -> Router {
    Router::new()
        .route("/appointments", post(book_appointment).get(list_appointments))
        .route("/appointments/:id/cancel", put(cancel_appointment))
        .route_layer(middleware::from_fn_with_state(
            state.auth_service.clone(),
            jwt_auth_middleware,
        ))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct DoctorQuery {
    search: Option<String>,
    specialty: Option<String>,
}

/// List available doctors, optionally filtered by name search or specialty
#[tracing::instrument(skip(state))]
async fn list_doctors(
    State(state): State<AppState>,
    Query(params): Query<DoctorQuery>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    let doctor_service = DoctorService::new(state.db.clone());
    let doctors = doctor_service
        .list(params.search.as_deref(), params.specialty.as_deref())
        .await?;
    Ok(Json(doctors))
}

/// Book an appointment with a doctor
#[tracing::instrument(skip(state, session, request))]
async fn book_appointment(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Appointment>, ApiError> {
    if request.date.trim().is_empty() || request.time.trim().is_empty() {
        return Err(ApiError::bad_request("date and time are required"));
    }

    let doctor_service = DoctorService::new(state.db.clone());
    let doctor = doctor_service
        .get(request.doctor_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Doctor not found"))?;

    let appointment_service = AppointmentService::new(state.db.clone());
    let appointment = appointment_service
        .book(session.user_id, &doctor, &request)
        .await?;
    Ok(Json(appointment))
}

/// The authenticated user's appointments, newest first
#[tracing::instrument(skip(state, session))]
async fn list_appointments(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let appointment_service = AppointmentService::new(state.db.clone());
    let appointments = appointment_service.list_for_user(session.user_id).await?;
    Ok(Json(appointments))
}

/// Cancel a scheduled appointment owned by the authenticated user
#[tracing::instrument(skip(state, session))]
async fn cancel_appointment(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment_service = AppointmentService::new(state.db.clone());
    let appointment = appointment_service
        .cancel(session.user_id, appointment_id)
        .await
        .map_err(|_| ApiError::not_found("Appointment not found or already cancelled"))?;
    Ok(Json(appointment))
}
