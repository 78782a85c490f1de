use anyhow::{anyhow, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentStatus, BookAppointmentRequest, Doctor};

pub struct AppointmentService {
    db: PgPool,
}

impl AppointmentService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Book an appointment with a doctor. The doctor's name and specialty
    /// are denormalized onto the booking record.
    pub async fn book(
        &self,
        user_id: Uuid,
        doctor: &Doctor,
        request: &BookAppointmentRequest,
    ) -> Result<Appointment> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments
                 (id, user_id, doctor_id, doctor_name, specialty, date, time,
                  appointment_type, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(doctor.id)
        .bind(&doctor.name)
        .bind(&doctor.specialty)
        .bind(&request.date)
        .bind(&request.time)
        .bind(format!("{} Consultation", doctor.specialty))
        .bind(AppointmentStatus::Scheduled.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(appointment)
    }

    /// Appointments belonging to the user, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(appointments)
    }

    /// Cancel an appointment. Only the owner may cancel, and only while
    /// the appointment is still scheduled.
    pub async fn cancel(&self, user_id: Uuid, appointment_id: Uuid) -> Result<Appointment> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "UPDATE appointments
             SET status = $3
             WHERE id = $1 AND user_id = $2 AND status = $4
             RETURNING *",
        )
        .bind(appointment_id)
        .bind(user_id)
        .bind(AppointmentStatus::Cancelled.as_str())
        .bind(AppointmentStatus::Scheduled.as_str())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| anyhow!("Appointment {} not found or not cancellable", appointment_id))?;

        Ok(appointment)
    }
}
