use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Doctor, NewDoctor};

pub struct DoctorService {
    db: PgPool,
}

impl DoctorService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List doctors ordered by name, optionally narrowed by a search term
    /// (name or specialty substring, case-insensitive) and an exact
    /// specialty filter.
    pub async fn list(&self, search: Option<&str>, specialty: Option<&str>) -> Result<Vec<Doctor>> {
        let doctors = sqlx::query_as::<_, Doctor>(
            "SELECT * FROM doctors
             WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR specialty ILIKE '%' || $1 || '%')
               AND ($2::text IS NULL OR specialty = $2)
             ORDER BY name",
        )
        .bind(search)
        .bind(specialty)
        .fetch_all(&self.db)
        .await?;

        Ok(doctors)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Doctor>> {
        let doctor = sqlx::query_as::<_, Doctor>("SELECT * FROM doctors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(doctor)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM doctors")
            .fetch_one(&self.db)
            .await?;

        Ok(count.0)
    }

    pub async fn create(&self, doctor: NewDoctor) -> Result<Doctor> {
        let created = sqlx::query_as::<_, Doctor>(
            "INSERT INTO doctors
                 (id, name, specialty, hospital, experience, education, rating, description, languages)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&doctor.name)
        .bind(&doctor.specialty)
        .bind(&doctor.hospital)
        .bind(doctor.experience)
        .bind(&doctor.education)
        .bind(doctor.rating)
        .bind(&doctor.description)
        .bind(serde_json::to_value(&doctor.languages)?)
        .fetch_one(&self.db)
        .await?;

        Ok(created)
    }
}
