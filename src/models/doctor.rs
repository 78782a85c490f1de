use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialty: String,
    pub hospital: String,
    pub experience: i32,
    pub education: String,
    pub rating: f64,
    pub description: String,
    pub languages: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub hospital: String,
    pub experience: i32,
    pub education: String,
    pub rating: f64,
    pub description: String,
    pub languages: Vec<String>,
}
