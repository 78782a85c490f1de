use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::AiAnalysis;

/// Derived health metrics; field names match the wire format the clients
/// and stored quiz documents use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub bmi: f64,
    pub bmi_category: String,
    pub ideal_weight_range: IdealWeightRange,
    pub bmr: i32,
    pub water_needed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdealWeightRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, FromRow)]
pub struct QuizResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub answers: Value,
    pub health_metrics: Value,
    pub risk_level: String,
    pub risk_score: i32,
    pub ai_analysis: Option<Value>,
    pub ai_analyzed: bool,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: i32,
    pub gender: String,
    pub activity_level: String,
    /// Raw answer map keyed by question id
    pub answers: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultResponse {
    pub id: Uuid,
    pub risk_level: String,
    pub risk_score: i32,
    pub health_metrics: HealthMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
    pub ai_analyzed: bool,
    pub completed_at: DateTime<Utc>,
}

/// Compact summary stored on the user row for quick dashboard access
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestQuizSummary {
    pub id: Uuid,
    pub risk_level: String,
    pub risk_score: i32,
    pub bmi: f64,
    pub bmi_category: String,
    pub bmr: i32,
    pub water_needed: f64,
    pub ai_analyzed: bool,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_metrics_use_wire_names() {
        let metrics = HealthMetrics {
            bmi: 24.2,
            bmi_category: "Healthy Weight".to_string(),
            ideal_weight_range: IdealWeightRange { min: 53, max: 72 },
            bmr: 2575,
            water_needed: 2.3,
        };

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["bmiCategory"], "Healthy Weight");
        assert_eq!(json["idealWeightRange"]["min"], 53);
        assert_eq!(json["waterNeeded"], 2.3);
    }
}
