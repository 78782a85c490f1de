use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{AiAnalysis, HealthMetrics, LatestQuizSummary, QuizResult};

pub struct QuizService {
    db: PgPool,
}

impl QuizService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Persist a completed quiz and refresh the summary on the user row.
    pub async fn save_result(
        &self,
        user_id: Uuid,
        answers: &Value,
        metrics: &HealthMetrics,
        risk_level: &str,
        risk_score: i32,
        analysis: Option<&AiAnalysis>,
    ) -> Result<QuizResult> {
        let quiz_id = Uuid::new_v4();
        let completed_at = Utc::now();
        let metrics_json = serde_json::to_value(metrics)?;
        let analysis_json = analysis.map(serde_json::to_value).transpose()?;
        let ai_analyzed = analysis.is_some();

        let result = sqlx::query_as::<_, QuizResult>(
            "INSERT INTO quiz_results
                 (id, user_id, answers, health_metrics, risk_level, risk_score,
                  ai_analysis, ai_analyzed, completed_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(quiz_id)
        .bind(user_id)
        .bind(answers)
        .bind(&metrics_json)
        .bind(risk_level)
        .bind(risk_score)
        .bind(&analysis_json)
        .bind(ai_analyzed)
        .bind(completed_at)
        .fetch_one(&self.db)
        .await
        .context("Failed to insert quiz result")?;

        // Keep a compact copy on the user document for quick dashboard reads
        let summary = LatestQuizSummary {
            id: quiz_id,
            risk_level: risk_level.to_string(),
            risk_score,
            bmi: metrics.bmi,
            bmi_category: metrics.bmi_category.clone(),
            bmr: metrics.bmr,
            water_needed: metrics.water_needed,
            ai_analyzed,
            completed_at,
        };

        sqlx::query("UPDATE users SET latest_quiz = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(serde_json::to_value(&summary)?)
            .execute(&self.db)
            .await
            .context("Failed to update latest quiz summary")?;

        Ok(result)
    }

    /// Most recent quiz result for a user, if any
    pub async fn latest(&self, user_id: Uuid) -> Result<Option<QuizResult>> {
        let result = sqlx::query_as::<_, QuizResult>(
            "SELECT * FROM quiz_results WHERE user_id = $1 ORDER BY completed_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(result)
    }

    /// Full quiz history, newest first
    pub async fn history(&self, user_id: Uuid) -> Result<Vec<QuizResult>> {
        let results = sqlx::query_as::<_, QuizResult>(
            "SELECT * FROM quiz_results WHERE user_id = $1 ORDER BY completed_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(results)
    }

    /// Attach an AI analysis to an existing result and mirror the risk
    /// fields onto the latest-quiz summary when it points at this quiz.
    pub async fn attach_analysis(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
        analysis: &AiAnalysis,
    ) -> Result<bool> {
        let analysis_json = serde_json::to_value(analysis)?;

        let updated = sqlx::query(
            "UPDATE quiz_results
             SET ai_analysis = $3, ai_analyzed = TRUE, risk_level = $4, risk_score = $5
             WHERE id = $1 AND user_id = $2",
        )
        .bind(quiz_id)
        .bind(user_id)
        .bind(&analysis_json)
        .bind(&analysis.risk_level)
        .bind(analysis.clamped_risk_score())
        .execute(&self.db)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE users
             SET latest_quiz = latest_quiz
                 || jsonb_build_object(
                        'aiAnalyzed', TRUE,
                        'riskLevel', $2::text,
                        'riskScore', $3::int)
             WHERE id = $1 AND latest_quiz->>'id' = $4",
        )
        .bind(user_id)
        .bind(&analysis.risk_level)
        .bind(analysis.clamped_risk_score())
        .bind(quiz_id.to_string())
        .execute(&self.db)
        .await?;

        Ok(true)
    }
}
