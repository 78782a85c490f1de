use serde::{Deserialize, Serialize};

/// Structured AI health analysis; the JSON contract the chat-completion
/// model is instructed to produce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub risk_level: String,
    pub risk_score: i64,
    pub recommendations: Recommendations,
    pub health_insights: HealthInsights,
}

impl AiAnalysis {
    /// Risk score bounded to the 0-100 scale for storage; the model
    /// occasionally returns values outside the instructed range.
    pub fn clamped_risk_score(&self) -> i32 {
        self.risk_score.clamp(0, 100) as i32
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub exercise: String,
    pub nutrition: String,
    pub sleep: String,
    pub mental_health: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthInsights {
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub long_term_risks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_parses_wire_format() {
        let json = serde_json::json!({
            "riskLevel": "Low",
            "riskScore": 30,
            "recommendations": {
                "exercise": "Keep walking daily.",
                "nutrition": "More vegetables.",
                "sleep": "Aim for 7-8 hours.",
                "mentalHealth": "Short daily meditation."
            },
            "healthInsights": {
                "strengths": ["Active lifestyle"],
                "areasForImprovement": ["Hydration"],
                "longTermRisks": ["None identified"]
            }
        });

        let analysis: AiAnalysis = serde_json::from_value(json).unwrap();
        assert_eq!(analysis.risk_level, "Low");
        assert_eq!(analysis.risk_score, 30);
        assert_eq!(analysis.recommendations.mental_health, "Short daily meditation.");
        assert_eq!(analysis.health_insights.areas_for_improvement, vec!["Hydration"]);
    }

    #[test]
    fn risk_score_is_bounded_for_storage() {
        let mut analysis: AiAnalysis = serde_json::from_value(serde_json::json!({
            "riskLevel": "High",
            "riskScore": 9_999_999_999i64,
            "recommendations": {
                "exercise": "", "nutrition": "", "sleep": "", "mentalHealth": ""
            },
            "healthInsights": {
                "strengths": [], "areasForImprovement": [], "longTermRisks": []
            }
        }))
        .unwrap();

        assert_eq!(analysis.clamped_risk_score(), 100);

        analysis.risk_score = -40;
        assert_eq!(analysis.clamped_risk_score(), 0);

        analysis.risk_score = 65;
        assert_eq!(analysis.clamped_risk_score(), 65);
    }
}
