use anyhow::Result;
use regex::Regex;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info};

use crate::models::{AiAnalysis, ChatMessage};
use crate::services::ai_client::{ChatClient, ChatParams};

/// System prompt for the structured health analysis call
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"
You are a health analysis AI expert. Based on the provided health assessment data, analyze the information and provide a structured response.

RESPONSE FORMAT REQUIREMENTS:
You MUST respond with ONLY a valid JSON object. No other text, explanations, or markdown formatting.
The JSON structure MUST be exactly as follows:

{
  "riskLevel": "Low|Moderate|High",
  "riskScore": <integer between 0-100>,
  "recommendations": {
    "exercise": "<specific exercise recommendation>",
    "nutrition": "<specific nutrition recommendation>",
    "sleep": "<specific sleep recommendation>",
    "mentalHealth": "<specific mental health recommendation>"
  },
  "healthInsights": {
    "strengths": ["<strength 1>", "<strength 2>", "<strength 3>"],
    "areasForImprovement": ["<area 1>", "<area 2>", "<area 3>"],
    "longTermRisks": ["<risk 1>", "<risk 2>", "<risk 3>"]
  }
}

DO NOT include any explanatory text before or after the JSON.
DO NOT wrap the JSON in code blocks or markdown syntax.
Ensure all JSON values are properly escaped if they contain quotes.
Make sure the riskScore is a NUMBER, not a string.

Base your analysis on these factors:
1. BMI and weight status - BMI < 18.5 is underweight, 18.5-24.9 is healthy, 25-29.9 is overweight, 30+ is obese
2. Physical activity frequency and intensity - More activity means lower health risk
3. Nutrition habits, especially fruits and vegetables intake
4. Sleep duration and quality - 7-8 hours is optimal
5. Smoking status - Increases health risks
6. Stress levels - Higher stress increases health risks
7. Age and gender - Consider age-appropriate recommendations
"#;

#[derive(Error, Debug)]
pub enum AnalysisParseError {
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Response is missing required field '{0}'")]
    MissingField(&'static str),
    #[error("Field 'riskScore' is not a number")]
    NonNumericScore,
}

/// Strip markdown code-fence markers by literal removal.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Extract a JSON object from inside a markdown code block, if present.
/// Falls back to the input unchanged when no fenced block is found.
pub fn extract_fenced_json(text: &str) -> &str {
    // The block may or may not carry a `json` language tag
    let fence = Regex::new(r"```(?:json)?\s*(\{[\s\S]*?\})\s*```").unwrap();
    match fence.captures(text) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(text),
        None => text,
    }
}

/// Parse a cleaned chat-completion response into a typed analysis.
///
/// The four top-level keys must be present and `riskScore` must be numeric;
/// a numeric string is coerced before deserializing.
pub fn parse_analysis(cleaned: &str) -> Result<AiAnalysis, AnalysisParseError> {
    let mut value: Value = serde_json::from_str(cleaned)?;

    let object = value
        .as_object_mut()
        .ok_or(AnalysisParseError::MissingField("riskLevel"))?;

    for field in ["riskLevel", "recommendations", "healthInsights"] {
        if !object.contains_key(field) {
            return Err(AnalysisParseError::MissingField(field));
        }
    }

    // Coerce a string riskScore into a number
    let score = object
        .get("riskScore")
        .ok_or(AnalysisParseError::MissingField("riskScore"))?;
    let score = match score {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .ok_or(AnalysisParseError::NonNumericScore)?,
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AnalysisParseError::NonNumericScore)?,
        _ => return Err(AnalysisParseError::NonNumericScore),
    };
    object.insert("riskScore".to_string(), json!(score));

    Ok(serde_json::from_value(value)?)
}

/// Fixed fallback analysis used when the model's output cannot be parsed
pub fn static_fallback() -> AiAnalysis {
    serde_json::from_value(json!({
        "riskLevel": "Moderate",
        "riskScore": 65,
        "recommendations": {
            "exercise": "Aim for at least 150 minutes of moderate-intensity exercise per week, such as brisk walking, swimming, or cycling.",
            "nutrition": "Focus on a balanced diet with plenty of fruits, vegetables, lean proteins, and whole grains.",
            "sleep": "Prioritize getting 7-8 hours of quality sleep each night by maintaining a consistent sleep schedule.",
            "mentalHealth": "Practice stress management techniques such as mindfulness, deep breathing, or short meditation sessions."
        },
        "healthInsights": {
            "strengths": [
                "Awareness of health status through assessment",
                "Taking initiative to improve health outcomes",
                "Interest in personalized health recommendations"
            ],
            "areasForImprovement": [
                "Regular health check-ups with healthcare professionals",
                "Consistent physical activity routine",
                "Balanced nutrition and adequate hydration"
            ],
            "longTermRisks": [
                "Lifestyle-related health conditions if habits aren't maintained",
                "Stress-related health issues without proper management",
                "Age-related health challenges without preventive care"
            ]
        }
    }))
    .expect("static fallback object is well-formed")
}

/// Fallback analysis conditioned on keywords found in the user prompt.
/// Deterministic for any given prompt.
pub fn keyword_fallback(user_prompt: &str) -> AiAnalysis {
    let has = |needle: &str| user_prompt.contains(needle);

    let risk_level = if has("BMI Category: Obese") || has("Smoking status: yes") {
        "High"
    } else if has("BMI Category: Overweight") {
        "Moderate"
    } else {
        "Low"
    };

    let risk_score = if has("BMI Category: Obese") {
        75
    } else if has("BMI Category: Overweight") {
        55
    } else {
        30
    };

    let exercise = if has("activity days per week: 0-1") {
        "Start with gentle walks for 10 minutes daily, gradually increasing to 30 minutes three times per week."
    } else {
        "Continue your current exercise routine, but add variety with strength training twice weekly."
    };

    let nutrition = if has("Fruits and vegetables intake: 0-1") {
        "Focus on adding one fruit at breakfast and vegetables with lunch and dinner daily."
    } else {
        "Maintain your balanced diet, but consider adding more plant-based proteins and reducing processed foods."
    };

    let sleep = if has("Sleep duration: less-than-5") {
        "Prioritize getting at least 6 hours of sleep by establishing a regular sleep schedule and bedtime routine."
    } else {
        "Your sleep duration is good; focus on improving quality by limiting screen time before bed."
    };

    let mental_health = if has("Stress level: high") {
        "Practice 5-minute deep breathing exercises twice daily and consider a 10-minute daily meditation practice."
    } else {
        "Continue your good stress management practices and add outdoor activities to further boost mood."
    };

    let strengths = vec![
        if has("BMI Category: Healthy Weight") {
            "Maintaining a healthy weight range"
        } else {
            "Taking initiative for health improvement"
        },
        if has("activity days per week: 4-5") || has("activity days per week: 6-7") {
            "Consistent physical activity routine"
        } else {
            "Awareness of personal health metrics"
        },
        if has("Sleep duration: 7-8") {
            "Prioritizing adequate sleep"
        } else {
            "Engaging with health assessment tools"
        },
    ];

    let areas_for_improvement = vec![
        if has("Water intake: 0-2") {
            "Increasing daily water intake to at least 2 liters"
        } else {
            "Maintaining hydration throughout the day"
        },
        if has("Fruits and vegetables intake: 0-1") || has("Fruits and vegetables intake: 2-3") {
            "Adding more fruits and vegetables to your diet"
        } else {
            "Varying your nutritional sources"
        },
        if has("Activity level: sedentary") || has("Activity level: light") {
            "Increasing overall physical activity level"
        } else {
            "Adding variety to exercise routine"
        },
    ];

    let long_term_risks = vec![
        if has("BMI: 3") {
            "Increased risk of cardiovascular issues if weight remains elevated"
        } else {
            "Monitor cholesterol levels regularly as you age"
        },
        if has("Smoking status: yes") {
            "High risk of respiratory and cardiovascular disease due to smoking"
        } else {
            "Watch for signs of joint issues as you maintain your exercise routine"
        },
        if has("Sleep duration: less-than-5") {
            "Increased risk of cognitive decline with chronic sleep deprivation"
        } else {
            "Pay attention to stress management as life demands change"
        },
    ];

    serde_json::from_value(json!({
        "riskLevel": risk_level,
        "riskScore": risk_score,
        "recommendations": {
            "exercise": exercise,
            "nutrition": nutrition,
            "sleep": sleep,
            "mentalHealth": mental_health
        },
        "healthInsights": {
            "strengths": strengths,
            "areasForImprovement": areas_for_improvement,
            "longTermRisks": long_term_risks
        }
    }))
    .expect("keyword fallback object is well-formed")
}

/// High-level analysis service wrapping the chat client with the
/// parse-or-fallback behavior.
#[derive(Debug, Clone)]
pub struct HealthAnalysisService {
    client: ChatClient,
}

impl HealthAnalysisService {
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }

    /// Analyze free-form health assessment data. Never fails: any model or
    /// parse error falls back to the static analysis object.
    pub async fn analyze_health_data(&self, health_data: &Value) -> AiAnalysis {
        let formatted = serde_json::to_string_pretty(health_data).unwrap_or_default();
        let user_message = format!(
            "Here is my health assessment data: {}\nRemember to ONLY return a valid JSON object with no other text.",
            formatted
        );

        let messages = [
            ChatMessage::system(ANALYSIS_SYSTEM_PROMPT),
            ChatMessage::user(user_message),
        ];

        match self.client.complete(&messages, ChatParams::analysis(0.1)).await {
            Ok(content) => {
                let text = content.unwrap_or_else(|| "{}".to_string());
                let cleaned = strip_code_fences(&text);
                match parse_analysis(&cleaned) {
                    Ok(analysis) => analysis,
                    Err(err) => {
                        error!("Failed to parse AI analysis response: {} ({})", err, text);
                        static_fallback()
                    }
                }
            }
            Err(err) => {
                error!("AI analysis request failed: {}", err);
                static_fallback()
            }
        }
    }

    /// Run a caller-supplied prompt pair. Any model or parse error falls
    /// back to the keyword-conditioned analysis for the user prompt.
    pub async fn run_prompt(&self, system_prompt: &str, user_prompt: &str) -> AiAnalysis {
        let messages = [
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ];

        match self.client.complete(&messages, ChatParams::analysis(0.0)).await {
            Ok(Some(text)) => {
                let cleaned = extract_fenced_json(&text);
                match parse_analysis(cleaned) {
                    Ok(analysis) => {
                        info!("Successfully parsed AI analysis response");
                        analysis
                    }
                    Err(err) => {
                        error!("Failed to parse AI response as JSON: {}", err);
                        keyword_fallback(user_prompt)
                    }
                }
            }
            Ok(None) => keyword_fallback(user_prompt),
            Err(err) => {
                error!("Error calling chat-completion API: {}", err);
                keyword_fallback(user_prompt)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    const VALID_BODY: &str = r#"{
        "riskLevel": "Low",
        "riskScore": 30,
        "recommendations": {
            "exercise": "a", "nutrition": "b", "sleep": "c", "mentalHealth": "d"
        },
        "healthInsights": {
            "strengths": [], "areasForImprovement": [], "longTermRisks": []
        }
    }"#;

    #[test]
    fn strips_literal_fences() {
        let fenced = format!("```json\n{}\n```", VALID_BODY);
        let cleaned = strip_code_fences(&fenced);
        assert!(parse_analysis(&cleaned).is_ok());
    }

    #[test]
    fn extracts_fenced_block() {
        let fenced = format!("Here you go:\n```json\n{}\n```\nHope that helps!", VALID_BODY);
        let extracted = extract_fenced_json(&fenced);
        assert!(parse_analysis(extracted).is_ok());
    }

    #[test]
    fn extracts_unlabelled_fenced_block() {
        let fenced = format!("```\n{}\n```", VALID_BODY);
        assert!(parse_analysis(extract_fenced_json(&fenced)).is_ok());
    }

    #[test]
    fn plain_text_passes_through_extraction() {
        assert_eq!(extract_fenced_json(VALID_BODY), VALID_BODY);
    }

    #[test]
    fn coerces_string_risk_score() {
        let body = VALID_BODY.replace("\"riskScore\": 30", "\"riskScore\": \"30\"");
        let analysis = parse_analysis(&body).unwrap();
        assert_eq!(analysis.risk_score, 30);
    }

    #[test]
    fn rejects_missing_keys() {
        assert_matches!(
            parse_analysis(r#"{"riskLevel": "Low", "riskScore": 1}"#),
            Err(AnalysisParseError::MissingField("recommendations"))
        );
        assert_matches!(
            parse_analysis("not json at all"),
            Err(AnalysisParseError::InvalidJson(_))
        );
        let body = VALID_BODY.replace("\"riskScore\": 30", "\"riskScore\": \"high\"");
        assert_matches!(parse_analysis(&body), Err(AnalysisParseError::NonNumericScore));
    }

    #[test]
    fn static_fallback_is_moderate() {
        let fallback = static_fallback();
        assert_eq!(fallback.risk_level, "Moderate");
        assert_eq!(fallback.risk_score, 65);
        assert_eq!(fallback.health_insights.strengths.len(), 3);
    }

    #[test]
    fn keyword_fallback_flags_high_risk() {
        let obese = keyword_fallback("BMI Category: Obese, Smoking status: no");
        assert_eq!(obese.risk_level, "High");
        assert_eq!(obese.risk_score, 75);

        let smoker = keyword_fallback("BMI Category: Healthy Weight, Smoking status: yes");
        assert_eq!(smoker.risk_level, "High");
        assert_eq!(smoker.risk_score, 30);

        let overweight = keyword_fallback("BMI Category: Overweight");
        assert_eq!(overweight.risk_level, "Moderate");
        assert_eq!(overweight.risk_score, 55);

        let healthy = keyword_fallback("BMI Category: Healthy Weight");
        assert_eq!(healthy.risk_level, "Low");
        assert_eq!(healthy.risk_score, 30);
    }

    #[test]
    fn keyword_fallback_is_deterministic() {
        let prompt = "BMI Category: Overweight, Sleep duration: less-than-5, Stress level: high";
        assert_eq!(keyword_fallback(prompt), keyword_fallback(prompt));

        let analysis = keyword_fallback(prompt);
        assert!(analysis.recommendations.sleep.contains("at least 6 hours"));
        assert!(analysis.recommendations.mental_health.contains("deep breathing"));
    }
}
