use pretty_assertions::assert_eq;
use serde_json::json;

use vitraya::services::analysis::{
    extract_fenced_json, keyword_fallback, parse_analysis, static_fallback, strip_code_fences,
};

fn valid_payload() -> String {
    json!({
        "riskLevel": "Low",
        "riskScore": 20,
        "recommendations": {
            "exercise": "e",
            "nutrition": "n",
            "sleep": "s",
            "mentalHealth": "m"
        },
        "healthInsights": {
            "strengths": ["a"],
            "areasForImprovement": ["b"],
            "longTermRisks": ["c"]
        }
    })
    .to_string()
}

#[test]
fn parses_model_output_wrapped_in_json_fences() {
    let wrapped = format!("```json\n{}\n```", valid_payload());
    let analysis = parse_analysis(&strip_code_fences(&wrapped)).unwrap();

    assert_eq!(analysis.risk_level, "Low");
    assert_eq!(analysis.risk_score, 20);
}

#[test]
fn extracts_fenced_object_from_surrounding_prose() {
    let text = format!(
        "Here is your analysis:\n```json\n{}\n```\nHope this helps!",
        valid_payload()
    );
    let extracted = extract_fenced_json(&text);
    let analysis = parse_analysis(extracted).unwrap();

    assert_eq!(analysis.recommendations.exercise, "e");
}

#[test]
fn coerces_string_risk_score() {
    let payload = valid_payload().replace("20", "\"42\"");
    let analysis = parse_analysis(&payload).unwrap();
    assert_eq!(analysis.risk_score, 42);
}

#[test]
fn garbage_output_is_rejected() {
    assert!(parse_analysis("the patient seems fine").is_err());
    assert!(parse_analysis("{}").is_err());
}

#[test]
fn static_fallback_is_moderate() {
    let fallback = static_fallback();
    assert_eq!(fallback.risk_level, "Moderate");
    assert_eq!(fallback.risk_score, 65);
    assert_eq!(fallback.health_insights.strengths.len(), 3);
    assert_eq!(fallback.health_insights.long_term_risks.len(), 3);
}

#[test]
fn keyword_fallback_grades_obesity_and_smoking_as_high() {
    let obese = keyword_fallback("BMI Category: Obese. Stress level: high");
    assert_eq!(obese.risk_level, "High");
    assert_eq!(obese.risk_score, 75);

    // Smoking raises the level but the score only follows the BMI bands
    let smoker = keyword_fallback("BMI Category: Healthy Weight. Smoking status: yes");
    assert_eq!(smoker.risk_level, "High");
    assert_eq!(smoker.risk_score, 30);

    let overweight = keyword_fallback("BMI Category: Overweight");
    assert_eq!(overweight.risk_level, "Moderate");
    assert_eq!(overweight.risk_score, 55);
}

#[test]
fn keyword_fallback_tailors_recommendations() {
    let inactive = keyword_fallback(
        "activity days per week: 0-1. Sleep duration: less-than-5. Stress level: high",
    );
    assert!(inactive.recommendations.exercise.contains("gentle walks"));
    assert!(inactive.recommendations.sleep.contains("at least 6 hours"));
    assert!(inactive.recommendations.mental_health.contains("deep breathing"));

    let active = keyword_fallback("activity days per week: 6-7. Sleep duration: 7-8");
    assert!(active.recommendations.exercise.contains("strength training"));
    assert!(active
        .health_insights
        .strengths
        .contains(&"Consistent physical activity routine".to_string()));
}

#[test]
fn keyword_fallback_is_deterministic() {
    let prompt = "BMI Category: Overweight. Water intake: 0-2. Activity level: sedentary";
    let a = keyword_fallback(prompt);
    let b = keyword_fallback(prompt);
    assert_eq!(a, b);
}
