use pretty_assertions::assert_eq;

use vitraya::services::health_metrics::{calculate_health_metrics, ActivityLevel, Gender};

#[test]
fn reference_profile_from_string_inputs() {
    // 180cm, 78.5kg, 30y, male, moderate activity
    let metrics = calculate_health_metrics(
        180.0,
        78.5,
        30,
        Gender::from_str("male"),
        ActivityLevel::from_str("moderate"),
    );

    assert_eq!(metrics.bmi, 24.2);
    assert_eq!(metrics.bmi_category, "Healthy Weight");
    // Mifflin-St Jeor: 10*78.5 + 6.25*180 - 5*30 + 5 = 1765, x1.55
    assert_eq!(metrics.bmr, (1765.0f64 * 1.55).round() as i32);
    assert_eq!(metrics.water_needed, 2.6);
    assert_eq!(metrics.ideal_weight_range.min, (18.5f64 * 1.8 * 1.8).round() as i32);
    assert_eq!(metrics.ideal_weight_range.max, (24.9f64 * 1.8 * 1.8).round() as i32);
}

#[test]
fn bmr_gender_constants_differ_by_fixed_offset() {
    let male = calculate_health_metrics(
        175.0,
        70.0,
        40,
        Gender::from_str("male"),
        ActivityLevel::from_str("sedentary"),
    );
    let female = calculate_health_metrics(
        175.0,
        70.0,
        40,
        Gender::from_str("female"),
        ActivityLevel::from_str("sedentary"),
    );

    // Base: 10*70 + 6.25*175 - 5*40 = 1593.75, then +5 or -161, x1.2
    assert_eq!(male.bmr, (1598.75f64 * 1.2).round() as i32);
    assert_eq!(female.bmr, (1432.75f64 * 1.2).round() as i32);
}

#[test]
fn unrecognized_activity_level_behaves_as_sedentary() {
    let sedentary = calculate_health_metrics(
        180.0,
        80.0,
        30,
        Gender::from_str("male"),
        ActivityLevel::from_str("sedentary"),
    );
    let unknown = calculate_health_metrics(
        180.0,
        80.0,
        30,
        Gender::from_str("male"),
        ActivityLevel::from_str("couch-surfing"),
    );

    assert_eq!(sedentary.bmr, unknown.bmr);
}

#[test]
fn metrics_serialize_to_wire_names() {
    let metrics = calculate_health_metrics(
        170.0,
        70.0,
        30,
        Gender::from_str("male"),
        ActivityLevel::from_str("moderate"),
    );

    let json = serde_json::to_value(&metrics).unwrap();
    assert!(json.get("bmiCategory").is_some());
    assert!(json.get("idealWeightRange").is_some());
    assert!(json.get("waterNeeded").is_some());
    assert!(json.get("bmr").is_some());
}
