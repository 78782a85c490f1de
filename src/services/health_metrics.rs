use crate::models::{HealthMetrics, IdealWeightRange};

/// Gender affects the constant term in the Mifflin-St Jeor equation.
/// Anything other than "male" uses the female constant, matching how the
/// assessment treats non-binary answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" => Gender::Male,
            _ => Gender::Female,
        }
    }

    fn bmr_constant(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Unknown levels fall back to sedentary, as the quiz does.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Sedentary,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// BMI category bands (WHO cut-offs)
pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Healthy Weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

/// Compute the full set of derived health metrics for a quiz submission.
///
/// BMI is weight over height squared, the ideal range is the healthy BMI
/// band applied to the user's height, BMR uses Mifflin-St Jeor scaled by
/// the activity multiplier, and the water target is 33ml per kg.
pub fn calculate_health_metrics(
    height_cm: f64,
    weight_kg: f64,
    age: i32,
    gender: Gender,
    activity_level: ActivityLevel,
) -> HealthMetrics {
    let height_m = height_cm / 100.0;

    let bmi = if height_m > 0.0 {
        weight_kg / (height_m * height_m)
    } else {
        0.0
    };

    let min_weight = (18.5 * height_m * height_m).round() as i32;
    let max_weight = (24.9 * height_m * height_m).round() as i32;

    let base_bmr =
        (10.0 * weight_kg) + (6.25 * height_cm) - (5.0 * age as f64) + gender.bmr_constant();
    let bmr = (base_bmr * activity_level.multiplier()).round() as i32;

    let water_needed = round_to_1(weight_kg * 0.033);

    HealthMetrics {
        bmi: round_to_1(bmi),
        bmi_category: bmi_category(bmi).to_string(),
        ideal_weight_range: IdealWeightRange {
            min: min_weight,
            max: max_weight,
        },
        bmr,
        water_needed,
    }
}

fn round_to_1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_male_moderate() {
        let metrics = calculate_health_metrics(170.0, 70.0, 30, Gender::Male, ActivityLevel::Moderate);

        assert_eq!(metrics.bmi, 24.2);
        assert_eq!(metrics.bmi_category, "Healthy Weight");
        // Mifflin-St Jeor: 10*70 + 6.25*170 - 5*30 + 5 = 1617.5, x1.55
        assert_eq!(metrics.bmr, (1617.5_f64 * 1.55).round() as i32);
        assert_eq!(metrics.water_needed, 2.3);
    }

    #[test]
    fn bmi_category_boundaries() {
        assert_eq!(bmi_category(18.49), "Underweight");
        assert_eq!(bmi_category(18.5), "Healthy Weight");
        assert_eq!(bmi_category(24.99), "Healthy Weight");
        assert_eq!(bmi_category(25.0), "Overweight");
        assert_eq!(bmi_category(29.99), "Overweight");
        assert_eq!(bmi_category(30.0), "Obese");
    }

    #[test]
    fn female_constant_applies_to_non_male_answers() {
        let female = calculate_health_metrics(165.0, 60.0, 28, Gender::Female, ActivityLevel::Light);
        let other = calculate_health_metrics(
            165.0,
            60.0,
            28,
            Gender::from_str("prefer_not_to_say"),
            ActivityLevel::Light,
        );

        assert_eq!(female.bmr, other.bmr);
        // 10*60 + 6.25*165 - 5*28 - 161 = 1330.25, x1.375
        assert_eq!(female.bmr, (1330.25_f64 * 1.375).round() as i32);
    }

    #[test]
    fn water_intake_scales_with_weight() {
        for weight in [40.0, 55.5, 70.0, 88.2, 120.0, 200.0] {
            let metrics =
                calculate_health_metrics(175.0, weight, 40, Gender::Male, ActivityLevel::Sedentary);
            let expected = (weight * 0.033 * 10.0).round() / 10.0;
            assert_eq!(metrics.water_needed, expected, "weight {}", weight);
        }
    }

    #[test]
    fn ideal_weight_range_uses_healthy_bmi_band() {
        let metrics = calculate_health_metrics(170.0, 70.0, 30, Gender::Male, ActivityLevel::Moderate);
        assert_eq!(metrics.ideal_weight_range.min, (18.5_f64 * 1.7 * 1.7).round() as i32);
        assert_eq!(metrics.ideal_weight_range.max, (24.9_f64 * 1.7 * 1.7).round() as i32);
        assert!(metrics.ideal_weight_range.min < metrics.ideal_weight_range.max);
    }

    #[test]
    fn unknown_activity_level_defaults_to_sedentary() {
        assert_eq!(ActivityLevel::from_str("couch").multiplier(), 1.2);
        assert_eq!(ActivityLevel::from_str("very_active").multiplier(), 1.9);
    }

    #[test]
    fn zero_height_yields_zero_bmi() {
        let metrics = calculate_health_metrics(0.0, 70.0, 30, Gender::Male, ActivityLevel::Moderate);
        assert_eq!(metrics.bmi, 0.0);
        assert_eq!(metrics.bmi_category, "Underweight");
    }
}
