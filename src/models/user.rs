use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub phone: String,
    pub bio: String,
    pub streak_days: i32,
    pub completed_goals: i32,
    pub latest_quiz: Option<Value>,
    pub health_tracking: Value,
    pub daily_tasks: Value,
    pub health_preferences: Value,
    pub notification_settings: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Weekly/daily tracking percentages shown on the dashboard.
/// Stored as JSONB on the user row; field names match the wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthTracking {
    #[serde(default = "default_weekly_activity")]
    pub weekly_activity: Vec<i32>,
    #[serde(default)]
    pub water_intake: i32,
    #[serde(default)]
    pub sleep_quality: i32,
    #[serde(default)]
    pub nutrition: i32,
    #[serde(default)]
    pub today_activity: i32,
}

fn default_weekly_activity() -> Vec<i32> {
    vec![0; 7]
}

impl Default for HealthTracking {
    fn default() -> Self {
        Self {
            weekly_activity: default_weekly_activity(),
            water_intake: 0,
            sleep_quality: 0,
            nutrition: 0,
            today_activity: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyTask {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTaskList {
    #[serde(default)]
    pub items: Vec<DailyTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthPreferences {
    /// Activity goal keyword, e.g. "moderate"
    #[serde(default = "default_activity_goal")]
    pub activity_goal: String,
    #[serde(default = "default_true")]
    pub water_reminder_enabled: bool,
    /// Daily water goal in litres, kept as the display string, e.g. "2.5"
    #[serde(default = "default_water_goal")]
    pub water_goal: String,
    #[serde(default)]
    pub medication_reminders_enabled: bool,
    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
    #[serde(default = "default_height_unit")]
    pub height_unit: String,
}

fn default_activity_goal() -> String {
    "moderate".to_string()
}

fn default_water_goal() -> String {
    "2.5".to_string()
}

fn default_weight_unit() -> String {
    "kg".to_string()
}

fn default_height_unit() -> String {
    "cm".to_string()
}

impl Default for HealthPreferences {
    fn default() -> Self {
        Self {
            activity_goal: default_activity_goal(),
            water_reminder_enabled: true,
            water_goal: default_water_goal(),
            medication_reminders_enabled: false,
            weight_unit: default_weight_unit(),
            height_unit: default_height_unit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub email_enabled: bool,
    #[serde(default = "default_true")]
    pub app_enabled: bool,
    #[serde(default = "default_true")]
    pub health_tips: bool,
    #[serde(default = "default_true")]
    pub appointment_reminders: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_enabled: true,
            app_enabled: true,
            health_tips: true,
            appointment_reminders: true,
        }
    }
}

/// Account settings as returned to and accepted from the client
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub display_name: String,
    pub phone: String,
    pub bio: String,
    pub health_preferences: HealthPreferences,
    pub notification_settings: NotificationSettings,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub health_preferences: Option<HealthPreferences>,
    pub notification_settings: Option<NotificationSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_tracking_round_trips_camel_case() {
        let tracking = HealthTracking {
            weekly_activity: vec![35, 45, 60, 40, 70, 55, 50],
            water_intake: 75,
            sleep_quality: 85,
            nutrition: 80,
            today_activity: 50,
        };

        let json = serde_json::to_value(&tracking).unwrap();
        assert_eq!(json["waterIntake"], 75);
        assert_eq!(json["todayActivity"], 50);

        let back: HealthTracking = serde_json::from_value(json).unwrap();
        assert_eq!(back, tracking);
    }

    #[test]
    fn health_tracking_tolerates_missing_fields() {
        let tracking: HealthTracking = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(tracking.weekly_activity, vec![0; 7]);
        assert_eq!(tracking.water_intake, 0);
    }

    #[test]
    fn health_preferences_accept_stored_wire_shape() {
        // Goals are keyword/display strings, not numbers
        let prefs: HealthPreferences = serde_json::from_value(serde_json::json!({
            "activityGoal": "moderate",
            "waterReminderEnabled": true,
            "waterGoal": "2.5",
            "medicationRemindersEnabled": false,
            "weightUnit": "kg",
            "heightUnit": "cm"
        }))
        .unwrap();

        assert_eq!(prefs.activity_goal, "moderate");
        assert_eq!(prefs.water_goal, "2.5");

        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json["activityGoal"], "moderate");
        assert_eq!(json["waterGoal"], "2.5");
    }

    #[test]
    fn health_preferences_default_matches_empty_document() {
        let empty: HealthPreferences = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(empty, HealthPreferences::default());
        assert!(empty.water_reminder_enabled);
        assert_eq!(empty.activity_goal, "moderate");
        assert_eq!(empty.water_goal, "2.5");
        assert_eq!(empty.weight_unit, "kg");
    }
}
