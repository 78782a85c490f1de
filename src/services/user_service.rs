use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    DailyTask, DailyTaskList, HealthPreferences, HealthTracking, NotificationSettings,
    UpdateSettingsRequest, User, UserSettings,
};

pub struct UserService {
    db: PgPool,
}

/// Result of a task toggle, returned to the dashboard
#[derive(Debug)]
pub struct TaskToggleOutcome {
    pub tasks: Vec<DailyTask>,
    pub tracking: HealthTracking,
    pub streak_days: i32,
    pub completed_goals: i32,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    async fn require_user(&self, user_id: Uuid) -> Result<User> {
        self.get_user(user_id)
            .await?
            .ok_or_else(|| anyhow!("User {} not found", user_id))
    }

    pub async fn get_settings(&self, user_id: Uuid) -> Result<UserSettings> {
        let user = self.require_user(user_id).await?;

        let health_preferences: HealthPreferences =
            serde_json::from_value(user.health_preferences).unwrap_or_default();
        let notification_settings: NotificationSettings =
            serde_json::from_value(user.notification_settings).unwrap_or_default();

        Ok(UserSettings {
            display_name: user.display_name,
            phone: user.phone,
            bio: user.bio,
            health_preferences,
            notification_settings,
        })
    }

    pub async fn update_settings(
        &self,
        user_id: Uuid,
        update: UpdateSettingsRequest,
    ) -> Result<UserSettings> {
        let current = self.get_settings(user_id).await?;

        let display_name = update.display_name.unwrap_or(current.display_name);
        let phone = update.phone.unwrap_or(current.phone);
        let bio = update.bio.unwrap_or(current.bio);
        let health_preferences = update.health_preferences.unwrap_or(current.health_preferences);
        let notification_settings = update
            .notification_settings
            .unwrap_or(current.notification_settings);

        sqlx::query(
            "UPDATE users
             SET display_name = $2, phone = $3, bio = $4,
                 health_preferences = $5, notification_settings = $6,
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(&display_name)
        .bind(&phone)
        .bind(&bio)
        .bind(serde_json::to_value(&health_preferences)?)
        .bind(serde_json::to_value(&notification_settings)?)
        .execute(&self.db)
        .await
        .context("Failed to update user settings")?;

        Ok(UserSettings {
            display_name,
            phone,
            bio,
            health_preferences,
            notification_settings,
        })
    }

    pub async fn daily_tasks(&self, user_id: Uuid) -> Result<DailyTaskList> {
        let user = self.require_user(user_id).await?;
        Ok(serde_json::from_value(user.daily_tasks).unwrap_or_default())
    }

    pub async fn health_tracking(&self, user_id: Uuid) -> Result<HealthTracking> {
        let user = self.require_user(user_id).await?;
        Ok(serde_json::from_value(user.health_tracking).unwrap_or_default())
    }

    /// Append a new uncompleted task to the daily list
    pub async fn add_task(&self, user_id: Uuid, title: &str) -> Result<Vec<DailyTask>> {
        let mut list = self.daily_tasks(user_id).await?;

        list.items.push(DailyTask {
            id: format!("task{}", Utc::now().timestamp_millis()),
            title: title.trim().to_string(),
            completed: false,
        });
        list.last_updated = Some(Utc::now());

        self.store_tasks(user_id, &list).await?;
        Ok(list.items)
    }

    /// Toggle a task's completion and update the derived tracking state:
    /// today's activity percentage, the weekly activity slot for today,
    /// streak/goal counters on completion, and the water percentage when
    /// the task is water related.
    pub async fn toggle_task(&self, user_id: Uuid, task_id: &str) -> Result<TaskToggleOutcome> {
        let user = self.require_user(user_id).await?;
        let mut list: DailyTaskList = serde_json::from_value(user.daily_tasks).unwrap_or_default();
        let mut tracking: HealthTracking =
            serde_json::from_value(user.health_tracking).unwrap_or_default();

        let task = list
            .items
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| anyhow!("Task {} not found", task_id))?;

        let is_water_task = is_water_task(&task.title);
        let is_completing = !task.completed;
        task.completed = is_completing;
        list.last_updated = Some(Utc::now());

        let completed = list.items.iter().filter(|t| t.completed).count();
        let total = list.items.len();
        let progress = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as i32
        } else {
            0
        };

        if is_water_task {
            tracking.water_intake = if is_completing { 100 } else { 0 };
        }

        let mut streak_days = user.streak_days;
        let mut completed_goals = user.completed_goals;

        if is_completing {
            tracking.today_activity = progress;
            streak_days += 1;
            completed_goals += 1;

            // Monday-based index into the weekly activity chart
            let day_index = Utc::now().weekday().num_days_from_monday() as usize;
            if tracking.weekly_activity.len() < 7 {
                tracking.weekly_activity.resize(7, 0);
            }
            tracking.weekly_activity[day_index] = progress;
        }

        self.store_tasks(user_id, &list).await?;
        sqlx::query(
            "UPDATE users
             SET health_tracking = $2, streak_days = $3, completed_goals = $4, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(serde_json::to_value(&tracking)?)
        .bind(streak_days)
        .bind(completed_goals)
        .execute(&self.db)
        .await
        .context("Failed to update health tracking")?;

        Ok(TaskToggleOutcome {
            tasks: list.items,
            tracking,
            streak_days,
            completed_goals,
        })
    }

    /// Record the user's water intake as a glasses count out of eight.
    /// When a water-related daily task exists and the count crosses the
    /// full-glasses threshold, the task is toggled instead so streaks and
    /// activity percentages stay consistent; otherwise only the water
    /// percentage is stored.
    pub async fn set_water_glasses(&self, user_id: Uuid, glasses: i32) -> Result<TaskToggleOutcome> {
        let glasses = glasses.clamp(0, MAX_WATER_GLASSES);
        let user = self.require_user(user_id).await?;
        let list: DailyTaskList = serde_json::from_value(user.daily_tasks).unwrap_or_default();

        if let Some(task) = list.items.iter().find(|t| is_water_task(&t.title)) {
            let should_be_completed = glasses >= MAX_WATER_GLASSES;
            if task.completed != should_be_completed {
                let task_id = task.id.clone();
                return self.toggle_task(user_id, &task_id).await;
            }
        }

        let mut tracking: HealthTracking =
            serde_json::from_value(user.health_tracking).unwrap_or_default();
        tracking.water_intake = water_percentage(glasses);

        sqlx::query(
            "UPDATE users SET health_tracking = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .bind(serde_json::to_value(&tracking)?)
        .execute(&self.db)
        .await
        .context("Failed to update water intake")?;

        Ok(TaskToggleOutcome {
            tasks: list.items,
            tracking,
            streak_days: user.streak_days,
            completed_goals: user.completed_goals,
        })
    }

    async fn store_tasks(&self, user_id: Uuid, list: &DailyTaskList) -> Result<()> {
        sqlx::query("UPDATE users SET daily_tasks = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(serde_json::to_value(list)?)
            .execute(&self.db)
            .await
            .context("Failed to update daily tasks")?;

        Ok(())
    }
}

/// Daily target used by the water tracker
pub const MAX_WATER_GLASSES: i32 = 8;

/// Water-related tasks are recognized by title
pub fn is_water_task(title: &str) -> bool {
    let title = title.to_lowercase();
    title.contains("water") || title.contains("glass")
}

/// Glasses count converted to a percentage of the daily target
pub fn water_percentage(glasses: i32) -> i32 {
    ((glasses as f64 / MAX_WATER_GLASSES as f64) * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_percentage_rounds_to_nearest() {
        assert_eq!(water_percentage(0), 0);
        assert_eq!(water_percentage(1), 13);
        assert_eq!(water_percentage(3), 38);
        assert_eq!(water_percentage(4), 50);
        assert_eq!(water_percentage(8), 100);
    }

    #[test]
    fn water_tasks_match_by_title() {
        assert!(is_water_task("Drink 8 glasses of water"));
        assert!(is_water_task("Refill the Glass"));
        assert!(!is_water_task("Exercise for 30 minutes"));
        assert!(!is_water_task("Take medication"));
    }
}
