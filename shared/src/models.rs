//! Data models for the NutriTrack application

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metabolic::{ActivityLevel, CalculatedValues, Gender, PrimaryGoal};

/// Years elapsed between `birth_date` and `today`, floored at 0.
///
/// Counts whole years: the year ticks on the birthday, not on January 1st.
pub fn years_since(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

// ============================================================================
// Onboarding Sections
// ============================================================================

/// Personal profile section
///
/// Every field is optional because the wizard fills the section across
/// several screens. `age` is derived from `birth_date` and refreshed by the
/// onboarding store, never set directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub photo_ref: Option<String>,
}

impl Profile {
    /// Recompute the derived age from `birth_date` as of `today`.
    pub fn refresh_age(&mut self, today: NaiveDate) {
        self.age = self.birth_date.map(|born| years_since(born, today));
    }
}

/// Goal section: what the user wants and how fast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalSettings {
    pub primary_goal: Option<PrimaryGoal>,
    pub target_weight_kg: Option<f64>,
    pub timeline_weeks: Option<u32>,
    /// Signed kg/week; negative means losing
    pub weekly_rate_kg: Option<f64>,
    /// Self-reported motivation, 1-10
    pub motivation_score: Option<u8>,
}

/// Occupation category, used to contextualize activity questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    DeskJob,
    OnFeet,
    PhysicalLabor,
    Student,
    Homemaker,
    Retired,
    Other,
}

/// Lifestyle and exercise section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityProfile {
    pub activity_level: Option<ActivityLevel>,
    pub occupation: Option<Occupation>,
    pub exercise_types: Vec<String>,
    /// Days per week, 0-7
    pub weekly_exercise_frequency: Option<u8>,
    pub sleep_hours: Option<f64>,
}

/// Dietary restrictions and preferences section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietProfile {
    pub diet_type: Option<String>,
    pub allergies: BTreeSet<String>,
    pub intolerances: BTreeSet<String>,
    pub disliked_foods: BTreeSet<String>,
    pub cultural_restrictions: BTreeSet<String>,
}

/// Notification channel toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPrefs {
    pub meal_reminders: bool,
    pub water_reminders: bool,
    pub streak_alerts: bool,
    pub achievement_alerts: bool,
    pub weekly_summary: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            meal_reminders: true,
            water_reminders: true,
            streak_alerts: true,
            achievement_alerts: true,
            weekly_summary: true,
        }
    }
}

/// Privacy toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyPrefs {
    pub share_progress: bool,
    pub public_profile: bool,
    pub analytics_opt_in: bool,
}

impl Default for PrivacyPrefs {
    fn default() -> Self {
        Self {
            share_progress: false,
            public_profile: false,
            analytics_opt_in: true,
        }
    }
}

/// Notification and privacy preferences section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub notifications: NotificationPrefs,
    pub privacy: PrivacyPrefs,
}

/// Commitment pledge section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commitment {
    pub accepted: bool,
    pub signed_at: Option<DateTime<Utc>>,
}

/// Account section captured at the end of the wizard
///
/// Authentication itself is external; only the declared identity is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub email: Option<String>,
    pub auth_provider: Option<String>,
    pub marketing_opt_in: bool,
}

// ============================================================================
// Daily Log
// ============================================================================

/// Meal slot for a logged meal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// How a meal entry was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryMethod {
    Camera,
    Manual,
    Barcode,
    QuickAdd,
}

/// Macro amounts in grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Portion size of a meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portion {
    pub amount: f64,
    pub unit: String,
}

impl Default for Portion {
    fn default() -> Self {
        Self {
            amount: 1.0,
            unit: "serving".to_string(),
        }
    }
}

/// An immutable logged meal
///
/// Entries are append-only: there is no edit or delete, a correction is a
/// new entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealLog {
    pub id: Uuid,
    pub name: String,
    pub meal_type: MealType,
    /// The day this meal counts toward
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub calories: f64,
    pub macros: MacroGrams,
    #[serde(default)]
    pub portion: Portion,
    /// Recognition confidence in [0, 1]; absent for manual entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub entry_method: EntryMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Calorie totals for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalorieTally {
    pub consumed: f64,
    pub goal: f64,
    /// Always `max(0, goal - consumed)`
    pub remaining: f64,
}

/// One macro's progress against its goal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroGoal {
    pub current: f64,
    pub goal: f64,
}

/// Per-macro progress for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub protein: MacroGoal,
    pub carbs: MacroGoal,
    pub fat: MacroGoal,
}

/// Water intake in glasses for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterTally {
    pub glasses: u32,
    pub goal_glasses: u32,
}

/// Step count for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTally {
    pub count: u32,
    pub goal: u32,
}

/// One calendar day's aggregated log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub calories: CalorieTally,
    pub macros: MacroProgress,
    pub water: WaterTally,
    pub steps: StepTally,
    pub meals: Vec<MealLog>,
    /// True once at least one meal has been logged for the day
    pub completed: bool,
}

impl DailyLog {
    /// Fresh, empty log for `date` with goals seeded from the current
    /// calculated values and configured defaults.
    pub fn for_date(
        date: NaiveDate,
        values: &CalculatedValues,
        water_goal_glasses: u32,
        step_goal: u32,
    ) -> Self {
        Self {
            date,
            calories: CalorieTally {
                consumed: 0.0,
                goal: f64::from(values.daily_calories),
                remaining: f64::from(values.daily_calories),
            },
            macros: MacroProgress {
                protein: MacroGoal {
                    current: 0.0,
                    goal: f64::from(values.macros.protein_g),
                },
                carbs: MacroGoal {
                    current: 0.0,
                    goal: f64::from(values.macros.carbs_g),
                },
                fat: MacroGoal {
                    current: 0.0,
                    goal: f64::from(values.macros.fat_g),
                },
            },
            water: WaterTally {
                glasses: 0,
                goal_glasses: water_goal_glasses,
            },
            steps: StepTally {
                count: 0,
                goal: step_goal,
            },
            meals: Vec::new(),
            completed: false,
        }
    }
}

// ============================================================================
// Streaks
// ============================================================================

/// Snapshot of one day fed into the streak engine and kept in history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreakDay {
    pub date: NaiveDate,
    pub completed: bool,
    pub meals_logged: u32,
    pub calories_goal: f64,
    pub calories_consumed: f64,
    pub water_glasses: u32,
}

/// Consecutive-day activity state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakData {
    pub current_streak: u32,
    /// Monotonic: never decreases, even across resets
    pub best_streak: u32,
    /// Monday-indexed activity mask for the current week view
    pub week_days: [bool; 7],
    pub last_active_date: Option<NaiveDate>,
    /// Capped at 30 entries, newest kept
    pub history: Vec<StreakDay>,
}

impl Default for StreakData {
    fn default() -> Self {
        Self {
            current_streak: 0,
            best_streak: 0,
            week_days: [false; 7],
            last_active_date: None,
            history: Vec::new(),
        }
    }
}

// ============================================================================
// Achievements
// ============================================================================

/// Achievement grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Streak,
    Logging,
    Goals,
}

/// Achievement rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// An unlocked achievement
///
/// `id` is the stable identity; a user never holds two achievements with the
/// same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: DateTime<Utc>,
    pub category: AchievementCategory,
    pub rarity: AchievementRarity,
}
