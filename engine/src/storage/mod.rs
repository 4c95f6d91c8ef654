//! Persistence gateway
//!
//! Two narrow async contracts decouple the engine from any concrete
//! backend: [`DraftStore`], a string key-value store for the in-progress
//! onboarding draft, and [`UserDocumentStore`], a per-user document store
//! for everything committed after onboarding. Both ship with an in-memory
//! backend (tests, previews) and a local JSON-file backend (on-device).
//!
//! Callers, not backends, own the fail-open policy: a failed read becomes
//! fresh state and a failed write is logged and swallowed, so the engine
//! keeps working offline or with a broken disk.

mod local;
mod memory;

pub use local::{LocalDocumentStore, LocalDraftStore};
pub use memory::{MemoryDocumentStore, MemoryDraftStore};

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nutritrack_shared::{
    Account, Achievement, ActivityProfile, Commitment, DailyLog, DietProfile, GoalSettings,
    Preferences, Profile, StreakData,
};

/// Key under which the onboarding draft is stored
pub const DRAFT_KEY: &str = "onboarding_draft";

/// Async key-value store for draft state
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Fetch the raw value for `key`, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting an absent key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Async per-user document store
#[async_trait]
pub trait UserDocumentStore: Send + Sync {
    /// Load the full document for `user_id`, `None` if the user has none yet
    async fn load(&self, user_id: &str) -> Result<Option<UserDocument>>;

    /// Merge `patch` into the stored document, creating it if absent.
    ///
    /// Merge is shallow at the top level: a `Some` field replaces the
    /// stored field wholesale, a `None` field is left untouched.
    async fn merge(&self, user_id: &str, patch: UserDocumentPatch) -> Result<()>;
}

// ============================================================================
// Document Types
// ============================================================================

/// Onboarding progress committed alongside the sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingProgress {
    pub current_step: usize,
    pub completed_steps: BTreeSet<usize>,
    pub is_completed: bool,
}

/// Kind of an in-app notification record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Achievement,
    Streak,
    System,
}

/// An in-app notification record, newest appended last
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

/// Usage counters, bumped by the session and never decremented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsCounters {
    pub meals_logged: u64,
    pub water_logs: u64,
    pub step_records: u64,
    pub achievements_unlocked: u64,
}

/// Document housekeeping stamped on load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub last_login: Option<DateTime<Utc>>,
    pub app_version: Option<String>,
    pub timezone: Option<String>,
    pub locale: Option<String>,
}

/// The full per-user document
///
/// Unknown and missing fields tolerate schema drift via `serde(default)`;
/// an older document loads with fresh defaults for anything it predates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDocument {
    pub profile: Profile,
    pub goals: GoalSettings,
    pub activity: ActivityProfile,
    pub diet: DietProfile,
    pub preferences: Preferences,
    pub commitment: Commitment,
    pub account: Account,
    pub progress: OnboardingProgress,
    pub streaks: StreakData,
    pub daily_logs: BTreeMap<NaiveDate, DailyLog>,
    pub achievements: Vec<Achievement>,
    pub notifications: Vec<NotificationRecord>,
    pub analytics: AnalyticsCounters,
    pub metadata: DocumentMetadata,
}

/// Shallow patch for [`UserDocument`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDocumentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<GoalSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<DietProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commitment: Option<Commitment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<OnboardingProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaks: Option<StreakData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_logs: Option<BTreeMap<NaiveDate, DailyLog>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<Achievement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Vec<NotificationRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AnalyticsCounters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
}

impl UserDocument {
    /// Apply a shallow patch: `Some` fields replace, `None` fields stay.
    pub fn apply(&mut self, patch: UserDocumentPatch) {
        if let Some(profile) = patch.profile {
            self.profile = profile;
        }
        if let Some(goals) = patch.goals {
            self.goals = goals;
        }
        if let Some(activity) = patch.activity {
            self.activity = activity;
        }
        if let Some(diet) = patch.diet {
            self.diet = diet;
        }
        if let Some(preferences) = patch.preferences {
            self.preferences = preferences;
        }
        if let Some(commitment) = patch.commitment {
            self.commitment = commitment;
        }
        if let Some(account) = patch.account {
            self.account = account;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress;
        }
        if let Some(streaks) = patch.streaks {
            self.streaks = streaks;
        }
        if let Some(daily_logs) = patch.daily_logs {
            self.daily_logs = daily_logs;
        }
        if let Some(achievements) = patch.achievements {
            self.achievements = achievements;
        }
        if let Some(notifications) = patch.notifications {
            self.notifications = notifications;
        }
        if let Some(analytics) = patch.analytics {
            self.analytics = analytics;
        }
        if let Some(metadata) = patch.metadata {
            self.metadata = metadata;
        }
    }
}
