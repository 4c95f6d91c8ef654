//! User session
//!
//! [`UserSession`] owns all committed state for one signed-in user: the
//! onboarding sections, the derived calculated values, the daily log book,
//! streaks, achievements, notifications and analytics. All mutation is
//! single-threaded through `&mut self`; the only suspension points are the
//! document-store boundaries. Reads are awaited with a start-fresh fallback,
//! writes are awaited but fail open: a failed merge is logged once here and
//! the in-memory state stays authoritative for the rest of the session.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use nutritrack_shared::{
    compute_calculated_values, Account, Achievement, ActivityProfile, CalculatedValues,
    Commitment, DailyLog, DietProfile, GoalSettings, MealLog, Preferences, Profile, StreakData,
};

use crate::achievements::check_milestones;
use crate::config::DailyDefaults;
use crate::daily_log::DailyLogBook;
use crate::onboarding::OnboardingState;
use crate::storage::{
    AnalyticsCounters, DocumentMetadata, NotificationKind, NotificationRecord,
    OnboardingProgress, UserDocument, UserDocumentPatch, UserDocumentStore,
};
use crate::streaks::advance_streak;

/// In-memory state for one user, backed by the document store.
pub struct UserSession {
    user_id: String,
    profile: Profile,
    goals: GoalSettings,
    activity: ActivityProfile,
    diet: DietProfile,
    preferences: Preferences,
    commitment: Commitment,
    account: Account,
    progress: OnboardingProgress,
    calculated: CalculatedValues,
    logs: DailyLogBook,
    streaks: StreakData,
    achievements: Vec<Achievement>,
    notifications: Vec<NotificationRecord>,
    analytics: AnalyticsCounters,
    metadata: DocumentMetadata,
    documents: Arc<dyn UserDocumentStore>,
}

impl UserSession {
    /// Load the user's document and hydrate a session from it.
    ///
    /// An absent or unreadable document starts a fresh session rather than
    /// failing. The login timestamp and app version are stamped into the
    /// document metadata on every load.
    pub async fn load(
        user_id: impl Into<String>,
        documents: Arc<dyn UserDocumentStore>,
        defaults: DailyDefaults,
    ) -> Self {
        let user_id = user_id.into();
        let document = match documents.load(&user_id).await {
            Ok(Some(document)) => document,
            Ok(None) => UserDocument::default(),
            Err(error) => {
                tracing::warn!(%error, %user_id, "user document unreadable, starting fresh");
                UserDocument::default()
            }
        };

        let calculated =
            compute_calculated_values(&document.profile, &document.activity, &document.goals);
        let logs = DailyLogBook::from_map(document.daily_logs, calculated, defaults);

        let mut metadata = document.metadata;
        metadata.last_login = Some(Utc::now());
        metadata.app_version = Some(env!("CARGO_PKG_VERSION").to_string());

        let session = Self {
            user_id,
            profile: document.profile,
            goals: document.goals,
            activity: document.activity,
            diet: document.diet,
            preferences: document.preferences,
            commitment: document.commitment,
            account: document.account,
            progress: document.progress,
            calculated,
            logs,
            streaks: document.streaks,
            achievements: document.achievements,
            notifications: document.notifications,
            analytics: document.analytics,
            metadata,
            documents,
        };

        session
            .persist(UserDocumentPatch {
                metadata: Some(session.metadata.clone()),
                ..UserDocumentPatch::default()
            })
            .await;

        session
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn calculated_values(&self) -> &CalculatedValues {
        &self.calculated
    }

    pub fn streaks(&self) -> &StreakData {
        &self.streaks
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn notifications(&self) -> &[NotificationRecord] {
        &self.notifications
    }

    pub fn analytics(&self) -> &AnalyticsCounters {
        &self.analytics
    }

    /// The daily log for `date`, created empty if absent.
    pub fn day(&mut self, date: NaiveDate) -> &DailyLog {
        self.logs.day(date)
    }

    /// Commit a finished onboarding pass into the session.
    ///
    /// Copies every wizard section, recomputes the calculated values and
    /// writes the whole committed state through in one merge.
    pub async fn commit_onboarding(&mut self, state: &OnboardingState) {
        self.profile = state.profile.clone();
        self.goals = state.goals.clone();
        self.activity = state.activity.clone();
        self.diet = state.diet.clone();
        self.preferences = state.preferences.clone();
        self.commitment = state.commitment.clone();
        self.account = state.account.clone();
        self.progress = OnboardingProgress {
            current_step: state.current_step,
            completed_steps: state.completed_steps.clone(),
            is_completed: state.is_completed,
        };

        self.calculated = compute_calculated_values(&self.profile, &self.activity, &self.goals);
        self.logs.set_calculated_values(self.calculated);

        tracing::info!(
            user_id = %self.user_id,
            daily_calories = self.calculated.daily_calories,
            "onboarding committed"
        );

        self.persist(UserDocumentPatch {
            profile: Some(self.profile.clone()),
            goals: Some(self.goals.clone()),
            activity: Some(self.activity.clone()),
            diet: Some(self.diet.clone()),
            preferences: Some(self.preferences.clone()),
            commitment: Some(self.commitment.clone()),
            account: Some(self.account.clone()),
            progress: Some(self.progress.clone()),
            ..UserDocumentPatch::default()
        })
        .await;
    }

    /// Log a meal and run the full update pipeline: aggregate the day,
    /// advance the streak, evaluate milestones, then persist.
    ///
    /// Returns the achievements newly unlocked by this meal. A backdated
    /// meal still lands in its day's log, but the streak is left untouched.
    pub async fn log_meal(&mut self, meal: MealLog) -> Vec<Achievement> {
        let date = meal.date;
        self.logs.add_meal(meal);
        self.analytics.meals_logged += 1;

        let snapshot = self.logs.snapshot(date);
        let unlocked = match advance_streak(&self.streaks, &snapshot) {
            Ok(next) => {
                self.streaks = next;
                check_milestones(self.streaks.current_streak, &self.achievements, Utc::now())
            }
            Err(error) => {
                tracing::warn!(%error, %date, "streak not advanced for backdated meal");
                Vec::new()
            }
        };

        for achievement in &unlocked {
            tracing::info!(id = %achievement.id, "achievement unlocked");
            self.notifications.push(NotificationRecord {
                id: Uuid::new_v4(),
                kind: NotificationKind::Achievement,
                title: achievement.title.clone(),
                body: achievement.description.clone(),
                created_at: achievement.unlocked_at,
                read: false,
            });
        }
        self.analytics.achievements_unlocked += unlocked.len() as u64;
        self.achievements.extend(unlocked.iter().cloned());

        self.persist(UserDocumentPatch {
            streaks: Some(self.streaks.clone()),
            daily_logs: Some(self.logs.logs().clone()),
            achievements: Some(self.achievements.clone()),
            notifications: Some(self.notifications.clone()),
            analytics: Some(self.analytics),
            ..UserDocumentPatch::default()
        })
        .await;

        unlocked
    }

    /// Set the day's water tally. Water never affects streaks.
    pub async fn log_water(&mut self, date: NaiveDate, glasses: u32) {
        self.logs.log_water(date, glasses);
        self.analytics.water_logs += 1;

        self.persist(UserDocumentPatch {
            daily_logs: Some(self.logs.logs().clone()),
            analytics: Some(self.analytics),
            ..UserDocumentPatch::default()
        })
        .await;
    }

    /// Set the day's step count.
    pub async fn record_steps(&mut self, date: NaiveDate, count: u32) {
        self.logs.record_steps(date, count);
        self.analytics.step_records += 1;

        self.persist(UserDocumentPatch {
            daily_logs: Some(self.logs.logs().clone()),
            analytics: Some(self.analytics),
            ..UserDocumentPatch::default()
        })
        .await;
    }

    /// Mark every notification read.
    pub async fn mark_notifications_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }

        self.persist(UserDocumentPatch {
            notifications: Some(self.notifications.clone()),
            ..UserDocumentPatch::default()
        })
        .await;
    }

    // Fail-open write boundary: the merge is awaited so ordering holds
    // within the session, but a failure is logged and swallowed here and
    // nowhere else.
    async fn persist(&self, patch: UserDocumentPatch) {
        if let Err(error) = self.documents.merge(&self.user_id, patch).await {
            tracing::warn!(%error, user_id = %self.user_id, "document merge failed, keeping in-memory state");
        }
    }
}
