//! Intake wizard state machine
//!
//! Holds the partially-filled onboarding sections, an ordered step cursor,
//! and the completed-step set. Every mutation persists the full draft
//! through the [`DraftStore`]; saves are fail-open, so a broken store
//! never blocks the wizard. The derived [`CalculatedValues`] cache is
//! recomputed on every profile/activity/goals change and is excluded from
//! the persisted draft.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use nutritrack_shared::{
    compute_calculated_values, Account, AccountUpdate, ActivityProfile, ActivityUpdate,
    CalculatedValues, Commitment, CommitmentUpdate, DietProfile, DietUpdate, GoalSettings,
    GoalsUpdate, Preferences, PreferencesUpdate, Profile, ProfileUpdate,
};

use crate::storage::{DraftStore, DRAFT_KEY};

/// Schema version tag for the persisted draft
const DRAFT_VERSION: u32 = 1;

// ============================================================================
// Steps
// ============================================================================

/// The wizard's steps, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Name,
    BirthDate,
    Gender,
    BodyMetrics,
    PrimaryGoal,
    TargetWeight,
    Pace,
    Motivation,
    Commitment,
    ActivityLevel,
    Occupation,
    ExerciseHabits,
    Sleep,
    Diet,
    Tutorial,
    Notifications,
    Privacy,
    Account,
    Summary,
}

/// Fixed step order; the single source of truth for indices
pub const STEP_ORDER: [OnboardingStep; 19] = [
    OnboardingStep::Name,
    OnboardingStep::BirthDate,
    OnboardingStep::Gender,
    OnboardingStep::BodyMetrics,
    OnboardingStep::PrimaryGoal,
    OnboardingStep::TargetWeight,
    OnboardingStep::Pace,
    OnboardingStep::Motivation,
    OnboardingStep::Commitment,
    OnboardingStep::ActivityLevel,
    OnboardingStep::Occupation,
    OnboardingStep::ExerciseHabits,
    OnboardingStep::Sleep,
    OnboardingStep::Diet,
    OnboardingStep::Tutorial,
    OnboardingStep::Notifications,
    OnboardingStep::Privacy,
    OnboardingStep::Account,
    OnboardingStep::Summary,
];

static STEP_INDEX: Lazy<HashMap<OnboardingStep, usize>> = Lazy::new(|| {
    STEP_ORDER
        .iter()
        .enumerate()
        .map(|(index, step)| (*step, index))
        .collect()
});

impl OnboardingStep {
    /// Index of this step in the fixed order
    pub fn index(self) -> usize {
        STEP_INDEX[&self]
    }

    /// Total number of steps
    pub fn total() -> usize {
        STEP_ORDER.len()
    }

    /// Step at `index`, clamped into range
    pub fn at(index: usize) -> OnboardingStep {
        STEP_ORDER[index.min(STEP_ORDER.len() - 1)]
    }
}

// ============================================================================
// State
// ============================================================================

/// Full wizard state, persisted as one draft blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingState {
    pub version: u32,
    pub profile: Profile,
    pub goals: GoalSettings,
    pub activity: ActivityProfile,
    pub diet: DietProfile,
    pub preferences: Preferences,
    pub commitment: Commitment,
    pub account: Account,
    pub current_step: usize,
    pub completed_steps: BTreeSet<usize>,
    pub is_completed: bool,
    pub last_updated: DateTime<Utc>,
    /// Derived cache, recomputed from profile + activity + goals; never
    /// part of the persisted draft
    #[serde(skip)]
    pub calculated: CalculatedValues,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self {
            version: DRAFT_VERSION,
            profile: Profile::default(),
            goals: GoalSettings::default(),
            activity: ActivityProfile::default(),
            diet: DietProfile::default(),
            preferences: Preferences::default(),
            commitment: Commitment::default(),
            account: Account::default(),
            current_step: 0,
            completed_steps: BTreeSet::new(),
            is_completed: false,
            last_updated: Utc::now(),
            calculated: CalculatedValues::default(),
        }
    }
}

// ============================================================================
// Store
// ============================================================================

/// The wizard store: in-memory state plus its draft persistence
pub struct OnboardingStore {
    state: OnboardingState,
    drafts: Arc<dyn DraftStore>,
}

impl OnboardingStore {
    /// Load the draft once at startup.
    ///
    /// An absent, unreadable, or version-mismatched draft starts fresh;
    /// loading never fails.
    pub async fn load(drafts: Arc<dyn DraftStore>) -> Self {
        let state = match drafts.get(DRAFT_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<OnboardingState>(&raw) {
                Ok(state) if state.version == DRAFT_VERSION => state,
                Ok(state) => {
                    info!(
                        found = state.version,
                        expected = DRAFT_VERSION,
                        "onboarding draft version mismatch, starting fresh"
                    );
                    OnboardingState::default()
                }
                Err(e) => {
                    warn!(error = %e, "unreadable onboarding draft, starting fresh");
                    OnboardingState::default()
                }
            },
            Ok(None) => OnboardingState::default(),
            Err(e) => {
                warn!(error = %e, "failed to read onboarding draft, starting fresh");
                OnboardingState::default()
            }
        };

        let mut store = Self { state, drafts };
        store.recompute();
        store
    }

    /// Read access to the current state
    pub fn state(&self) -> &OnboardingState {
        &self.state
    }

    /// The step the cursor points at
    pub fn current_step(&self) -> OnboardingStep {
        OnboardingStep::at(self.state.current_step)
    }

    /// The current derived energy budget
    pub fn calculated_values(&self) -> &CalculatedValues {
        &self.state.calculated
    }

    fn recompute(&mut self) {
        self.state.calculated = compute_calculated_values(
            &self.state.profile,
            &self.state.activity,
            &self.state.goals,
        );
    }

    /// Serialize and save the draft. Failures are logged once here and
    /// swallowed; the in-memory state stays authoritative.
    async fn persist(&mut self) {
        self.state.last_updated = Utc::now();
        match serde_json::to_string(&self.state) {
            Ok(raw) => {
                if let Err(e) = self.drafts.put(DRAFT_KEY, &raw).await {
                    warn!(error = %e, "failed to save onboarding draft");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize onboarding draft"),
        }
    }

    // ==================== Section Updates ====================

    // The update methods merge patches as given and never validate: range
    // checking belongs to the screens (nutritrack_shared::validation) before
    // a patch is built, and the store must not second-guess them.

    /// Merge a profile patch; re-derives age and the calculated values.
    pub async fn update_profile(&mut self, patch: ProfileUpdate) {
        let profile = &mut self.state.profile;
        if patch.first_name.is_some() {
            profile.first_name = patch.first_name;
        }
        if patch.last_name.is_some() {
            profile.last_name = patch.last_name;
        }
        if patch.birth_date.is_some() {
            profile.birth_date = patch.birth_date;
            profile.refresh_age(Utc::now().date_naive());
        }
        if patch.gender.is_some() {
            profile.gender = patch.gender;
        }
        if patch.height_cm.is_some() {
            profile.height_cm = patch.height_cm;
        }
        if patch.weight_kg.is_some() {
            profile.weight_kg = patch.weight_kg;
        }
        if patch.photo_ref.is_some() {
            profile.photo_ref = patch.photo_ref;
        }
        self.recompute();
        self.persist().await;
    }

    /// Merge a goals patch; recomputes the calculated values.
    pub async fn update_goals(&mut self, patch: GoalsUpdate) {
        let goals = &mut self.state.goals;
        if patch.primary_goal.is_some() {
            goals.primary_goal = patch.primary_goal;
        }
        if patch.target_weight_kg.is_some() {
            goals.target_weight_kg = patch.target_weight_kg;
        }
        if patch.timeline_weeks.is_some() {
            goals.timeline_weeks = patch.timeline_weeks;
        }
        if patch.weekly_rate_kg.is_some() {
            goals.weekly_rate_kg = patch.weekly_rate_kg;
        }
        if patch.motivation_score.is_some() {
            goals.motivation_score = patch.motivation_score;
        }
        self.recompute();
        self.persist().await;
    }

    /// Merge an activity patch; recomputes the calculated values.
    pub async fn update_activity(&mut self, patch: ActivityUpdate) {
        let activity = &mut self.state.activity;
        if patch.activity_level.is_some() {
            activity.activity_level = patch.activity_level;
        }
        if patch.occupation.is_some() {
            activity.occupation = patch.occupation;
        }
        if let Some(exercise_types) = patch.exercise_types {
            activity.exercise_types = exercise_types;
        }
        if patch.weekly_exercise_frequency.is_some() {
            activity.weekly_exercise_frequency = patch.weekly_exercise_frequency;
        }
        if patch.sleep_hours.is_some() {
            activity.sleep_hours = patch.sleep_hours;
        }
        self.recompute();
        self.persist().await;
    }

    /// Merge a diet patch.
    pub async fn update_diet(&mut self, patch: DietUpdate) {
        let diet = &mut self.state.diet;
        if patch.diet_type.is_some() {
            diet.diet_type = patch.diet_type;
        }
        if let Some(allergies) = patch.allergies {
            diet.allergies = allergies;
        }
        if let Some(intolerances) = patch.intolerances {
            diet.intolerances = intolerances;
        }
        if let Some(disliked_foods) = patch.disliked_foods {
            diet.disliked_foods = disliked_foods;
        }
        if let Some(cultural_restrictions) = patch.cultural_restrictions {
            diet.cultural_restrictions = cultural_restrictions;
        }
        self.persist().await;
    }

    /// Merge a preferences patch.
    pub async fn update_preferences(&mut self, patch: PreferencesUpdate) {
        if let Some(notifications) = patch.notifications {
            self.state.preferences.notifications = notifications;
        }
        if let Some(privacy) = patch.privacy {
            self.state.preferences.privacy = privacy;
        }
        self.persist().await;
    }

    /// Merge a commitment patch.
    pub async fn update_commitment(&mut self, patch: CommitmentUpdate) {
        if let Some(accepted) = patch.accepted {
            self.state.commitment.accepted = accepted;
        }
        if patch.signed_at.is_some() {
            self.state.commitment.signed_at = patch.signed_at;
        }
        self.persist().await;
    }

    /// Merge an account patch.
    pub async fn update_account(&mut self, patch: AccountUpdate) {
        if patch.email.is_some() {
            self.state.account.email = patch.email;
        }
        if patch.auth_provider.is_some() {
            self.state.account.auth_provider = patch.auth_provider;
        }
        if let Some(marketing_opt_in) = patch.marketing_opt_in {
            self.state.account.marketing_opt_in = marketing_opt_in;
        }
        self.persist().await;
    }

    // ==================== Navigation ====================

    /// Advance the cursor, clamped at the last step. The step being left
    /// is marked completed (idempotent).
    pub async fn next_step(&mut self) {
        let leaving = self.state.current_step;
        self.state.completed_steps.insert(leaving);
        self.state.current_step = (leaving + 1).min(OnboardingStep::total() - 1);
        debug!(from = leaving, to = self.state.current_step, "wizard advanced");
        self.persist().await;
    }

    /// Step back, clamped at 0. Does not alter the completed set.
    pub async fn previous_step(&mut self) {
        self.state.current_step = self.state.current_step.saturating_sub(1);
        debug!(to = self.state.current_step, "wizard stepped back");
        self.persist().await;
    }

    /// Jump to an arbitrary step, clamped into range. A forward jump marks
    /// the step before the target completed.
    pub async fn go_to_step(&mut self, index: usize) {
        let target = index.min(OnboardingStep::total() - 1);
        if target > self.state.current_step {
            self.state.completed_steps.insert(target - 1);
        }
        self.state.current_step = target;
        self.persist().await;
    }

    /// Mark onboarding finished.
    pub async fn complete_onboarding(&mut self) {
        self.state.is_completed = true;
        info!("onboarding completed");
        self.persist().await;
    }

    /// Wipe everything back to a fresh wizard.
    pub async fn reset_onboarding(&mut self) {
        self.state = OnboardingState::default();
        self.recompute();
        info!("onboarding reset");
        self.persist().await;
    }
}
