//! Common test utilities for integration tests
//!
//! Builders for realistic domain data and a helper that walks the whole
//! intake wizard the way the app drives it.

// not every test binary uses every helper
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::FirstName;
use fake::Fake;
use uuid::Uuid;

use nutritrack_engine::onboarding::{OnboardingStep, OnboardingStore};
use nutritrack_shared::{
    AccountUpdate, ActivityLevel, ActivityUpdate, CommitmentUpdate, DietUpdate, EntryMethod,
    Gender, GoalsUpdate, MacroGrams, MealLog, MealType, NotificationPrefs, Occupation, Portion,
    PreferencesUpdate, PrimaryGoal, PrivacyPrefs, ProfileUpdate,
};

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

pub fn meal(date: NaiveDate, name: &str, calories: f64, macros: MacroGrams) -> MealLog {
    MealLog {
        id: Uuid::new_v4(),
        name: name.to_string(),
        meal_type: MealType::Lunch,
        date,
        time: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
        calories,
        macros,
        portion: Portion::default(),
        confidence: None,
        entry_method: EntryMethod::Manual,
        notes: None,
        created_at: Utc::now(),
    }
}

pub fn simple_meal(date: NaiveDate, calories: f64) -> MealLog {
    meal(date, "meal", calories, MacroGrams::default())
}

/// Fill every wizard section with realistic data and walk to the summary
/// step, the way the app drives the flow.
pub async fn complete_wizard(store: &mut OnboardingStore) {
    let first_name: String = FirstName().fake();
    let email: String = SafeEmail().fake();

    store
        .update_profile(ProfileUpdate {
            first_name: Some(first_name),
            birth_date: NaiveDate::from_ymd_opt(1994, 5, 20),
            gender: Some(Gender::Male),
            height_cm: Some(178.0),
            weight_kg: Some(78.0),
            ..ProfileUpdate::default()
        })
        .await;
    store
        .update_goals(GoalsUpdate {
            primary_goal: Some(PrimaryGoal::WeightLoss),
            target_weight_kg: Some(72.0),
            timeline_weeks: Some(12),
            motivation_score: Some(8),
            ..GoalsUpdate::default()
        })
        .await;
    store
        .update_activity(ActivityUpdate {
            activity_level: Some(ActivityLevel::ModeratelyActive),
            occupation: Some(Occupation::DeskJob),
            exercise_types: Some(vec!["running".to_string(), "cycling".to_string()]),
            weekly_exercise_frequency: Some(3),
            sleep_hours: Some(7.5),
        })
        .await;
    store
        .update_diet(DietUpdate {
            diet_type: Some("omnivore".to_string()),
            allergies: Some(["peanuts".to_string()].into()),
            ..DietUpdate::default()
        })
        .await;
    store
        .update_preferences(PreferencesUpdate {
            notifications: Some(NotificationPrefs::default()),
            privacy: Some(PrivacyPrefs::default()),
        })
        .await;
    store
        .update_commitment(CommitmentUpdate {
            accepted: Some(true),
            signed_at: Some(Utc::now()),
        })
        .await;
    store
        .update_account(AccountUpdate {
            email: Some(email),
            auth_provider: Some("email".to_string()),
            marketing_opt_in: Some(false),
        })
        .await;

    while store.state().current_step < OnboardingStep::total() - 1 {
        store.next_step().await;
    }
    store.complete_onboarding().await;
}
