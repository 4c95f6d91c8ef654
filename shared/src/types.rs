//! Update payloads and wire types
//!
//! The `*Update` structs are shallow patches applied by the onboarding
//! store: a `Some` field replaces the section's field, a `None` field is
//! left untouched. The recognition types mirror the meal-recognition
//! service's JSON contract.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::metabolic::{ActivityLevel, Gender, PrimaryGoal};
use crate::models::{NotificationPrefs, Occupation, PrivacyPrefs};

use std::collections::BTreeSet;

// ============================================================================
// Onboarding Update Payloads
// ============================================================================

/// Profile section patch
///
/// `age` is intentionally absent: it is derived from `birth_date`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_ref: Option<String>,
}

/// Goal section patch
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GoalsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_goal: Option<PrimaryGoal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline_weeks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_rate_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivation_score: Option<u8>,
}

/// Activity section patch
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ActivityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<Occupation>,
    /// Replaces the whole list when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_exercise_frequency: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
}

/// Diet section patch; each tag set replaces wholesale when present
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DietUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intolerances: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disliked_foods: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cultural_restrictions: Option<BTreeSet<String>>,
}

/// Preferences section patch; each group replaces wholesale when present
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PreferencesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationPrefs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<PrivacyPrefs>,
}

/// Commitment section patch
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommitmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_at: Option<DateTime<Utc>>,
}

/// Account section patch
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_opt_in: Option<bool>,
}

// ============================================================================
// Meal Recognition Wire Types
// ============================================================================

/// Request body sent to the recognition service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionRequest {
    /// Base64-encoded image bytes
    pub image_base64: String,
    /// Prompt steering the estimate (portion hints, cuisine, etc.)
    pub prompt: String,
}

/// Nutrition estimate returned by the recognition service.
///
/// Every numeric field defaults to zero so a sparse or partial payload
/// still deserializes; absence of data must not fail the flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    #[serde(default)]
    pub food_name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    #[serde(default)]
    pub fiber_g: f64,
    /// Free-form micronutrient map, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micronutrients: Option<serde_json::Value>,
    /// Model confidence in [0, 1]; 0 marks a degraded parse
    #[serde(default)]
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    /// Raw body kept for inspection when the payload failed to parse.
    /// Never part of the wire contract.
    #[serde(skip)]
    pub raw_response: Option<String>,
}
