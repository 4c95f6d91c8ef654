//! Meal recognition boundary
//!
//! The recognition service is an external collaborator: it takes an image
//! and a free-text prompt and answers with a structured nutrition estimate.
//! Transport failures are real errors, but a body that does not parse never
//! is. A malformed payload degrades to a zero-confidence placeholder that
//! keeps the raw text for later inspection, so a flaky model can never
//! block a meal from being logged.

use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use nutritrack_shared::{
    EntryMethod, MacroGrams, MealLog, MealType, NutritionEstimate, Portion, RecognitionRequest,
};

use crate::config::RecognitionConfig;
use crate::error::EngineResult;

/// Name given to meals built from an unreadable recognition response.
pub const FALLBACK_FOOD_NAME: &str = "Unrecognized meal";

/// Parse a recognition response body. Never fails: a body that is not
/// valid JSON for the estimate contract degrades to a zero-confidence
/// placeholder carrying the raw text.
pub fn parse_estimate(raw: &str) -> NutritionEstimate {
    match serde_json::from_str::<NutritionEstimate>(raw) {
        Ok(estimate) => estimate,
        Err(error) => {
            tracing::warn!(%error, "recognition response did not parse, degrading to placeholder");
            NutritionEstimate {
                food_name: FALLBACK_FOOD_NAME.to_string(),
                raw_response: Some(raw.to_string()),
                ..NutritionEstimate::default()
            }
        }
    }
}

/// Build a camera-entry [`MealLog`] from an estimate.
///
/// Missing numerics arrive as zero from [`parse_estimate`], so a degraded
/// estimate yields a zero-value meal whose notes hold the raw response.
pub fn meal_from_estimate(
    estimate: &NutritionEstimate,
    date: NaiveDate,
    time: NaiveTime,
    meal_type: MealType,
) -> MealLog {
    let name = if estimate.food_name.is_empty() {
        FALLBACK_FOOD_NAME.to_string()
    } else {
        estimate.food_name.clone()
    };

    MealLog {
        id: Uuid::new_v4(),
        name,
        meal_type,
        date,
        time,
        calories: estimate.calories,
        macros: MacroGrams {
            protein_g: estimate.protein_g,
            carbs_g: estimate.carbs_g,
            fat_g: estimate.fat_g,
        },
        portion: Portion::default(),
        confidence: Some(estimate.confidence),
        entry_method: EntryMethod::Camera,
        notes: estimate.raw_response.clone(),
        created_at: Utc::now(),
    }
}

/// HTTP client for the recognition service
#[derive(Debug, Clone)]
pub struct RecognitionClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecognitionClient {
    pub fn new(config: &RecognitionConfig) -> EngineResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit an image for recognition.
    ///
    /// Transport problems (unreachable host, timeout) surface as errors.
    /// Whatever body comes back, success status or not, goes through
    /// [`parse_estimate`] and therefore always yields an estimate.
    pub async fn recognize(&self, request: &RecognitionRequest) -> EngineResult<NutritionEstimate> {
        let url = format!("{}/api/v1/recognize", self.base_url);

        tracing::debug!(url = %url, "submitting image for recognition");
        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = %status, "recognition service returned non-success status");
        }

        Ok(parse_estimate(&body))
    }
}
