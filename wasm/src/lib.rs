//! NutriTrack WASM Module
//!
//! WebAssembly bindings for the metabolic math, so the wizard can preview
//! targets in the browser while the user is still sliding inputs. The
//! string tags mirror the serialized enum forms; unknown tags fall back
//! the same way the engine treats absent values.

use wasm_bindgen::prelude::*;

use nutritrack_shared::{
    bmr_harris_benedict, macro_targets_for, ActivityLevel, Gender, PrimaryGoal,
};

fn gender_from(tag: &str) -> Gender {
    match tag {
        "male" => Gender::Male,
        "female" => Gender::Female,
        _ => Gender::Other,
    }
}

fn activity_from(tag: &str) -> ActivityLevel {
    match tag {
        "lightly_active" => ActivityLevel::LightlyActive,
        "moderately_active" => ActivityLevel::ModeratelyActive,
        "very_active" => ActivityLevel::VeryActive,
        "extremely_active" => ActivityLevel::ExtremelyActive,
        _ => ActivityLevel::Sedentary,
    }
}

fn goal_from(tag: &str) -> PrimaryGoal {
    match tag {
        "weight_loss" => PrimaryGoal::WeightLoss,
        "muscle_gain" => PrimaryGoal::MuscleGain,
        "healthy_eating" => PrimaryGoal::HealthyEating,
        _ => PrimaryGoal::Maintenance,
    }
}

/// Basal metabolic rate (Harris-Benedict revised)
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: &str) -> f64 {
    bmr_harris_benedict(weight_kg, height_cm, age_years, gender_from(gender))
}

/// Total daily energy expenditure for an activity level tag
#[wasm_bindgen]
pub fn calculate_tdee(bmr: f64, activity_level: &str) -> f64 {
    bmr * activity_from(activity_level).multiplier()
}

/// Daily calorie target for a goal tag, rounded to whole calories
#[wasm_bindgen]
pub fn daily_calorie_target(tdee: f64, goal: &str) -> u32 {
    goal_from(goal).adjust(tdee).round() as u32
}

/// Macro gram targets for a calorie budget, as [protein, carbs, fat]
#[wasm_bindgen]
pub fn macro_targets(daily_calories: f64) -> Vec<u32> {
    let macros = macro_targets_for(daily_calories);
    vec![macros.protein_g, macros.carbs_g, macros.fat_g]
}

/// Body mass index from weight (kg) and height (cm)
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}
