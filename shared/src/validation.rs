//! Input validation functions
//!
//! Screen-side validation for wizard fields. Validators return
//! `Result<(), String>` with a message suitable for inline display; the
//! onboarding store itself accepts patches unvalidated so screens stay in
//! charge of when to block progress.

use std::ops::RangeInclusive;

const WEIGHT_KG: RangeInclusive<f64> = 20.0..=500.0;
const HEIGHT_CM: RangeInclusive<f64> = 50.0..=300.0;
const MEAL_CALORIES: RangeInclusive<f64> = 0.0..=50_000.0;
const SLEEP_HOURS: RangeInclusive<f64> = 0.0..=24.0;
const MOTIVATION: RangeInclusive<u8> = 1..=10;
const AGE_YEARS: RangeInclusive<u32> = 13..=120;
const MAX_WEEKLY_RATE_KG: f64 = 1.5;
const MAX_EMAIL_LEN: usize = 255;

fn check_range(
    value: f64,
    range: &RangeInclusive<f64>,
    what: &str,
    unit: &str,
) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{what} must be a number"));
    }
    if !range.contains(&value) {
        return Err(format!(
            "{what} must be between {} and {} {unit}",
            range.start(),
            range.end()
        ));
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err("Email is too long".to_string());
    }
    let shape = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !shape.is_match(email) {
        return Err("Enter a valid email address".to_string());
    }
    Ok(())
}

/// Validate body weight in kilograms
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    check_range(weight_kg, &WEIGHT_KG, "Weight", "kg")
}

/// Validate height in centimeters
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    check_range(height_cm, &HEIGHT_CM, "Height", "cm")
}

/// Validate the calorie value of a single meal
pub fn validate_calories(calories: f64) -> Result<(), String> {
    check_range(calories, &MEAL_CALORIES, "Calories", "kcal")
}

/// Validate birth date: not in the future, age within [`AGE_YEARS`]
pub fn validate_birth_date(born: chrono::NaiveDate) -> Result<(), String> {
    let today = chrono::Utc::now().date_naive();
    if born > today {
        return Err("Birth date lies in the future".to_string());
    }

    let age = crate::models::years_since(born, today);
    if !AGE_YEARS.contains(&age) {
        return Err(format!(
            "Age must be between {} and {} years",
            AGE_YEARS.start(),
            AGE_YEARS.end()
        ));
    }
    Ok(())
}

/// Validate motivation score, a 1-10 self-report
pub fn validate_motivation_score(score: u8) -> Result<(), String> {
    if MOTIVATION.contains(&score) {
        Ok(())
    } else {
        Err(format!(
            "Motivation is rated {} to {}",
            MOTIVATION.start(),
            MOTIVATION.end()
        ))
    }
}

/// Validate weekly exercise frequency in days
pub fn validate_weekly_frequency(days: u8) -> Result<(), String> {
    if days > 7 {
        return Err("There are only 7 days in a week".to_string());
    }
    Ok(())
}

/// Validate sleep duration in hours
pub fn validate_sleep_hours(hours: f64) -> Result<(), String> {
    check_range(hours, &SLEEP_HOURS, "Sleep", "hours")
}

/// Validate a signed weekly weight-change rate (kg/week)
///
/// Sustainable guidance caps both loss and gain at the same magnitude.
pub fn validate_weekly_rate_kg(rate: f64) -> Result<(), String> {
    if !rate.is_finite() {
        return Err("Weekly rate must be a number".to_string());
    }
    if rate.abs() > MAX_WEEKLY_RATE_KG {
        return Err(format!(
            "Weekly rate is capped at {MAX_WEEKLY_RATE_KG} kg in either direction"
        ));
    }
    Ok(())
}
