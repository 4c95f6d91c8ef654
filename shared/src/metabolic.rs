//! Metabolic budget calculations module
//!
//! Turns profile + activity + goal data into BMR, TDEE, a daily calorie
//! target, and a macro split.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: every calculation is a pure function of its inputs
//! 2. **Never Fails**: missing inputs yield a zeroed result, not an error,
//!    so callers can render before onboarding completes
//! 3. **Evidence-Based**: Harris-Benedict (revised) with standard activity
//!    multipliers

use serde::{Deserialize, Serialize};

use crate::models::{ActivityProfile, GoalSettings, Profile};

/// Floor for the daily calorie target under a weight-loss goal.
/// Prevents unsafe deficits regardless of how aggressive the TDEE math gets.
pub const MIN_DAILY_CALORIES: f64 = 1200.0;

/// Deficit applied for weight loss (kcal/day).
pub const WEIGHT_LOSS_DEFICIT: f64 = 500.0;

/// Surplus applied for muscle gain (kcal/day).
pub const MUSCLE_GAIN_SURPLUS: f64 = 300.0;

// ============================================================================
// Calculator Input Enums
// ============================================================================

/// Gender for metabolic calculations
///
/// `Other` uses the female coefficient set, the more conservative of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Self-reported activity level, used to scale BMR into TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise or physical job
    ExtremelyActive,
}

impl ActivityLevel {
    /// TDEE scaling factor for this activity level
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// Short label shown next to each level in the picker
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtremelyActive => "Very hard exercise or physical job",
        }
    }

    /// All levels in ascending order of energy expenditure
    pub fn all() -> [ActivityLevel; 5] {
        [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtremelyActive,
        ]
    }
}

/// Primary goal driving the calorie-target adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryGoal {
    WeightLoss,
    Maintenance,
    MuscleGain,
    HealthyEating,
}

impl PrimaryGoal {
    /// Adjust a TDEE into a daily calorie target for this goal
    pub fn adjust(&self, tdee: f64) -> f64 {
        match self {
            PrimaryGoal::WeightLoss => (tdee - WEIGHT_LOSS_DEFICIT).max(MIN_DAILY_CALORIES),
            PrimaryGoal::MuscleGain => tdee + MUSCLE_GAIN_SURPLUS,
            PrimaryGoal::Maintenance | PrimaryGoal::HealthyEating => tdee,
        }
    }
}

// ============================================================================
// Derived Output
// ============================================================================

/// Macro targets in grams, derived from the daily calorie target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

/// Derived energy budget: BMR, TDEE, daily calorie target, macro split.
///
/// Pure derived data: always recomputed from profile + activity + goals,
/// never persisted as a source of truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatedValues {
    /// Basal Metabolic Rate (kcal/day), unrounded
    pub bmr: f64,
    /// Total Daily Energy Expenditure (kcal/day), unrounded
    pub tdee: f64,
    /// Goal-adjusted daily calorie target, rounded to the nearest kcal
    pub daily_calories: u32,
    /// Macro split of the daily target
    pub macros: MacroTargets,
}

impl CalculatedValues {
    /// False while required profile inputs are still missing.
    ///
    /// An all-zero result means "not yet computable", not "zero budget".
    pub fn is_available(&self) -> bool {
        self.daily_calories > 0
    }
}

// ============================================================================
// Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using the revised Harris-Benedict equation
///
/// Men: BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Women: BMR = 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
pub fn bmr_harris_benedict(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    match gender {
        Gender::Male => {
            88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * f64::from(age_years)
        }
        Gender::Female | Gender::Other => {
            447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * f64::from(age_years)
        }
    }
}

/// Split a daily calorie target into macro grams
///
/// Protein 30% at 4 kcal/g, carbs 40% at 4 kcal/g, fat 30% at 9 kcal/g,
/// each rounded to the nearest gram.
pub fn macro_targets_for(daily_calories: f64) -> MacroTargets {
    MacroTargets {
        protein_g: (daily_calories * 0.30 / 4.0).round() as u32,
        carbs_g: (daily_calories * 0.40 / 4.0).round() as u32,
        fat_g: (daily_calories * 0.30 / 9.0).round() as u32,
    }
}

/// Compute the full energy budget from the wizard sections.
///
/// Missing age, weight, height, or gender yields `CalculatedValues::default()`
/// (all zero). An absent activity level falls back to the sedentary
/// multiplier; an absent primary goal leaves the TDEE unadjusted.
pub fn compute_calculated_values(
    profile: &Profile,
    activity: &ActivityProfile,
    goals: &GoalSettings,
) -> CalculatedValues {
    let (age, weight_kg, height_cm, gender) =
        match (profile.age, profile.weight_kg, profile.height_cm, profile.gender) {
            (Some(a), Some(w), Some(h), Some(g)) => (a, w, h, g),
            _ => return CalculatedValues::default(),
        };

    let bmr = bmr_harris_benedict(weight_kg, height_cm, age, gender);
    let level = activity.activity_level.unwrap_or(ActivityLevel::Sedentary);
    let tdee = bmr * level.multiplier();

    let target = match goals.primary_goal {
        Some(goal) => goal.adjust(tdee),
        None => tdee,
    };

    CalculatedValues {
        bmr,
        tdee,
        daily_calories: target.round() as u32,
        macros: macro_targets_for(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn profile(age: u32, weight: f64, height: f64, gender: Gender) -> Profile {
        Profile {
            age: Some(age),
            weight_kg: Some(weight),
            height_cm: Some(height),
            gender: Some(gender),
            ..Profile::default()
        }
    }

    fn activity(level: ActivityLevel) -> ActivityProfile {
        ActivityProfile {
            activity_level: Some(level),
            ..ActivityProfile::default()
        }
    }

    fn goals(goal: PrimaryGoal) -> GoalSettings {
        GoalSettings {
            primary_goal: Some(goal),
            ..GoalSettings::default()
        }
    }

    // =========================================================================
    // BMR Tests
    // =========================================================================

    #[test]
    fn test_bmr_male_exact_arithmetic() {
        // 30yo male, 78kg, 178cm
        let bmr = bmr_harris_benedict(78.0, 178.0, 30, Gender::Male);
        let expected = 88.362 + 13.397 * 78.0 + 4.799 * 178.0 - 5.677 * 30.0;
        assert!((bmr - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_female_exact_arithmetic() {
        let bmr = bmr_harris_benedict(60.0, 165.0, 28, Gender::Female);
        let expected = 447.593 + 9.247 * 60.0 + 3.098 * 165.0 - 4.330 * 28.0;
        assert!((bmr - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_other_uses_female_coefficients() {
        let other = bmr_harris_benedict(70.0, 170.0, 40, Gender::Other);
        let female = bmr_harris_benedict(70.0, 170.0, 40, Gender::Female);
        assert_eq!(other, female);
    }

    // =========================================================================
    // TDEE Tests
    // =========================================================================

    #[rstest]
    #[case(ActivityLevel::Sedentary, 1.2)]
    #[case(ActivityLevel::LightlyActive, 1.375)]
    #[case(ActivityLevel::ModeratelyActive, 1.55)]
    #[case(ActivityLevel::VeryActive, 1.725)]
    #[case(ActivityLevel::ExtremelyActive, 1.9)]
    fn test_activity_multiplier_table(#[case] level: ActivityLevel, #[case] expected: f64) {
        assert_eq!(level.multiplier(), expected);
    }

    #[test]
    fn test_tdee_strictly_increases_with_activity() {
        let p = profile(30, 78.0, 178.0, Gender::Male);
        let g = GoalSettings::default();
        let mut last = 0.0;
        for level in ActivityLevel::all() {
            let result = compute_calculated_values(&p, &activity(level), &g);
            assert!(
                result.tdee > last,
                "TDEE for {:?} ({}) should exceed previous ({})",
                level,
                result.tdee,
                last
            );
            last = result.tdee;
        }
    }

    #[test]
    fn test_missing_activity_defaults_to_sedentary() {
        let p = profile(30, 78.0, 178.0, Gender::Male);
        let result = compute_calculated_values(&p, &ActivityProfile::default(), &GoalSettings::default());
        assert!((result.tdee - result.bmr * 1.2).abs() < 1e-9);
    }

    // =========================================================================
    // Daily Target Tests
    // =========================================================================

    #[test]
    fn test_weight_loss_deficit_applied() {
        let p = profile(30, 78.0, 178.0, Gender::Male);
        let result = compute_calculated_values(
            &p,
            &activity(ActivityLevel::ModeratelyActive),
            &goals(PrimaryGoal::WeightLoss),
        );
        let expected = (result.tdee - 500.0).round() as u32;
        assert_eq!(result.daily_calories, expected);
    }

    #[test]
    fn test_weight_loss_floor_is_exactly_1200() {
        // Small, older, sedentary profile: TDEE - 500 lands well under 1200
        let p = profile(80, 40.0, 150.0, Gender::Female);
        let result = compute_calculated_values(
            &p,
            &activity(ActivityLevel::Sedentary),
            &goals(PrimaryGoal::WeightLoss),
        );
        assert!(result.tdee - 500.0 < 1200.0, "fixture must land under the floor");
        assert_eq!(result.daily_calories, 1200);
    }

    #[test]
    fn test_muscle_gain_surplus_applied() {
        let p = profile(25, 70.0, 180.0, Gender::Male);
        let result = compute_calculated_values(
            &p,
            &activity(ActivityLevel::VeryActive),
            &goals(PrimaryGoal::MuscleGain),
        );
        let expected = (result.tdee + 300.0).round() as u32;
        assert_eq!(result.daily_calories, expected);
    }

    #[rstest]
    #[case(PrimaryGoal::Maintenance)]
    #[case(PrimaryGoal::HealthyEating)]
    fn test_neutral_goals_pass_tdee_through(#[case] goal: PrimaryGoal) {
        let p = profile(30, 78.0, 178.0, Gender::Male);
        let result =
            compute_calculated_values(&p, &activity(ActivityLevel::LightlyActive), &goals(goal));
        assert_eq!(result.daily_calories, result.tdee.round() as u32);
    }

    // =========================================================================
    // Macro Split Tests
    // =========================================================================

    #[test]
    fn test_macro_split_of_2000_kcal() {
        let macros = macro_targets_for(2000.0);
        assert_eq!(macros.protein_g, 150); // 30% / 4
        assert_eq!(macros.carbs_g, 200); // 40% / 4
        assert_eq!(macros.fat_g, 67); // 30% / 9, rounded
    }

    // =========================================================================
    // Missing-Input Tests
    // =========================================================================

    #[test]
    fn test_empty_profile_yields_zeroed_result() {
        let result = compute_calculated_values(
            &Profile::default(),
            &ActivityProfile::default(),
            &GoalSettings::default(),
        );
        assert_eq!(result, CalculatedValues::default());
        assert!(!result.is_available());
    }

    #[test]
    fn test_any_missing_required_field_yields_zeroed_result() {
        let full = profile(30, 78.0, 178.0, Gender::Male);
        let variants = [
            Profile { age: None, ..full.clone() },
            Profile { weight_kg: None, ..full.clone() },
            Profile { height_cm: None, ..full.clone() },
            Profile { gender: None, ..full.clone() },
        ];
        for p in variants {
            let result = compute_calculated_values(
                &p,
                &ActivityProfile::default(),
                &GoalSettings::default(),
            );
            assert!(!result.is_available(), "partial profile {:?} must not compute", p);
        }
    }

    #[test]
    fn test_complete_profile_is_available() {
        let p = profile(30, 78.0, 178.0, Gender::Male);
        let result = compute_calculated_values(
            &p,
            &ActivityProfile::default(),
            &GoalSettings::default(),
        );
        assert!(result.is_available());
    }

    // =========================================================================
    // Properties
    // =========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMR stays positive across realistic human inputs
        #[test]
        fn prop_bmr_stays_positive(
            weight in 30.0f64..250.0,
            height in 120.0f64..220.0,
            age in 13u32..100
        ) {
            prop_assert!(bmr_harris_benedict(weight, height, age, Gender::Male) > 0.0);
            prop_assert!(bmr_harris_benedict(weight, height, age, Gender::Female) > 0.0);
        }

        /// Property: male BMR comes out above female BMR for common adult
        /// builds. The revised coefficients cross over for very light,
        /// short, older profiles, so the window stays above that corner.
        #[test]
        fn prop_male_exceeds_female_bmr(
            weight in 50.0f64..150.0,
            height in 155.0f64..210.0,
            age in 18u32..80
        ) {
            let male = bmr_harris_benedict(weight, height, age, Gender::Male);
            let female = bmr_harris_benedict(weight, height, age, Gender::Female);
            prop_assert!(male > female);
        }

        /// Property: TDEE is never below BMR (all multipliers >= 1.2)
        #[test]
        fn prop_tdee_at_least_bmr(
            weight in 40.0f64..150.0,
            height in 140.0f64..210.0,
            age in 18u32..80,
            level_idx in 0usize..5
        ) {
            let p = profile(age, weight, height, Gender::Male);
            let level = ActivityLevel::all()[level_idx];
            let result = compute_calculated_values(&p, &activity(level), &GoalSettings::default());
            prop_assert!(result.tdee >= result.bmr);
        }

        /// Property: a weight-loss target never drops below the 1200 floor
        #[test]
        fn prop_weight_loss_floor_holds(
            weight in 30.0f64..250.0,
            height in 120.0f64..220.0,
            age in 13u32..100,
            level_idx in 0usize..5
        ) {
            let p = profile(age, weight, height, Gender::Female);
            let level = ActivityLevel::all()[level_idx];
            let result = compute_calculated_values(&p, &activity(level), &goals(PrimaryGoal::WeightLoss));
            prop_assert!(result.daily_calories >= 1200);
        }

        /// Property: macro grams re-sum to the calorie target within
        /// per-macro rounding error (0.5g at 4/4/9 kcal/g = 8.5 kcal)
        #[test]
        fn prop_macro_split_resums_to_target(calories in 1200.0f64..6000.0) {
            let macros = macro_targets_for(calories);
            let resummed = f64::from(macros.protein_g) * 4.0
                + f64::from(macros.carbs_g) * 4.0
                + f64::from(macros.fat_g) * 9.0;
            prop_assert!((resummed - calories).abs() <= 8.5);
        }
    }
}
