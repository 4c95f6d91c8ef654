//! Daily log aggregation
//!
//! [`DailyLogBook`] keeps one [`DailyLog`] per calendar date in an ordered
//! table. A date's log is created lazily on first touch, seeding its goals
//! from the calculated values and configured defaults current at that
//! moment. Meals are append-only; totals are recomputed on every mutation
//! so `remaining` and the macro currents never go stale.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use nutritrack_shared::{CalculatedValues, DailyLog, MealLog, StreakDay};

use crate::config::DailyDefaults;

/// Ordered per-date log table with create-on-read-if-absent semantics
#[derive(Debug, Clone)]
pub struct DailyLogBook {
    logs: BTreeMap<NaiveDate, DailyLog>,
    values: CalculatedValues,
    defaults: DailyDefaults,
}

impl DailyLogBook {
    /// Empty book; goals for new days seed from `values` and `defaults`.
    pub fn new(values: CalculatedValues, defaults: DailyDefaults) -> Self {
        Self {
            logs: BTreeMap::new(),
            values,
            defaults,
        }
    }

    /// Rehydrate a book from a persisted date-keyed map.
    pub fn from_map(
        logs: BTreeMap<NaiveDate, DailyLog>,
        values: CalculatedValues,
        defaults: DailyDefaults,
    ) -> Self {
        Self {
            logs,
            values,
            defaults,
        }
    }

    /// The underlying date-keyed table, oldest date first.
    pub fn logs(&self) -> &BTreeMap<NaiveDate, DailyLog> {
        &self.logs
    }

    /// Replace the goal seed for days created from now on. Existing days
    /// keep the goals they were created with.
    pub fn set_calculated_values(&mut self, values: CalculatedValues) {
        self.values = values;
    }

    /// The log for `date`, if one was ever created.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyLog> {
        self.logs.get(&date)
    }

    /// The log for `date`, created empty if absent.
    pub fn day(&mut self, date: NaiveDate) -> &DailyLog {
        self.day_mut(date)
    }

    fn day_mut(&mut self, date: NaiveDate) -> &mut DailyLog {
        let values = self.values;
        let water = self.defaults.water_goal_glasses;
        let steps = self.defaults.step_goal;
        self.logs
            .entry(date)
            .or_insert_with(|| DailyLog::for_date(date, &values, water, steps))
    }

    /// Append a meal to its date's log and recompute the day's totals.
    pub fn add_meal(&mut self, meal: MealLog) -> &DailyLog {
        let log = self.day_mut(meal.date);
        log.calories.consumed += meal.calories;
        log.calories.remaining = (log.calories.goal - log.calories.consumed).max(0.0);
        log.macros.protein.current += meal.macros.protein_g;
        log.macros.carbs.current += meal.macros.carbs_g;
        log.macros.fat.current += meal.macros.fat_g;
        log.meals.push(meal);
        log.completed = !log.meals.is_empty();
        log
    }

    /// Set the day's water tally to `glasses` (the UI reports totals).
    /// Water never drives streaks or day completion.
    pub fn log_water(&mut self, date: NaiveDate, glasses: u32) -> &DailyLog {
        let log = self.day_mut(date);
        log.water.glasses = glasses;
        log
    }

    /// Set the day's step count to `count` (pedometers report totals).
    pub fn record_steps(&mut self, date: NaiveDate, count: u32) -> &DailyLog {
        let log = self.day_mut(date);
        log.steps.count = count;
        log
    }

    /// Build the streak-engine snapshot for `date` from its current log.
    pub fn snapshot(&mut self, date: NaiveDate) -> StreakDay {
        let log = self.day_mut(date);
        StreakDay {
            date,
            completed: log.completed,
            meals_logged: log.meals.len() as u32,
            calories_goal: log.calories.goal,
            calories_consumed: log.calories.consumed,
            water_glasses: log.water.glasses,
        }
    }
}
