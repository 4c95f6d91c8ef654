//! NutriTrack Engine Library
//!
//! The stateful core of the NutriTrack application:
//! - Onboarding: the intake wizard state machine and its draft persistence
//! - Daily log: per-day meal, water, and step aggregation
//! - Streaks: consecutive-day activity tracking
//! - Achievements: milestone unlock rules
//! - Recognition: client for the meal-photo recognition service
//! - Storage: persistence gateway traits plus memory and local-file backends
//! - Session: post-onboarding orchestration of the above

pub mod achievements;
pub mod config;
pub mod daily_log;
pub mod error;
pub mod logging;
pub mod onboarding;
pub mod recognition;
pub mod session;
pub mod storage;
pub mod streaks;
