//! Integration tests for the meal logging pipeline
//!
//! Each meal runs the full chain: daily aggregation, streak advance,
//! milestone evaluation, notification fan-out and document persistence.

mod common;

use std::sync::Arc;

use nutritrack_engine::config::DailyDefaults;
use nutritrack_engine::session::UserSession;
use nutritrack_engine::storage::{MemoryDocumentStore, NotificationKind, UserDocumentStore};
use nutritrack_shared::MacroGrams;

use common::{date, meal, simple_meal};

async fn session_with(store: &Arc<MemoryDocumentStore>) -> UserSession {
    let documents: Arc<dyn UserDocumentStore> = Arc::clone(store) as Arc<dyn UserDocumentStore>;
    UserSession::load("user-1", documents, DailyDefaults::default()).await
}

#[tokio::test]
async fn test_week_of_logging_builds_streak_and_unlocks_badges() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut session = session_with(&store).await;

    let mut unlocked = Vec::new();
    for day in 1..=7 {
        unlocked.extend(session.log_meal(simple_meal(date(day), 500.0)).await);
    }

    assert_eq!(session.streaks().current_streak, 7);
    assert_eq!(session.streaks().best_streak, 7);
    // a full unbroken week touches every weekday slot
    assert!(session.streaks().week_days.iter().all(|&active| active));

    let ids: Vec<_> = unlocked.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["streak_3", "streak_7"]);
    assert_eq!(session.achievements().len(), 2);
    assert_eq!(session.notifications().len(), 2);
    assert!(session
        .notifications()
        .iter()
        .all(|n| n.kind == NotificationKind::Achievement));
    assert_eq!(session.analytics().meals_logged, 7);
    assert_eq!(session.analytics().achievements_unlocked, 2);
}

#[tokio::test]
async fn test_day_totals_track_meals_against_goal() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut session = session_with(&store).await;

    session
        .log_meal(meal(
            date(1),
            "oatmeal",
            300.0,
            MacroGrams {
                protein_g: 10.0,
                carbs_g: 54.0,
                fat_g: 5.0,
            },
        ))
        .await;
    session
        .log_meal(meal(
            date(1),
            "chicken wrap",
            450.0,
            MacroGrams {
                protein_g: 32.0,
                carbs_g: 40.0,
                fat_g: 16.0,
            },
        ))
        .await;
    session
        .log_meal(meal(date(1), "yogurt", 200.0, MacroGrams::default()))
        .await;

    let log = session.day(date(1));
    assert_eq!(log.calories.consumed, 950.0);
    assert_eq!(log.meals.len(), 3);
    assert_eq!(log.macros.protein.current, 42.0);
    assert!(log.completed);
}

#[tokio::test]
async fn test_missed_day_resets_current_but_keeps_best() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut session = session_with(&store).await;

    for day in 1..=3 {
        session.log_meal(simple_meal(date(day), 500.0)).await;
    }
    assert_eq!(session.achievements().len(), 1);

    // skip day 4
    let unlocked = session.log_meal(simple_meal(date(5), 500.0)).await;
    assert!(unlocked.is_empty());
    assert_eq!(session.streaks().current_streak, 1);
    assert_eq!(session.streaks().best_streak, 3);

    // climb back to 3; the badge was already earned, so nothing new fires
    session.log_meal(simple_meal(date(6), 500.0)).await;
    let unlocked = session.log_meal(simple_meal(date(7), 500.0)).await;
    assert!(unlocked.is_empty());
    assert_eq!(session.streaks().current_streak, 3);
    assert_eq!(session.achievements().len(), 1);
}

#[tokio::test]
async fn test_water_and_steps_do_not_extend_streak() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut session = session_with(&store).await;

    session.log_meal(simple_meal(date(1), 500.0)).await;
    session.log_water(date(2), 6).await;
    session.record_steps(date(2), 9_000).await;

    assert_eq!(session.streaks().current_streak, 1);
    assert_eq!(session.streaks().last_active_date, Some(date(1)));

    // the water-only day left a gap, so the next meal restarts the run
    session.log_meal(simple_meal(date(3), 500.0)).await;
    assert_eq!(session.streaks().current_streak, 1);
}

#[tokio::test]
async fn test_streak_continues_across_sessions() {
    let store = Arc::new(MemoryDocumentStore::new());

    {
        let mut session = session_with(&store).await;
        session.log_meal(simple_meal(date(1), 400.0)).await;
        session.log_meal(simple_meal(date(2), 450.0)).await;
    }

    let mut session = session_with(&store).await;
    let unlocked = session.log_meal(simple_meal(date(3), 500.0)).await;

    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0].id, "streak_3");
    assert_eq!(session.streaks().current_streak, 3);
}

#[tokio::test]
async fn test_document_carries_the_whole_flow() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut session = session_with(&store).await;

    for day in 1..=3 {
        session.log_meal(simple_meal(date(day), 600.0)).await;
    }
    session.log_water(date(3), 7).await;
    session.record_steps(date(3), 11_000).await;

    let stored = store.snapshot("user-1").await.unwrap();
    assert_eq!(stored.daily_logs.len(), 3);
    assert_eq!(stored.daily_logs[&date(3)].water.glasses, 7);
    assert_eq!(stored.daily_logs[&date(3)].steps.count, 11_000);
    assert_eq!(stored.streaks.current_streak, 3);
    assert_eq!(stored.achievements.len(), 1);
    assert_eq!(stored.notifications.len(), 1);
    assert_eq!(stored.analytics.meals_logged, 3);
    assert_eq!(stored.analytics.water_logs, 1);
    assert_eq!(stored.analytics.step_records, 1);
    assert!(stored.metadata.last_login.is_some());
}
