//! Streak milestone achievements
//!
//! A fixed table maps streak lengths to unlockable achievements. The check
//! fires on exact equality with the milestone length, not `>=`: the streak
//! counter only moves in +1 steps, so each milestone is crossed exactly
//! once per run, and a counter that resets and climbs back can earn the
//! badge again only if the earlier unlock was never recorded. Ids are
//! derived from the milestone (`streak_7`), so the persisted set stays
//! structurally unique.

use chrono::{DateTime, Utc};

use nutritrack_shared::{Achievement, AchievementCategory, AchievementRarity};

struct StreakMilestone {
    days: u32,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
}

const MILESTONES: [StreakMilestone; 4] = [
    StreakMilestone {
        days: 3,
        title: "Getting Started",
        description: "Logged meals 3 days in a row",
        icon: "flame",
    },
    StreakMilestone {
        days: 7,
        title: "Week Warrior",
        description: "A full week of daily logging",
        icon: "calendar",
    },
    StreakMilestone {
        days: 14,
        title: "Fortnight Focus",
        description: "Two weeks without missing a day",
        icon: "trophy",
    },
    StreakMilestone {
        days: 30,
        title: "Monthly Master",
        description: "Thirty consecutive days of logging",
        icon: "crown",
    },
];

fn rarity_for(days: u32) -> AchievementRarity {
    if days >= 14 {
        AchievementRarity::Rare
    } else {
        AchievementRarity::Common
    }
}

/// Achievements newly earned by `current_streak`, excluding any already in
/// `existing`. The caller appends the result to the persisted set.
pub fn check_milestones(
    current_streak: u32,
    existing: &[Achievement],
    unlocked_at: DateTime<Utc>,
) -> Vec<Achievement> {
    MILESTONES
        .iter()
        .filter(|milestone| milestone.days == current_streak)
        .map(|milestone| Achievement {
            id: format!("streak_{}", milestone.days),
            title: milestone.title.to_string(),
            description: milestone.description.to_string(),
            icon: milestone.icon.to_string(),
            unlocked_at,
            category: AchievementCategory::Streak,
            rarity: rarity_for(milestone.days),
        })
        .filter(|candidate| !existing.iter().any(|a| a.id == candidate.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_week_milestone_unlocks_once() {
        let first = check_milestones(7, &[], now());
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "streak_7");
        assert_eq!(first[0].title, "Week Warrior");
        assert_eq!(first[0].category, AchievementCategory::Streak);

        let second = check_milestones(7, &first, now());
        assert!(second.is_empty());
    }

    #[rstest]
    #[case(0, None)]
    #[case(2, None)]
    #[case(3, Some("streak_3"))]
    #[case(4, None)]
    #[case(7, Some("streak_7"))]
    #[case(13, None)]
    #[case(14, Some("streak_14"))]
    #[case(15, None)]
    #[case(30, Some("streak_30"))]
    #[case(31, None)]
    fn test_milestones_match_exact_lengths_only(
        #[case] streak: u32,
        #[case] expected: Option<&str>,
    ) {
        let unlocked = check_milestones(streak, &[], now());
        match expected {
            Some(id) => {
                assert_eq!(unlocked.len(), 1);
                assert_eq!(unlocked[0].id, id);
            }
            None => assert!(unlocked.is_empty()),
        }
    }

    #[rstest]
    #[case(3, AchievementRarity::Common)]
    #[case(7, AchievementRarity::Common)]
    #[case(14, AchievementRarity::Rare)]
    #[case(30, AchievementRarity::Rare)]
    fn test_two_weeks_and_longer_are_rare(
        #[case] streak: u32,
        #[case] expected: AchievementRarity,
    ) {
        let unlocked = check_milestones(streak, &[], now());
        assert_eq!(unlocked[0].rarity, expected);
    }

    #[test]
    fn test_unrelated_existing_ids_do_not_block_unlock() {
        let existing = check_milestones(3, &[], now());
        let unlocked = check_milestones(7, &existing, now());

        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].id, "streak_7");
    }

    #[test]
    fn test_unlock_timestamp_is_passed_through() {
        let at = DateTime::parse_from_rfc3339("2024-03-07T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let unlocked = check_milestones(3, &[], at);

        assert_eq!(unlocked[0].unlocked_at, at);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: exact matching means a single check never emits more
        /// than one achievement, and re-checking against the grown set
        /// emits nothing
        #[test]
        fn prop_at_most_one_unlock_per_check(streak in 0u32..200) {
            let unlocked = check_milestones(streak, &[], now());
            prop_assert!(unlocked.len() <= 1);

            let again = check_milestones(streak, &unlocked, now());
            prop_assert!(again.is_empty());
        }
    }
}
