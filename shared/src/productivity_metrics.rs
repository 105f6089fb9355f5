//! Productivity metrics calculations module
//!
//! Derives streaks, completion rates, category breakdowns, average
//! completion time and the productivity score from a task list.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: Every function reads a task slice and returns a value;
//!    nothing here mutates the store
//! 2. **Full Recompute**: Callers re-run these over the whole list after each
//!    mutation; there is no incremental state
//! 3. **Calendar Days**: Streaks are measured in local calendar days, so the
//!    timezone is an explicit parameter in the `_in` variants

use crate::models::{Category, Statistics, Task};
use crate::types::{AchievementProgress, CategoryBreakdown, StatisticsReport};
use chrono::{Local, NaiveDate, TimeZone};
use std::collections::BTreeSet;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Productivity score weight for the completion ratio
const COMPLETION_WEIGHT: f64 = 50.0;
/// Points per streak day
const STREAK_POINTS_PER_DAY: u32 = 2;
/// Cap on streak points
const STREAK_POINTS_CAP: u32 = 20;
/// Flat bonus once anything is completed
const CONSISTENCY_BONUS: f64 = 30.0;
/// Completed tasks per level
const TASKS_PER_LEVEL: usize = 10;
/// Highest reachable level
const MAX_LEVEL: u8 = 10;

// ============================================================================
// Counting
// ============================================================================

/// Number of completed tasks
pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

/// Rounded percentage, 0 when `total` is 0
fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * part as f64 / total as f64).round() as u32
}

/// Completion rate in percent: `round(100 * completed / total)`, 0 for no tasks
pub fn completion_rate(tasks: &[Task]) -> u32 {
    percent(completed_count(tasks), tasks.len())
}

// ============================================================================
// Streaks
// ============================================================================

/// Distinct calendar dates (in `tz`) on which at least one task was completed
pub fn completion_dates_in<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> BTreeSet<NaiveDate> {
    tasks
        .iter()
        .filter(|t| t.completed)
        .filter_map(|t| t.completed_at)
        .map(|at| at.with_timezone(tz).date_naive())
        .collect()
}

/// Length of the run of consecutive days ending at the most recent date
///
/// Starts at 1 for the latest date and walks backward while each earlier
/// date is exactly one day before the running date.
pub fn streak_from_dates(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut descending = dates.iter().rev();
    let Some(mut running) = descending.next().copied() else {
        return 0;
    };

    let mut streak = 1;
    for &date in descending {
        match running.pred_opt() {
            Some(previous_day) if previous_day == date => {
                streak += 1;
                running = date;
            }
            _ => break,
        }
    }
    streak
}

/// Current streak measured in the given timezone's calendar days
pub fn current_streak_in<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> u32 {
    streak_from_dates(&completion_dates_in(tasks, tz))
}

/// Current streak measured in local calendar days
pub fn current_streak(tasks: &[Task]) -> u32 {
    current_streak_in(tasks, &Local)
}

// ============================================================================
// Completion Time
// ============================================================================

/// Average days from creation to completion, rounded
///
/// Each task contributes `ceil(|completed_at - created_at|)` whole days.
/// Returns 0 when no task has a completion time.
pub fn average_completion_days(tasks: &[Task]) -> u32 {
    let durations: Vec<f64> = tasks
        .iter()
        .filter(|t| t.completed)
        .filter_map(|t| {
            t.completed_at.map(|done| {
                let millis = (done - t.created_at).num_milliseconds().abs() as f64;
                (millis / MILLIS_PER_DAY).ceil()
            })
        })
        .collect();

    if durations.is_empty() {
        return 0;
    }
    (durations.iter().sum::<f64>() / durations.len() as f64).round() as u32
}

// ============================================================================
// Productivity Score
// ============================================================================

/// Productivity score from raw counts
///
/// `50 * completed/total` + `min(2 * streak, 20)` + 30 once anything is
/// completed, rounded and capped at 100. Zero when there are no tasks.
pub fn productivity_score_from(total: usize, completed: usize, streak: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let completion_score = COMPLETION_WEIGHT * completed as f64 / total as f64;
    let streak_score = streak
        .saturating_mul(STREAK_POINTS_PER_DAY)
        .min(STREAK_POINTS_CAP) as f64;
    let consistency_score = if completed > 0 { CONSISTENCY_BONUS } else { 0.0 };

    ((completion_score + streak_score + consistency_score).round() as u32).min(100)
}

/// Productivity score in the given timezone
pub fn productivity_score_in<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> u32 {
    productivity_score_from(
        tasks.len(),
        completed_count(tasks),
        current_streak_in(tasks, tz),
    )
}

/// Productivity score using local calendar days for the streak
pub fn productivity_score(tasks: &[Task]) -> u32 {
    productivity_score_in(tasks, &Local)
}

// ============================================================================
// Categories and Levels
// ============================================================================

/// Totals for tasks in one category
pub fn category_breakdown(tasks: &[Task], category: Category) -> CategoryBreakdown {
    let (total, completed) = tasks
        .iter()
        .filter(|t| t.category == category)
        .fold((0, 0), |(total, completed), t| {
            (total + 1, completed + usize::from(t.completed))
        });

    CategoryBreakdown {
        category,
        total,
        completed,
        rate: percent(completed, total),
    }
}

/// Breakdowns for every category, in display order
pub fn category_breakdowns(tasks: &[Task]) -> Vec<CategoryBreakdown> {
    Category::ALL
        .iter()
        .map(|&c| category_breakdown(tasks, c))
        .collect()
}

/// User level: one level per ten completed tasks, capped at 10
pub fn user_level(completed: usize) -> u8 {
    let level = completed / TASKS_PER_LEVEL + 1;
    level.min(MAX_LEVEL as usize) as u8
}

// ============================================================================
// Snapshots and Reports
// ============================================================================

/// Fresh statistics snapshot
///
/// Every field is recomputed except `longest_streak`, which keeps the
/// larger of the previous record and the current streak.
pub fn compute_statistics_in<Tz: TimeZone>(
    tasks: &[Task],
    previous: &Statistics,
    tz: &Tz,
) -> Statistics {
    let completed = completed_count(tasks);
    let streak = current_streak_in(tasks, tz);

    Statistics {
        total_tasks: tasks.len(),
        completed_tasks: completed,
        current_streak: streak,
        longest_streak: streak.max(previous.longest_streak),
        average_completion_time: average_completion_days(tasks),
        productivity_score: productivity_score_from(tasks.len(), completed, streak),
    }
}

/// Fresh statistics snapshot in local calendar days
pub fn compute_statistics(tasks: &[Task], previous: &Statistics) -> Statistics {
    compute_statistics_in(tasks, previous, &Local)
}

/// Progress toward the fixed achievements
pub fn achievements_in<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> Vec<AchievementProgress> {
    let completed = completed_count(tasks) as u32;
    let streak = current_streak_in(tasks, tz);

    vec![
        AchievementProgress {
            key: "ten_tasks".to_string(),
            label: "Complete 10 tasks".to_string(),
            current: completed.min(10),
            target: 10,
        },
        AchievementProgress {
            key: "week_streak".to_string(),
            label: "Keep a 7-day streak".to_string(),
            current: streak.min(7),
            target: 7,
        },
        AchievementProgress {
            key: "hundred_tasks".to_string(),
            label: "Complete 100 tasks".to_string(),
            current: completed.min(100),
            target: 100,
        },
    ]
}

/// Progress toward the fixed achievements in local calendar days
pub fn achievements(tasks: &[Task]) -> Vec<AchievementProgress> {
    achievements_in(tasks, &Local)
}

/// Calendar date of the earliest created task
pub fn first_task_date_in<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> Option<NaiveDate> {
    tasks
        .iter()
        .map(|t| t.created_at)
        .min()
        .map(|at| at.with_timezone(tz).date_naive())
}

/// Local calendar date of the earliest created task
pub fn first_task_date(tasks: &[Task]) -> Option<NaiveDate> {
    first_task_date_in(tasks, &Local)
}

/// Full statistics page report built on top of a snapshot
pub fn statistics_report_in<Tz: TimeZone>(
    tasks: &[Task],
    snapshot: Statistics,
    tz: &Tz,
) -> StatisticsReport {
    StatisticsReport {
        snapshot,
        active_tasks: tasks.len() - snapshot.completed_tasks.min(tasks.len()),
        completion_rate: completion_rate(tasks),
        level: user_level(completed_count(tasks)),
        categories: category_breakdowns(tasks),
        achievements: achievements_in(tasks, tz),
        first_task_date: first_task_date_in(tasks, tz),
    }
}

/// Full statistics page report in local calendar days
pub fn statistics_report(tasks: &[Task], snapshot: Statistics) -> StatisticsReport {
    statistics_report_in(tasks, snapshot, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{DateTime, Duration, Utc};
    use proptest::prelude::*;
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn task(id: i64, created: DateTime<Utc>, completed_at: Option<DateTime<Utc>>) -> Task {
        Task {
            id,
            title: format!("Task {}", id),
            description: None,
            deadline: None,
            priority: Priority::Medium,
            category: Category::Study,
            completed: completed_at.is_some(),
            created_at: created,
            completed_at,
        }
    }

    fn completed_on(id: i64, day: DateTime<Utc>) -> Task {
        task(id, day - Duration::hours(2), Some(day))
    }

    fn open(id: i64) -> Task {
        task(id, at(2024, 5, 1, 8), None)
    }

    // =========================================================================
    // Completion Rate Tests
    // =========================================================================

    #[test]
    fn test_completion_rate_empty_is_zero() {
        assert_eq!(completion_rate(&[]), 0);
    }

    #[test]
    fn test_completion_rate_rounds() {
        let tasks = vec![completed_on(1, at(2024, 5, 1, 10)), open(2), open(3)];
        assert_eq!(completion_rate(&tasks), 33);

        let tasks = vec![
            completed_on(1, at(2024, 5, 1, 10)),
            completed_on(2, at(2024, 5, 1, 11)),
            open(3),
        ];
        assert_eq!(completion_rate(&tasks), 67);
    }

    // =========================================================================
    // Streak Tests
    // =========================================================================

    #[test]
    fn test_streak_empty_and_no_completions() {
        assert_eq!(current_streak_in(&[], &Utc), 0);
        assert_eq!(current_streak_in(&[open(1), open(2)], &Utc), 0);
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let tasks = vec![
            completed_on(1, at(2024, 5, 1, 10)),
            completed_on(2, at(2024, 5, 2, 10)),
            completed_on(3, at(2024, 5, 3, 10)),
        ];
        assert_eq!(current_streak_in(&tasks, &Utc), 3);
    }

    #[test]
    fn test_streak_gap_breaks_chain() {
        // Day 1, 2 and 4: the gap on day 3 stops the walk at day 4
        let tasks = vec![
            completed_on(1, at(2024, 5, 1, 10)),
            completed_on(2, at(2024, 5, 2, 10)),
            completed_on(3, at(2024, 5, 4, 10)),
        ];
        assert_eq!(current_streak_in(&tasks, &Utc), 1);

        // Day 1, 3 and 4: the chain from day 4 back to day 3 counts 2
        let tasks = vec![
            completed_on(1, at(2024, 5, 1, 10)),
            completed_on(2, at(2024, 5, 3, 10)),
            completed_on(3, at(2024, 5, 4, 10)),
        ];
        assert_eq!(current_streak_in(&tasks, &Utc), 2);
    }

    #[test]
    fn test_streak_same_day_counts_once() {
        let tasks = vec![
            completed_on(1, at(2024, 5, 2, 8)),
            completed_on(2, at(2024, 5, 2, 12)),
            completed_on(3, at(2024, 5, 2, 20)),
            completed_on(4, at(2024, 5, 1, 9)),
        ];
        assert_eq!(current_streak_in(&tasks, &Utc), 2);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        let tasks = vec![
            completed_on(1, at(2024, 2, 28, 10)),
            completed_on(2, at(2024, 2, 29, 10)),
            completed_on(3, at(2024, 3, 1, 10)),
        ];
        assert_eq!(current_streak_in(&tasks, &Utc), 3);
    }

    #[test]
    fn test_streak_uses_timezone_calendar_day() {
        // 23:30 UTC on May 1 is already May 2 at UTC+2
        let tasks = vec![
            completed_on(1, Utc.with_ymd_and_hms(2024, 5, 1, 23, 30, 0).unwrap()),
            completed_on(2, at(2024, 5, 3, 10)),
        ];
        let plus_two = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(current_streak_in(&tasks, &Utc), 1);
        assert_eq!(current_streak_in(&tasks, &plus_two), 2);
    }

    #[test]
    fn test_streak_ignores_reopened_tasks() {
        let mut reopened = completed_on(1, at(2024, 5, 1, 10));
        reopened.set_completed(false, at(2024, 5, 1, 11));
        let tasks = vec![reopened, completed_on(2, at(2024, 5, 2, 10))];
        assert_eq!(current_streak_in(&tasks, &Utc), 1);
    }

    // =========================================================================
    // Average Completion Time Tests
    // =========================================================================

    #[test]
    fn test_average_completion_days() {
        assert_eq!(average_completion_days(&[]), 0);
        assert_eq!(average_completion_days(&[open(1)]), 0);

        // 2 hours -> 1 day, 49 hours -> 3 days, mean 2
        let tasks = vec![
            task(1, at(2024, 5, 1, 8), Some(at(2024, 5, 1, 10))),
            task(2, at(2024, 5, 1, 8), Some(at(2024, 5, 3, 9))),
        ];
        assert_eq!(average_completion_days(&tasks), 2);
    }

    #[test]
    fn test_average_completion_same_instant_is_zero_days() {
        let tasks = vec![task(1, at(2024, 5, 1, 8), Some(at(2024, 5, 1, 8)))];
        assert_eq!(average_completion_days(&tasks), 0);
    }

    // =========================================================================
    // Productivity Score Tests
    // =========================================================================

    #[rstest]
    #[case(0, 0, 0, 0)]
    #[case(4, 0, 0, 0)]
    #[case(1, 1, 1, 82)]
    #[case(4, 2, 3, 61)]
    #[case(10, 10, 15, 100)]
    fn test_productivity_score_from(
        #[case] total: usize,
        #[case] completed: usize,
        #[case] streak: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(productivity_score_from(total, completed, streak), expected);
    }

    // =========================================================================
    // Category and Level Tests
    // =========================================================================

    #[test]
    fn test_category_breakdown() {
        let mut work_done = completed_on(1, at(2024, 5, 1, 10));
        work_done.category = Category::Work;
        let mut work_open = open(2);
        work_open.category = Category::Work;
        let tasks = vec![work_done, work_open, open(3)];

        let work = category_breakdown(&tasks, Category::Work);
        assert_eq!((work.total, work.completed, work.rate), (2, 1, 50));

        let other = category_breakdown(&tasks, Category::Other);
        assert_eq!((other.total, other.completed, other.rate), (0, 0, 0));

        let all = category_breakdowns(&tasks);
        assert_eq!(all.len(), 4);
        assert_eq!(all[1].category, Category::Study);
        assert_eq!(all[1].total, 1);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(9, 1)]
    #[case(10, 2)]
    #[case(45, 5)]
    #[case(95, 10)]
    #[case(1000, 10)]
    fn test_user_level(#[case] completed: usize, #[case] level: u8) {
        assert_eq!(user_level(completed), level);
    }

    // =========================================================================
    // Snapshot Tests
    // =========================================================================

    #[test]
    fn test_compute_statistics_keeps_longest_streak() {
        let previous = Statistics {
            longest_streak: 5,
            ..Default::default()
        };
        let tasks = vec![completed_on(1, at(2024, 5, 1, 10)), open(2)];

        let stats = compute_statistics_in(&tasks, &previous, &Utc);
        assert_eq!(stats.total_tasks, 2);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 5);
        assert_eq!(stats.productivity_score, 57);
    }

    #[test]
    fn test_compute_statistics_raises_longest_streak() {
        let tasks = vec![
            completed_on(1, at(2024, 5, 1, 10)),
            completed_on(2, at(2024, 5, 2, 10)),
        ];
        let stats = compute_statistics_in(&tasks, &Statistics::default(), &Utc);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn test_achievements_cap_progress() {
        let tasks: Vec<Task> = (0..12)
            .map(|i| completed_on(i, at(2024, 5, 1, 10)))
            .collect();
        let achievements = achievements_in(&tasks, &Utc);

        assert_eq!(achievements[0].current, 10);
        assert!(achievements[0].is_unlocked());
        assert_eq!(achievements[1].current, 1);
        assert_eq!(achievements[2].current, 12);
        assert!(!achievements[2].is_unlocked());
    }

    #[test]
    fn test_statistics_report() {
        let tasks = vec![
            task(1, at(2024, 4, 2, 10), Some(at(2024, 4, 3, 10))),
            task(2, at(2024, 3, 15, 10), None),
        ];
        let snapshot = compute_statistics_in(&tasks, &Statistics::default(), &Utc);
        let report = statistics_report_in(&tasks, snapshot, &Utc);

        assert_eq!(report.active_tasks, 1);
        assert_eq!(report.completion_rate, 50);
        assert_eq!(report.level, 1);
        assert_eq!(report.first_task_date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(report.categories.len(), 4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: completion rate stays within 0..=100
        #[test]
        fn prop_completion_rate_in_range(done in 0usize..50, open_count in 0usize..50) {
            let mut tasks: Vec<Task> = (0..done)
                .map(|i| completed_on(i as i64, at(2024, 5, 1, 10)))
                .collect();
            tasks.extend((0..open_count).map(|i| open((done + i) as i64)));
            let rate = completion_rate(&tasks);
            prop_assert!(rate <= 100);
            if tasks.is_empty() {
                prop_assert_eq!(rate, 0);
            }
        }

        /// Property: n consecutive days ending on the last day give a streak of n
        #[test]
        fn prop_consecutive_days_streak(n in 1i64..60, per_day in 1i64..4) {
            let end = at(2024, 6, 30, 12);
            let tasks: Vec<Task> = (0..n)
                .flat_map(|d| (0..per_day).map(move |k| (d, k)))
                .map(|(d, k)| completed_on(d * 10 + k, end - Duration::days(d)))
                .collect();
            prop_assert_eq!(current_streak_in(&tasks, &Utc), n as u32);
        }

        /// Property: score never decreases as completed count grows
        #[test]
        fn prop_score_monotonic_in_completed(total in 1usize..200, streak in 0u32..30) {
            let mut last = 0;
            for completed in 0..=total {
                let score = productivity_score_from(total, completed, streak);
                prop_assert!(score >= last);
                prop_assert!(score <= 100);
                last = score;
            }
        }

        /// Property: level is always within 1..=10
        #[test]
        fn prop_level_in_range(completed in 0usize..10_000) {
            let level = user_level(completed);
            prop_assert!((1..=10).contains(&level));
        }
    }
}
