//! FocusUp WASM Module
//!
//! Browser bindings for the task statistics so a web front end computes
//! the same numbers as the command-line app. Tasks cross the boundary as
//! the JSON array stored under `focusup_tasks`.
//!
//! Offsets are minutes east of UTC, i.e. `-new Date().getTimezoneOffset()`.

use chrono::{FixedOffset, NaiveDate, Utc};
use focusup_shared::{
    compute_statistics_in, current_streak_in, statistics_report_in, AppError, AppResult,
    ImportedTask, Statistics, Task, TaskFilter, TaskStore,
};
use wasm_bindgen::prelude::*;

fn offset(minutes: i32) -> AppResult<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| AppError::Validation(format!("Invalid UTC offset: {} minutes", minutes)))
}

/// Parse a stored task list with the import rules, so fractional or
/// duplicate ids are re-keyed rather than rejected
fn parse_tasks(tasks_json: &str) -> AppResult<Vec<Task>> {
    let imported: Vec<ImportedTask> = serde_json::from_str(tasks_json)?;
    let mut store = TaskStore::new();
    store.replace_all(imported, Utc::now());
    Ok(store.into_tasks())
}

/// Empty input means no previous snapshot
fn parse_previous(previous_json: &str) -> AppResult<Statistics> {
    if previous_json.trim().is_empty() {
        return Ok(Statistics::default());
    }
    Ok(serde_json::from_str(previous_json)?)
}

fn to_js(err: AppError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Plain implementations
// ============================================================================

fn statistics(tasks_json: &str, previous_json: &str, tz_offset_minutes: i32) -> AppResult<String> {
    let tasks = parse_tasks(tasks_json)?;
    let previous = parse_previous(previous_json)?;
    let snapshot = compute_statistics_in(&tasks, &previous, &offset(tz_offset_minutes)?);
    Ok(serde_json::to_string(&snapshot)?)
}

fn report(tasks_json: &str, previous_json: &str, tz_offset_minutes: i32) -> AppResult<String> {
    let tasks = parse_tasks(tasks_json)?;
    let previous = parse_previous(previous_json)?;
    let tz = offset(tz_offset_minutes)?;
    let snapshot = compute_statistics_in(&tasks, &previous, &tz);
    Ok(serde_json::to_string(&statistics_report_in(&tasks, snapshot, &tz))?)
}

fn filtered(tasks_json: &str, filter: &str, search: &str, today: &str) -> AppResult<String> {
    let filter: TaskFilter = filter.parse().map_err(AppError::Validation)?;
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d")
        .map_err(|e| AppError::Validation(format!("Invalid date '{}': {}", today, e)))?;
    let store = TaskStore::from_tasks(parse_tasks(tasks_json)?);
    Ok(serde_json::to_string(&store.query(filter, search, today))?)
}

// ============================================================================
// Bindings
// ============================================================================

/// Fresh statistics snapshot as JSON. `previous_json` may be empty.
#[wasm_bindgen(js_name = computeStatistics)]
pub fn statistics_json(
    tasks_json: &str,
    previous_json: &str,
    tz_offset_minutes: i32,
) -> Result<String, JsValue> {
    statistics(tasks_json, previous_json, tz_offset_minutes).map_err(to_js)
}

/// Statistics page report (snapshot, categories, achievements) as JSON
#[wasm_bindgen(js_name = statisticsReport)]
pub fn statistics_report_json(
    tasks_json: &str,
    previous_json: &str,
    tz_offset_minutes: i32,
) -> Result<String, JsValue> {
    report(tasks_json, previous_json, tz_offset_minutes).map_err(to_js)
}

/// Tasks passing `filter` and containing `search`, as a JSON array
///
/// `today` is the viewer's local date as `YYYY-MM-DD`.
#[wasm_bindgen(js_name = filterTasks)]
pub fn filter_tasks_json(
    tasks_json: &str,
    filter: &str,
    search: &str,
    today: &str,
) -> Result<String, JsValue> {
    filtered(tasks_json, filter, search, today).map_err(to_js)
}

#[wasm_bindgen(js_name = currentStreak)]
pub fn current_streak(tasks_json: &str, tz_offset_minutes: i32) -> Result<u32, JsValue> {
    let tasks = parse_tasks(tasks_json).map_err(to_js)?;
    let tz = offset(tz_offset_minutes).map_err(to_js)?;
    Ok(current_streak_in(&tasks, &tz))
}

#[wasm_bindgen(js_name = completionRate)]
pub fn completion_rate(tasks_json: &str) -> Result<u32, JsValue> {
    let tasks = parse_tasks(tasks_json).map_err(to_js)?;
    Ok(focusup_shared::completion_rate(&tasks))
}

#[wasm_bindgen(js_name = userLevel)]
pub fn user_level(completed_tasks: u32) -> u8 {
    focusup_shared::user_level(completed_tasks as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASKS: &str = r#"[
        {"id": 1, "title": "Read", "priority": "high", "category": "study", "completed": true,
         "createdAt": "2024-06-09T08:00:00Z", "completedAt": "2024-06-09T23:30:00Z"},
        {"id": 2, "title": "Run", "priority": "low", "category": "health", "completed": true,
         "createdAt": "2024-06-10T08:00:00Z", "completedAt": "2024-06-10T09:00:00Z"},
        {"id": 3, "title": "Call bank", "description": "about the card", "priority": "medium",
         "category": "finance", "deadline": "2024-06-10", "completed": false,
         "createdAt": "2024-06-10T08:00:00Z", "completedAt": null}
    ]"#;

    #[test]
    fn test_statistics_snapshot() {
        let json = statistics(TASKS, "", 0).unwrap();
        let snapshot: Statistics = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.total_tasks, 3);
        assert_eq!(snapshot.completed_tasks, 2);
        assert_eq!(snapshot.current_streak, 2);
    }

    #[test]
    fn test_offset_moves_completion_into_next_day() {
        // 23:30 UTC on the 9th is the 10th at UTC+2, so both land on one day
        let tasks = parse_tasks(TASKS).unwrap();
        assert_eq!(current_streak_in(&tasks, &offset(0).unwrap()), 2);
        assert_eq!(current_streak_in(&tasks, &offset(120).unwrap()), 1);
    }

    #[test]
    fn test_previous_longest_streak_is_kept() {
        let json = statistics(TASKS, r#"{"longestStreak": 9}"#, 0).unwrap();
        let snapshot: Statistics = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.longest_streak, 9);
    }

    #[test]
    fn test_report_has_categories_and_achievements() {
        let json = report(TASKS, "", 0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["completionRate"], 67);
        assert_eq!(value["activeTasks"], 1);
        assert_eq!(value["achievements"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_filter_due_today_with_search() {
        let json = filtered(TASKS, "due-today", "CARD", "2024-06-10").unwrap();
        let tasks: Vec<Task> = serde_json::from_str(&json).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 3);

        let json = filtered(TASKS, "completed", "", "2024-06-10").unwrap();
        let tasks: Vec<Task> = serde_json::from_str(&json).unwrap();
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn test_bad_input_is_reported() {
        assert_eq!(statistics("{", "", 0).unwrap_err().code(), "PARSE_ERROR");
        assert!(filtered(TASKS, "overdue", "", "2024-06-10").is_err());
        assert!(filtered(TASKS, "all", "", "10/06/2024").is_err());
        assert!(offset(24 * 60).is_err());
    }

    #[test]
    fn test_fractional_ids_are_accepted() {
        let json = r#"[
            {"id": 1718000000123.42, "title": "Imported", "completed": true,
             "createdAt": "2024-06-10T08:00:00Z"},
            {"id": 7, "title": "Open", "createdAt": "2024-06-10T08:00:00Z"}
        ]"#;
        let tasks = parse_tasks(json).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].id, 7);
        assert!(tasks[0].completed_at.is_some());

        let snapshot: Statistics = serde_json::from_str(&statistics(json, "", 0).unwrap()).unwrap();
        assert_eq!(snapshot.completed_tasks, 1);
    }

    #[test]
    fn test_user_level_caps_at_ten() {
        assert_eq!(user_level(0), 1);
        assert_eq!(user_level(25), 3);
        assert_eq!(user_level(500), 10);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_errors_cross_as_strings() {
        let err = completion_rate("not json").unwrap_err();
        assert!(err.as_string().is_some());
    }
}
