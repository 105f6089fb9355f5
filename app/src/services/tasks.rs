//! Task service
//!
//! Provides business logic for the task list including:
//! - Adding, editing, toggling and deleting tasks
//! - Bulk completion and bulk deletion
//! - Filtered listing and counters
//! - Appending tasks from an exported task array

use super::{Mutation, StatisticsService};
use crate::error::TrackerResult;
use crate::state::AppState;
use crate::storage::BlobStore;
use chrono::{DateTime, NaiveDate, Utc};
use focusup_shared::{
    AppError, ImportedTask, NewTask, Task, TaskCounters, TaskFilter, TaskPatch,
};
use tracing::{debug, info};

/// Task service
pub struct TaskService;

impl TaskService {
    /// Save the task list and rebuild the statistics snapshot
    fn commit<S: BlobStore, T>(state: &mut AppState<S>, value: T) -> TrackerResult<Mutation<T>> {
        state.save_tasks()?;
        let statistics = StatisticsService::update_statistics(state)?;
        Ok(Mutation { value, statistics })
    }

    /// Add a task from user input
    pub fn add<S: BlobStore>(
        state: &mut AppState<S>,
        input: NewTask,
        now: DateTime<Utc>,
    ) -> TrackerResult<Mutation<Task>> {
        let task = state.tasks.add(input, now)?;
        info!(task_id = task.id, category = %task.category, "Task added");
        Self::commit(state, task)
    }

    /// Flip a task between open and completed
    pub fn toggle<S: BlobStore>(
        state: &mut AppState<S>,
        id: i64,
        now: DateTime<Utc>,
    ) -> TrackerResult<Mutation<Task>> {
        let task = state.tasks.toggle_completion(id, now)?.clone();
        debug!(task_id = id, completed = task.completed, "Task toggled");
        Self::commit(state, task)
    }

    /// Edit a task's title and/or description
    pub fn edit<S: BlobStore>(
        state: &mut AppState<S>,
        id: i64,
        patch: TaskPatch,
    ) -> TrackerResult<Mutation<Task>> {
        let task = state.tasks.update(id, patch)?.clone();
        debug!(task_id = id, "Task edited");
        Self::commit(state, task)
    }

    /// Delete a task. Deleting a missing id is a no-op.
    pub fn delete<S: BlobStore>(state: &mut AppState<S>, id: i64) -> TrackerResult<Mutation<bool>> {
        if !state.tasks.remove(id) {
            debug!(task_id = id, "Delete of missing task ignored");
            return Ok(Mutation {
                value: false,
                statistics: state.statistics,
            });
        }
        info!(task_id = id, "Task deleted");
        Self::commit(state, true)
    }

    /// Delete every completed task, returning how many were removed
    pub fn delete_completed<S: BlobStore>(state: &mut AppState<S>) -> TrackerResult<Mutation<usize>> {
        let removed = state.tasks.remove_where(|t| t.completed);
        info!(removed, "Completed tasks deleted");
        Self::commit(state, removed)
    }

    /// Complete every open task, returning how many changed
    pub fn mark_all_completed<S: BlobStore>(
        state: &mut AppState<S>,
        now: DateTime<Utc>,
    ) -> TrackerResult<Mutation<usize>> {
        let changed = state.tasks.set_all_completed(now);
        info!(changed, "All tasks marked completed");
        Self::commit(state, changed)
    }

    /// Tasks matching the filter and search term on the given local date
    pub fn list<'a, S: BlobStore>(
        state: &'a AppState<S>,
        filter: TaskFilter,
        search: &str,
        today: NaiveDate,
    ) -> Vec<&'a Task> {
        state.tasks.query(filter, search, today)
    }

    pub fn counters<S: BlobStore>(state: &AppState<S>) -> TaskCounters {
        state.tasks.counters()
    }

    /// Append tasks from a JSON array document
    ///
    /// Anything other than an array is rejected before the list changes.
    pub fn import_tasks<S: BlobStore>(
        state: &mut AppState<S>,
        json: &str,
        now: DateTime<Utc>,
    ) -> TrackerResult<Mutation<usize>> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(AppError::from)?;
        if !value.is_array() {
            return Err(AppError::Format("Expected an array of tasks".to_string()).into());
        }
        Self::import_task_array(state, value, now)
    }

    pub(crate) fn import_task_array<S: BlobStore>(
        state: &mut AppState<S>,
        value: serde_json::Value,
        now: DateTime<Utc>,
    ) -> TrackerResult<Mutation<usize>> {
        let imported: Vec<ImportedTask> = serde_json::from_value(value).map_err(AppError::from)?;
        let count = state.tasks.import_merge(imported, now);
        info!(count, "Tasks imported");
        Self::commit(state, count)
    }
}
