//! In-memory task list
//!
//! Owns the ordered task vector and enforces the record invariants:
//! unique ids, non-empty titles and `completed_at` tracking `completed`.
//! Persistence is the caller's job; the store never touches I/O.

use crate::errors::{AppError, AppResult};
use crate::models::Task;
use crate::types::{ImportedTask, NewTask, TaskCounters, TaskFilter, TaskPatch};
use crate::validation::{check_field, validate_description, validate_title};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// Spread of the random offset added to imported ids
const IMPORT_ID_SPREAD: u128 = 1_000;

/// Ordered task list with id bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap tasks that were already persisted
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn active_count(&self) -> usize {
        self.len() - self.completed_count()
    }

    pub fn counters(&self) -> TaskCounters {
        let completed = self.completed_count();
        TaskCounters {
            total: self.len(),
            completed,
            active: self.len() - completed,
        }
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: i64) -> AppResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))
    }

    fn contains(&self, id: i64) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Millisecond timestamp, bumped past any id already taken
    fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let mut id = now.timestamp_millis();
        while self.contains(id) {
            id += 1;
        }
        id
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a new open task built from user input
    pub fn add(&mut self, input: NewTask, now: DateTime<Utc>) -> AppResult<Task> {
        check_field("title", validate_title(&input.title))?;
        if let Some(description) = &input.description {
            check_field("description", validate_description(description))?;
        }

        let task = Task {
            id: self.next_id(now),
            title: input.title.trim().to_string(),
            description: input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            deadline: input.deadline,
            priority: input.priority,
            category: input.category,
            completed: false,
            created_at: now,
            completed_at: None,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Flip a task between open and completed
    pub fn toggle_completion(&mut self, id: i64, now: DateTime<Utc>) -> AppResult<&Task> {
        let task = self.get_mut(id)?;
        let completed = !task.completed;
        task.set_completed(completed, now);
        Ok(task)
    }

    /// Edit title and/or description
    ///
    /// Both fields are validated before either is written.
    pub fn update(&mut self, id: i64, patch: TaskPatch) -> AppResult<&Task> {
        if let Some(title) = &patch.title {
            check_field("title", validate_title(title))?;
        }
        if let Some(description) = &patch.description {
            check_field("description", validate_description(description))?;
        }

        let task = self.get_mut(id)?;
        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            let trimmed = description.trim();
            task.description = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        Ok(task)
    }

    /// Remove a task by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Remove every task matching `predicate`, returning how many went
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Task) -> bool,
    {
        let before = self.tasks.len();
        self.tasks.retain(|t| !predicate(t));
        before - self.tasks.len()
    }

    /// Complete every open task at `now`, returning how many changed
    pub fn set_all_completed(&mut self, now: DateTime<Utc>) -> usize {
        let mut changed = 0;
        for task in self.tasks.iter_mut().filter(|t| !t.completed) {
            task.set_completed(true, now);
            changed += 1;
        }
        changed
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Tasks passing `filter` and containing `search` (case-insensitive),
    /// in stored order. `today` is the caller's local date.
    pub fn query(&self, filter: TaskFilter, search: &str, today: NaiveDate) -> Vec<&Task> {
        let term = search.trim().to_lowercase();
        self.tasks
            .iter()
            .filter(|t| filter.matches(t, today))
            .filter(|t| term.is_empty() || t.matches_search(&term))
            .collect()
    }

    // ========================================================================
    // Imports
    // ========================================================================

    /// Append imported tasks, re-keying missing or colliding ids
    pub fn import_merge(&mut self, imported: Vec<ImportedTask>, now: DateTime<Utc>) -> usize {
        let mut taken: HashSet<i64> = self.tasks.iter().map(|t| t.id).collect();
        let incoming = resolve_ids(imported, &mut taken, now);
        let count = incoming.len();
        self.tasks.extend(incoming);
        count
    }

    /// Replace the whole list with imported tasks
    pub fn replace_all(&mut self, imported: Vec<ImportedTask>, now: DateTime<Utc>) {
        let mut taken = HashSet::new();
        self.tasks = resolve_ids(imported, &mut taken, now);
    }

    /// Drop every task
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

/// Convert imported entries, giving each one an id not yet in `taken`
fn resolve_ids(
    imported: Vec<ImportedTask>,
    taken: &mut HashSet<i64>,
    now: DateTime<Utc>,
) -> Vec<Task> {
    imported
        .into_iter()
        .map(|entry| {
            let id = match entry.id {
                Some(id) if !taken.contains(&id) => id,
                _ => fresh_import_id(taken, now),
            };
            taken.insert(id);
            entry.into_task(id, now)
        })
        .collect()
}

/// Current millis plus a random offset, retried until unused
fn fresh_import_id(taken: &HashSet<i64>, now: DateTime<Utc>) -> i64 {
    let base = now.timestamp_millis();
    loop {
        let offset = (Uuid::new_v4().as_u128() % IMPORT_ID_SPREAD) as i64;
        let candidate = base + offset;
        if !taken.contains(&candidate) {
            return candidate;
        }
        // Offsets exhausted near `base`; walk forward from the top of the window
        if (0..IMPORT_ID_SPREAD as i64).all(|o| taken.contains(&(base + o))) {
            let mut id = base + IMPORT_ID_SPREAD as i64;
            while taken.contains(&id) {
                id += 1;
            }
            return id;
        }
    }
}
