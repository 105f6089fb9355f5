//! Request, query and report types shared by the app and wasm front ends

use crate::models::{Category, Priority, Statistics, Task};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Task Input Types
// ============================================================================

/// Input for creating a task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Category,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

/// Partial edit of an existing task. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A task entry as it appears in an imported document
///
/// Imports come from hand-edited files and older exports, so every field
/// except the title is optional and the id may be missing or fractional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedTask {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ImportedTask {
    /// Build a task under the given id, restoring the completion invariant
    pub fn into_task(self, id: i64, now: DateTime<Utc>) -> Task {
        let created_at = self.created_at.unwrap_or(now);
        let completed_at = if self.completed {
            Some(self.completed_at.unwrap_or(created_at))
        } else {
            None
        };

        Task {
            id,
            title: self.title,
            description: self.description.filter(|d| !d.trim().is_empty()),
            deadline: self.deadline,
            priority: self.priority,
            category: self.category,
            completed: self.completed,
            created_at,
            completed_at,
        }
    }
}

impl From<Task> for ImportedTask {
    fn from(task: Task) -> Self {
        Self {
            id: Some(task.id),
            title: task.title,
            description: task.description,
            deadline: task.deadline,
            priority: task.priority,
            category: task.category,
            completed: task.completed,
            created_at: Some(task.created_at),
            completed_at: task.completed_at,
        }
    }
}

/// Accept integral JSON numbers as ids; anything else counts as missing
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

// ============================================================================
// Query Types
// ============================================================================

/// Task list filter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
    DueToday,
    HighPriority,
}

impl TaskFilter {
    /// Whether a task passes this filter on the given local date
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Active => !task.completed,
            TaskFilter::Completed => task.completed,
            TaskFilter::DueToday => task.deadline == Some(today),
            TaskFilter::HighPriority => task.priority == Priority::High,
        }
    }
}

impl FromStr for TaskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "all" => Ok(TaskFilter::All),
            "active" => Ok(TaskFilter::Active),
            "completed" => Ok(TaskFilter::Completed),
            "duetoday" | "today" => Ok(TaskFilter::DueToday),
            "highpriority" | "high" => Ok(TaskFilter::HighPriority),
            other => Err(format!(
                "Invalid filter '{}'. Must be one of: all, active, completed, due-today, high-priority",
                other
            )),
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskFilter::All => "all",
            TaskFilter::Active => "active",
            TaskFilter::Completed => "completed",
            TaskFilter::DueToday => "due-today",
            TaskFilter::HighPriority => "high-priority",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Report Types
// ============================================================================

/// Task counters shown above the task list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TaskCounters {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
}

/// Per-category totals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub total: usize,
    pub completed: usize,
    /// Completion rate in percent
    pub rate: u32,
}

/// Progress toward a fixed achievement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AchievementProgress {
    pub key: String,
    pub label: String,
    pub current: u32,
    pub target: u32,
}

impl AchievementProgress {
    pub fn is_unlocked(&self) -> bool {
        self.current >= self.target
    }
}

/// Everything the statistics page shows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub snapshot: Statistics,
    pub active_tasks: usize,
    pub completion_rate: u32,
    pub level: u8,
    pub categories: Vec<CategoryBreakdown>,
    pub achievements: Vec<AchievementProgress>,
    pub first_task_date: Option<NaiveDate>,
}
