//! Data export service
//!
//! Supports multiple formats:
//! - JSON: tasks only, statistics, user data and all data documents
//! - CSV: Tabular task export for spreadsheets
//!
//! JSON documents can be fed back through `DataService::import`.

use crate::error::{TrackerError, TrackerResult};
use crate::state::AppState;
use crate::storage::BlobStore;
use chrono::{DateTime, NaiveDate, Utc};
use focusup_shared::{Category, Priority, Profile, Settings, Statistics, Task, Theme};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Which export document to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Tasks,
    Statistics,
    UserData,
    AllData,
    TasksCsv,
}

impl ExportKind {
    fn file_stem(&self) -> &'static str {
        match self {
            ExportKind::Tasks | ExportKind::TasksCsv => "tasks",
            ExportKind::Statistics => "statistics",
            ExportKind::UserData => "userdata",
            ExportKind::AllData => "alldata",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ExportKind::TasksCsv => "csv",
            _ => "json",
        }
    }

    /// Suggested file name, e.g. `focusup_tasks_2024-06-10.json`
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!(
            "focusup_{}_{}.{}",
            self.file_stem(),
            date.format("%Y-%m-%d"),
            self.extension()
        )
    }
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "tasks" => Ok(ExportKind::Tasks),
            "statistics" | "stats" => Ok(ExportKind::Statistics),
            "userdata" | "user-data" => Ok(ExportKind::UserData),
            "alldata" | "all-data" | "all" => Ok(ExportKind::AllData),
            "csv" | "tasks-csv" => Ok(ExportKind::TasksCsv),
            other => Err(format!(
                "Invalid export kind '{}'. Must be one of: tasks, statistics, user-data, all-data, csv",
                other
            )),
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportKind::Tasks => "tasks",
            ExportKind::Statistics => "statistics",
            ExportKind::UserData => "user-data",
            ExportKind::AllData => "all-data",
            ExportKind::TasksCsv => "csv",
        };
        f.write_str(name)
    }
}

/// A rendered export ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub kind: ExportKind,
    pub file_name: String,
    pub contents: String,
}

impl ExportDocument {
    /// Write the document into `dir` under its suggested name
    pub fn write_to(&self, dir: &Path) -> TrackerResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.contents)?;
        Ok(path)
    }
}

// ============================================================================
// Document Shapes
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatisticsExport<'a> {
    tasks: &'a [Task],
    statistics: &'a Statistics,
    profile: &'a Profile,
    export_date: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserDataExport<'a> {
    profile: &'a Profile,
    tasks: &'a [Task],
    statistics: &'a Statistics,
    settings: &'a Settings,
    export_date: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AllDataExport<'a> {
    tasks: &'a [Task],
    profile: &'a Profile,
    statistics: &'a Statistics,
    settings: &'a Settings,
    theme: Theme,
    export_date: DateTime<Utc>,
}

/// One CSV row per task
#[derive(Serialize)]
struct TaskCsvRow<'a> {
    id: i64,
    title: &'a str,
    description: &'a str,
    deadline: Option<NaiveDate>,
    priority: Priority,
    category: Category,
    completed: bool,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Task> for TaskCsvRow<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            id: task.id,
            title: &task.title,
            description: task.description.as_deref().unwrap_or_default(),
            deadline: task.deadline,
            priority: task.priority,
            category: task.category,
            completed: task.completed,
            created_at: task.created_at,
            completed_at: task.completed_at,
        }
    }
}

/// Data export service
pub struct ExportService;

impl ExportService {
    /// Render an export document stamped with `now`
    pub fn export<S: BlobStore>(
        state: &AppState<S>,
        kind: ExportKind,
        now: DateTime<Utc>,
    ) -> TrackerResult<ExportDocument> {
        let tasks = state.tasks.tasks();
        let contents = match kind {
            ExportKind::Tasks => serde_json::to_string_pretty(tasks)?,
            ExportKind::Statistics => serde_json::to_string_pretty(&StatisticsExport {
                tasks,
                statistics: &state.statistics,
                profile: &state.profile,
                export_date: now,
            })?,
            ExportKind::UserData => serde_json::to_string_pretty(&UserDataExport {
                profile: &state.profile,
                tasks,
                statistics: &state.statistics,
                settings: &state.settings,
                export_date: now,
            })?,
            ExportKind::AllData => serde_json::to_string_pretty(&AllDataExport {
                tasks,
                profile: &state.profile,
                statistics: &state.statistics,
                settings: &state.settings,
                theme: state.theme,
                export_date: now,
            })?,
            ExportKind::TasksCsv => {
                let rows: Vec<TaskCsvRow> = tasks.iter().map(TaskCsvRow::from).collect();
                Self::to_csv(&rows)?
            }
        };

        info!(kind = %kind, tasks = tasks.len(), "Export rendered");
        Ok(ExportDocument {
            kind,
            file_name: kind.file_name(now.date_naive()),
            contents,
        })
    }

    /// Convert data to CSV string
    fn to_csv<T: Serialize>(data: &[T]) -> TrackerResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record).map_err(|e| {
                TrackerError::Internal(anyhow::anyhow!("CSV serialization error: {}", e))
            })?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| TrackerError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| TrackerError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}
