//! Data management service
//!
//! Provides:
//! - Import of task arrays and full data documents
//! - Account reset, account deletion and clearing the whole store

use super::{StatisticsService, TaskService};
use crate::error::TrackerResult;
use crate::state::AppState;
use crate::storage::{keys, BlobStore};
use chrono::{DateTime, Utc};
use focusup_shared::{
    AppError, ImportedTask, Profile, Settings, Statistics, TaskStore, Theme,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

/// What an import changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of tasks appended or loaded, if the document had tasks
    pub tasks: Option<usize>,
    pub profile: bool,
    pub settings: bool,
    pub theme: Option<Theme>,
    pub statistics: Statistics,
}

impl ImportSummary {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_none() && !self.profile && !self.settings && self.theme.is_none()
    }
}

/// Overlay the keys of `patch` onto `current`
fn shallow_merge<T>(current: &T, patch: Map<String, Value>, section: &str) -> TrackerResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = match serde_json::to_value(current)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(patch);
    serde_json::from_value(Value::Object(merged))
        .map_err(|e| AppError::Format(format!("Invalid {} section: {}", section, e)).into())
}

fn expect_object(value: Value, section: &str) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::Format(format!("'{}' must be an object", section))),
    }
}

/// Data management service
pub struct DataService;

impl DataService {
    /// Import a JSON document
    ///
    /// A top-level array is appended to the task list. An object may carry
    /// `tasks` (replaces the list), `profile` and `settings` (merged key by
    /// key) and `theme`. Sections are applied and saved in that order; a
    /// failing section leaves the earlier ones committed.
    pub fn import<S: BlobStore>(
        state: &mut AppState<S>,
        json: &str,
        now: DateTime<Utc>,
    ) -> TrackerResult<ImportSummary> {
        let document: Value = serde_json::from_str(json).map_err(AppError::from)?;

        if document.is_array() {
            let mutation = TaskService::import_task_array(state, document, now)?;
            return Ok(ImportSummary {
                tasks: Some(mutation.value),
                statistics: mutation.statistics,
                ..Default::default()
            });
        }
        let Value::Object(mut sections) = document else {
            return Err(AppError::Format("Invalid data format".to_string()).into());
        };

        let mut summary = ImportSummary::default();

        if let Some(tasks) = sections.remove("tasks") {
            let imported: Vec<ImportedTask> = match tasks {
                Value::Array(_) => serde_json::from_value(tasks).map_err(AppError::from)?,
                _ => return Err(AppError::Format("'tasks' must be an array".to_string()).into()),
            };
            let mut store = TaskStore::new();
            store.replace_all(imported, now);
            summary.tasks = Some(store.len());
            state.tasks = store;
            state.save_tasks()?;
            summary.statistics = StatisticsService::update_statistics(state)?;
        }

        if let Some(profile) = sections.remove("profile") {
            let patch = expect_object(profile, "profile")?;
            state.profile = shallow_merge::<Profile>(&state.profile, patch, "profile")?;
            state.save_profile()?;
            summary.profile = true;
        }

        if let Some(settings) = sections.remove("settings") {
            let patch = expect_object(settings, "settings")?;
            state.settings = shallow_merge::<Settings>(&state.settings, patch, "settings")?;
            state.save_settings()?;
            summary.settings = true;
        }

        if let Some(theme) = sections.remove("theme") {
            let theme: Theme = theme
                .as_str()
                .ok_or_else(|| AppError::Format("'theme' must be a string".to_string()))?
                .parse()
                .map_err(AppError::Format)?;
            state.theme = theme;
            state.save_theme()?;
            summary.theme = Some(theme);
        }

        if summary.is_empty() {
            return Err(AppError::Format("No importable sections found".to_string()).into());
        }

        summary.statistics = StatisticsService::update_statistics(state)?;
        info!(
            tasks = ?summary.tasks,
            profile = summary.profile,
            settings = summary.settings,
            "Data imported"
        );
        Ok(summary)
    }

    /// Put tasks, statistics, profile and settings back to defaults and save
    /// them. The theme and password are left alone.
    pub fn reset_account_data<S: BlobStore>(state: &mut AppState<S>) -> TrackerResult<()> {
        state.tasks = TaskStore::new();
        state.statistics = Statistics::default();
        state.profile = Profile::default();
        state.settings = Settings::default();

        state.save_tasks()?;
        state.save_profile()?;
        StatisticsService::update_statistics(state)?;
        state.save_settings()?;

        warn!("Account data reset");
        Ok(())
    }

    /// Remove every record the app owns and reset the in-memory state
    pub fn delete_account<S: BlobStore>(state: &mut AppState<S>) -> TrackerResult<()> {
        for key in keys::ALL {
            state.persistence_mut().remove(key)?;
        }
        state.reset_in_memory();
        warn!("Account deleted");
        Ok(())
    }

    /// Clear the whole blob store and reset the in-memory state
    pub fn clear_all_data<S: BlobStore>(state: &mut AppState<S>) -> TrackerResult<()> {
        state.persistence_mut().clear()?;
        state.reset_in_memory();
        warn!("All data cleared");
        Ok(())
    }
}
