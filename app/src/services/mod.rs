//! Business logic services
//!
//! Services are stateless unit structs whose operations take the
//! application state by `&mut`. Task mutations follow one sequence:
//! mutate the store, save the tasks, then recompute and save statistics.

pub mod data;
pub mod export;
pub mod profile;
pub mod settings;
pub mod statistics;
pub mod tasks;

pub use data::{DataService, ImportSummary};
pub use export::{ExportDocument, ExportKind, ExportService};
pub use profile::{PreferenceUpdate, ProfileService, ProfileUpdate};
pub use settings::{SettingChange, SettingsService};
pub use statistics::StatisticsService;
pub use tasks::TaskService;

use focusup_shared::Statistics;

/// Result of a task mutation together with the snapshot it produced
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation<T> {
    pub value: T,
    pub statistics: Statistics,
}

impl<T> Mutation<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Mutation<U> {
        Mutation {
            value: f(self.value),
            statistics: self.statistics,
        }
    }
}
