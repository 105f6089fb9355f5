//! Application state management
//!
//! [`AppState`] is the single root for everything the tracker holds in
//! memory. It is hydrated from the blob store once at start and handed to
//! services by `&mut`; there is no other shared state.

use crate::error::TrackerResult;
use crate::storage::{keys, BlobStore, Persistence};
use chrono::Utc;
use focusup_shared::{Credentials, ImportedTask, Profile, Settings, Statistics, TaskStore, Theme};
use tracing::{debug, warn};

/// In-memory application root
pub struct AppState<S> {
    pub tasks: TaskStore,
    pub profile: Profile,
    pub settings: Settings,
    pub statistics: Statistics,
    pub theme: Theme,
    pub credentials: Credentials,
    persistence: Persistence<S>,
}

impl<S: BlobStore> AppState<S> {
    /// Hydrate every record from `store`, falling back to defaults
    pub fn load(store: S) -> Self {
        let persistence = Persistence::new(store);

        // Stored lists follow the import rules: non-integral or repeated ids are re-keyed
        let stored: Vec<ImportedTask> = persistence.load_or_default(keys::TASKS);
        let mut tasks = TaskStore::new();
        tasks.replace_all(stored, Utc::now());
        let theme = persistence
            .load_text(keys::THEME)
            .map(|text| parse_theme(&text))
            .unwrap_or_default();

        let state = Self {
            tasks,
            profile: persistence.load_or_default(keys::PROFILE),
            settings: persistence.load_or_default(keys::SETTINGS),
            statistics: persistence.load_or_default(keys::STATS),
            theme,
            credentials: persistence.load_or_default(keys::CREDENTIALS),
            persistence,
        };

        debug!(
            tasks = state.tasks.len(),
            theme = state.theme.as_str(),
            "Loaded application state"
        );
        state
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut Persistence<S> {
        &mut self.persistence
    }

    pub fn into_store(self) -> S {
        self.persistence.into_store()
    }

    // ========================================================================
    // Saving
    // ========================================================================

    pub fn save_tasks(&mut self) -> TrackerResult<()> {
        self.persistence.save(keys::TASKS, self.tasks.tasks())
    }

    pub fn save_profile(&mut self) -> TrackerResult<()> {
        self.persistence.save(keys::PROFILE, &self.profile)
    }

    pub fn save_settings(&mut self) -> TrackerResult<()> {
        self.persistence.save(keys::SETTINGS, &self.settings)
    }

    pub fn save_statistics(&mut self) -> TrackerResult<()> {
        self.persistence.save(keys::STATS, &self.statistics)
    }

    /// The theme is stored as bare text, not JSON
    pub fn save_theme(&mut self) -> TrackerResult<()> {
        self.persistence.save_text(keys::THEME, self.theme.as_str())
    }

    pub fn save_credentials(&mut self) -> TrackerResult<()> {
        self.persistence.save(keys::CREDENTIALS, &self.credentials)
    }

    /// Reset every in-memory record to its default without saving
    pub fn reset_in_memory(&mut self) {
        self.tasks = TaskStore::new();
        self.profile = Profile::default();
        self.settings = Settings::default();
        self.statistics = Statistics::default();
        self.theme = Theme::default();
        self.credentials = Credentials::default();
    }
}

/// Accept both bare (`dark`) and JSON-quoted (`"dark"`) theme values
fn parse_theme(text: &str) -> Theme {
    let bare = text.trim().trim_matches('"');
    bare.parse().unwrap_or_else(|_| {
        warn!(value = bare, "Unknown stored theme, using light");
        Theme::default()
    })
}
