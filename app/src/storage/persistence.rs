use super::BlobStore;
use crate::error::TrackerResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Typed access to a [`BlobStore`]
///
/// Reads never fail: a missing, unreadable or malformed record yields the
/// supplied default and a warning. Writes surface storage failures.
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    store: S,
}

impl<S: BlobStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Stored value under `key`, or `default`
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(text) = self.load_text(key) else {
            return default;
        };
        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Stored record is malformed, using defaults");
                default
            }
        }
    }

    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.load(key, T::default())
    }

    /// Raw stored text, `None` when absent or unreadable
    pub fn load_text(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(text) => text,
            Err(e) => {
                warn!(key, error = %e, "Failed to read stored record");
                None
            }
        }
    }

    /// Serialize `value` as JSON and store it under `key`
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> TrackerResult<()> {
        let text = serde_json::to_string(value)?;
        self.save_text(key, &text)
    }

    pub fn save_text(&mut self, key: &str, text: &str) -> TrackerResult<()> {
        self.store.set(key, text)?;
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> TrackerResult<()> {
        self.store.remove(key)?;
        Ok(())
    }

    pub fn clear(&mut self) -> TrackerResult<()> {
        self.store.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{keys, MemoryBlobStore};
    use focusup_shared::{Profile, Settings, Statistics};

    #[test]
    fn test_missing_key_yields_default() {
        let persistence = Persistence::new(MemoryBlobStore::new());
        let stats: Statistics = persistence.load_or_default(keys::STATS);
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn test_malformed_record_yields_default() {
        let mut store = MemoryBlobStore::new();
        store.set(keys::SETTINGS, "{not json").unwrap();
        let persistence = Persistence::new(store);

        let settings: Settings = persistence.load_or_default(keys::SETTINGS);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut persistence = Persistence::new(MemoryBlobStore::new());
        let profile = Profile {
            name: "Ilze".to_string(),
            daily_goal: 8,
            ..Default::default()
        };
        persistence.save(keys::PROFILE, &profile).unwrap();

        let loaded: Profile = persistence.load_or_default(keys::PROFILE);
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_partial_record_fills_defaults() {
        let mut store = MemoryBlobStore::new();
        store
            .set(keys::SETTINGS, r##"{"primaryColor": "#336699"}"##)
            .unwrap();
        let settings: Settings = Persistence::new(store).load_or_default(keys::SETTINGS);
        assert_eq!(settings.primary_color, "#336699");
        assert_eq!(settings.start_page, "tasks");
    }
}
