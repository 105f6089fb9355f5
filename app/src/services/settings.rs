//! Settings service
//!
//! Presentation preferences and the color theme. The theme lives under its
//! own key; every other preference is part of the settings record.

use crate::error::TrackerResult;
use crate::state::AppState;
use crate::storage::BlobStore;
use focusup_shared::validation::{check_field, validate_hex_color, validate_start_page};
use focusup_shared::{AppError, FontSize, Settings, Theme};
use tracing::info;

/// A single preference change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingChange {
    DarkMode(bool),
    FontSize(FontSize),
    Animations(bool),
    TaskReminders(bool),
    DailySummary(bool),
    NotificationSound(bool),
    AutoBackup(bool),
    AutoSave(bool),
    StartPage(String),
    PrimaryColor(String),
}

/// Setting names accepted by [`SettingChange::parse`]
pub const SETTING_NAMES: &[&str] = &[
    "dark-mode",
    "font-size",
    "animations",
    "task-reminders",
    "daily-summary",
    "notification-sound",
    "auto-backup",
    "auto-save",
    "start-page",
    "primary-color",
];

fn parse_switch(name: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(AppError::Validation(format!(
            "{}: expected on or off, got '{}'",
            name, other
        ))),
    }
}

impl SettingChange {
    /// Build a change from a setting name and its textual value
    pub fn parse(name: &str, value: &str) -> Result<Self, AppError> {
        let key = name.trim().to_lowercase().replace('_', "-");
        let change = match key.as_str() {
            "dark-mode" => SettingChange::DarkMode(parse_switch(name, value)?),
            "font-size" => SettingChange::FontSize(value.parse().map_err(AppError::Validation)?),
            "animations" => SettingChange::Animations(parse_switch(name, value)?),
            "task-reminders" => SettingChange::TaskReminders(parse_switch(name, value)?),
            "daily-summary" => SettingChange::DailySummary(parse_switch(name, value)?),
            "notification-sound" => SettingChange::NotificationSound(parse_switch(name, value)?),
            "auto-backup" => SettingChange::AutoBackup(parse_switch(name, value)?),
            "auto-save" => SettingChange::AutoSave(parse_switch(name, value)?),
            "start-page" => SettingChange::StartPage(value.trim().to_lowercase()),
            "primary-color" => SettingChange::PrimaryColor(value.trim().to_string()),
            _ => {
                return Err(AppError::Validation(format!(
                    "Unknown setting '{}'. Must be one of: {}",
                    name,
                    SETTING_NAMES.join(", ")
                )))
            }
        };
        Ok(change)
    }
}

/// Settings service
pub struct SettingsService;

impl SettingsService {
    /// Apply one preference change and save it
    pub fn apply<S: BlobStore>(state: &mut AppState<S>, change: SettingChange) -> TrackerResult<()> {
        if let SettingChange::DarkMode(dark) = change {
            Self::set_theme(state, if dark { Theme::Dark } else { Theme::Light })?;
            return Ok(());
        }

        let settings = &mut state.settings;
        match change {
            SettingChange::DarkMode(_) => {}
            SettingChange::FontSize(size) => settings.font_size = size,
            SettingChange::Animations(v) => settings.animations = v,
            SettingChange::TaskReminders(v) => settings.task_reminders = v,
            SettingChange::DailySummary(v) => settings.daily_summary = v,
            SettingChange::NotificationSound(v) => settings.notification_sound = v,
            SettingChange::AutoBackup(v) => settings.auto_backup = v,
            SettingChange::AutoSave(v) => settings.auto_save = v,
            SettingChange::StartPage(page) => {
                check_field("start_page", validate_start_page(&page))?;
                settings.start_page = page;
            }
            SettingChange::PrimaryColor(color) => {
                check_field("primary_color", validate_hex_color(&color))?;
                settings.primary_color = color;
            }
        }
        state.save_settings()
    }

    pub fn set_theme<S: BlobStore>(state: &mut AppState<S>, theme: Theme) -> TrackerResult<Theme> {
        state.theme = theme;
        state.save_theme()?;
        info!(theme = theme.as_str(), "Theme set");
        Ok(theme)
    }

    pub fn toggle_theme<S: BlobStore>(state: &mut AppState<S>) -> TrackerResult<Theme> {
        let next = state.theme.toggled();
        Self::set_theme(state, next)
    }

    /// Restore default settings and the light theme
    pub fn reset_to_defaults<S: BlobStore>(state: &mut AppState<S>) -> TrackerResult<()> {
        state.settings = Settings::default();
        state.save_settings()?;
        Self::set_theme(state, Theme::Light)?;
        info!("Settings reset to defaults");
        Ok(())
    }
}
