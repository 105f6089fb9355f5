//! Command-line front end
//!
//! Parses arguments, asks for confirmation where an operation cannot be
//! undone, calls the services and turns results into printable output
//! plus a one-line [`Notice`].

mod args;
mod prompt;
pub mod render;

pub use args::{Cli, Command, ProfileAction, SettingsAction, StatsAction, ThemeMode};
pub use prompt::{Confirm, StdinPrompt};

use crate::config::AppConfig;
use crate::error::TrackerResult;
use crate::notice::Notice;
use crate::services::{
    DataService, ExportService, PreferenceUpdate, ProfileService, ProfileUpdate, SettingChange,
    SettingsService, StatisticsService, TaskService,
};
use crate::state::AppState;
use crate::storage::BlobStore;
use chrono::{DateTime, Local, NaiveDate, Utc};
use focusup_shared::{NewTask, TaskPatch, Theme};
use secrecy::Secret;
use std::fs;

/// What a command produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Text for stdout
    pub output: Option<String>,
    pub notice: Option<Notice>,
}

impl Outcome {
    fn notice(notice: Notice) -> Self {
        Self {
            output: None,
            notice: Some(notice),
        }
    }

    fn output(output: String) -> Self {
        Self {
            output: Some(output),
            notice: None,
        }
    }

    fn cancelled() -> Self {
        Self::notice(Notice::info("Cancelled"))
    }
}

/// Wall-clock inputs for one command
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    pub now: DateTime<Utc>,
    /// Local calendar date, used for due-today and join dates
    pub today: NaiveDate,
}

impl Clock {
    pub fn system() -> Self {
        let now = Utc::now();
        Self {
            now,
            today: now.with_timezone(&Local).date_naive(),
        }
    }
}

/// Run one command against the loaded state
pub fn run<S: BlobStore>(
    command: Command,
    state: &mut AppState<S>,
    prompt: &mut dyn Confirm,
    config: &AppConfig,
    clock: Clock,
) -> TrackerResult<Outcome> {
    let outcome = match command {
        Command::Add {
            title,
            description,
            deadline,
            priority,
            category,
        } => {
            let mut input = NewTask::new(title)
                .with_priority(priority)
                .with_category(category);
            input.description = description;
            input.deadline = deadline;

            let added = TaskService::add(state, input, clock.now)?;
            Outcome::notice(Notice::success(format!(
                "Task added ({} total)",
                added.statistics.total_tasks
            )))
        }

        Command::List {
            filter,
            search,
            json,
        } => {
            let tasks = TaskService::list(state, filter, &search, clock.today);
            if json {
                Outcome::output(serde_json::to_string_pretty(&tasks)?)
            } else {
                Outcome::output(render::task_table(&tasks, TaskService::counters(state)))
            }
        }

        Command::Toggle { id } => {
            let toggled = TaskService::toggle(state, id, clock.now)?;
            let message = if toggled.value.completed {
                format!("Task completed. Streak: {}", toggled.statistics.current_streak)
            } else {
                "Task reopened".to_string()
            };
            Outcome::notice(Notice::success(message))
        }

        Command::Edit {
            id,
            title,
            description,
        } => {
            TaskService::edit(state, id, TaskPatch { title, description })?;
            Outcome::notice(Notice::success("Task updated"))
        }

        Command::Delete { id } => {
            if state.tasks.get(id).is_none() {
                return Ok(Outcome::default());
            }
            if !prompt.confirm("Delete this task?") {
                return Ok(Outcome::cancelled());
            }
            TaskService::delete(state, id)?;
            Outcome::notice(Notice::success("Task deleted"))
        }

        Command::CompleteAll => {
            if state.tasks.active_count() == 0 {
                return Ok(Outcome::notice(Notice::info("No open tasks")));
            }
            if !prompt.confirm("Mark every task as completed?") {
                return Ok(Outcome::cancelled());
            }
            let changed = TaskService::mark_all_completed(state, clock.now)?;
            Outcome::notice(Notice::success(format!("{} tasks completed", changed.value)))
        }

        Command::DeleteCompleted => {
            if state.tasks.completed_count() == 0 {
                return Ok(Outcome::notice(Notice::info("No completed tasks")));
            }
            if !prompt.confirm("Delete every completed task?") {
                return Ok(Outcome::cancelled());
            }
            let removed = TaskService::delete_completed(state)?;
            Outcome::notice(Notice::success(format!("{} tasks deleted", removed.value)))
        }

        Command::Stats { action, json } => match action {
            Some(StatsAction::Reset) => {
                if !prompt.confirm("Reset all statistics? This cannot be undone.") {
                    return Ok(Outcome::cancelled());
                }
                StatisticsService::reset(state)?;
                Outcome::notice(Notice::success("Statistics reset"))
            }
            Some(StatsAction::Refresh) | None => {
                StatisticsService::update_statistics(state)?;
                let report = StatisticsService::report(state);
                let output = if json {
                    serde_json::to_string_pretty(&report)?
                } else {
                    render::statistics(&report)
                };
                Outcome {
                    output: Some(output),
                    notice: matches!(action, Some(StatsAction::Refresh))
                        .then(|| Notice::success("Statistics refreshed")),
                }
            }
        },

        Command::Profile { action } => run_profile(action, state, prompt, clock)?,

        Command::Settings { action } => match action.unwrap_or(SettingsAction::Show) {
            SettingsAction::Show => Outcome::output(render::settings(&state.settings, state.theme)),
            SettingsAction::Set { name, value } => {
                let change = SettingChange::parse(&name, &value)?;
                SettingsService::apply(state, change)?;
                Outcome::notice(Notice::success("Setting saved"))
            }
            SettingsAction::Reset => {
                if !prompt.confirm("Restore every setting to its default?") {
                    return Ok(Outcome::cancelled());
                }
                SettingsService::reset_to_defaults(state)?;
                Outcome::notice(Notice::success("Settings restored to defaults"))
            }
        },

        Command::Theme { mode } => {
            let theme = match mode {
                ThemeMode::Light => SettingsService::set_theme(state, Theme::Light)?,
                ThemeMode::Dark => SettingsService::set_theme(state, Theme::Dark)?,
                ThemeMode::Toggle => SettingsService::toggle_theme(state)?,
            };
            Outcome::notice(Notice::success(format!("Theme: {}", theme.as_str())))
        }

        Command::Export {
            kind,
            output,
            stdout,
        } => {
            let document = ExportService::export(state, kind, clock.now)?;
            if stdout {
                Outcome::output(document.contents)
            } else {
                let dir = output.unwrap_or_else(|| config.export.output_dir.clone());
                let path = document.write_to(&dir)?;
                Outcome::notice(Notice::success(format!("Exported to {}", path.display())))
            }
        }

        Command::Import { file } => {
            let text = fs::read_to_string(&file)?;
            let summary = DataService::import(state, &text, clock.now)?;
            let message = match summary.tasks {
                Some(n) if !summary.profile && !summary.settings && summary.theme.is_none() => {
                    format!("{} tasks imported", n)
                }
                _ => "Data imported".to_string(),
            };
            Outcome::notice(Notice::success(message))
        }

        Command::ResetAccount => {
            if !prompt.confirm("Reset ALL tasks, statistics, profile and settings? This cannot be undone.") {
                return Ok(Outcome::cancelled());
            }
            DataService::reset_account_data(state)?;
            Outcome::notice(Notice::success("All data reset"))
        }

        Command::DeleteAccount => {
            if !prompt.confirm("Delete the account and ALL data? This cannot be undone.") {
                return Ok(Outcome::cancelled());
            }
            DataService::delete_account(state)?;
            Outcome::notice(Notice::success("Account deleted"))
        }

        Command::ClearData => {
            if !prompt.confirm("Clear ALL stored data, including tasks, profile and settings?") {
                return Ok(Outcome::cancelled());
            }
            DataService::clear_all_data(state)?;
            Outcome::notice(Notice::success("All data cleared"))
        }
    };

    Ok(outcome)
}

fn run_profile<S: BlobStore>(
    action: Option<ProfileAction>,
    state: &mut AppState<S>,
    prompt: &mut dyn Confirm,
    clock: Clock,
) -> TrackerResult<Outcome> {
    let outcome = match action.unwrap_or(ProfileAction::Show) {
        ProfileAction::Show => Outcome::output(render::profile(
            &state.profile,
            state.credentials.password_hash.is_some(),
        )),
        ProfileAction::Set {
            name,
            email,
            bio,
            daily_goal,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                bio,
                daily_goal,
            };
            ProfileService::update_profile(state, update, clock.today)?;
            Outcome::notice(Notice::success("Profile saved"))
        }
        ProfileAction::Prefs {
            notifications,
            weekly_reports,
            public_profile,
        } => {
            let prefs = PreferenceUpdate {
                notifications,
                weekly_reports,
                public_profile,
            };
            ProfileService::update_preferences(state, prefs)?;
            Outcome::notice(Notice::success("Preferences saved"))
        }
        ProfileAction::Avatar => {
            let avatar = ProfileService::cycle_avatar(state)?;
            Outcome::notice(Notice::success(format!("Avatar: {}", avatar)))
        }
        ProfileAction::Password => {
            let Some(password) = prompt.ask("New password (at least 6 characters):") else {
                return Ok(Outcome::cancelled());
            };
            ProfileService::change_password(state, &Secret::new(password))?;
            Outcome::notice(Notice::success("Password changed"))
        }
    };
    Ok(outcome)
}
