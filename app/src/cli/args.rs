//! Command-line arguments

use crate::services::ExportKind;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use focusup_shared::{Category, Priority, TaskFilter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "focusup", version, about = "Personal task and productivity tracker")]
pub struct Cli {
    /// Directory holding the data files. Overrides the configured one.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a new task
    Add {
        title: String,
        #[arg(long, short)]
        description: Option<String>,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        deadline: Option<NaiveDate>,
        #[arg(long, short, default_value = "medium")]
        priority: Priority,
        #[arg(long, short, default_value = "study")]
        category: Category,
    },
    /// List tasks
    List {
        /// all, active, completed, due-today or high-priority
        #[arg(long, short, default_value = "all")]
        filter: TaskFilter,
        /// Case-insensitive text to look for in title or description
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long)]
        json: bool,
    },
    /// Mark a task completed, or reopen it
    Toggle { id: i64 },
    /// Change a task's title or description
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a task
    Delete { id: i64 },
    /// Mark every open task completed
    CompleteAll,
    /// Delete every completed task
    DeleteCompleted,
    /// Show statistics
    Stats {
        #[command(subcommand)]
        action: Option<StatsAction>,
        #[arg(long)]
        json: bool,
    },
    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
    /// Switch the color theme
    Theme { mode: ThemeMode },
    /// Write an export document
    Export {
        /// tasks, statistics, user-data, all-data or csv
        kind: ExportKind,
        /// Output directory. Defaults to the configured export directory.
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Print the document instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Import a task array or a full data document
    Import { file: PathBuf },
    /// Reset tasks, statistics, profile and settings to defaults
    ResetAccount,
    /// Remove every stored record
    DeleteAccount,
    /// Clear the whole data directory
    ClearData,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum StatsAction {
    /// Recompute and save the snapshot
    Refresh,
    /// Zero the snapshot
    Reset,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileAction {
    Show,
    /// Update profile fields
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        daily_goal: Option<u32>,
    },
    /// Update notification and visibility preferences
    Prefs {
        #[arg(long)]
        notifications: Option<bool>,
        #[arg(long)]
        weekly_reports: Option<bool>,
        #[arg(long)]
        public_profile: Option<bool>,
    },
    /// Switch to the next avatar
    Avatar,
    /// Set a new password (read from stdin)
    Password,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsAction {
    Show,
    /// Change one setting, e.g. `font-size large` or `animations off`
    Set { name: String, value: String },
    /// Restore defaults and the light theme
    Reset,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
    Toggle,
}
