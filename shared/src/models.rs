//! Data models for the FocusUp tracker
//!
//! Field names serialize in camelCase so persisted blobs and exported
//! documents keep the shape the browser front end reads and writes.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task priority
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "Invalid priority '{}'. Must be one of: low, medium, high",
                other
            )),
        }
    }
}

/// Task category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    #[default]
    Study,
    Personal,
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Study,
        Category::Personal,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Study => "study",
            Category::Personal => "personal",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" => Ok(Category::Work),
            "study" => Ok(Category::Study),
            "personal" => Ok(Category::Personal),
            "other" => Ok(Category::Other),
            other => Err(format!(
                "Invalid category '{}'. Must be one of: work, study, personal, other",
                other
            )),
        }
    }
}

/// A single task record
///
/// `completed_at` is `Some` exactly when `completed` is true; use
/// [`Task::set_completed`] rather than touching the two fields separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Mark the task completed (stamping `at`) or reopen it
    pub fn set_completed(&mut self, completed: bool, at: DateTime<Utc>) {
        self.completed = completed;
        self.completed_at = if completed { Some(at) } else { None };
    }

    /// Case-insensitive substring match on title or description.
    /// `term` must already be lowercased.
    pub fn matches_search(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(term))
    }
}

/// Avatars the profile cycles through, in order
pub const AVATARS: &[&str] = &[
    "fa-user",
    "fa-user-astronaut",
    "fa-user-ninja",
    "fa-user-tie",
    "fa-user-graduate",
];

/// Next avatar in the cycle. Unknown avatars restart at the first entry.
pub fn next_avatar(current: &str) -> &'static str {
    let next = AVATARS
        .iter()
        .position(|a| *a == current)
        .map(|i| (i + 1) % AVATARS.len())
        .unwrap_or(0);
    AVATARS[next]
}

/// User profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
    pub daily_goal: u32,
    pub level: u8,
    pub join_date: Option<NaiveDate>,
    pub notifications: bool,
    pub weekly_reports: bool,
    pub public_profile: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            bio: String::new(),
            avatar: AVATARS[0].to_string(),
            daily_goal: 5,
            level: 1,
            join_date: Some(Local::now().date_naive()),
            notifications: true,
            weekly_reports: false,
            public_profile: false,
        }
    }
}

/// Font size preference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            other => Err(format!(
                "Invalid font size '{}'. Must be one of: small, medium, large",
                other
            )),
        }
    }
}

/// Application settings and presentation preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub version: String,
    pub primary_color: String,
    pub font_size: FontSize,
    pub animations: bool,
    pub task_reminders: bool,
    pub daily_summary: bool,
    pub notification_sound: bool,
    pub auto_backup: bool,
    pub auto_save: bool,
    pub start_page: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            primary_color: "#009B77".to_string(),
            font_size: FontSize::Medium,
            animations: true,
            task_reminders: true,
            daily_summary: false,
            notification_sound: true,
            auto_backup: true,
            auto_save: true,
            start_page: "tasks".to_string(),
        }
    }
}

/// Cached statistics snapshot
///
/// Derived from the task list and regenerable at any time, except for
/// `longest_streak` which is carried forward as a personal record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub average_completion_time: u32,
    pub productivity_score: u32,
}

/// Color theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Invalid theme '{}'. Must be light or dark", other)),
        }
    }
}

/// Stored password hash, kept apart from the profile so exports never carry it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Credentials {
    pub password_hash: Option<String>,
}
