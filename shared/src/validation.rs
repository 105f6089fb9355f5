//! Input validation functions
//!
//! Validators return `Result<(), String>` with a short message; callers
//! attach the field label through [`ValidationError`].

use crate::errors::AppError;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use validator::ValidateEmail;

/// Longest accepted task title
pub const MAX_TITLE_CHARS: usize = 100;
/// Longest accepted task description
pub const MAX_DESCRIPTION_CHARS: usize = 500;
/// Longest accepted profile bio
pub const MAX_BIO_CHARS: usize = 500;
/// Longest accepted display name
pub const MAX_NAME_CHARS: usize = 50;
/// Shortest accepted password
pub const MIN_PASSWORD_CHARS: usize = 6;
/// Largest accepted daily goal
pub const MAX_DAILY_GOAL: u32 = 100;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid")
});

/// Validate a task title (after trimming)
pub fn validate_title(title: &str) -> Result<(), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err(format!("Title must be at most {} characters", MAX_TITLE_CHARS));
    }
    Ok(())
}

/// Validate a task description (after trimming)
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.trim().chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_CHARS
        ));
    }
    Ok(())
}

/// Validate email format. An empty email means "not set" and is accepted.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Ok(());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate display name length
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(format!("Name must be at most {} characters", MAX_NAME_CHARS));
    }
    Ok(())
}

/// Validate profile bio length
pub fn validate_bio(bio: &str) -> Result<(), String> {
    if bio.chars().count() > MAX_BIO_CHARS {
        return Err(format!("Bio must be at most {} characters", MAX_BIO_CHARS));
    }
    Ok(())
}

/// Validate daily task goal
pub fn validate_daily_goal(goal: u32) -> Result<(), String> {
    if goal < 1 {
        return Err("Daily goal must be at least 1".to_string());
    }
    if goal > MAX_DAILY_GOAL {
        return Err(format!("Daily goal must be at most {}", MAX_DAILY_GOAL));
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        ));
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a `#RRGGBB` color
pub fn validate_hex_color(color: &str) -> Result<(), String> {
    if HEX_COLOR.is_match(color) {
        Ok(())
    } else {
        Err("Color must be in #RRGGBB format".to_string())
    }
}

/// Validate a start page name
pub fn validate_start_page(page: &str) -> Result<(), String> {
    if VALID_START_PAGES.contains(&page) {
        Ok(())
    } else {
        Err(format!(
            "Invalid start page. Must be one of: {}",
            VALID_START_PAGES.join(", ")
        ))
    }
}

/// Pages the app can open on start
pub const VALID_START_PAGES: &[&str] = &["home", "tasks", "statistics", "profile", "settings"];

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "title" => "Title",
        "description" => "Description",
        "name" => "Name",
        "email" => "Email",
        "bio" => "Bio",
        "daily_goal" | "dailyGoal" => "Daily Goal",
        "password" => "Password",
        "primary_color" | "primaryColor" => "Primary Color",
        "start_page" | "startPage" => "Start Page",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.user_message())
    }
}

/// Run a validator and label its failure with the field name
pub fn check_field(field: &str, result: Result<(), String>) -> Result<(), AppError> {
    result.map_err(|msg| ValidationError::new(field, &msg).into())
}
