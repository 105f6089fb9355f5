//! Profile service for user profile management
//!
//! Handles profile edits with validation, notification preferences,
//! the avatar cycle and the local password.

use crate::auth::PasswordService;
use crate::error::{TrackerError, TrackerResult};
use crate::state::AppState;
use crate::storage::BlobStore;
use chrono::NaiveDate;
use focusup_shared::validation::{
    check_field, validate_bio, validate_daily_goal, validate_email, validate_name,
    validate_password,
};
use focusup_shared::{next_avatar, user_level, Profile};
use secrecy::{ExposeSecret, Secret};
use tracing::info;

/// Profile fields to change. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub daily_goal: Option<u32>,
}

/// Notification and visibility preferences to change
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceUpdate {
    pub notifications: Option<bool>,
    pub weekly_reports: Option<bool>,
    pub public_profile: Option<bool>,
}

/// Profile service
pub struct ProfileService;

impl ProfileService {
    /// Validate all provided fields before touching the profile
    fn validate_profile_update(update: &ProfileUpdate) -> TrackerResult<()> {
        if let Some(ref name) = update.name {
            check_field("name", validate_name(name.trim()))?;
        }
        if let Some(ref email) = update.email {
            check_field("email", validate_email(email.trim()))?;
        }
        if let Some(ref bio) = update.bio {
            check_field("bio", validate_bio(bio.trim()))?;
        }
        if let Some(goal) = update.daily_goal {
            check_field("daily_goal", validate_daily_goal(goal))?;
        }
        Ok(())
    }

    /// Update profile fields with validation
    ///
    /// Text fields are trimmed. The join date is set to `today` if it was
    /// never recorded, and the level is refreshed from the task list.
    pub fn update_profile<S: BlobStore>(
        state: &mut AppState<S>,
        update: ProfileUpdate,
        today: NaiveDate,
    ) -> TrackerResult<Profile> {
        Self::validate_profile_update(&update)?;

        let profile = &mut state.profile;
        if let Some(name) = update.name {
            profile.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            profile.email = email.trim().to_string();
        }
        if let Some(bio) = update.bio {
            profile.bio = bio.trim().to_string();
        }
        if let Some(goal) = update.daily_goal {
            profile.daily_goal = goal;
        }
        profile.join_date.get_or_insert(today);
        profile.level = user_level(state.tasks.completed_count());

        state.save_profile()?;
        info!(level = state.profile.level, "Profile saved");
        Ok(state.profile.clone())
    }

    /// Update notification and visibility preferences
    pub fn update_preferences<S: BlobStore>(
        state: &mut AppState<S>,
        prefs: PreferenceUpdate,
    ) -> TrackerResult<Profile> {
        let profile = &mut state.profile;
        if let Some(v) = prefs.notifications {
            profile.notifications = v;
        }
        if let Some(v) = prefs.weekly_reports {
            profile.weekly_reports = v;
        }
        if let Some(v) = prefs.public_profile {
            profile.public_profile = v;
        }
        state.save_profile()?;
        Ok(state.profile.clone())
    }

    /// Move to the next avatar in the cycle
    pub fn cycle_avatar<S: BlobStore>(state: &mut AppState<S>) -> TrackerResult<String> {
        state.profile.avatar = next_avatar(&state.profile.avatar).to_string();
        state.save_profile()?;
        Ok(state.profile.avatar.clone())
    }

    /// Replace the stored password hash
    pub fn change_password<S: BlobStore>(
        state: &mut AppState<S>,
        password: &Secret<String>,
    ) -> TrackerResult<()> {
        check_field("password", validate_password(password.expose_secret()))?;

        let hash = PasswordService::hash(password).map_err(TrackerError::Internal)?;
        state.credentials.password_hash = Some(hash);
        state.save_credentials()?;
        info!("Password changed");
        Ok(())
    }

    /// Check a password against the stored hash. No password set means no match.
    pub fn verify_password<S: BlobStore>(
        state: &AppState<S>,
        password: &Secret<String>,
    ) -> TrackerResult<bool> {
        match state.credentials.password_hash.as_deref() {
            Some(hash) => PasswordService::verify(password, hash).map_err(TrackerError::Internal),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[rstest]
    #[case(ProfileUpdate { email: Some("not-an-email".into()), ..Default::default() })]
    #[case(ProfileUpdate { bio: Some("x".repeat(501)), ..Default::default() })]
    #[case(ProfileUpdate { daily_goal: Some(0), ..Default::default() })]
    fn test_invalid_update_changes_nothing(#[case] update: ProfileUpdate) {
        let mut state = AppState::load(MemoryBlobStore::new());
        let before = state.profile.clone();

        let err = ProfileService::update_profile(&mut state, update, today()).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(state.profile, before);
    }

    #[test]
    fn test_update_trims_and_sets_join_date() {
        let mut state = AppState::load(MemoryBlobStore::new());
        state.profile.join_date = None;

        let update = ProfileUpdate {
            name: Some("  Ilze  ".into()),
            email: Some(" ilze@example.com ".into()),
            daily_goal: Some(8),
            ..Default::default()
        };
        let profile = ProfileService::update_profile(&mut state, update, today()).unwrap();
        assert_eq!(profile.name, "Ilze");
        assert_eq!(profile.email, "ilze@example.com");
        assert_eq!(profile.daily_goal, 8);
        assert_eq!(profile.join_date, Some(today()));
    }

    #[test]
    fn test_empty_email_is_allowed() {
        let mut state = AppState::load(MemoryBlobStore::new());
        let update = ProfileUpdate {
            email: Some("   ".into()),
            ..Default::default()
        };
        assert!(ProfileService::update_profile(&mut state, update, today()).is_ok());
    }

    #[test]
    fn test_avatar_cycles_back_to_start() {
        let mut state = AppState::load(MemoryBlobStore::new());
        let seen: Vec<String> = (0..5)
            .map(|_| ProfileService::cycle_avatar(&mut state).unwrap())
            .collect();
        assert_eq!(seen[0], "fa-user-astronaut");
        assert_eq!(seen[4], "fa-user");
    }

    #[test]
    fn test_password_change_and_verify() {
        let mut state = AppState::load(MemoryBlobStore::new());
        let short = Secret::new("12345".to_string());
        assert!(ProfileService::change_password(&mut state, &short).is_err());
        assert!(!ProfileService::verify_password(&state, &short).unwrap());

        let good = Secret::new("focus123".to_string());
        ProfileService::change_password(&mut state, &good).unwrap();
        assert!(ProfileService::verify_password(&state, &good).unwrap());
        assert!(!ProfileService::verify_password(&state, &short).unwrap());
    }
}
