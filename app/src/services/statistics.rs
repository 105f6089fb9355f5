//! Statistics service
//!
//! Keeps the cached statistics snapshot and the profile level in step
//! with the task list.

use crate::error::TrackerResult;
use crate::state::AppState;
use crate::storage::BlobStore;
use chrono::{Local, TimeZone};
use focusup_shared::{compute_statistics_in, statistics_report_in, user_level, Statistics, StatisticsReport};
use tracing::{debug, info};

/// Statistics service
pub struct StatisticsService;

impl StatisticsService {
    /// Recompute and save the snapshot, refreshing the profile level
    pub fn update_statistics<S: BlobStore>(state: &mut AppState<S>) -> TrackerResult<Statistics> {
        Self::update_statistics_in(state, &Local)
    }

    /// Same as [`Self::update_statistics`] with streak days taken in `tz`
    pub fn update_statistics_in<S: BlobStore, Tz: TimeZone>(
        state: &mut AppState<S>,
        tz: &Tz,
    ) -> TrackerResult<Statistics> {
        state.statistics = compute_statistics_in(state.tasks.tasks(), &state.statistics, tz);
        state.save_statistics()?;

        let level = user_level(state.tasks.completed_count());
        if state.profile.level != level {
            info!(from = state.profile.level, to = level, "Profile level changed");
            state.profile.level = level;
            state.save_profile()?;
        }

        debug!(
            total = state.statistics.total_tasks,
            completed = state.statistics.completed_tasks,
            streak = state.statistics.current_streak,
            score = state.statistics.productivity_score,
            "Statistics updated"
        );
        Ok(state.statistics)
    }

    /// Everything the statistics page shows, built on the cached snapshot
    pub fn report<S: BlobStore>(state: &AppState<S>) -> StatisticsReport {
        statistics_report_in(state.tasks.tasks(), state.statistics, &Local)
    }

    /// Drop the longest-streak record and rebuild the snapshot from the tasks
    pub fn reset<S: BlobStore>(state: &mut AppState<S>) -> TrackerResult<Statistics> {
        state.statistics = Statistics::default();
        let stats = Self::update_statistics(state)?;
        info!("Statistics reset");
        Ok(stats)
    }
}
