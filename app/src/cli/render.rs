//! Plain-text rendering of tasks, statistics, profile and settings

use focusup_shared::{Profile, Settings, StatisticsReport, Task, TaskCounters, Theme};
use std::fmt::Write;

/// One line per task, followed by the counters
pub fn task_table(tasks: &[&Task], counters: TaskCounters) -> String {
    let mut out = String::new();
    if tasks.is_empty() {
        out.push_str("No tasks\n");
    }
    for task in tasks {
        let mark = if task.completed { "x" } else { " " };
        let deadline = task
            .deadline
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "[{}] {:<14} {:<6} {:<8} {:<10} {}",
            mark, task.id, task.priority, task.category, deadline, task.title
        );
        if let Some(description) = &task.description {
            let _ = writeln!(out, "    {}", description);
        }
    }
    let _ = writeln!(
        out,
        "{} total, {} completed, {} active",
        counters.total, counters.completed, counters.active
    );
    out
}

pub fn statistics(report: &StatisticsReport) -> String {
    let stats = &report.snapshot;
    let mut out = String::new();
    let _ = writeln!(out, "Total tasks:        {}", stats.total_tasks);
    let _ = writeln!(out, "Completed:          {}", stats.completed_tasks);
    let _ = writeln!(out, "Active:             {}", report.active_tasks);
    let _ = writeln!(out, "Completion rate:    {}%", report.completion_rate);
    let _ = writeln!(out, "Current streak:     {} days", stats.current_streak);
    let _ = writeln!(out, "Longest streak:     {} days", stats.longest_streak);
    let _ = writeln!(out, "Avg. completion:    {} days", stats.average_completion_time);
    let _ = writeln!(out, "Productivity score: {}", stats.productivity_score);
    let _ = writeln!(out, "Level:              {}", report.level);
    if let Some(first) = report.first_task_date {
        let _ = writeln!(out, "First task:         {}", first);
    }

    out.push_str("\nCategories\n");
    for c in &report.categories {
        let _ = writeln!(
            out,
            "  {:<9} {:>3}/{:<3} {:>3}%",
            c.category, c.completed, c.total, c.rate
        );
    }

    out.push_str("\nAchievements\n");
    for a in &report.achievements {
        let mark = if a.is_unlocked() { "x" } else { " " };
        let _ = writeln!(out, "  [{}] {} ({}/{})", mark, a.label, a.current, a.target);
    }
    out
}

pub fn profile(profile: &Profile, has_password: bool) -> String {
    let or_unset = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
    let mut out = String::new();
    let _ = writeln!(out, "Name:           {}", or_unset(&profile.name));
    let _ = writeln!(out, "Email:          {}", or_unset(&profile.email));
    let _ = writeln!(out, "Bio:            {}", or_unset(&profile.bio));
    let _ = writeln!(out, "Avatar:         {}", profile.avatar);
    let _ = writeln!(out, "Daily goal:     {}", profile.daily_goal);
    let _ = writeln!(out, "Level:          {}", profile.level);
    let _ = writeln!(
        out,
        "Joined:         {}",
        profile
            .join_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    let _ = writeln!(out, "Notifications:  {}", on_off(profile.notifications));
    let _ = writeln!(out, "Weekly reports: {}", on_off(profile.weekly_reports));
    let _ = writeln!(out, "Public profile: {}", on_off(profile.public_profile));
    let _ = writeln!(out, "Password:       {}", if has_password { "set" } else { "not set" });
    out
}

pub fn settings(settings: &Settings, theme: Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "dark-mode          {}", on_off(theme == Theme::Dark));
    let _ = writeln!(out, "font-size          {}", settings.font_size.as_str());
    let _ = writeln!(out, "primary-color      {}", settings.primary_color);
    let _ = writeln!(out, "animations         {}", on_off(settings.animations));
    let _ = writeln!(out, "task-reminders     {}", on_off(settings.task_reminders));
    let _ = writeln!(out, "daily-summary      {}", on_off(settings.daily_summary));
    let _ = writeln!(out, "notification-sound {}", on_off(settings.notification_sound));
    let _ = writeln!(out, "auto-backup        {}", on_off(settings.auto_backup));
    let _ = writeln!(out, "auto-save          {}", on_off(settings.auto_save));
    let _ = writeln!(out, "start-page         {}", settings.start_page);
    let _ = writeln!(out, "version            {}", settings.version);
    out
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use focusup_shared::{Category, Priority};

    #[test]
    fn test_task_table_marks_completed() {
        let task = Task {
            id: 7,
            title: "Stretch".to_string(),
            description: None,
            deadline: None,
            priority: Priority::Low,
            category: Category::Personal,
            completed: true,
            created_at: Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap(),
            completed_at: Some(Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()),
        };
        let counters = TaskCounters {
            total: 1,
            completed: 1,
            active: 0,
        };
        let table = task_table(&[&task], counters);
        assert!(table.starts_with("[x] 7"));
        assert!(table.contains("Stretch"));
        assert!(table.ends_with("1 total, 1 completed, 0 active\n"));
    }

    #[test]
    fn test_empty_table() {
        let table = task_table(&[], TaskCounters::default());
        assert!(table.starts_with("No tasks"));
    }
}
