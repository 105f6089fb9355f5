//! Integration tests for the on-disk store

mod common;

use common::TestApp;
use focusup_app::services::TaskService;
use focusup_app::storage::{keys, BlobStore, FileBlobStore};
use focusup_shared::{FontSize, NewTask, Theme};
use proptest::prelude::*;
use secrecy::Secret;
use std::fs;
use tempfile::TempDir;

fn file_app(dir: &TempDir) -> TestApp<FileBlobStore> {
    TestApp::with_store(FileBlobStore::new(dir.path()))
}

#[test]
fn test_every_record_survives_restart() {
    let dir = TempDir::new().unwrap();
    let mut app = file_app(&dir);

    app.run(&["add", "Persisted", "-p", "high"]).unwrap();
    app.run(&["profile", "set", "--name", "Ilze", "--bio", "Reader"]).unwrap();
    app.run(&["settings", "set", "font-size", "small"]).unwrap();
    app.run(&["theme", "dark"]).unwrap();
    focusup_app::services::ProfileService::change_password(
        &mut app.state,
        &Secret::new("focus123".to_string()),
    )
    .unwrap();

    let app = app.restart();
    assert_eq!(app.state.tasks.len(), 1);
    assert_eq!(app.state.tasks.tasks()[0].title, "Persisted");
    assert_eq!(app.state.profile.name, "Ilze");
    assert_eq!(app.state.settings.font_size, FontSize::Small);
    assert_eq!(app.state.theme, Theme::Dark);
    assert_eq!(app.state.statistics.total_tasks, 1);
    assert!(app.state.credentials.password_hash.is_some());
}

#[test]
fn test_theme_is_stored_as_bare_text() {
    let dir = TempDir::new().unwrap();
    let mut app = file_app(&dir);
    app.run(&["theme", "dark"]).unwrap();

    let stored = fs::read_to_string(dir.path().join(format!("{}.json", keys::THEME))).unwrap();
    assert_eq!(stored, "dark");
}

#[test]
fn test_corrupt_record_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(format!("{}.json", keys::TASKS)), "[{broken").unwrap();
    fs::write(dir.path().join(format!("{}.json", keys::THEME)), "\"dark\"").unwrap();

    let app = file_app(&dir);
    assert!(app.state.tasks.is_empty());
    assert_eq!(app.state.theme, Theme::Dark);
}

#[test]
fn test_delete_account_removes_owned_files_only() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "keep").unwrap();
    let mut app = file_app(&dir);
    app.run(&["add", "Gone"]).unwrap();
    app.run(&["theme", "dark"]).unwrap();

    app.run(&["delete-account"]).unwrap();
    assert!(app.state.tasks.is_empty());
    assert_eq!(app.state.theme, Theme::Light);
    for key in keys::ALL {
        assert!(app.state.persistence().store().get(key).unwrap().is_none());
    }
    assert!(dir.path().join("notes.txt").exists());
}

#[test]
fn test_clear_data_empties_store() {
    let dir = TempDir::new().unwrap();
    let mut app = file_app(&dir);
    app.run(&["add", "Gone"]).unwrap();
    app.run(&["profile", "set", "--name", "Ilze"]).unwrap();

    app.run(&["clear-data"]).unwrap();
    let app = app.restart();
    assert!(app.state.tasks.is_empty());
    assert_eq!(app.state.profile.name, "");
}

#[test]
fn test_reset_account_keeps_theme_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut app = file_app(&dir);
    app.run(&["add", "Gone"]).unwrap();
    app.run(&["theme", "dark"]).unwrap();

    app.run(&["reset-account"]).unwrap();
    let app = app.restart();
    assert!(app.state.tasks.is_empty());
    assert_eq!(app.state.statistics.total_tasks, 0);
    assert_eq!(app.state.theme, Theme::Dark);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_saved_tasks_reload_unchanged(titles in prop::collection::vec("[a-zA-Z][a-zA-Z ]{0,30}", 1..8)) {
        let dir = TempDir::new().unwrap();
        let mut app = file_app(&dir);
        for title in &titles {
            TaskService::add(&mut app.state, NewTask::new(title.clone()), app.clock.now).unwrap();
        }
        let before = app.state.tasks.tasks().to_vec();

        let app = app.restart();
        prop_assert_eq!(app.state.tasks.tasks(), before.as_slice());
    }
}
