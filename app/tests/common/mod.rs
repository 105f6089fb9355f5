//! Common test utilities for integration tests
//!
//! This module provides an in-memory application and a scripted prompt
//! so CLI commands can run without a terminal.
#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone, Utc};
use clap::Parser;
use focusup_app::cli::{self, Cli, Clock, Confirm, Outcome};
use focusup_app::config::AppConfig;
use focusup_app::error::TrackerResult;
use focusup_app::state::AppState;
use focusup_app::storage::{BlobStore, MemoryBlobStore};
use std::collections::VecDeque;

/// Prompt that replays canned answers
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    pub confirm_answer: bool,
    pub answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn yes() -> Self {
        Self {
            confirm_answer: true,
            ..Default::default()
        }
    }

    pub fn no() -> Self {
        Self::default()
    }

    pub fn with_answer(mut self, answer: &str) -> Self {
        self.answers.push_back(answer.to_string());
        self
    }
}

impl Confirm for ScriptedPrompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.asked.push(prompt.to_string());
        self.confirm_answer
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front()
    }
}

/// Test application wrapper
pub struct TestApp<S: BlobStore = MemoryBlobStore> {
    pub state: AppState<S>,
    pub config: AppConfig,
    pub clock: Clock,
}

impl TestApp<MemoryBlobStore> {
    /// Fresh application over an empty in-memory store
    pub fn new() -> Self {
        Self::with_store(MemoryBlobStore::new())
    }
}

impl<S: BlobStore> TestApp<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            state: AppState::load(store),
            config: AppConfig::default(),
            clock: clock_at(Utc::now()),
        }
    }

    /// Run a command line (without the program name)
    pub fn run_with(&mut self, line: &[&str], prompt: &mut ScriptedPrompt) -> TrackerResult<Outcome> {
        let args = std::iter::once("focusup").chain(line.iter().copied());
        let parsed = Cli::try_parse_from(args).expect("command line parses");
        cli::run(parsed.command, &mut self.state, prompt, &self.config, self.clock)
    }

    /// Run a command line, answering yes to every confirmation
    pub fn run(&mut self, line: &[&str]) -> TrackerResult<Outcome> {
        self.run_with(line, &mut ScriptedPrompt::yes())
    }

    /// Reload the state from the same store, as a new process would
    pub fn restart(self) -> Self {
        let store = self.state.into_store();
        Self {
            state: AppState::load(store),
            config: self.config,
            clock: self.clock,
        }
    }
}

pub fn clock_at(now: DateTime<Utc>) -> Clock {
    Clock {
        now,
        today: now.with_timezone(&Local).date_naive(),
    }
}

/// Noon local time `days_ago` days before today, as UTC
pub fn local_noon_days_ago(days_ago: i64) -> DateTime<Utc> {
    let date = Local::now().date_naive() - chrono::Duration::days(days_ago);
    let noon = date.and_hms_opt(12, 0, 0).expect("valid time");
    Local
        .from_local_datetime(&noon)
        .earliest()
        .expect("noon exists locally")
        .with_timezone(&Utc)
}
