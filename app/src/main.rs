//! FocusUp command-line tracker
//!
//! A personal task and productivity tracker that keeps its data in a local
//! directory.
//!
//! ## Architecture
//!
//! - CLI: argument parsing, confirmations and rendering
//! - Services: business logic over the in-memory application state
//! - Storage: one JSON document per key in the data directory

use anyhow::Result;
use clap::Parser;
use focusup_app::cli::{self, Cli, Clock, StdinPrompt};
use focusup_app::config::{AppConfig, LoggingConfig};
use focusup_app::state::AppState;
use focusup_app::storage::FileBlobStore;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?.with_data_dir(args.data_dir.clone());

    // Initialize tracing
    init_tracing(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        data_dir = %config.storage.data_dir.display(),
        "Starting FocusUp"
    );

    let mut state = AppState::load(FileBlobStore::new(&config.storage.data_dir));
    let mut prompt = StdinPrompt::new(args.yes);

    match cli::run(args.command, &mut state, &mut prompt, &config, Clock::system()) {
        Ok(outcome) => {
            if let Some(output) = outcome.output {
                print!("{}", output);
                if !output.ends_with('\n') {
                    println!();
                }
            }
            if let Some(notice) = outcome.notice {
                eprintln!("{}", notice);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            debug!(code = err.code(), "Command failed");
            if let Some(notice) = err.notice() {
                eprintln!("{}", notice);
            }
            Ok(ExitCode::from(err.exit_code() as u8))
        }
    }
}

/// Initialize tracing/logging on stderr
fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("focusup={0},focusup_app={0}", logging.level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if logging.json || AppConfig::is_production() {
        // JSON lines for log aggregation
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
