//! FocusUp Application Library
//!
//! This library exposes the app modules for use by the `focusup` binary
//! and the integration tests.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod notice;
pub mod services;
pub mod state;
pub mod storage;
