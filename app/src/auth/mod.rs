//! Local password protection
//!
//! The profile password is hashed with argon2 and stored apart from the
//! profile record.

mod password;

pub use password::PasswordService;
