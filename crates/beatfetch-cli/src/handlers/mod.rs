//! Command handlers.
//!
//! Each handler receives the composed [`crate::CliContext`] and returns a
//! [`crate::CliError`] on failure.

pub mod download;
pub mod search;
