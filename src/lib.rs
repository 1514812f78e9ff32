//! Rule-driven filtering and rewriting of Drupal 7 upgrade migration rows.
//!
//! A [`core::RowProcessor`] takes one source row plus the identity of the
//! migration it belongs to, runs the rule steps the
//! [`core::MigrationDispatcher`] selects, and either forwards the (possibly
//! patched) row or reports why it was skipped.

pub mod cli;
pub mod core;
pub mod logging;
pub mod utils;

/// Current crate version string exposed for CLI and tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type Result<T> = std::result::Result<T, anyhow::Error>;
