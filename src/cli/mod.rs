//! Command-line interface
//!
//! `tracelog` reads standard input line by line and logs every line through
//! the configured appenders.

pub mod run;
pub mod types;

pub use run::{apply_overrides, execute, log_lines};
pub use types::Cli;
