//! CLI type definitions

use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::domain::models::LogLevel;

#[derive(Parser, Debug)]
#[command(name = "tracelog")]
#[command(about = "Log standard input through pattern appenders", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file; defaults to .tracelog/config.yaml plus TRACELOG_* variables
    #[arg(short, long, env = "TRACELOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Level every input line is logged at
    #[arg(short, long, default_value = "info")]
    pub level: LogLevel,

    /// Pattern replacing the pattern of every appender
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Verbosity of tracelog's own diagnostics on stderr (RUST_LOG overrides)
    #[arg(long, default_value = "warn")]
    pub diagnostics: LevelFilter,
}
