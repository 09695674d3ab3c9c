//! Execution of the `tracelog` command

use std::io::BufRead;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::types::Cli;
use crate::domain::models::{AppenderConfig, CallSite, LogLevel, LoggingConfig};
use crate::infrastructure::config::ConfigLoader;
use crate::services::Dispatcher;

/// File name recorded as the call site of every input line
pub const INPUT_FILE: &str = "stdin";

/// Function name recorded as the call site of every input line
pub const INPUT_FUNCTION: &str = "main";

/// Loads configuration, builds the dispatcher and logs `input`
///
/// Returns the number of lines read.
pub fn execute(cli: &Cli, input: impl BufRead) -> Result<u64> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    apply_overrides(&mut config, cli.pattern.as_deref());

    let dispatcher =
        ConfigLoader::build_dispatcher(&config).context("Failed to set up log writers")?;
    debug!(
        appenders = dispatcher.appenders().len(),
        level = %dispatcher.level(),
        "dispatcher ready"
    );

    let lines = log_lines(&dispatcher, &cli.level, input)?;
    info!(lines, "input exhausted");
    Ok(lines)
}

/// Replaces every appender's pattern with `pattern`
///
/// With no appenders configured, a default console appender is added first
/// so the override still takes effect.
pub fn apply_overrides(config: &mut LoggingConfig, pattern: Option<&str>) {
    let Some(pattern) = pattern else {
        return;
    };

    if config.appenders.is_empty() {
        config.appenders.push(AppenderConfig::default());
    }
    for appender in &mut config.appenders {
        appender.pattern = pattern.to_string();
    }
}

/// Logs each line of `input` at `level`, with the line number as call site line
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of ending
/// the run.
pub fn log_lines(
    dispatcher: &Dispatcher,
    level: &LogLevel,
    mut input: impl BufRead,
) -> Result<u64> {
    let mut count = 0u64;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read standard input")?;
        if read == 0 {
            break;
        }

        count += 1;
        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        let number = u32::try_from(count).unwrap_or(u32::MAX);
        dispatcher.log(
            level.clone(),
            CallSite::new(INPUT_FILE, INPUT_FUNCTION, number, 1),
            &line,
        );
    }
    Ok(count)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
