use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::file_size::FileSize;
use super::level::LogLevel;

/// Pattern used when an appender does not configure one
pub const DEFAULT_PATTERN: &str = "%date{HH:mm:ss.SSS} %level %file[%line] - %msg%n";

/// Root logging configuration
///
/// An empty appender list means "use the default console appender".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Replaces the threshold of every appender when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,

    /// Appenders, evaluated in order for every event
    #[serde(default)]
    pub appenders: Vec<AppenderConfig>,
}

/// One appender: a pattern, a threshold and the writers it feeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AppenderConfig {
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Minimum level this appender accepts
    #[serde(default = "default_level")]
    pub level: LogLevel,

    #[serde(default)]
    pub writers: Vec<WriterConfig>,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

const fn default_level() -> LogLevel {
    LogLevel::Debug
}

impl Default for AppenderConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            level: default_level(),
            writers: vec![WriterConfig::Console {
                stream: ConsoleStream::default(),
            }],
        }
    }
}

/// Writer selection, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WriterConfig {
    Console {
        #[serde(default)]
        stream: ConsoleStream,
    },
    File(FileWriterConfig),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

/// Rotating file writer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileWriterConfig {
    /// Directory holding the live file and its archives
    pub directory: PathBuf,

    pub file_name: String,

    /// Rotate once the live file reaches this size
    #[serde(default)]
    pub max_file_size: FileSize,

    /// Number of archives kept (`<file_name>.1` .. `<file_name>.N`)
    #[serde(default = "default_max_archive_count")]
    pub max_archive_count: u32,
}

const fn default_max_archive_count() -> u32 {
    100
}

impl FileWriterConfig {
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
            max_file_size: FileSize::default(),
            max_archive_count: default_max_archive_count(),
        }
    }

    #[must_use]
    pub const fn with_max_file_size(mut self, max_file_size: FileSize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    #[must_use]
    pub const fn with_max_archive_count(mut self, max_archive_count: u32) -> Self {
        self.max_archive_count = max_archive_count;
        self
    }

    /// Full path of the live log file
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}
