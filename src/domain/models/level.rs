use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

/// Severity of a log event
///
/// The six built-in levels are totally ordered from most verbose (`Verbose`)
/// to most severe (`Fatal`). `Custom` levels carry a name and only compare
/// equal to a custom level with the same name; they are never ordered against
/// other custom levels or against the built-ins, so `partial_cmp` yields
/// `None` for those pairs and both `<=` and `>=` are false.
///
/// # Examples
///
/// ```
/// use tracelog::domain::models::LogLevel;
///
/// assert!(LogLevel::Fatal > LogLevel::Info);
/// assert!(LogLevel::Verbose < LogLevel::Debug);
/// assert!(!(LogLevel::Info <= LogLevel::Custom("audit".into())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    /// Tiny, usually irrelevant information used when tracing code paths
    Verbose,
    /// Information used to debug problems
    Debug,
    /// A specific, infrequent event occurring
    Info,
    /// Something should be fixed but does not have to be solved yet
    Warning,
    /// Something went wrong and part of the execution failed
    Error,
    /// Execution should or must be cancelled
    Fatal,
    /// Application-defined level, unordered relative to every other level
    Custom(String),
}

impl LogLevel {
    /// All built-in levels in ascending order
    pub const BUILT_IN: [Self; 6] = [
        Self::Verbose,
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Fatal,
    ];

    const fn rank(&self) -> Option<u8> {
        match self {
            Self::Verbose => Some(0),
            Self::Debug => Some(1),
            Self::Info => Some(2),
            Self::Warning => Some(3),
            Self::Error => Some(4),
            Self::Fatal => Some(5),
            Self::Custom(_) => None,
        }
    }

    /// Returns `true` for the `Custom` variant
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Whether an appender with `self` as threshold accepts events at `level`
    pub fn admits(&self, level: &Self) -> bool {
        self <= level
    }

    /// Column-aligned name used by the `%level` directive
    ///
    /// ```
    /// use tracelog::domain::models::LogLevel;
    ///
    /// assert_eq!(LogLevel::Info.display_name(), "INFO ");
    /// assert_eq!(LogLevel::Custom("audit".into()).display_name(), "AUDIT");
    /// ```
    pub fn display_name(&self) -> String {
        match self {
            Self::Verbose => "TRACE".to_string(),
            Self::Debug => "DEBUG".to_string(),
            Self::Info => "INFO ".to_string(),
            Self::Warning => "WARN ".to_string(),
            Self::Error => "ERROR".to_string(),
            Self::Fatal => "FATAL".to_string(),
            Self::Custom(name) => format!("{:<5}", name.to_uppercase()),
        }
    }

    /// Canonical configuration name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Custom(name) => name,
        }
    }
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.rank(), other.rank()) {
            (Some(lhs), Some(rhs)) => Some(lhs.cmp(&rhs)),
            _ if self == other => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidLogLevel(s.to_string()));
        }

        Ok(match trimmed.to_lowercase().as_str() {
            "verbose" | "trace" => Self::Verbose,
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warning" | "warn" => Self::Warning,
            "error" => Self::Error,
            "fatal" => Self::Fatal,
            _ => Self::Custom(trimmed.to_string()),
        })
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, ConfigError> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}
