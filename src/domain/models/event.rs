use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};

use super::level::LogLevel;

/// Source location of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite<'a> {
    /// Path of the originating source file
    pub file: &'a str,
    /// Function (or module path) that issued the call
    pub function: &'a str,
    pub line: u32,
    pub column: u32,
}

impl<'a> CallSite<'a> {
    pub const fn new(file: &'a str, function: &'a str, line: u32, column: u32) -> Self {
        Self {
            file,
            function,
            line,
            column,
        }
    }
}

/// Immutable record of one log call
///
/// Built once by the dispatcher and only read by appenders afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent<'a> {
    /// Time captured at the start of the log call
    pub timestamp: DateTime<FixedOffset>,
    pub level: LogLevel,
    pub site: CallSite<'a>,
    /// Message body, after placeholder substitution
    pub message: Cow<'a, str>,
}

impl<'a> LogEvent<'a> {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        level: LogLevel,
        site: CallSite<'a>,
        message: impl Into<Cow<'a, str>>,
    ) -> Self {
        Self {
            timestamp,
            level,
            site,
            message: message.into(),
        }
    }

    /// Detaches the event from borrowed call-site data so it can be stored
    pub fn into_owned(self) -> OwnedLogEvent {
        OwnedLogEvent {
            timestamp: self.timestamp,
            level: self.level,
            file: self.site.file.to_string(),
            function: self.site.function.to_string(),
            line: self.site.line,
            column: self.site.column,
            message: self.message.into_owned(),
        }
    }
}

/// Owned copy of a [`LogEvent`], for appenders that keep events around
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedLogEvent {
    pub timestamp: DateTime<FixedOffset>,
    pub level: LogLevel,
    pub file: String,
    pub function: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl OwnedLogEvent {
    /// Borrows the stored fields back into a renderable event
    pub fn as_event(&self) -> LogEvent<'_> {
        LogEvent {
            timestamp: self.timestamp,
            level: self.level.clone(),
            site: CallSite::new(&self.file, &self.function, self.line, self.column),
            message: Cow::Borrowed(&self.message),
        }
    }
}
