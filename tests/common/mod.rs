//! Common test utilities for integration tests
//!
//! Provides recording writers and appenders plus a fixed clock shared across
//! the integration test files.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset, TimeZone};
use tempfile::TempDir;
use tracelog::domain::models::OwnedLogEvent;
use tracelog::domain::ports::FixedClock;
use tracelog::{Appender, LogEvent, LogLevel, LogWriter};

/// 12343.123 seconds after the epoch, at UTC+01:00
pub fn fixed_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3600)
        .expect("valid offset")
        .timestamp_millis_opt(12_343_123)
        .single()
        .expect("valid timestamp")
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(fixed_time())
}

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Writer keeping every appended text in memory
#[derive(Default)]
pub struct RecordingWriter {
    texts: Mutex<Vec<String>>,
}

impl RecordingWriter {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }

    pub fn joined(&self) -> String {
        self.texts().concat()
    }
}

impl LogWriter for RecordingWriter {
    fn append(&self, text: &str) {
        self.texts.lock().unwrap().push(text.to_string());
    }
}

/// Appender recording the events it admits
pub struct RecordingAppender {
    threshold: LogLevel,
    events: Mutex<Vec<OwnedLogEvent>>,
}

impl RecordingAppender {
    pub fn shared(threshold: LogLevel) -> Arc<Self> {
        Arc::new(Self {
            threshold,
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<OwnedLogEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.message).collect()
    }
}

impl Appender for RecordingAppender {
    fn threshold(&self) -> &LogLevel {
        &self.threshold
    }

    fn dispatch(&self, event: &LogEvent<'_>) {
        if self.admits(&event.level) {
            self.events.lock().unwrap().push(event.clone().into_owned());
        }
    }
}

/// Setup test logging
///
/// Initializes a tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
