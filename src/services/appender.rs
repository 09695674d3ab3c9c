use std::fmt;
use std::sync::Arc;

use crate::domain::models::{CompiledPattern, LogEvent, LogLevel};
use crate::domain::ports::{Appender, LogWriter};
use crate::services::pattern_compiler::PatternCompiler;
use crate::services::renderer::render;

/// Appender rendering events through a compiled pattern into its writers
///
/// The pattern is compiled once at construction. Writers are shared (`Arc`),
/// so one file or console writer can serve several appenders.
pub struct PatternAppender {
    pattern: CompiledPattern,
    threshold: LogLevel,
    writers: Vec<Arc<dyn LogWriter>>,
}

impl PatternAppender {
    pub fn new(pattern: &str, threshold: LogLevel, writers: Vec<Arc<dyn LogWriter>>) -> Self {
        Self {
            pattern: PatternCompiler::new().compile(pattern),
            threshold,
            writers,
        }
    }

    /// Appender with a single writer
    pub fn with_writer(pattern: &str, threshold: LogLevel, writer: Arc<dyn LogWriter>) -> Self {
        Self::new(pattern, threshold, vec![writer])
    }

    /// Source text of the compiled pattern
    pub fn pattern(&self) -> String {
        self.pattern.to_string()
    }

    pub const fn compiled_pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn writer_count(&self) -> usize {
        self.writers.len()
    }
}

impl Appender for PatternAppender {
    fn threshold(&self) -> &LogLevel {
        &self.threshold
    }

    fn dispatch(&self, event: &LogEvent<'_>) {
        if !self.admits(&event.level) {
            return;
        }

        let message = render(&self.pattern, event);
        for writer in &self.writers {
            writer.append(&message);
        }
    }
}

impl fmt::Debug for PatternAppender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternAppender")
            .field("pattern", &self.pattern.to_string())
            .field("threshold", &self.threshold)
            .field("writers", &self.writers.len())
            .finish()
    }
}
