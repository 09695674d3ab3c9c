//! tracelog - pattern-based structured logging
//!
//! Log calls are routed through independently configured appenders. Each
//! appender renders events with a compiled pattern and hands the text to its
//! writers: the console, or a file rotated into a numbered archive chain.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and port traits
//! - **Service Layer** (`services`): Pattern compilation, rendering and dispatch
//! - **Infrastructure Layer** (`infrastructure`): Writers and configuration loading
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tracelog::{log_info, Dispatcher, DispatcherConfig, LogLevel, PatternAppender};
//! use tracelog::infrastructure::logging::ConsoleWriter;
//!
//! let appender = PatternAppender::with_writer(
//!     "%level %file:%line - %msg%n",
//!     LogLevel::Info,
//!     Arc::new(ConsoleWriter::stdout()),
//! );
//! let logger = Dispatcher::new(DispatcherConfig::new().with_appender(Arc::new(appender)));
//!
//! log_info!(logger, "listening on port {}", 8080);
//! logger.warning(tracelog::call_site!(), "{} requests pending", &[&3]);
//! ```

#[macro_use]
mod macros;

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AppenderConfig, CallSite, CompiledPattern, FileSize, FileWriterConfig, LogEvent, LogLevel,
    LoggingConfig, WriterConfig,
};
pub use domain::ports::{Appender, Clock, LogWriter};
pub use domain::{ConfigError, LogError};
pub use infrastructure::config::ConfigLoader;
pub use infrastructure::logging::{ConsoleWriter, RotatingFileWriter};
pub use services::{compile, render, Dispatcher, DispatcherConfig, PatternAppender};
