pub mod config;
pub mod date_format;
pub mod event;
pub mod file_size;
pub mod level;
pub mod pattern;

pub use config::{
    AppenderConfig, ConsoleStream, FileWriterConfig, LoggingConfig, WriterConfig, DEFAULT_PATTERN,
};
pub use date_format::{DateFormat, DEFAULT_DATE_PATTERN};
pub use event::{CallSite, LogEvent, OwnedLogEvent};
pub use file_size::FileSize;
pub use level::LogLevel;
pub use pattern::{CompiledPattern, PatternToken};
