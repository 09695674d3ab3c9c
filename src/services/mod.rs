//! Logging engine
//!
//! Pattern compilation and rendering, the pattern appender, and the
//! dispatcher that fans log calls out to appenders.

pub mod appender;
pub mod dispatcher;
pub mod pattern_compiler;
pub mod renderer;

pub use appender::PatternAppender;
pub use dispatcher::{substitute, Dispatcher, DispatcherConfig, PLACEHOLDER};
pub use pattern_compiler::{compile, PatternCompiler};
pub use renderer::render;
