//! Writer adapters and diagnostics
//!
//! - Console writer for stdout/stderr or any `Write` sink
//! - Rotating file writer with a numbered archive chain
//! - `tracing` subscriber setup for the crate's own diagnostics

pub mod console;
pub mod diagnostics;
pub mod file_writer;
pub mod rotation;

pub use console::ConsoleWriter;
pub use diagnostics::init_diagnostics;
pub use file_writer::RotatingFileWriter;
pub use rotation::RotationPolicy;
