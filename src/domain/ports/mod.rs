//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that the pipeline is assembled from:
//! - Clock: source of event timestamps
//! - LogWriter: sink accepting rendered text
//! - Appender: filters events by level and feeds writers
//!
//! Services depend only on these traits, so tests can substitute fixed clocks
//! and recording writers for the real adapters.

pub mod appender;
pub mod clock;
pub mod writer;

pub use appender::Appender;
pub use clock::{Clock, FixedClock, SystemClock};
pub use writer::LogWriter;
