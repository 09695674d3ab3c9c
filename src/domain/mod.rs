//! Domain layer for the tracelog pipeline
//!
//! This module contains the data model (levels, events, patterns, configuration
//! values) and the ports that the services and infrastructure layers implement.

pub mod error;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use error::{ConfigError, LogError};
