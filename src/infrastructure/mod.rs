//! Infrastructure layer module
//!
//! Adapters for the outside world:
//! - Console and rotating file writers
//! - Configuration loading and dispatcher wiring
//! - Subscriber setup for internal diagnostics
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
