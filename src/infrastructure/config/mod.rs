//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Configuration validation
//! - Wiring configured writers and appenders into a dispatcher

pub mod loader;

pub use loader::{ConfigLoader, CONFIG_DIR, ENV_PREFIX};
