use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the subscriber for the crate's own diagnostics
///
/// Diagnostics go to stderr so they never mix with log output on stdout.
/// `RUST_LOG` overrides `default_level`.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_diagnostics(default_level: LevelFilter) -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install diagnostics subscriber")
}
