use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use tracing::debug;

use crate::domain::error::{ConfigError, LogError};
use crate::domain::models::{AppenderConfig, ConsoleStream, LoggingConfig, WriterConfig};
use crate::domain::ports::{Clock, LogWriter, SystemClock};
use crate::infrastructure::logging::{ConsoleWriter, RotatingFileWriter};
use crate::services::{Dispatcher, DispatcherConfig, PatternAppender};

/// Project directory searched by [`ConfigLoader::load`]
pub const CONFIG_DIR: &str = ".tracelog";

/// Prefix for environment overrides, nested keys split on `__`
pub const ENV_PREFIX: &str = "TRACELOG_";

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the current project
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .tracelog/config.yaml
    /// 3. .tracelog/local.yaml (optional local overrides)
    /// 4. Environment variables (TRACELOG_* prefix)
    pub fn load() -> Result<LoggingConfig> {
        Self::load_from_dir(CONFIG_DIR)
    }

    /// Same as [`load`](Self::load) with `dir` in place of `.tracelog`
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<LoggingConfig> {
        let dir = dir.as_ref();
        let config: LoggingConfig = Figment::new()
            .merge(Serialized::defaults(LoggingConfig::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract logging configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, without environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<LoggingConfig> {
        let config: LoggingConfig = Figment::new()
            .merge(Serialized::defaults(LoggingConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load logging config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &LoggingConfig) -> Result<(), ConfigError> {
        for (index, appender) in config.appenders.iter().enumerate() {
            for writer in &appender.writers {
                let WriterConfig::File(file) = writer else {
                    continue;
                };

                if file.file_name.is_empty() {
                    return Err(ConfigError::EmptyFileName);
                }

                if Path::new(&file.file_name).components().count() != 1 {
                    return Err(ConfigError::ValidationFailed(format!(
                        "appender {index}: file_name '{}' must be a plain file name",
                        file.file_name
                    )));
                }

                if file.max_archive_count == 0 {
                    return Err(ConfigError::InvalidArchiveCount(file.max_archive_count));
                }
            }
        }

        Ok(())
    }

    /// Builds a dispatcher on the system clock
    pub fn build_dispatcher(config: &LoggingConfig) -> Result<Dispatcher, LogError> {
        Self::build_dispatcher_with_clock(config, SystemClock)
    }

    /// Creates every writer and appender described by `config`
    ///
    /// Writers are shared: appenders naming the same console stream or the
    /// same file path feed a single writer, so one file never has two
    /// rotation states. A config without appenders gets one
    /// [`AppenderConfig::default`]: the default pattern at `Debug` on stdout.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or a log file cannot
    /// be created.
    pub fn build_dispatcher_with_clock(
        config: &LoggingConfig,
        clock: impl Clock + 'static,
    ) -> Result<Dispatcher, LogError> {
        Self::validate(config)?;

        let fallback = [AppenderConfig::default()];
        let appenders = if config.appenders.is_empty() {
            debug!("no appenders configured, using the default console appender");
            &fallback[..]
        } else {
            &config.appenders[..]
        };

        let mut writers = WriterCache::default();
        let mut dispatcher_config = DispatcherConfig::new().with_clock(clock);

        for appender in appenders {
            let threshold = config.level.clone().unwrap_or_else(|| appender.level.clone());
            let appender_writers = appender
                .writers
                .iter()
                .map(|writer| writers.get_or_create(writer))
                .collect::<Result<Vec<_>, _>>()?;

            debug!(
                pattern = %appender.pattern,
                level = %threshold,
                writers = appender_writers.len(),
                "configured appender"
            );

            dispatcher_config.add_appender(Arc::new(PatternAppender::new(
                &appender.pattern,
                threshold,
                appender_writers,
            )));
        }

        Ok(Dispatcher::new(dispatcher_config))
    }
}

#[derive(Default)]
struct WriterCache {
    consoles: HashMap<ConsoleStream, Arc<dyn LogWriter>>,
    files: HashMap<PathBuf, Arc<dyn LogWriter>>,
}

impl WriterCache {
    fn get_or_create(&mut self, config: &WriterConfig) -> Result<Arc<dyn LogWriter>, LogError> {
        match config {
            WriterConfig::Console { stream } => {
                let writer = self.consoles.entry(*stream).or_insert_with(|| {
                    let console = match stream {
                        ConsoleStream::Stdout => ConsoleWriter::stdout(),
                        ConsoleStream::Stderr => ConsoleWriter::stderr(),
                    };
                    Arc::new(console)
                });
                Ok(Arc::clone(writer))
            }
            WriterConfig::File(file) => {
                let path = normalize(&file.path());
                if let Some(existing) = self.files.get(&path) {
                    return Ok(Arc::clone(existing));
                }
                let writer: Arc<dyn LogWriter> = Arc::new(RotatingFileWriter::from_config(file)?);
                self.files.insert(path, Arc::clone(&writer));
                Ok(writer)
            }
        }
    }
}

/// Absolute form of `path` without `.` components, used as the writer key
fn normalize(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AppenderConfig, CallSite, FileSize, FileWriterConfig, LogLevel};
    use crate::domain::ports::FixedClock;
    use chrono::{FixedOffset, TimeZone};
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn file_appender(dir: &Path, pattern: &str, level: LogLevel) -> AppenderConfig {
        AppenderConfig {
            pattern: pattern.to_string(),
            level,
            writers: vec![WriterConfig::File(FileWriterConfig::new(dir, "app.log"))],
        }
    }

    fn clock() -> FixedClock {
        FixedClock(
            FixedOffset::east_opt(3600)
                .unwrap()
                .timestamp_millis_opt(12_343_123)
                .unwrap(),
        )
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = LoggingConfig::default();
        assert!(config.appenders.is_empty());
        assert_eq!(config.level, None);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_validate_empty_file_name() {
        let config = LoggingConfig {
            appenders: vec![AppenderConfig {
                writers: vec![WriterConfig::File(FileWriterConfig::new("logs", ""))],
                ..AppenderConfig::default()
            }],
            ..LoggingConfig::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyFileName)
        ));
    }

    #[test]
    fn test_validate_file_name_with_directories() {
        let config = LoggingConfig {
            appenders: vec![AppenderConfig {
                writers: vec![WriterConfig::File(FileWriterConfig::new("logs", "nested/app.log"))],
                ..AppenderConfig::default()
            }],
            ..LoggingConfig::default()
        };

        match ConfigLoader::validate(&config) {
            Err(ConfigError::ValidationFailed(msg)) => assert!(msg.contains("nested/app.log")),
            other => panic!("Expected ValidationFailed error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_zero_archive_count() {
        let config = LoggingConfig {
            appenders: vec![AppenderConfig {
                writers: vec![WriterConfig::File(
                    FileWriterConfig::new("logs", "app.log").with_max_archive_count(0),
                )],
                ..AppenderConfig::default()
            }],
            ..LoggingConfig::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidArchiveCount(0))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "appenders:\n  - level: warning\n    writers:\n      - type: file\n        directory: logs\n        file_name: app.log\n        max_file_size: 2K"
        )
        .unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();

        assert_eq!(config.appenders.len(), 1);
        assert_eq!(config.appenders[0].level, LogLevel::Warning);
        assert_eq!(config.appenders[0].pattern, crate::domain::models::DEFAULT_PATTERN);
        let WriterConfig::File(file) = &config.appenders[0].writers[0] else {
            panic!("expected a file writer");
        };
        assert_eq!(file.max_file_size, FileSize::from_kilobytes(2));
        assert_eq!(file.max_archive_count, 100);
    }

    #[test]
    fn test_load_from_file_rejects_bad_size() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "appenders:\n  - writers:\n      - type: file\n        directory: logs\n        file_name: app.log\n        max_file_size: 10G"
        )
        .unwrap();
        file.flush().unwrap();

        let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("10G"));
    }

    #[test]
    fn test_load_from_file_rejects_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "appenders:\n  - writers:\n      - type: file\n        directory: logs\n        file_name: app.log\n        max_archive_count: 0"
        )
        .unwrap();
        file.flush().unwrap();

        let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidArchiveCount(0))
        ));
    }

    #[test]
    fn test_local_overrides_project_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.yaml"),
            "level: info\nappenders:\n  - pattern: \"%msg\"\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("local.yaml"), "level: verbose\n").unwrap();

        let config = temp_env::with_var_unset("TRACELOG_LEVEL", || {
            ConfigLoader::load_from_dir(temp_dir.path()).unwrap()
        });

        assert_eq!(config.level, Some(LogLevel::Verbose));
        assert_eq!(config.appenders[0].pattern, "%msg");
    }

    #[test]
    fn test_env_override_wins() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.yaml"), "level: info\n").unwrap();

        let config = temp_env::with_var("TRACELOG_LEVEL", Some("error"), || {
            ConfigLoader::load_from_dir(temp_dir.path()).unwrap()
        });

        assert_eq!(config.level, Some(LogLevel::Error));
    }

    #[test]
    fn test_build_dispatcher_writes_through_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            appenders: vec![file_appender(temp_dir.path(), "%level %msg%n", LogLevel::Info)],
            ..LoggingConfig::default()
        };

        let dispatcher = ConfigLoader::build_dispatcher_with_clock(&config, clock()).unwrap();
        let site = CallSite::new("main.rs", "main", 1, 1);
        dispatcher.debug(site, "hidden", &[]);
        dispatcher.warning(site, "shown {}", &[&42]);

        assert_eq!(dispatcher.level(), &LogLevel::Info);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("app.log")).unwrap(),
            "WARN  shown 42\n"
        );
    }

    #[test]
    fn test_build_dispatcher_shares_file_writer() {
        let temp_dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            appenders: vec![
                file_appender(temp_dir.path(), "a:%msg%n", LogLevel::Debug),
                file_appender(temp_dir.path(), "b:%msg%n", LogLevel::Error),
            ],
            ..LoggingConfig::default()
        };

        let dispatcher = ConfigLoader::build_dispatcher_with_clock(&config, clock()).unwrap();
        let site = CallSite::new("main.rs", "main", 1, 1);
        dispatcher.info(site, "one", &[]);
        dispatcher.error(site, "two", &[]);

        assert_eq!(
            fs::read_to_string(temp_dir.path().join("app.log")).unwrap(),
            "a:one\na:two\nb:two\n"
        );
    }

    #[test]
    fn test_equivalent_directories_share_one_writer() {
        let temp_dir = TempDir::new().unwrap();
        let logs = temp_dir.path().join("logs");
        let dotted = temp_dir.path().join(".").join("logs").join(".");
        let config = LoggingConfig {
            appenders: vec![
                file_appender(&logs, "a:%msg%n", LogLevel::Debug),
                file_appender(&dotted, "b:%msg%n", LogLevel::Error),
            ],
            ..LoggingConfig::default()
        };

        let dispatcher = ConfigLoader::build_dispatcher_with_clock(&config, clock()).unwrap();
        let site = CallSite::new("main.rs", "main", 1, 1);
        dispatcher.info(site, "one", &[]);
        dispatcher.error(site, "two", &[]);

        assert_eq!(
            fs::read_to_string(logs.join("app.log")).unwrap(),
            "a:one\na:two\nb:two\n"
        );
    }

    #[test]
    fn test_normalize_drops_current_dir_components() {
        let base = TempDir::new().unwrap();
        let plain = base.path().join("logs").join("app.log");
        let dotted = base.path().join(".").join("logs").join(".").join("app.log");

        assert_eq!(normalize(&dotted), normalize(&plain));
        assert!(normalize(Path::new("logs/app.log")).is_absolute());
        assert_eq!(
            normalize(Path::new("./logs/app.log")),
            normalize(Path::new("logs/app.log"))
        );
    }

    #[test]
    fn test_level_override_applies_to_every_appender() {
        let temp_dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            level: Some(LogLevel::Fatal),
            appenders: vec![file_appender(temp_dir.path(), "%msg", LogLevel::Verbose)],
        };

        let dispatcher = ConfigLoader::build_dispatcher_with_clock(&config, clock()).unwrap();

        assert_eq!(dispatcher.level(), &LogLevel::Fatal);
        assert!(!dispatcher.is_error_enabled());
    }

    #[test]
    fn test_build_dispatcher_reports_unwritable_directory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let config = LoggingConfig {
            appenders: vec![file_appender(&blocker, "%msg", LogLevel::Info)],
            ..LoggingConfig::default()
        };

        let result = ConfigLoader::build_dispatcher(&config);
        assert!(matches!(result, Err(LogError::FileCreateFailed { .. })));
    }

    #[test]
    fn test_empty_config_builds_default_dispatcher() {
        let dispatcher = ConfigLoader::build_dispatcher(&LoggingConfig::default()).unwrap();
        assert_eq!(dispatcher.appenders().len(), 1);
        assert_eq!(dispatcher.level(), &LogLevel::Debug);
        assert!(dispatcher.is_debug_enabled());
        assert!(!dispatcher.is_verbose_enabled());
    }

    #[test]
    fn test_level_override_applies_to_default_appender() {
        let config = LoggingConfig {
            level: Some(LogLevel::Error),
            ..LoggingConfig::default()
        };

        let dispatcher = ConfigLoader::build_dispatcher(&config).unwrap();
        assert_eq!(dispatcher.appenders().len(), 1);
        assert_eq!(dispatcher.level(), &LogLevel::Error);
    }
}
