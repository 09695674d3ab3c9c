use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::debug;

use crate::domain::models::{CallSite, LogEvent, LogLevel};
use crate::domain::ports::{Appender, Clock, SystemClock};

/// Placeholder replaced positionally in message templates
pub const PLACEHOLDER: &str = "{}";

/// Appenders and clock handed to [`Dispatcher::new`]
#[derive(Clone)]
pub struct DispatcherConfig {
    appenders: Vec<Arc<dyn Appender>>,
    clock: Arc<dyn Clock>,
}

impl DispatcherConfig {
    /// Empty configuration using the system clock
    pub fn new() -> Self {
        Self {
            appenders: Vec::new(),
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[must_use]
    pub fn with_appender(mut self, appender: Arc<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    pub fn add_appender(&mut self, appender: Arc<dyn Appender>) {
        self.appenders.push(appender);
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.len()
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DispatcherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherConfig")
            .field("appenders", &self.appenders.len())
            .finish_non_exhaustive()
    }
}

/// Fans log calls out to every appender whose threshold admits them
///
/// The timestamp is taken before any filtering so it stays as close to the
/// call as possible. When no appender admits a level, nothing else happens:
/// no event is built and template parameters are never formatted.
///
/// A dispatcher without appenders drops every call; the configuration loader
/// supplies the default console appender when a config names none.
pub struct Dispatcher {
    appenders: Vec<Arc<dyn Appender>>,
    clock: Arc<dyn Clock>,
    level: LogLevel,
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        let DispatcherConfig { appenders, clock } = config;
        let level = lowest_threshold(&appenders);
        Self {
            appenders,
            clock,
            level,
        }
    }

    /// Lowest threshold among the appenders
    pub const fn level(&self) -> &LogLevel {
        &self.level
    }

    /// Whether some appender would accept `level`
    ///
    /// Built-in levels are answered from [`level`](Self::level) alone. Levels
    /// unordered against it (custom names) are checked against each appender.
    pub fn is_enabled(&self, level: &LogLevel) -> bool {
        match self.level.partial_cmp(level) {
            Some(ordering) => ordering != Ordering::Greater && !self.appenders.is_empty(),
            None => self.appenders.iter().any(|appender| appender.admits(level)),
        }
    }

    pub fn is_verbose_enabled(&self) -> bool {
        self.is_enabled(&LogLevel::Verbose)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(&LogLevel::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(&LogLevel::Info)
    }

    pub fn is_warning_enabled(&self) -> bool {
        self.is_enabled(&LogLevel::Warning)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled(&LogLevel::Error)
    }

    pub fn is_fatal_enabled(&self) -> bool {
        self.is_enabled(&LogLevel::Fatal)
    }

    pub fn appenders(&self) -> &[Arc<dyn Appender>] {
        &self.appenders
    }

    /// Logs a finished message
    pub fn log(&self, level: LogLevel, site: CallSite<'_>, message: &str) {
        self.emit(level, site, || Cow::Borrowed(message));
    }

    /// Logs a template, replacing each `{}` with the next parameter
    ///
    /// Surplus placeholders stay as `{}` and surplus parameters are ignored.
    pub fn log_format(
        &self,
        level: LogLevel,
        site: CallSite<'_>,
        template: &str,
        params: &[&dyn fmt::Display],
    ) {
        self.emit(level, site, || Cow::Owned(substitute(template, params)));
    }

    /// Logs pre-captured format arguments, as produced by the logging macros
    pub fn log_args(&self, level: LogLevel, site: CallSite<'_>, args: fmt::Arguments<'_>) {
        self.emit(level, site, || match args.as_str() {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(args.to_string()),
        });
    }

    pub fn verbose(&self, site: CallSite<'_>, template: &str, params: &[&dyn fmt::Display]) {
        self.log_format(LogLevel::Verbose, site, template, params);
    }

    pub fn debug(&self, site: CallSite<'_>, template: &str, params: &[&dyn fmt::Display]) {
        self.log_format(LogLevel::Debug, site, template, params);
    }

    pub fn info(&self, site: CallSite<'_>, template: &str, params: &[&dyn fmt::Display]) {
        self.log_format(LogLevel::Info, site, template, params);
    }

    pub fn warning(&self, site: CallSite<'_>, template: &str, params: &[&dyn fmt::Display]) {
        self.log_format(LogLevel::Warning, site, template, params);
    }

    pub fn error(&self, site: CallSite<'_>, template: &str, params: &[&dyn fmt::Display]) {
        self.log_format(LogLevel::Error, site, template, params);
    }

    pub fn fatal(&self, site: CallSite<'_>, template: &str, params: &[&dyn fmt::Display]) {
        self.log_format(LogLevel::Fatal, site, template, params);
    }

    fn emit<'a, F>(&self, level: LogLevel, site: CallSite<'a>, message: F)
    where
        F: FnOnce() -> Cow<'a, str>,
    {
        let timestamp = self.clock.now();

        let selected: Vec<&Arc<dyn Appender>> = self
            .appenders
            .iter()
            .filter(|appender| appender.admits(&level))
            .collect();

        if selected.is_empty() {
            return;
        }

        let message = message();
        let event = LogEvent::new(timestamp, level, site, message);
        for appender in selected {
            appender.dispatch(&event);
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("level", &self.level)
            .field("appenders", &self.appenders.len())
            .finish_non_exhaustive()
    }
}

/// Built-in thresholds win over custom ones, which have no rank.
fn lowest_threshold(appenders: &[Arc<dyn Appender>]) -> LogLevel {
    appenders
        .iter()
        .map(|appender| appender.threshold())
        .fold(None::<&LogLevel>, |lowest, candidate| match lowest {
            Some(current)
                if candidate < current || (current.is_custom() && !candidate.is_custom()) =>
            {
                Some(candidate)
            }
            Some(current) => Some(current),
            None => Some(candidate),
        })
        .cloned()
        .unwrap_or(LogLevel::Debug)
}

/// Replaces each `{}` in `template` with the next parameter, in order
///
/// ```
/// use tracelog::services::dispatcher::substitute;
///
/// assert_eq!(substitute("Hello {}", &[&"world"]), "Hello world");
/// assert_eq!(substitute("{} + {} = {}", &[&1, &2]), "1 + 2 = {}");
/// ```
pub fn substitute(template: &str, params: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len() + params.len() * 8);
    let mut params_iter = params.iter();
    let mut pieces = template.split(PLACEHOLDER);
    let mut placeholders = 0usize;

    if let Some(head) = pieces.next() {
        out.push_str(head);
    }
    for piece in pieces {
        placeholders += 1;
        match params_iter.next() {
            Some(param) => {
                let _ = write!(out, "{param}");
            }
            None => out.push_str(PLACEHOLDER),
        }
        out.push_str(piece);
    }

    if placeholders != params.len() {
        debug!(
            placeholders,
            parameters = params.len(),
            "message template placeholder count does not match parameters"
        );
    }

    out
}
