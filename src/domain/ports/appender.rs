use crate::domain::models::{LogEvent, LogLevel};

/// Level-filtered consumer of log events
///
/// The dispatcher only calls [`dispatch`](Appender::dispatch) for events this
/// appender [`admits`](Appender::admits), so implementations render each
/// event at most once.
pub trait Appender: Send + Sync {
    /// Minimum level accepted by this appender
    fn threshold(&self) -> &LogLevel;

    /// `threshold <= level`; custom levels only admit themselves
    fn admits(&self, level: &LogLevel) -> bool {
        self.threshold().admits(level)
    }

    /// Renders and writes an event that passed [`admits`](Appender::admits)
    fn dispatch(&self, event: &LogEvent<'_>);
}
