//! Call-site capturing logging macros
//!
//! Each macro records `file!()`, `module_path!()`, `line!()` and `column!()`
//! and passes its format arguments to [`Dispatcher::log_args`], which only
//! formats them when an appender admits the level.
//!
//! [`Dispatcher::log_args`]: crate::services::Dispatcher::log_args

/// Captures the [`CallSite`](crate::domain::models::CallSite) of the invocation
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::domain::models::CallSite::new(file!(), module_path!(), line!(), column!())
    };
}

/// Logs at an explicit level: `log_at!(dispatcher, level, "fmt", args...)`
#[macro_export]
macro_rules! log_at {
    ($dispatcher:expr, $level:expr, $($arg:tt)+) => {
        $dispatcher.log_args($level, $crate::call_site!(), format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log_at!($dispatcher, $crate::domain::models::LogLevel::Verbose, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log_at!($dispatcher, $crate::domain::models::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log_at!($dispatcher, $crate::domain::models::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log_at!($dispatcher, $crate::domain::models::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log_at!($dispatcher, $crate::domain::models::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_fatal {
    ($dispatcher:expr, $($arg:tt)+) => {
        $crate::log_at!($dispatcher, $crate::domain::models::LogLevel::Fatal, $($arg)+)
    };
}
