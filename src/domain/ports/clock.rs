use chrono::{DateTime, FixedOffset, Local};

/// Source of the timestamp captured at each log call
///
/// Injectable so tests can render dates deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock that always returns the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<FixedOffset> + Send + Sync,
{
    fn now(&self) -> DateTime<FixedOffset> {
        self()
    }
}
