use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::domain::ports::LogWriter;

/// Writer for the process's standard streams, or any `Write` sink
///
/// Every append is written and flushed under a lock, so concurrent appends
/// never interleave. Output errors are dropped.
pub struct ConsoleWriter {
    output: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleWriter {
    pub fn new(output: impl Write + Send + 'static) -> Self {
        Self {
            output: Mutex::new(Box::new(output)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl LogWriter for ConsoleWriter {
    fn append(&self, text: &str) {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = output
            .write_all(text.as_bytes())
            .and_then(|()| output.flush());
    }
}

impl fmt::Debug for ConsoleWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleWriter").finish_non_exhaustive()
    }
}
