use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use super::rotation::RotationPolicy;
use crate::domain::error::LogError;
use crate::domain::models::{FileSize, FileWriterConfig};
use crate::domain::ports::LogWriter;

/// Open handle and bytes written so far
#[derive(Debug)]
struct OpenLog {
    file: File,
    offset: u64,
}

impl OpenLog {
    /// Takes the offset from the file itself after a write of unknown length
    fn resync(&mut self, path: &Path) {
        match self.file.metadata() {
            Ok(metadata) => self.offset = metadata.len(),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to read log file size"),
        }
    }
}

/// File writer that archives the live file once it reaches a size limit
///
/// The lock covers each write, the threshold check and the whole archive
/// chain update, so rotation is atomic for callers of the same writer.
///
/// If the file cannot be reopened after a rotation the writer closes and
/// drops every later append.
#[derive(Debug)]
pub struct RotatingFileWriter {
    path: PathBuf,
    policy: RotationPolicy,
    state: Mutex<Option<OpenLog>>,
}

impl RotatingFileWriter {
    /// Opens (creating when absent) `directory/file_name` for appending
    ///
    /// # Errors
    /// Returns `LogError::FileCreateFailed` if the directory or file cannot
    /// be created.
    pub fn new(
        directory: impl AsRef<Path>,
        file_name: &str,
        max_file_size: FileSize,
        max_archive_count: u32,
    ) -> Result<Self, LogError> {
        let path = directory.as_ref().join(file_name);
        let policy = RotationPolicy::new(max_file_size, max_archive_count);
        let log = open(&path)?;

        debug!(
            path = %path.display(),
            max_file_size = policy.max_file_size(),
            max_archive_count = policy.max_archive_count(),
            "opened log file"
        );

        Ok(Self {
            path,
            policy,
            state: Mutex::new(Some(log)),
        })
    }

    pub fn from_config(config: &FileWriterConfig) -> Result<Self, LogError> {
        Self::new(
            &config.directory,
            &config.file_name,
            config.max_file_size,
            config.max_archive_count,
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Bytes written to the live file since it was opened
    pub fn offset(&self) -> Option<u64> {
        self.lock().as_ref().map(|log| log.offset)
    }

    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    /// Flushes and closes the file; later appends are dropped
    pub fn close(&self) {
        if let Some(log) = self.lock().take() {
            finish(log, &self.path);
            debug!(path = %self.path.display(), "closed log file");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<OpenLog>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Closes the live file, archives it and opens a fresh one
    fn rotate(&self, state: &mut Option<OpenLog>) {
        if let Some(log) = state.take() {
            finish(log, &self.path);
        }

        match self.policy.archive(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "rotated log file"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to archive log file"),
        }

        match open(&self.path) {
            Ok(log) => *state = Some(log),
            Err(e) => {
                error!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to reopen log file after rotation, dropping further output"
                );
            }
        }
    }
}

impl LogWriter for RotatingFileWriter {
    fn append(&self, text: &str) {
        let mut state = self.lock();
        let Some(log) = state.as_mut() else {
            return;
        };

        match log.file.write_all(text.as_bytes()) {
            Ok(()) => log.offset += text.len() as u64,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to write log file");
                // Part of the text may have landed
                log.resync(&self.path);
            }
        }

        if self.policy.should_rotate(log.offset) {
            self.rotate(&mut state);
        }
    }
}

impl Drop for RotatingFileWriter {
    fn drop(&mut self) {
        let state = self
            .state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(log) = state.take() {
            finish(log, &self.path);
        }
    }
}

fn open(path: &Path) -> Result<OpenLog, LogError> {
    let create_failed = |source| LogError::FileCreateFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(create_failed)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(create_failed)?;
    let offset = file.seek(SeekFrom::End(0)).map_err(create_failed)?;

    Ok(OpenLog { file, offset })
}

fn finish(mut log: OpenLog, path: &Path) {
    if let Err(e) = log.file.flush().and_then(|()| log.file.sync_all()) {
        warn!(path = %path.display(), error = %e, "failed to flush log file");
    }
}
