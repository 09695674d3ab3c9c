//! Size-based log rotation
//!
//! When the live file reaches the size limit it is moved into an archive
//! chain next to it:
//! - `<name>.1` always holds the most recent archive
//! - older archives shift up by one (`.1` -> `.2` -> ...)
//! - the archive at `max_archive_count` is deleted instead of shifted
//!
//! Archive numbering stays contiguous from 1.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::error::LogError;
use crate::domain::models::FileSize;

/// Rotation policy with size threshold and archive limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Maximum file size in bytes before rotation
    max_file_size: u64,
    /// Number of archives kept, at least 1
    max_archive_count: u32,
}

impl RotationPolicy {
    /// Create a new rotation policy
    ///
    /// # Arguments
    /// * `max_file_size` - Size at which the live file is archived
    /// * `max_archive_count` - Number of archives to keep; 0 is treated as 1
    pub fn new(max_file_size: FileSize, max_archive_count: u32) -> Self {
        Self {
            max_file_size: max_file_size.bytes(),
            max_archive_count: max_archive_count.max(1),
        }
    }

    pub const fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub const fn max_archive_count(&self) -> u32 {
        self.max_archive_count
    }

    /// Returns `true` once `offset` has reached the size limit
    pub const fn should_rotate(&self, offset: u64) -> bool {
        offset >= self.max_file_size
    }

    /// Path of archive `index` for `log_path`: the full file name plus `.<index>`
    pub fn archive_path(log_path: &Path, index: u32) -> PathBuf {
        let mut name = OsString::from(log_path.as_os_str());
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Moves the closed log file into archive slot 1, shifting older archives up
    ///
    /// The caller must hold the writer lock and must have closed the file.
    pub fn archive(&self, log_path: &Path) -> Result<(), LogError> {
        self.archive_into(log_path, log_path, 1)
    }

    fn archive_into(&self, log_path: &Path, source: &Path, index: u32) -> Result<(), LogError> {
        if !source.exists() {
            return Err(LogError::FileNotExist(source.to_path_buf()));
        }

        let target = Self::archive_path(log_path, index);

        if target.exists() {
            if index >= self.max_archive_count {
                fs::remove_file(&target).map_err(|source_err| LogError::ArchiveFailed {
                    from: target.clone(),
                    to: target.clone(),
                    source: source_err,
                })?;
                debug!(path = %target.display(), "deleted oldest log archive");
            } else {
                self.archive_into(log_path, &target, index + 1)?;
            }
        }

        fs::rename(source, &target).map_err(|source_err| LogError::ArchiveFailed {
            from: source.to_path_buf(),
            to: target.clone(),
            source: source_err,
        })?;

        debug!(
            old_path = %source.display(),
            new_path = %target.display(),
            "archived log file"
        );

        Ok(())
    }
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self::new(FileSize::default(), 100)
    }
}
