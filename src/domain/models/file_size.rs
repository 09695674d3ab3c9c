use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::error::ConfigError;

const KILOBYTE: u64 = 1024;
const MEGABYTE: u64 = 1024 * KILOBYTE;

/// Size threshold for file rotation, in bytes
///
/// Parses from plain byte counts or `<digits>[B|K|M]` strings:
///
/// ```
/// use tracelog::domain::models::FileSize;
///
/// assert_eq!("10M".parse::<FileSize>().unwrap().bytes(), 10 * 1024 * 1024);
/// assert_eq!("512k".parse::<FileSize>().unwrap().bytes(), 512 * 1024);
/// assert_eq!("64".parse::<FileSize>().unwrap().bytes(), 64);
/// assert!("10G".parse::<FileSize>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileSize(u64);

impl FileSize {
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn from_kilobytes(kilobytes: u64) -> Self {
        Self(kilobytes.saturating_mul(KILOBYTE))
    }

    pub const fn from_megabytes(megabytes: u64) -> Self {
        Self(megabytes.saturating_mul(MEGABYTE))
    }

    pub const fn bytes(self) -> u64 {
        self.0
    }
}

impl Default for FileSize {
    fn default() -> Self {
        Self::from_megabytes(10)
    }
}

impl From<u64> for FileSize {
    fn from(bytes: u64) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}B", self.0)
    }
}

impl FromStr for FileSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidFileSize(s.to_string());
        let trimmed = s.trim();

        let (digits, multiplier) = match trimmed.char_indices().last() {
            Some((idx, c)) if !c.is_ascii_digit() => {
                let multiplier = match c.to_ascii_uppercase() {
                    'B' => 1,
                    'K' => KILOBYTE,
                    'M' => MEGABYTE,
                    _ => return Err(invalid()),
                };
                (&trimmed[..idx], multiplier)
            }
            Some(_) => (trimmed, 1),
            None => return Err(invalid()),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        digits
            .parse::<u64>()
            .ok()
            .and_then(|value| value.checked_mul(multiplier))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Serialize for FileSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

struct FileSizeVisitor;

impl Visitor<'_> for FileSizeVisitor {
    type Value = FileSize;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a byte count or a string like \"10M\"")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<FileSize, E> {
        Ok(FileSize(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<FileSize, E> {
        u64::try_from(value)
            .map(FileSize)
            .map_err(|_| E::custom(ConfigError::InvalidFileSize(value.to_string())))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<FileSize, E> {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for FileSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FileSizeVisitor)
    }
}
