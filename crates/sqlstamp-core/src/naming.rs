//! Naming rules for resequenced migration files.
//!
//! A migration named `001-Add Users Table.sql` keeps only the descriptive
//! part after the first `-`, normalized to `add_users_table`, and receives a
//! fresh 14-digit timestamp prefix: `20250101120000_add_users_table.sql`.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

use crate::config::ClockSource;
use crate::error::{Result, StampError};

/// Format of the base timestamp, `YYYYMMDDHHMMSS`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Derive the normalized suffix from a filename stem.
///
/// Everything up to and including the first `-` is dropped (the whole stem is
/// kept when there is none), then spaces become underscores and the result is
/// lowercased.
pub fn stem_suffix(stem: &str) -> String {
    let tail = match stem.split_once('-') {
        Some((_, rest)) => rest,
        None => stem,
    };
    tail.replace(' ', "_").to_lowercase()
}

/// Timestamp the sequence of new names starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BaseTimestamp(u64);

impl BaseTimestamp {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Read the current time from the given clock.
    pub fn now(clock: ClockSource) -> Result<Self> {
        match clock {
            ClockSource::Local => Self::from_datetime(&Local::now()),
            ClockSource::Utc => Self::from_datetime(&Utc::now()),
        }
    }

    /// Encode a point in time as `YYYYMMDDHHMMSS`.
    pub fn from_datetime<Tz>(at: &DateTime<Tz>) -> Result<Self>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let formatted = at.format(TIMESTAMP_FORMAT).to_string();
        formatted
            .parse::<u64>()
            .map(Self)
            .map_err(|e| StampError::InvalidTimestamp(format!("{}: {}", formatted, e)))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Timestamp for the file at `index` in the sorted listing.
    pub fn offset(&self, index: usize) -> Result<u64> {
        u64::try_from(index)
            .ok()
            .and_then(|i| self.0.checked_add(i))
            .ok_or(StampError::TimestampOverflow {
                base: self.0,
                index,
            })
    }
}

impl fmt::Display for BaseTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A migration file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Filename including extension.
    pub original_name: OsString,
    /// Normalized descriptive part of the stem.
    pub stem_suffix: OsString,
}

impl MigrationFile {
    /// Build from a path whose filename ends in `.{extension}`.
    ///
    /// The stem is the filename minus that ending, except for a bare
    /// `.{extension}` name, which is its own stem. Returns `Ok(None)` for
    /// paths that do not match.
    pub fn from_path(path: &Path, extension: &str) -> Result<Option<Self>> {
        let Some(name) = path.file_name() else {
            return Ok(None);
        };
        let dotted = format!(".{}", extension);

        let suffix = match name.to_str() {
            Some(name) => name.strip_suffix(dotted.as_str()).map(|stem| {
                let stem = if stem.is_empty() { name } else { stem };
                OsString::from(stem_suffix(stem))
            }),
            None => raw_stem_suffix(name, &dotted)?,
        };

        Ok(suffix.map(|stem_suffix| Self {
            original_name: name.to_os_string(),
            stem_suffix,
        }))
    }

    /// Filename this migration takes at the given timestamp.
    pub fn new_name(&self, timestamp: u64, extension: &str) -> OsString {
        let mut name = OsString::from(format!("{}_", timestamp));
        name.push(&self.stem_suffix);
        name.push(format!(".{}", extension));
        name
    }
}

/// Suffix of a filename that is not valid UTF-8.
///
/// Valid runs are normalized like [`stem_suffix`]; undecodable bytes are
/// carried over unchanged.
#[cfg(unix)]
fn raw_stem_suffix(name: &OsStr, dotted: &str) -> Result<Option<OsString>> {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let bytes = name.as_bytes();
    let Some(stem) = bytes.strip_suffix(dotted.as_bytes()) else {
        return Ok(None);
    };
    let stem = if stem.is_empty() { bytes } else { stem };
    let tail = match stem.iter().position(|&b| b == b'-') {
        Some(i) => &stem[i + 1..],
        None => stem,
    };

    let mut out = Vec::with_capacity(tail.len());
    for chunk in tail.utf8_chunks() {
        out.extend_from_slice(chunk.valid().replace(' ', "_").to_lowercase().as_bytes());
        out.extend_from_slice(chunk.invalid());
    }
    Ok(Some(OsString::from_vec(out)))
}

#[cfg(not(unix))]
fn raw_stem_suffix(name: &OsStr, dotted: &str) -> Result<Option<OsString>> {
    if !name.as_encoded_bytes().ends_with(dotted.as_bytes()) {
        return Ok(None);
    }
    Err(StampError::InvalidFileName(name.into()))
}
