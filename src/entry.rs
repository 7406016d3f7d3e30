use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

/// A single matched file produced by a listing.
///
/// `time` and `size` are `None` when they were not requested. An entry with
/// neither is a *bare path*: callers that asked for no metadata can use
/// [`Entry::into_path`] and work with plain paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Full path to the file.
    pub path: PathBuf,

    /// The requested timestamp, structured or rendered to text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Timestamp>,

    /// Length in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Entry {
    /// An entry carrying only its path.
    pub fn bare(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            time: None,
            size: None,
        }
    }

    /// `true` when no metadata was attached.
    pub fn is_bare(&self) -> bool {
        self.time.is_none() && self.size.is_none()
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for Entry {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// A file timestamp, either as a date-time value or as formatted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Local date-time, untouched by the format string.
    DateTime(DateTime<Local>),

    /// Rendered through the configured strftime pattern.
    Formatted(String),
}

impl Timestamp {
    pub fn as_date_time(&self) -> Option<&DateTime<Local>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            Self::Formatted(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Formatted(s) => Some(s),
            Self::DateTime(_) => None,
        }
    }
}

/// Which file time to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeKind {
    /// Last modification time.
    Modified,

    /// Creation time. On Unix this is the inode status-change time
    /// (`ctime`), on other platforms the birth time.
    Created,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bare_entry_has_no_metadata() {
        let e = Entry::bare("/tmp/a.txt");
        assert!(e.is_bare());
        assert_eq!(e.into_path(), PathBuf::from("/tmp/a.txt"));
    }

    #[test]
    fn entry_with_size_is_not_bare() {
        let e = Entry {
            size: Some(3),
            ..Entry::bare("a")
        };
        assert!(!e.is_bare());
    }

    #[test]
    fn timestamp_accessors() {
        let dt = Local.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let t = Timestamp::DateTime(dt);
        assert_eq!(t.as_date_time(), Some(&dt));
        assert!(t.as_str().is_none());

        let t = Timestamp::Formatted("2021-01-01".into());
        assert_eq!(t.as_str(), Some("2021-01-01"));
        assert!(t.as_date_time().is_none());
    }
}
