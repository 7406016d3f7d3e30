use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};

use crate::engine::{walk, Files, WalkConfig};
use crate::entry::{Entry, TimeKind};
use crate::error::GetFilesError;
use crate::filter::Extensions;

/// Default pattern used to render timestamps as text.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// ListBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a file listing.
///
/// Created via [`getfiles::list()`](crate::list). Configure with chained
/// builder methods, then call [`run()`](ListBuilder::run) to collect every
/// entry or [`iter()`](ListBuilder::iter) to walk lazily.
///
/// Defaults: no extension filter, subfolders included, modification time
/// rendered with [`DEFAULT_TIME_FORMAT`], no size.
///
/// # Example
///
/// ```rust,ignore
/// let entries = getfiles::list("/var/log")
///     .extensions(".log, .gz")
///     .time(None)
///     .size(true)
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct ListBuilder {
    root:         PathBuf,
    extensions:   Option<Extensions>,
    subfolders:   bool,
    time:         Option<TimeKind>,
    as_date_time: bool,
    time_format:  String,
    size:         bool,
}

impl ListBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:         root.into(),
            extensions:   None,
            subfolders:   true,
            time:         Some(TimeKind::Modified),
            as_date_time: false,
            time_format:  DEFAULT_TIME_FORMAT.to_owned(),
            size:         false,
        }
    }

    // ── Filter ────────────────────────────────────────────────────────────

    /// Only list files whose name ends with one of these suffixes
    /// (case-insensitive).
    ///
    /// Accepts a single suffix (`".txt"`), a comma-separated string
    /// (`".txt, .log"`), or a list of suffixes. See [`Extensions`].
    pub fn extensions(mut self, exts: impl Into<Extensions>) -> Self {
        self.extensions = Some(exts.into());
        self
    }

    /// Remove any extension filter. Every file matches.
    pub fn all_extensions(mut self) -> Self {
        self.extensions = None;
        self
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Descend into subfolders. Enabled by default; when disabled only the
    /// files directly under the root are listed.
    pub fn subfolders(mut self, yes: bool) -> Self {
        self.subfolders = yes;
        self
    }

    // ── Decoration ────────────────────────────────────────────────────────

    /// Which timestamp to attach, or `None` for no timestamp.
    pub fn time(mut self, kind: Option<TimeKind>) -> Self {
        self.time = kind;
        self
    }

    /// Report timestamps as date-time values instead of formatted text.
    /// The format string is ignored when enabled.
    pub fn as_date_time(mut self, yes: bool) -> Self {
        self.as_date_time = yes;
        self
    }

    /// strftime pattern for text timestamps.
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Attach each file's size in bytes.
    pub fn size(mut self, yes: bool) -> Self {
        self.size = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Validate the configuration and start a lazy walk.
    ///
    /// # Errors
    ///
    /// Fails before touching the tree if the time format is invalid, the root
    /// is not readable ([`GetFilesError::PermissionDenied`]), does not exist
    /// ([`GetFilesError::NotFound`]) or is not a directory.
    pub fn iter(self) -> Result<Files, GetFilesError> {
        if self.time.is_some() && !self.as_date_time {
            validate_format(&self.time_format)?;
        }

        walk(WalkConfig {
            root:         self.root,
            extensions:   self.extensions,
            subfolders:   self.subfolders,
            time:         self.time,
            as_date_time: self.as_date_time,
            time_format:  self.time_format,
            size:         self.size,
        })
    }

    /// Execute the listing and collect every matched entry.
    ///
    /// The first enumeration or stat failure aborts the whole listing; no
    /// partial results are returned.
    pub fn run(self) -> Result<Vec<Entry>, GetFilesError> {
        self.iter()?.collect()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_format(format: &str) -> Result<(), GetFilesError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(GetFilesError::InvalidTimeFormat(format.to_owned()));
    }
    Ok(())
}
