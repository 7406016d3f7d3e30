//! # getfiles
//!
//! Recursive file listing with extension filters, timestamps and sizes.
//!
//! getfiles walks a directory tree depth-first, in the order the operating
//! system reports entries, without following symbolic links. Each matched
//! file becomes an [`Entry`]: its path plus whatever metadata was asked for.
//! A handful of helpers count folders and files, sum folder sizes and list
//! subfolders.
//!
//! # Quick Start
//!
//! ```rust
//! use getfiles::TimeKind;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("a.txt"), "hello").unwrap();
//! std::fs::write(dir.path().join("b.log"), "world").unwrap();
//!
//! let entries = getfiles::list(dir.path())
//!     .extensions(".TXT")
//!     .time(None)
//!     .size(true)
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].size, Some(5));
//! assert!(entries[0].time.is_none());
//!
//! // Timestamps are modification times rendered as text unless told otherwise.
//! let entries = getfiles::list(dir.path())
//!     .time(Some(TimeKind::Created))
//!     .as_date_time(true)
//!     .run()
//!     .unwrap();
//! assert!(entries.iter().all(|e| e.time.as_ref().unwrap().as_date_time().is_some()));
//! ```
//!
//! # Errors
//!
//! Listings are all-or-nothing. The root is checked for readability before
//! the walk starts; after that, the first directory that cannot be
//! enumerated or file that cannot be stat'ed aborts the call with a
//! [`GetFilesError`] naming the offending path.

#![forbid(unsafe_code)]

mod builder;
mod engine;
mod entry;
mod error;
mod filter;
mod tally;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::{ListBuilder, DEFAULT_TIME_FORMAT};
pub use engine::Files;
pub use entry::{Entry, TimeKind, Timestamp};
pub use error::GetFilesError;
pub use filter::Extensions;
pub use tally::{count, folder_size, list_folders, Counts};

use std::path::PathBuf;

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a new [`ListBuilder`] rooted at `root`.
///
/// # Example
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::create_dir(dir.path().join("sub")).unwrap();
/// std::fs::write(dir.path().join("sub/c.txt"), "").unwrap();
///
/// let paths: Vec<_> = getfiles::list(dir.path())
///     .time(None)
///     .run()
///     .unwrap()
///     .into_iter()
///     .map(getfiles::Entry::into_path)
///     .collect();
///
/// assert_eq!(paths, vec![dir.path().join("sub").join("c.txt")]);
/// ```
pub fn list(root: impl Into<PathBuf>) -> ListBuilder {
    ListBuilder::new(root)
}

/// List every file under `root` with the default options: all extensions,
/// subfolders included, modification time as `%Y-%m-%d %H:%M:%S` text.
pub fn get_files(root: impl Into<PathBuf>) -> Result<Vec<Entry>, GetFilesError> {
    list(root).run()
}
