use std::fmt::Write as _;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use ignore::{DirEntry, Walk, WalkBuilder};
use log::{debug, trace};

use crate::entry::{Entry, TimeKind, Timestamp};
use crate::error::GetFilesError;
use crate::filter::Extensions;

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters passed from the builder to the engine.
///
/// `pub(crate)` — not part of the public API. Callers configure these
/// via the builder methods (`.extensions()`, `.subfolders()`, `.time()`, ...).
#[derive(Debug, Clone)]
pub(crate) struct WalkConfig {
    pub root:         PathBuf,
    pub extensions:   Option<Extensions>,
    pub subfolders:   bool,
    pub time:         Option<TimeKind>,
    pub as_date_time: bool,
    pub time_format:  String,
    pub size:         bool,
}

impl WalkConfig {
    fn wants_metadata(&self) -> bool {
        self.time.is_some() || self.size
    }
}

// ---------------------------------------------------------------------------
// walk()
// ---------------------------------------------------------------------------

/// Start a depth-first walk over `config.root`.
///
/// The root is probed for readability before anything else; the returned
/// iterator does the rest lazily.
pub(crate) fn walk(config: WalkConfig) -> Result<Files, GetFilesError> {
    probe(&config.root)?;

    let max_depth = if config.subfolders { None } else { Some(1) };
    let inner = walker(&config.root, max_depth);

    debug!(
        "listing {} (subfolders: {}, filter: {:?})",
        config.root.display(),
        config.subfolders,
        config.extensions.as_ref().map(Extensions::suffixes),
    );

    Ok(Files {
        inner,
        config,
        matched: 0,
        done: false,
    })
}

/// Build the single-threaded, link-preserving walker every operation shares.
///
/// All ignore-file handling is disabled: every entry on disk is visited, in
/// the order the OS reports it.
pub(crate) fn walker(root: &Path, max_depth: Option<usize>) -> Walk {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .follow_links(false)
        .same_file_system(false)
        .max_depth(max_depth);
    builder.build()
}

/// Every entry below `root`, root itself excluded.
///
/// Yields `NotADirectory` if the root turns out to be something else.
pub(crate) fn descendants(root: &Path) -> impl Iterator<Item = Result<DirEntry, GetFilesError>> {
    let root = root.to_path_buf();
    walker(&root, None).filter_map(move |res| match res {
        Ok(entry) if entry.depth() == 0 => {
            if is_dir(&entry) {
                None
            } else {
                Some(Err(GetFilesError::NotADirectory(root.clone())))
            }
        }
        Ok(entry) => Some(Ok(entry)),
        Err(e) => Some(Err(map_ignore_error(e))),
    })
}

pub(crate) fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
}

fn probe(root: &Path) -> Result<(), GetFilesError> {
    fs::read_dir(root)
        .map(drop)
        .map_err(|e| GetFilesError::from_io(root.to_path_buf(), e))
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Lazy iterator over matched files.
///
/// Yields at most one error: after the first `Err` the iterator is finished
/// and no partial continuation is attempted. Open directory handles are
/// released when the iterator is dropped.
pub struct Files {
    inner:   Walk,
    config:  WalkConfig,
    matched: usize,
    done:    bool,
}

impl Iterator for Files {
    type Item = Result<Entry, GetFilesError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let res = match self.inner.next() {
                Some(res) => res,
                None => {
                    self.done = true;
                    debug!("listed {} files under {}", self.matched, self.config.root.display());
                    return None;
                }
            };

            let step = match res {
                Ok(entry) => self.visit(entry),
                Err(e)    => Err(map_ignore_error(e)),
            };

            match step {
                Ok(Some(entry)) => {
                    self.matched += 1;
                    return Some(Ok(entry));
                }
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    debug!("listing {} aborted: {}", self.config.root.display(), e);
                    return Some(Err(e));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Files {}

impl Files {
    /// Classify one walk entry: prune directories, filter files, decorate matches.
    fn visit(&self, entry: DirEntry) -> Result<Option<Entry>, GetFilesError> {
        if entry.depth() == 0 {
            return if is_dir(&entry) {
                Ok(None)
            } else {
                Err(GetFilesError::NotADirectory(entry.into_path()))
            };
        }

        // With subfolders off the walker stops at depth 1, so directories
        // show up here but are never descended into.
        if is_dir(&entry) {
            if !self.config.subfolders {
                trace!("skipping folder {}", entry.path().display());
            }
            return Ok(None);
        }

        if let Some(exts) = &self.config.extensions {
            let name = entry.file_name().to_string_lossy();
            if !exts.matches(&name) {
                trace!("filtered out {}", entry.path().display());
                return Ok(None);
            }
        }

        decorate(entry.into_path(), &self.config).map(Some)
    }
}

// ---------------------------------------------------------------------------
// Decoration
// ---------------------------------------------------------------------------

/// Attach the requested timestamp and size to a matched file.
///
/// Metadata is read once, without following links. No syscall happens when
/// nothing was requested.
pub(crate) fn decorate(path: PathBuf, config: &WalkConfig) -> Result<Entry, GetFilesError> {
    if !config.wants_metadata() {
        return Ok(Entry::bare(path));
    }

    let meta = match fs::symlink_metadata(&path) {
        Ok(m) => m,
        Err(source) => return Err(GetFilesError::Io { path, source }),
    };

    let time = match config.time {
        Some(kind) => {
            let dt = match file_time(&meta, kind) {
                Ok(dt) => dt,
                Err(source) => return Err(GetFilesError::Io { path, source }),
            };
            Some(if config.as_date_time {
                Timestamp::DateTime(dt)
            } else {
                Timestamp::Formatted(render(&dt, &config.time_format)?)
            })
        }
        None => None,
    };

    let size = config.size.then(|| meta.len());

    Ok(Entry { path, time, size })
}

fn render(dt: &DateTime<Local>, format: &str) -> Result<String, GetFilesError> {
    let mut text = String::new();
    write!(text, "{}", dt.format(format))
        .map_err(|_| GetFilesError::InvalidTimeFormat(format.to_owned()))?;
    Ok(text)
}

fn file_time(meta: &Metadata, kind: TimeKind) -> io::Result<DateTime<Local>> {
    match kind {
        TimeKind::Modified => meta.modified().map(DateTime::<Local>::from),
        TimeKind::Created  => created(meta),
    }
}

/// Status-change time, which is what Unix tools report as "created".
#[cfg(unix)]
fn created(meta: &Metadata) -> io::Result<DateTime<Local>> {
    use std::os::unix::fs::MetadataExt;

    DateTime::from_timestamp(meta.ctime(), meta.ctime_nsec() as u32)
        .map(|dt| dt.with_timezone(&Local))
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "ctime out of range"))
}

#[cfg(not(unix))]
fn created(meta: &Metadata) -> io::Result<DateTime<Local>> {
    meta.created().map(DateTime::<Local>::from)
}

// ---------------------------------------------------------------------------
// Map ignore::Error to GetFilesError
// ---------------------------------------------------------------------------

pub(crate) fn map_ignore_error(e: ignore::Error) -> GetFilesError {
    match e {
        ignore::Error::WithDepth { err, .. } => map_ignore_error(*err),
        ignore::Error::WithPath { path, err } => match innermost_io(*err) {
            Ok(io_err) => GetFilesError::from_io(path, io_err),
            Err(other) => GetFilesError::Walk(format!("{}: {}", path.display(), other)),
        },
        ignore::Error::Io(io_err) => GetFilesError::Io {
            path:   PathBuf::new(),
            source: io_err,
        },
        other => GetFilesError::Walk(other.to_string()),
    }
}

/// Strip depth and path layers down to the underlying I/O error.
///
/// Directory-open failures arrive as `WithPath { WithDepth { Io } }`; the
/// outermost path is the one worth reporting.
fn innermost_io(e: ignore::Error) -> Result<io::Error, ignore::Error> {
    match e {
        ignore::Error::Io(io_err) => Ok(io_err),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithPath { err, .. } => innermost_io(*err),
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(root: &Path) -> WalkConfig {
        WalkConfig {
            root:         root.to_path_buf(),
            extensions:   None,
            subfolders:   true,
            time:         None,
            as_date_time: false,
            time_format:  "%Y-%m-%d".into(),
            size:         false,
        }
    }

    #[test]
    fn decorate_without_metadata_skips_stat() {
        // The path does not exist; a stat would fail.
        let cfg = config(Path::new("/"));
        let entry = decorate(PathBuf::from("/no/such/file.txt"), &cfg).unwrap();
        assert!(entry.is_bare());
    }

    #[test]
    fn decorate_reports_stat_failure() {
        let cfg = WalkConfig { size: true, ..config(Path::new("/")) };
        let err = decorate(PathBuf::from("/no/such/file.txt"), &cfg).unwrap_err();
        assert!(matches!(err, GetFilesError::Io { .. }));
    }

    #[test]
    fn decorate_size_and_structured_time() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.bin");
        fs::write(&file, [0u8; 42]).unwrap();

        let cfg = WalkConfig {
            size:         true,
            time:         Some(TimeKind::Modified),
            as_date_time: true,
            ..config(dir.path())
        };
        let entry = decorate(file.clone(), &cfg).unwrap();

        assert_eq!(entry.size, Some(42));
        let expected: DateTime<Local> = fs::metadata(&file).unwrap().modified().unwrap().into();
        assert_eq!(entry.time, Some(Timestamp::DateTime(expected)));
    }

    #[test]
    fn created_time_is_available() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("new.txt");
        fs::write(&file, "x").unwrap();

        let meta = fs::symlink_metadata(&file).unwrap();
        let created = created(&meta).unwrap();
        let drift = (Local::now() - created).num_seconds().abs();
        assert!(drift < 3600, "creation time should be recent, got {created}");
    }

    #[cfg(unix)]
    #[test]
    fn created_time_is_status_change_time() {
        use std::os::unix::fs::MetadataExt;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();

        let meta = fs::symlink_metadata(&file).unwrap();
        let created = created(&meta).unwrap();
        assert_eq!(created.timestamp(), meta.ctime());
        assert_eq!(created.timestamp_subsec_nanos(), meta.ctime_nsec() as u32);
    }

    #[test]
    fn dir_open_error_maps_by_kind() {
        // Shape produced by the walker when a directory cannot be opened.
        let err = ignore::Error::WithPath {
            path: PathBuf::from("/locked"),
            err:  Box::new(ignore::Error::WithDepth {
                depth: 1,
                err:   Box::new(ignore::Error::Io(io::Error::from(io::ErrorKind::PermissionDenied))),
            }),
        };
        match map_ignore_error(err) {
            GetFilesError::PermissionDenied(p) => assert_eq!(p, PathBuf::from("/locked")),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = ignore::Error::WithPath {
            path: PathBuf::from("/gone"),
            err:  Box::new(ignore::Error::WithDepth {
                depth: 0,
                err:   Box::new(ignore::Error::Io(io::Error::from(io::ErrorKind::NotFound))),
            }),
        };
        match map_ignore_error(err) {
            GetFilesError::NotFound(p) => assert_eq!(p, PathBuf::from("/gone")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn depth_outside_path_also_unwraps() {
        let inner = ignore::Error::WithPath {
            path: PathBuf::from("/gone"),
            err:  Box::new(ignore::Error::Io(io::Error::from(io::ErrorKind::NotFound))),
        };
        let err = map_ignore_error(ignore::Error::WithDepth { depth: 2, err: Box::new(inner) });
        assert!(matches!(err, GetFilesError::NotFound(p) if p == PathBuf::from("/gone")));
    }

    #[test]
    fn missing_root_from_real_walker_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = walker(&missing, None).find_map(Result::err).unwrap();
        match map_ignore_error(err) {
            GetFilesError::NotFound(p) => assert_eq!(p, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn walker_skips_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();
        fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();
        fs::write(dir.path().join("kept.log"), "").unwrap();

        let names: Vec<String> = walker(dir.path(), None)
            .filter_map(Result::ok)
            .filter(|e| e.depth() > 0)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names.len(), 3, "hidden and ignored files must be visited: {names:?}");
    }
}
