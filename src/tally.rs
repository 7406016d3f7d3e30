use std::fs::FileType;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

use crate::engine::{descendants, is_dir, map_ignore_error};
use crate::error::GetFilesError;

/// Folder and file totals for a tree, root excluded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Directories below the root.
    pub folders: usize,

    /// Regular files below the root. Symbolic links are not counted.
    pub files: usize,
}

impl Counts {
    fn record(&mut self, ft: Option<FileType>) {
        match ft {
            Some(ft) if ft.is_dir()  => self.folders += 1,
            Some(ft) if ft.is_file() => self.files += 1,
            _ => {}
        }
    }
}

impl From<Counts> for (usize, usize) {
    fn from(c: Counts) -> Self {
        (c.folders, c.files)
    }
}

/// Count every folder and regular file under `root`.
///
/// ```rust,ignore
/// let (folders, files) = getfiles::count("/srv/data")?.into();
/// ```
pub fn count(root: impl AsRef<Path>) -> Result<Counts, GetFilesError> {
    let root = root.as_ref();
    let mut counts = Counts::default();
    for entry in descendants(root) {
        counts.record(entry?.file_type());
    }
    debug!("{}: {} folders, {} files", root.display(), counts.folders, counts.files);
    Ok(counts)
}

/// Total size in bytes of every regular file under `root`.
///
/// Directory entries themselves contribute nothing; links are not followed.
pub fn folder_size(root: impl AsRef<Path>) -> Result<u64, GetFilesError> {
    let root = root.as_ref();
    let mut total = 0u64;
    for entry in descendants(root) {
        let entry = entry?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            total += entry.metadata().map_err(map_ignore_error)?.len();
        }
    }
    debug!("{}: {} bytes", root.display(), total);
    Ok(total)
}

/// Every folder under `root`, depth-first, root excluded.
///
/// # Errors
///
/// [`GetFilesError::NotADirectory`] if `root` is not a directory, including
/// when it does not exist.
pub fn list_folders(root: impl AsRef<Path>) -> Result<Vec<PathBuf>, GetFilesError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(GetFilesError::NotADirectory(root.to_path_buf()));
    }

    let mut folders = Vec::new();
    for entry in descendants(root) {
        let entry = entry?;
        if is_dir(&entry) {
            folders.push(entry.into_path());
        }
    }
    Ok(folders)
}
