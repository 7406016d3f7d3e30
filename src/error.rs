use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GetFilesError {
    // Traversal
    #[error("no read permission for directory {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("directory {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    // Config
    #[error("invalid time format: {0:?}")]
    InvalidTimeFormat(String),

    // Runtime
    #[error("IO error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walk error: {0}")]
    Walk(String),
}

impl GetFilesError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::Io { path: p, .. } => Some(p),
            _ => None,
        }
    }

    /// Classify an I/O failure on `path` into the error taxonomy.
    ///
    /// Permission and not-found failures get their own variants so callers
    /// can match on them; a path that exists but is not a directory becomes
    /// [`NotADirectory`](Self::NotADirectory). Anything else stays `Io`.
    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ if is_non_directory(&path) => Self::NotADirectory(path),
            _ => Self::Io { path, source },
        }
    }
}

fn is_non_directory(path: &Path) -> bool {
    std::fs::symlink_metadata(path)
        .map(|m| !m.is_dir())
        .unwrap_or(false)
}
