//! Error types for `sizesleuth-core`.
//!
//! Only [`CoreError`] is ever returned to a caller as a hard failure.
//! [`ScanItemError`] and [`DeleteError`] describe a single path and are
//! recovered where they occur: logged, counted, and reported to the user.

use std::io;
use std::path::{Path, PathBuf};

/// Failure of a whole core operation (starting a scan, opening the log,
/// loading settings).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A directory was expected but the path points to something else.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The settings file exists but could not be parsed.
    #[error("settings parse error: {0}")]
    Settings(String),

    /// The scanner thread could not be spawned.
    #[error("failed to spawn scanner thread: {0}")]
    Spawn(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout `sizesleuth-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// A single entry that could not be measured during a scan.
///
/// The entry is skipped and the scan carries on.
#[derive(Debug, thiserror::Error)]
pub enum ScanItemError {
    /// Reading the file's metadata failed (permission denied, deleted
    /// mid-scan, dangling symlink, ...).
    #[error("could not read size of {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be listed, so nothing below it was visited.
    #[error("could not read directory {}: {message}", .path.display())]
    ReadDir { path: PathBuf, message: String },
}

impl ScanItemError {
    /// The path the failure refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Metadata { path, .. } | Self::ReadDir { path, .. } => path,
        }
    }
}

/// Failure to remove one file.
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    /// The file is already gone.
    #[error("file no longer exists: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Anything else: file in use, path is a directory, I/O failure.
    #[error("could not delete {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Classify an I/O error returned while removing `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// The path the failure refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) | Self::Io { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_directory_displays_path() {
        let err = CoreError::NotADirectory(PathBuf::from("/some/file.txt"));
        assert_eq!(err.to_string(), "not a directory: /some/file.txt");
    }

    #[test]
    fn io_error_converts_into_core_error() {
        let io_err = io::Error::new(io::ErrorKind::Other, "disk on fire");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
        assert!(core_err.to_string().contains("disk on fire"));
    }

    #[test]
    fn scan_item_error_names_the_file() {
        let err = ScanItemError::Metadata {
            path: PathBuf::from("/data/big.iso"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.path(), Path::new("/data/big.iso"));
        assert_eq!(err.to_string(), "could not read size of /data/big.iso: denied");
    }

    #[test]
    fn delete_error_classifies_io_kinds() {
        let path = Path::new("/tmp/gone.bin");
        let missing = DeleteError::from_io(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(missing, DeleteError::NotFound(_)));

        let denied = DeleteError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(denied, DeleteError::PermissionDenied(_)));

        let other = DeleteError::from_io(path, io::Error::new(io::ErrorKind::Other, "busy"));
        assert!(matches!(other, DeleteError::Io { .. }));
        assert_eq!(other.path(), path);
        assert_eq!(other.to_string(), "could not delete /tmp/gone.bin: busy");
    }
}
