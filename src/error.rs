use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FfindError {
    // Traversal
    #[error("no such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("cannot resolve symlink: {}", .path.display())]
    SymlinkResolution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("symlink cycle: {}", .0.display())]
    CycleDetected(PathBuf),

    #[error("IO error: {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Coarse classification of a [`FfindError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    /// Includes too-many-links failures on cyclic link chains.
    SymlinkResolution,
    CycleDetected,
    /// Raw OS error passed through unclassified.
    Other,
}

impl FfindError {
    /// Map an OS error at `path` into the taxonomy.
    ///
    /// Only not-found and permission failures are recognised; anything else
    /// is kept as [`FfindError::Io`] with the original error as its source.
    pub(crate) fn classify(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source: err },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::SymlinkResolution { .. } => ErrorKind::SymlinkResolution,
            Self::CycleDetected(_) => ErrorKind::CycleDetected,
            Self::Io { .. } | Self::InvalidPattern(_) => ErrorKind::Other,
        }
    }

    /// The path this error occurred at, if applicable.
    ///
    /// Always the path as the consumer addressed it, never a resolved symlink
    /// target.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::CycleDetected(p)
            | Self::SymlinkResolution { path: p, .. }
            | Self::Io { path: p, .. } => Some(p),
            Self::InvalidPattern(_) => None,
        }
    }

    /// Re-anchor the error at `path`. Used when an error raised at a
    /// resolved location has to be reported at the link's location.
    pub(crate) fn at(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match self {
            Self::NotFound(_) => Self::NotFound(path),
            Self::PermissionDenied(_) => Self::PermissionDenied(path),
            Self::CycleDetected(_) => Self::CycleDetected(path),
            Self::SymlinkResolution { source, .. } => Self::SymlinkResolution { path, source },
            Self::Io { source, .. } => Self::Io { path, source },
            other @ Self::InvalidPattern(_) => other,
        }
    }

    /// Whether traversal can continue after this error.
    ///
    /// Every traversal error is confined to its own branch; only
    /// configuration errors are fatal.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidPattern(_))
    }
}
