//! File operation models, options, and top-level error types.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Kind of a filesystem entry after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumFileKind {
    /// Regular file.
    Regular,
    /// Directory.
    Directory,
    /// Anything else: device, socket, FIFO, or a dangling symlink.
    Other,
}

/// Coarse category of a [`FileOpsError`], for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumFileOpsErrorKind {
    NotFound,
    InvalidSource,
    WriteFailure,
    ReadFailure,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Default transfer buffer for [`SpecCopyOptions::size_buffer`].
pub const N_SIZE_BUFFER_DEFAULT: usize = 64 * 1024;

/// Input options for `copy_with_options`.
#[derive(Debug, Clone)]
pub struct SpecCopyOptions {
    /// Transfer buffer size in bytes. `0` falls back to the default.
    pub size_buffer: usize,
    /// Call `sync_all` on the destination before closing it. Without it, write
    /// errors the OS only reports at close time go unnoticed.
    pub if_sync_all: bool,
}

impl Default for SpecCopyOptions {
    fn default() -> Self {
        Self {
            size_buffer: N_SIZE_BUFFER_DEFAULT,
            if_sync_all: false,
        }
    }
}

/// Point-in-time snapshot of one filesystem entry. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFileStat {
    /// Trimmed path that was inspected.
    pub path: PathBuf,
    /// Entry kind, following symlinks.
    pub kind: EnumFileKind,
    /// Whether the final path component itself is a symbolic link.
    pub if_symlink: bool,
    /// Whether the current process can open the entry for reading.
    pub if_accessible: bool,
    /// Size in bytes of the resolved entry (`0` when it cannot be resolved).
    pub size_bytes: u64,
}

/// Errors surfaced by copy, checksum, and line-reading operations.
///
/// Predicates (`exists`, `is_directory`, ...) never return these.
#[derive(Debug, Error)]
pub enum FileOpsError {
    /// Target entry is absent or cannot be opened for reading.
    #[error("Path not found or unreadable: {} ({source})", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Source does not meet the operation preconditions.
    #[error("Invalid source {}: {reason}", path.display())]
    InvalidSource { path: PathBuf, reason: String },
    /// Destination could not be created or fully written.
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Content could not be opened or fully read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileOpsError {
    pub(crate) fn not_found(path: &Path, source: io::Error) -> Self {
        Self::NotFound {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn invalid_source(path: &Path, reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn write_failure(path: &Path, source: io::Error) -> Self {
        Self::WriteFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn read_failure(path: &Path, source: io::Error) -> Self {
        Self::ReadFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path the failure is attributed to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. }
            | Self::InvalidSource { path, .. }
            | Self::WriteFailure { path, .. }
            | Self::ReadFailure { path, .. } => path,
        }
    }

    pub fn kind(&self) -> EnumFileOpsErrorKind {
        match self {
            Self::NotFound { .. } => EnumFileOpsErrorKind::NotFound,
            Self::InvalidSource { .. } => EnumFileOpsErrorKind::InvalidSource,
            Self::WriteFailure { .. } => EnumFileOpsErrorKind::WriteFailure,
            Self::ReadFailure { .. } => EnumFileOpsErrorKind::ReadFailure,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
