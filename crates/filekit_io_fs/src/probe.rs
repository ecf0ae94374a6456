//! Existence, classification, and accessibility predicates.
//!
//! Every predicate is total: filesystem errors collapse to `false` and are
//! only reported through `tracing` at trace level. Nothing is cached, so each
//! call reflects the filesystem at the instant it runs.

use std::fs::{self, File, Metadata, OpenOptions};
use std::io;
use std::path::Path;

use tracing::trace;

use crate::spec::{EnumFileKind, SpecFileStat};
use crate::util::{clean_path, is_missing_entry_error};

/// Report whether the entry named by `path` exists.
///
/// The final component is not followed, so a symlink counts as existing even
/// if its target is gone; a plain `fs::metadata` check would report it
/// missing. A permission error while inspecting the path still
/// means the entry exists.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    let path = clean_path(path.as_ref());
    if path.as_os_str().is_empty() {
        return false;
    }
    match fs::symlink_metadata(&path) {
        Ok(_) => true,
        Err(e) => {
            let b_missing = is_missing_entry_error(&e);
            trace!(path = %path.display(), error = %e, missing = b_missing, "stat failed");
            !b_missing
        }
    }
}

/// Report whether `path` resolves (following symlinks) to a directory.
pub fn is_directory<P: AsRef<Path>>(path: P) -> bool {
    resolved_metadata(path.as_ref()).is_some_and(|meta| meta.is_dir())
}

/// Report whether `path` resolves (following symlinks) to a regular file.
pub fn is_regular_file<P: AsRef<Path>>(path: P) -> bool {
    resolved_metadata(path.as_ref()).is_some_and(|meta| meta.file_type().is_file())
}

/// Report whether the final component of `path` is itself a symbolic link.
pub fn is_symlink<P: AsRef<Path>>(path: P) -> bool {
    let path = clean_path(path.as_ref());
    if path.as_os_str().is_empty() {
        return false;
    }
    fs::symlink_metadata(&path).is_ok_and(|meta| meta.file_type().is_symlink())
}

/// Report whether the current process can open `path` for reading.
///
/// Directories must be listable. An existing entry behind a permission
/// barrier is reported as inaccessible, never as missing.
pub fn is_accessible<P: AsRef<Path>>(path: P) -> bool {
    let path = clean_path(path.as_ref());
    let Some(meta) = resolved_metadata(&path) else {
        return false;
    };
    let res_open = if meta.is_dir() {
        fs::read_dir(&path).map(|_| ())
    } else {
        open_for_probe(&path).map(|_| ())
    };
    if let Err(e) = &res_open {
        trace!(path = %path.display(), error = %e, "open for read failed");
    }
    res_open.is_ok()
}

/// Inspect `path` once and return a snapshot, or `None` if it does not exist.
pub fn stat<P: AsRef<Path>>(path: P) -> Option<SpecFileStat> {
    let path = clean_path(path.as_ref());
    if !exists(&path) {
        return None;
    }

    let meta_resolved = resolved_metadata(&path);
    let kind = match &meta_resolved {
        Some(meta) if meta.is_dir() => EnumFileKind::Directory,
        Some(meta) if meta.file_type().is_file() => EnumFileKind::Regular,
        _ => EnumFileKind::Other,
    };

    Some(SpecFileStat {
        path: path.to_path_buf(),
        kind,
        if_symlink: is_symlink(&path),
        if_accessible: is_accessible(&path),
        size_bytes: meta_resolved.map_or(0, |meta| meta.len()),
    })
}

fn resolved_metadata(path: &Path) -> Option<Metadata> {
    let path = clean_path(path);
    if path.as_os_str().is_empty() {
        return None;
    }
    match fs::metadata(&path) {
        Ok(meta) => Some(meta),
        Err(e) => {
            trace!(path = %path.display(), error = %e, "stat failed");
            None
        }
    }
}

/// Open read-only without blocking on FIFOs that have no writer.
fn open_for_probe(path: &Path) -> io::Result<File> {
    let mut cfg_open = OpenOptions::new();
    cfg_open.read(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        cfg_open.custom_flags(libc::O_NONBLOCK);
    }
    cfg_open.open(path)
}
