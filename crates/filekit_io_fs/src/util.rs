use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

////////////////////////////////////////////////////////////////////////////////
// #region PathCleaning

/// Strip leading/trailing whitespace from a path.
///
/// Non-UTF-8 paths are returned unchanged; there is no whitespace to
/// interpret without a text view.
pub(crate) fn clean_path(path: &Path) -> Cow<'_, Path> {
    match path.to_str() {
        Some(c_path) => {
            let c_trimmed = c_path.trim();
            if c_trimmed.len() == c_path.len() {
                Cow::Borrowed(path)
            } else {
                Cow::Owned(PathBuf::from(c_trimmed))
            }
        }
        None => Cow::Borrowed(path),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ErrorNormalization

/// Windows `ERROR_INVALID_NAME`: "The filename, directory name, or volume
/// label syntax is incorrect."
#[cfg(windows)]
const N_WIN_ERROR_INVALID_NAME: i32 = 123;

/// Whether a stat error means "no such entry" rather than "entry exists but
/// is unreadable".
///
/// All platform divergence for existence checks lives here. Permission
/// errors are never treated as missing.
pub(crate) fn is_missing_entry_error(err: &io::Error) -> bool {
    if matches!(
        err.kind(),
        io::ErrorKind::NotFound
            | io::ErrorKind::NotADirectory
            | io::ErrorKind::InvalidFilename
            | io::ErrorKind::InvalidInput
    ) {
        return true;
    }
    #[cfg(windows)]
    {
        if err.raw_os_error() == Some(N_WIN_ERROR_INVALID_NAME) {
            return true;
        }
    }
    false
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DestinationResolution

/// Derive the effective copy destination.
///
/// An existing directory at `path_dst` means "copy into it", so the result is
/// `path_dst/<basename(path_src)>`. Anything else is used as given.
///
/// # Examples
/// ```ignore
/// // `/tmp/out` is an existing directory
/// let path = resolve_destination_path(Path::new("a/b.txt"), Path::new("/tmp/out"));
/// assert_eq!(path, Path::new("/tmp/out/b.txt"));
/// ```
pub(crate) fn resolve_destination_path(path_src: &Path, path_dst: &Path) -> PathBuf {
    let b_dst_is_dir = fs::metadata(path_dst).is_ok_and(|meta| meta.is_dir());
    if b_dst_is_dir && let Some(c_name) = path_src.file_name() {
        return path_dst.join(c_name);
    }
    path_dst.to_path_buf()
}

/// Whether both paths resolve to the same existing file.
pub(crate) fn is_same_file(path_a: &Path, path_b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        match (fs::metadata(path_a), fs::metadata(path_b)) {
            (Ok(meta_a), Ok(meta_b)) => meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino(),
            _ => false,
        }
    }
    #[cfg(not(unix))]
    {
        match (fs::canonicalize(path_a), fs::canonicalize(path_b)) {
            (Ok(path_a_resolved), Ok(path_b_resolved)) => path_a_resolved == path_b_resolved,
            _ => false,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
