//! Single-file content copy.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::report::ReportCopy;
use crate::spec::{FileOpsError, N_SIZE_BUFFER_DEFAULT, SpecCopyOptions};
use crate::util::{clean_path, is_same_file, resolve_destination_path};

/// Copy the bytes of the regular file `source` to `destination`.
///
/// If `destination` is an existing directory the file lands at
/// `destination/<basename(source)>`. An existing destination file is
/// overwritten. Permissions and timestamps are not carried over.
///
/// Errors:
/// - [`FileOpsError::NotFound`] when `source` is missing or cannot be opened.
/// - [`FileOpsError::InvalidSource`] when `source` is a directory or another
///   non-regular entry, or when it is the destination itself.
/// - [`FileOpsError::WriteFailure`] when the destination cannot be created,
///   is a FIFO, or the transfer fails. A failed transfer removes the
///   destination only if it is a regular file; device nodes and other special
///   entries are left in place.
///
/// Write errors the OS defers until close are not reported. Set
/// [`SpecCopyOptions::if_sync_all`] to surface them before the call returns.
pub fn copy<P, Q>(source: P, destination: Q) -> Result<(), FileOpsError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    copy_with_options(source, destination, &SpecCopyOptions::default()).map(|_| ())
}

/// [`copy`] with explicit [`SpecCopyOptions`], returning a [`ReportCopy`].
pub fn copy_with_options<P, Q>(
    source: P,
    destination: Q,
    spec_cp_options: &SpecCopyOptions,
) -> Result<ReportCopy, FileOpsError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_src = clean_path(source.as_ref());
    let path_dst = clean_path(destination.as_ref());

    let mut file_src = open_source_file(&path_src)?;

    let path_file_dst = resolve_destination_path(&path_src, &path_dst);
    if is_same_file(&path_src, &path_file_dst) {
        return Err(FileOpsError::invalid_source(
            &path_src,
            format!(
                "source and destination are the same file: {}",
                path_file_dst.display()
            ),
        ));
    }

    debug!(
        src = %path_src.display(),
        dst = %path_file_dst.display(),
        "copy start"
    );
    let n_bytes_copied = write_destination_file(&mut file_src, &path_file_dst, spec_cp_options)?;
    debug!(
        dst = %path_file_dst.display(),
        bytes = n_bytes_copied,
        "copy done"
    );

    Ok(ReportCopy {
        path_file_src: path_src.into_owned(),
        path_file_dst,
        n_bytes_copied,
    })
}

/// Open `path_src` after checking it is a regular file.
///
/// The type check runs before `open` so FIFOs and devices never block here.
fn open_source_file(path_src: &Path) -> Result<File, FileOpsError> {
    let meta_src = fs::metadata(path_src).map_err(|e| FileOpsError::not_found(path_src, e))?;
    if meta_src.is_dir() {
        return Err(FileOpsError::invalid_source(
            path_src,
            "source is a directory",
        ));
    }
    if !meta_src.file_type().is_file() {
        return Err(FileOpsError::invalid_source(
            path_src,
            "source is not a regular file",
        ));
    }
    File::open(path_src).map_err(|e| FileOpsError::not_found(path_src, e))
}

/// Create `path_file_dst` and stream `file_src` into it.
///
/// An existing FIFO destination is refused up front, since opening it for
/// writing blocks until a reader shows up.
fn write_destination_file(
    file_src: &mut File,
    path_file_dst: &Path,
    spec_cp_options: &SpecCopyOptions,
) -> Result<u64, FileOpsError> {
    if is_fifo_destination(path_file_dst) {
        return Err(FileOpsError::write_failure(
            path_file_dst,
            io::Error::new(io::ErrorKind::InvalidInput, "destination is a FIFO"),
        ));
    }
    let mut file_dst =
        File::create(path_file_dst).map_err(|e| FileOpsError::write_failure(path_file_dst, e))?;

    let res_transfer = transfer_bytes(file_src, &mut file_dst, spec_cp_options);
    let if_regular_dst = res_transfer.is_err()
        && file_dst
            .metadata()
            .is_ok_and(|meta| meta.file_type().is_file());
    drop(file_dst);

    res_transfer.map_err(|e| {
        if if_regular_dst {
            remove_partial_destination(path_file_dst);
        }
        FileOpsError::write_failure(path_file_dst, e)
    })
}

#[cfg(unix)]
fn is_fifo_destination(path_file_dst: &Path) -> bool {
    use std::os::unix::fs::FileTypeExt;

    fs::metadata(path_file_dst).is_ok_and(|meta| meta.file_type().is_fifo())
}

#[cfg(not(unix))]
fn is_fifo_destination(_path_file_dst: &Path) -> bool {
    false
}

fn transfer_bytes(
    file_src: &mut File,
    file_dst: &mut File,
    spec_cp_options: &SpecCopyOptions,
) -> io::Result<u64> {
    let n_size_buffer = match spec_cp_options.size_buffer {
        0 => N_SIZE_BUFFER_DEFAULT,
        n => n,
    };
    let mut buffer = vec![0_u8; n_size_buffer];
    let mut n_bytes_total: u64 = 0;

    loop {
        let n_bytes_read = match file_src.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        file_dst.write_all(&buffer[..n_bytes_read])?;
        n_bytes_total += n_bytes_read as u64;
    }

    file_dst.flush()?;
    if spec_cp_options.if_sync_all {
        file_dst.sync_all()?;
    }
    Ok(n_bytes_total)
}

fn remove_partial_destination(path_file_dst: &Path) {
    if let Err(e) = fs::remove_file(path_file_dst)
        && e.kind() != io::ErrorKind::NotFound
    {
        warn!(
            dst = %path_file_dst.display(),
            error = %e,
            "failed to remove partial destination"
        );
    }
}
