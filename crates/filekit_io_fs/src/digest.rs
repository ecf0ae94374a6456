//! Streamed content checksums.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use sha1::{Digest, Sha1};
use tracing::debug;

use crate::spec::FileOpsError;
use crate::util::clean_path;

const N_SIZE_READ_CHUNK: usize = 64 * 1024;

/// SHA-1 of the full content of `path`, as 40 lowercase hex characters.
///
/// The file is streamed in fixed-size chunks, so memory use does not grow
/// with file size.
///
/// Errors: [`FileOpsError::NotFound`] if the file cannot be opened,
/// [`FileOpsError::ReadFailure`] if reading fails (a directory included).
pub fn sha1_hex<P: AsRef<Path>>(path: P) -> Result<String, FileOpsError> {
    let path = clean_path(path.as_ref());
    let file = File::open(&path).map_err(|e| FileOpsError::not_found(&path, e))?;
    let c_digest = sha1_hex_reader(BufReader::with_capacity(N_SIZE_READ_CHUNK, file))
        .map_err(|e| FileOpsError::read_failure(&path, e))?;
    debug!(path = %path.display(), sha1 = %c_digest, "checksum done");
    Ok(c_digest)
}

/// SHA-1 of everything `reader` yields until EOF.
pub fn sha1_hex_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha1::new();
    let mut buffer = vec![0_u8; N_SIZE_READ_CHUNK];
    loop {
        let n_bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n_bytes_read]);
    }
    Ok(hex::encode(hasher.finalize()))
}
