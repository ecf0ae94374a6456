//! `filekit_io_fs` v1:
//! Rust-side filesystem helper layer.
//!
//! Architecture mirrors Python `io/fs` modules:
//! - `probe`  : existence / classification / accessibility predicates
//! - `copy`   : single-file content copy
//! - `digest` : streamed checksums
//! - `lines`  : line-oriented reading
//! - `spec`   : enums/options/errors
//! - `report` : copy report model
//! - `util`   : shared helper functions

pub mod copy;
pub mod digest;
pub mod lines;
pub mod probe;
pub mod report;
pub mod spec;
mod util;

pub use copy::{copy, copy_with_options};
pub use digest::{sha1_hex, sha1_hex_reader};
pub use lines::{LineIter, for_each_line, lines, read_lines};
pub use probe::{exists, is_accessible, is_directory, is_regular_file, is_symlink, stat};
pub use report::ReportCopy;
pub use spec::{
    EnumFileKind, EnumFileOpsErrorKind, FileOpsError, N_SIZE_BUFFER_DEFAULT, SpecCopyOptions,
    SpecFileStat,
};
