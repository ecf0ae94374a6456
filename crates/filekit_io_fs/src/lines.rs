//! Line-oriented file reading.
//!
//! `read_lines` and `for_each_line` are both thin consumers of [`LineIter`],
//! so they split lines identically:
//! - records are separated by `\n`; a trailing `\r` is dropped,
//! - empty lines are kept,
//! - a final terminating newline does not yield an extra empty line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::spec::FileOpsError;
use crate::util::clean_path;

/// Lazy, finite iterator over the lines of one file.
///
/// Yields `Err` at most once; iteration ends after the first read error.
#[derive(Debug)]
pub struct LineIter {
    path: PathBuf,
    reader: BufReader<File>,
    buffer: String,
    if_done: bool,
}

impl LineIter {
    fn open(path: &Path) -> Result<Self, FileOpsError> {
        let file = File::open(path).map_err(|e| FileOpsError::read_failure(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buffer: String::new(),
            if_done: false,
        })
    }

    /// Path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for LineIter {
    type Item = Result<String, FileOpsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.if_done {
            return None;
        }

        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => {
                self.if_done = true;
                None
            }
            Ok(_) => {
                let line = strip_line_terminator(&self.buffer);
                Some(Ok(line.to_string()))
            }
            Err(e) => {
                self.if_done = true;
                Some(Err(FileOpsError::read_failure(&self.path, e)))
            }
        }
    }
}

impl std::iter::FusedIterator for LineIter {}

fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Open `path` and return an iterator over its lines.
///
/// Fails with [`FileOpsError::ReadFailure`] if the file cannot be opened.
pub fn lines<P: AsRef<Path>>(path: P) -> Result<LineIter, FileOpsError> {
    let path = clean_path(path.as_ref());
    LineIter::open(&path)
}

/// Read every line of `path` into memory, in order.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, FileOpsError> {
    lines(path)?.collect()
}

/// Feed each line of `path` to `handler`, in order.
///
/// Stops at the first error, either from reading or returned by `handler`,
/// and returns it.
pub fn for_each_line<P, F, E>(path: P, mut handler: F) -> Result<(), E>
where
    P: AsRef<Path>,
    F: FnMut(&str) -> Result<(), E>,
    E: From<FileOpsError>,
{
    for res_line in lines(path)? {
        handler(&res_line?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use super::{for_each_line, lines, read_lines};
    use crate::spec::{EnumFileOpsErrorKind, FileOpsError};

    const L_LINES_03: [&str; 5] = ["Hi, my name is 03.", "", "I am multi...", "...", "lines!"];

    fn path_fixture_03() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/files/sub/03.txt")
    }

    #[test]
    fn read_lines_fixture() {
        let l_lines = read_lines(path_fixture_03()).expect("read lines");
        assert_eq!(l_lines, L_LINES_03);
    }

    #[test]
    fn for_each_line_fixture_matches_read_lines() {
        let mut l_visited = Vec::new();
        for_each_line(path_fixture_03(), |line| {
            l_visited.push(line.to_string());
            Ok::<(), FileOpsError>(())
        })
        .expect("for each line");

        assert_eq!(l_visited, L_LINES_03);
        assert_eq!(l_visited, read_lines(path_fixture_03()).expect("read lines"));
    }

    #[test]
    fn content_without_trailing_newline() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("03.txt");
        fs::write(&path, "Hi, my name is 03.\n\nI am multi...\n...\nlines!").expect("write");

        assert_eq!(read_lines(&path).expect("read lines"), L_LINES_03);
    }

    #[test]
    fn edge_cases_empty_blank_and_crlf() {
        let tmp = TempDir::new().expect("tempdir");
        let l_cases: [(&str, &[&str]); 5] = [
            ("", &[]),
            ("\n", &[""]),
            ("\n\n", &["", ""]),
            ("a\r\nb\r\n", &["a", "b"]),
            ("only", &["only"]),
        ];
        for (n_idx, (c_content, l_expected)) in l_cases.iter().enumerate() {
            let path = tmp.path().join(format!("case_{n_idx}.txt"));
            fs::write(&path, c_content).expect("write");
            assert_eq!(
                read_lines(&path).expect("read lines"),
                *l_expected,
                "content {c_content:?}"
            );
        }
    }

    #[test]
    fn line_iter_is_lazy_and_restartable_per_call() {
        let mut iter_lines = lines(path_fixture_03()).expect("open");
        assert_eq!(iter_lines.path(), path_fixture_03());
        assert_eq!(iter_lines.next().expect("first").expect("ok"), L_LINES_03[0]);

        let l_again: Vec<String> = lines(path_fixture_03())
            .expect("open again")
            .collect::<Result<_, _>>()
            .expect("read");
        assert_eq!(l_again, L_LINES_03);

        assert_eq!(iter_lines.count(), 4);
    }

    #[test]
    fn missing_file_is_read_failure() {
        let err = read_lines("testdata/files/not_here.txt").expect_err("must fail");
        assert_eq!(err.kind(), EnumFileOpsErrorKind::ReadFailure);

        let err = for_each_line("   ", |_| Ok::<(), FileOpsError>(())).expect_err("must fail");
        assert_eq!(err.kind(), EnumFileOpsErrorKind::ReadFailure);
    }

    #[test]
    fn invalid_utf8_is_read_failure() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("bin.txt");
        fs::write(&path, b"ok\n\xff\xfe\n").expect("write");

        let mut iter_lines = lines(&path).expect("open");
        assert_eq!(iter_lines.next().expect("first").expect("ok"), "ok");
        let err = iter_lines.next().expect("second").expect_err("invalid utf-8");
        assert_eq!(err.kind(), EnumFileOpsErrorKind::ReadFailure);
        assert!(iter_lines.next().is_none());
    }

    #[derive(Debug)]
    enum VisitError {
        Stop(usize),
        Fs(FileOpsError),
    }

    impl From<FileOpsError> for VisitError {
        fn from(err: FileOpsError) -> Self {
            Self::Fs(err)
        }
    }

    #[test]
    fn for_each_line_stops_on_handler_error() {
        let mut n_seen = 0;
        let res = for_each_line(path_fixture_03(), |line| {
            n_seen += 1;
            if line.is_empty() {
                return Err(VisitError::Stop(n_seen));
            }
            Ok(())
        });

        assert!(matches!(res, Err(VisitError::Stop(2))));
        assert_eq!(n_seen, 2);

        let res = for_each_line("   ", |_| Ok::<(), VisitError>(()));
        assert!(matches!(
            res,
            Err(VisitError::Fs(err)) if err.kind() == EnumFileOpsErrorKind::ReadFailure
        ));
    }
}
