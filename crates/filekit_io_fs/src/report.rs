//! Copy report model.

use std::fmt;
use std::path::PathBuf;

/// Outcome of one successful `copy_with_options` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCopy {
    /// Trimmed source path as given.
    pub path_file_src: PathBuf,
    /// Effective destination, after directory-target resolution.
    pub path_file_dst: PathBuf,
    /// Bytes written to the destination.
    pub n_bytes_copied: u64,
}

impl ReportCopy {
    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} src={} dst={} bytes={}",
            self.path_file_src.display(),
            self.path_file_dst.display(),
            self.n_bytes_copied
        )
    }
}

impl fmt::Display for ReportCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COPY]"))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::ReportCopy;

    #[test]
    fn report_copy_format_and_display_match() {
        let report = ReportCopy {
            path_file_src: PathBuf::from("in/01.txt"),
            path_file_dst: PathBuf::from("out/01.txt"),
            n_bytes_copied: 19,
        };

        let txt = report.format("[COPY]");
        assert_eq!(txt, "[COPY] src=in/01.txt dst=out/01.txt bytes=19");
        assert_eq!(report.to_string(), txt);
        assert_eq!(
            report.format(">>"),
            ">> src=in/01.txt dst=out/01.txt bytes=19"
        );
    }
}
