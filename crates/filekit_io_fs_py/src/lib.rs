use filekit_io_fs::{
    EnumFileKind, FileOpsError, ReportCopy, SpecCopyOptions, SpecFileStat, copy_with_options,
    exists, for_each_line, is_accessible, is_directory, is_regular_file, is_symlink, read_lines,
    sha1_hex, stat,
};
use pyo3::exceptions::{PyFileNotFoundError, PyIsADirectoryError, PyOSError, PyValueError};
use pyo3::prelude::*;

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "filekit.fs.ops.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

#[pyclass(name = "ReportCopy")]
#[derive(Debug, Clone)]
struct PyReportCopy {
    report_copy: ReportCopy,
}

impl From<ReportCopy> for PyReportCopy {
    fn from(report_copy: ReportCopy) -> Self {
        Self { report_copy }
    }
}

#[pymethods]
impl PyReportCopy {
    #[getter]
    fn path_file_src(&self) -> String {
        self.report_copy.path_file_src.to_string_lossy().to_string()
    }

    #[getter]
    fn path_file_dst(&self) -> String {
        self.report_copy.path_file_dst.to_string_lossy().to_string()
    }

    #[getter]
    fn n_bytes_copied(&self) -> u64 {
        self.report_copy.n_bytes_copied
    }

    #[pyo3(signature = (prefix = "[COPY]"))]
    fn format(&self, prefix: &str) -> String {
        self.report_copy.format(prefix)
    }

    fn __str__(&self) -> String {
        self.report_copy.to_string()
    }
}

#[pyclass(name = "FileStat")]
#[derive(Debug, Clone)]
struct PyFileStat {
    #[pyo3(get)]
    path: String,
    #[pyo3(get)]
    kind: String,
    #[pyo3(get)]
    if_symlink: bool,
    #[pyo3(get)]
    if_accessible: bool,
    #[pyo3(get)]
    size_bytes: u64,
}

impl From<SpecFileStat> for PyFileStat {
    fn from(spec_stat: SpecFileStat) -> Self {
        Self {
            path: spec_stat.path.to_string_lossy().to_string(),
            kind: match spec_stat.kind {
                EnumFileKind::Regular => "regular",
                EnumFileKind::Directory => "directory",
                EnumFileKind::Other => "other",
            }
            .to_string(),
            if_symlink: spec_stat.if_symlink,
            if_accessible: spec_stat.if_accessible,
            size_bytes: spec_stat.size_bytes,
        }
    }
}

fn map_file_ops_error(exception: FileOpsError) -> PyErr {
    let message = exception.to_string();
    match exception {
        FileOpsError::NotFound { .. } => PyFileNotFoundError::new_err(message),
        FileOpsError::InvalidSource { ref path, .. } if path.is_dir() => {
            PyIsADirectoryError::new_err(message)
        }
        FileOpsError::InvalidSource { .. } => PyValueError::new_err(message),
        FileOpsError::WriteFailure { .. } | FileOpsError::ReadFailure { .. } => {
            PyOSError::new_err(message)
        }
    }
}

/// Error channel for `for_each_line`: either the filesystem failed or the
/// Python callback raised.
enum BridgeLineError {
    Fs(FileOpsError),
    Py(PyErr),
}

impl From<FileOpsError> for BridgeLineError {
    fn from(exception: FileOpsError) -> Self {
        Self::Fs(exception)
    }
}

impl From<BridgeLineError> for PyErr {
    fn from(exception: BridgeLineError) -> Self {
        match exception {
            BridgeLineError::Fs(e) => map_file_ops_error(e),
            BridgeLineError::Py(e) => e,
        }
    }
}

#[pyfunction(name = "copy")]
#[pyo3(signature = (source, destination, size_buffer = None, if_sync_all = false))]
fn copy_py(
    py: Python<'_>,
    source: String,
    destination: String,
    size_buffer: Option<usize>,
    if_sync_all: bool,
) -> PyResult<PyReportCopy> {
    let spec_cp_options = SpecCopyOptions {
        size_buffer: size_buffer.unwrap_or(SpecCopyOptions::default().size_buffer),
        if_sync_all,
    };

    let report_copy =
        py.allow_threads(|| copy_with_options(source, destination, &spec_cp_options));
    let report_copy = report_copy.map_err(map_file_ops_error)?;
    Ok(PyReportCopy::from(report_copy))
}

#[pyfunction(name = "exists")]
fn exists_py(py: Python<'_>, path: String) -> bool {
    py.allow_threads(|| exists(path))
}

#[pyfunction(name = "is_directory")]
fn is_directory_py(py: Python<'_>, path: String) -> bool {
    py.allow_threads(|| is_directory(path))
}

#[pyfunction(name = "is_regular_file")]
fn is_regular_file_py(py: Python<'_>, path: String) -> bool {
    py.allow_threads(|| is_regular_file(path))
}

#[pyfunction(name = "is_symlink")]
fn is_symlink_py(py: Python<'_>, path: String) -> bool {
    py.allow_threads(|| is_symlink(path))
}

#[pyfunction(name = "is_accessible")]
fn is_accessible_py(py: Python<'_>, path: String) -> bool {
    py.allow_threads(|| is_accessible(path))
}

#[pyfunction(name = "stat")]
fn stat_py(py: Python<'_>, path: String) -> Option<PyFileStat> {
    py.allow_threads(|| stat(path)).map(PyFileStat::from)
}

#[pyfunction(name = "sha1_hex")]
fn sha1_hex_py(py: Python<'_>, path: String) -> PyResult<String> {
    py.allow_threads(|| sha1_hex(path)).map_err(map_file_ops_error)
}

#[pyfunction(name = "read_lines")]
fn read_lines_py(py: Python<'_>, path: String) -> PyResult<Vec<String>> {
    py.allow_threads(|| read_lines(path)).map_err(map_file_ops_error)
}

/// Call `callback(line)` for each line; the first raised exception stops
/// iteration and is re-raised unchanged.
#[pyfunction(name = "for_each_line")]
fn for_each_line_py(path: String, callback: Bound<'_, PyAny>) -> PyResult<()> {
    for_each_line(path, |line| {
        callback
            .call1((line,))
            .map(|_| ())
            .map_err(BridgeLineError::Py)
    })
    .map_err(PyErr::from)
}

#[pymodule]
fn _filekit_io_fs_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyReportCopy>()?;
    module.add_class::<PyFileStat>()?;
    module.add_function(wrap_pyfunction!(copy_py, module)?)?;
    module.add_function(wrap_pyfunction!(exists_py, module)?)?;
    module.add_function(wrap_pyfunction!(is_directory_py, module)?)?;
    module.add_function(wrap_pyfunction!(is_regular_file_py, module)?)?;
    module.add_function(wrap_pyfunction!(is_symlink_py, module)?)?;
    module.add_function(wrap_pyfunction!(is_accessible_py, module)?)?;
    module.add_function(wrap_pyfunction!(stat_py, module)?)?;
    module.add_function(wrap_pyfunction!(sha1_hex_py, module)?)?;
    module.add_function(wrap_pyfunction!(read_lines_py, module)?)?;
    module.add_function(wrap_pyfunction!(for_each_line_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
