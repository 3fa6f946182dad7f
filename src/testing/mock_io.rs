//! Temporary-file helpers for testing file sources and sinks.

#[cfg(feature = "io-jsonl")]
use crate::record::Record;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

/// A temporary file that is deleted when dropped.
pub struct TempFilePath {
    _temp_file: NamedTempFile,
    path: PathBuf,
}

impl TempFilePath {
    /// Create an empty temporary file.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Self::from_builder(&mut tempfile::Builder::new())
    }

    /// Create an empty temporary file whose name ends in `.{extension}`, e.g.
    /// `"csv.gz"` to exercise compression detection.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created.
    pub fn with_extension(extension: &str) -> std::io::Result<Self> {
        Self::from_builder(tempfile::Builder::new().suffix(&format!(".{extension}")))
    }

    fn from_builder(builder: &mut tempfile::Builder<'_, '_>) -> std::io::Result<Self> {
        let temp_file = builder.tempfile()?;
        let path = temp_file.path().to_path_buf();
        Ok(Self {
            _temp_file: temp_file,
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A temporary directory that is removed, with its contents, when dropped.
pub struct TempDirPath {
    dir: TempDir,
}

impl TempDirPath {
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `filename` inside the directory. The file is not created.
    #[must_use]
    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.dir.path().join(filename)
    }
}

/// Write `contents` to a new temporary file with the given extension.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
///
/// # Example
///
/// ```
/// use rowflow::testing::mock_file;
/// use rowflow::{read_csv, CsvOptions};
///
/// let file = mock_file("csv", "id,name\n1,ada\n").unwrap();
/// let rows = read_csv(file.path(), CsvOptions::default().with_headers(true))
///     .collect()
///     .unwrap();
/// assert_eq!(rows[0].as_text("name"), "ada");
/// ```
pub fn mock_file(extension: &str, contents: impl AsRef<[u8]>) -> std::io::Result<TempFilePath> {
    let file = TempFilePath::with_extension(extension)?;
    let mut f = fs::File::create(file.path())?;
    f.write_all(contents.as_ref())?;
    f.flush()?;
    Ok(file)
}

/// Write `records` to a temporary `.jsonl` file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
#[cfg(feature = "io-jsonl")]
pub fn mock_jsonl_file(records: &[Record]) -> anyhow::Result<TempFilePath> {
    let file = TempFilePath::with_extension("jsonl")?;
    crate::io::jsonl::write_jsonl_records(file.path(), records)?;
    Ok(file)
}

/// Read a file produced by a sink back as raw text, for golden-output checks.
///
/// # Panics
///
/// Panics if the file cannot be read.
pub fn read_output(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read output file {}: {e}", path.display()))
}

/// Assert that the JSONL file at `path` holds exactly `expected`, in order.
///
/// # Panics
///
/// Panics if the file cannot be read or its records differ from `expected`.
#[cfg(feature = "io-jsonl")]
pub fn assert_jsonl_equals(path: impl AsRef<Path>, expected: &[Record]) {
    let path = path.as_ref();
    let actual = crate::Pipeline::new(crate::io::jsonl::JsonlSource::from_path(path))
        .collect()
        .unwrap_or_else(|e| panic!("Failed to read JSONL file {}: {e:#}", path.display()));
    super::assert_records_equal(&actual, expected);
}
