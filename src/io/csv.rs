//! Delimited-text source and sink.
//!
//! [`CsvSource`] turns each row of a CSV document into a [`Record`] whose
//! values are all [`Value::Text`]; numeric interpretation is left to the
//! record accessors (`as_int`) and to [`SortKind::Numeric`](crate::SortKind).
//! Field names come from the header row when [`CsvOptions::has_headers`] is
//! set, otherwise from the zero-based column index (`"0"`, `"1"`, ...).
//! Ragged rows are accepted rather than rejected.
//!
//! [`write_csv_records`] is the inverse: the header is the sorted union of all
//! field names and a record missing a field gets an empty cell.

use crate::io::Input;
use crate::io::compression::{DynReader, FinishWrite};
use crate::record::Record;
use crate::source::{BoxedSource, Source};
use crate::value::Value;
use anyhow::{Context, Result, anyhow};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Reader settings for [`CsvSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Treat the first row as field names instead of data.
    pub has_headers: bool,
    pub delimiter: u8,
    /// Strip surrounding whitespace from headers and fields.
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_headers: false,
            delimiter: b',',
            trim: false,
        }
    }
}

impl CsvOptions {
    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    fn reader(&self, rdr: DynReader) -> csv::Reader<DynReader> {
        csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .flexible(true)
            .from_reader(rdr)
    }
}

struct OpenCsv {
    reader: csv::Reader<DynReader>,
    names: Vec<String>,
    row: csv::StringRecord,
    rows_read: u64,
}

impl OpenCsv {
    /// Name of column `i`, falling back to its index for rows wider than the
    /// header.
    fn name(&self, i: usize) -> String {
        self.names.get(i).cloned().unwrap_or_else(|| i.to_string())
    }
}

/// A [`Source`] over CSV rows.
///
/// The input is opened on the first [`next`](Source::next); a clone starts
/// over from the first row with its own reader.
///
/// Rows may differ in length. A short row yields a record with fewer fields,
/// and cells beyond the header are named by their column index; no
/// field-count error is raised.
///
/// ```
/// use rowflow::io::csv::CsvSource;
/// use rowflow::Pipeline;
///
/// let src = CsvSource::from_bytes("a,1\nb,2\n");
/// let rows = Pipeline::new(src).collect().unwrap();
/// assert_eq!(rows[1].as_text("0"), "b");
/// assert_eq!(rows[1].as_int("1"), 2);
/// ```
pub struct CsvSource {
    input: Input,
    options: CsvOptions,
    state: Option<OpenCsv>,
}

impl CsvSource {
    /// Read from an in-memory buffer. Clones share the buffer.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            input: Input::Bytes(Arc::from(bytes.as_ref())),
            options: CsvOptions::default(),
            state: None,
        }
    }

    /// Read from a file, reopened by every clone. `.gz`/`.zst` input is
    /// decompressed transparently.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            input: Input::File(path.into()),
            options: CsvOptions::default(),
            state: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CsvOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn options(&self) -> CsvOptions {
        self.options
    }

    fn open(&self) -> Result<OpenCsv> {
        let mut reader = self.options.reader(self.input.open()?);
        let names = if self.options.has_headers {
            reader
                .headers()
                .with_context(|| format!("read CSV header of {}", self.input))?
                .iter()
                .map(str::to_owned)
                .collect()
        } else {
            Vec::new()
        };
        debug!(input = %self.input, columns = names.len(), "csv source opened");
        Ok(OpenCsv {
            reader,
            names,
            row: csv::StringRecord::new(),
            rows_read: 0,
        })
    }
}

impl Source for CsvSource {
    fn next(&mut self) -> Result<Option<Record>> {
        if self.state.is_none() {
            self.state = Some(self.open()?);
        }
        let Some(st) = self.state.as_mut() else {
            return Ok(None);
        };

        let has_row = st
            .reader
            .read_record(&mut st.row)
            .with_context(|| format!("parse CSV record #{} of {}", st.rows_read + 1, self.input))?;
        if !has_row {
            return Ok(None);
        }
        st.rows_read += 1;

        let rec = st
            .row
            .iter()
            .enumerate()
            .map(|(i, field)| (st.name(i), Value::Text(field.to_owned())))
            .collect();
        Ok(Some(rec))
    }

    fn clone_source(&self) -> BoxedSource {
        Box::new(CsvSource {
            input: self.input.clone(),
            options: self.options,
            state: None,
        })
    }
}

/// Write `records` to `path` as CSV with a header row.
///
/// Creates parent directories as needed; a `.gz`/`.zst` extension selects
/// compression. Values are written in their display form, so integers and
/// booleans read back as text.
///
/// # Returns
/// The number of data rows written.
///
/// # Errors
/// Returns an error if the file cannot be created or a row fails to write.
pub fn write_csv_records(path: impl AsRef<Path>, records: &[Record]) -> Result<usize> {
    let path = path.as_ref();
    let columns: BTreeSet<&str> = records.iter().flat_map(Record::keys).collect();

    let w = crate::io::create_output(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(w);

    // Field-less records have nothing to write; the file is left empty.
    if !columns.is_empty() {
        wtr.write_record(&columns)
            .with_context(|| format!("write CSV header to {}", path.display()))?;
        for (i, rec) in records.iter().enumerate() {
            let cells = columns
                .iter()
                .map(|c| rec.get(c).map(ToString::to_string).unwrap_or_default());
            wtr.write_record(cells)
                .with_context(|| format!("write CSV row #{} to {}", i + 1, path.display()))?;
        }
    }
    wtr.into_inner()
        .map_err(|e| anyhow!("flush {}: {}", path.display(), e.error()))?
        .finish()
        .with_context(|| format!("finish {}", path.display()))?;
    debug!(path = %path.display(), rows = records.len(), columns = columns.len(), "csv written");
    Ok(records.len())
}
