//! JSON Lines source and sink.
//!
//! Each non-blank line is one JSON object whose values are integers, strings
//! or booleans. Floats, `null`, arrays and nested objects are rejected with an
//! error naming the offending line; blank lines are skipped.

use crate::io::Input;
use crate::io::compression::{DynReader, FinishWrite};
use crate::record::Record;
use crate::source::{BoxedSource, Source};
use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

struct OpenJsonl {
    lines: Lines<BufReader<DynReader>>,
    line_no: u64,
}

/// A [`Source`] over a JSON Lines document.
///
/// Like [`CsvSource`](crate::io::csv::CsvSource), the input is opened lazily
/// and every clone restarts from the first line.
///
/// ```
/// use rowflow::io::jsonl::JsonlSource;
/// use rowflow::Pipeline;
///
/// let src = JsonlSource::from_bytes("{\"id\": 1, \"ok\": true}\n\n{\"id\": 2, \"ok\": false}\n");
/// let rows = Pipeline::new(src).collect().unwrap();
/// assert_eq!(rows.len(), 2);
/// assert!(rows[0].as_bool("ok"));
/// ```
pub struct JsonlSource {
    input: Input,
    state: Option<OpenJsonl>,
}

impl JsonlSource {
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            input: Input::Bytes(Arc::from(bytes.as_ref())),
            state: None,
        }
    }

    /// Read from a file, reopened by every clone. `.gz`/`.zst` input is
    /// decompressed transparently.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            input: Input::File(path.into()),
            state: None,
        }
    }

    fn open(&self) -> Result<OpenJsonl> {
        let rdr = self.input.open()?;
        debug!(input = %self.input, "jsonl source opened");
        Ok(OpenJsonl {
            lines: BufReader::new(rdr).lines(),
            line_no: 0,
        })
    }
}

impl Source for JsonlSource {
    fn next(&mut self) -> Result<Option<Record>> {
        if self.state.is_none() {
            self.state = Some(self.open()?);
        }
        let Some(st) = self.state.as_mut() else {
            return Ok(None);
        };

        for line in st.lines.by_ref() {
            st.line_no += 1;
            let line =
                line.with_context(|| format!("read line {} in {}", st.line_no, self.input))?;
            if line.trim().is_empty() {
                continue;
            }
            let rec = serde_json::from_str::<Record>(&line).with_context(|| {
                format!("parse JSONL line {} in {}: {}", st.line_no, self.input, line)
            })?;
            return Ok(Some(rec));
        }
        Ok(None)
    }

    fn clone_source(&self) -> BoxedSource {
        Box::new(JsonlSource {
            input: self.input.clone(),
            state: None,
        })
    }
}

/// Write `records` to `path`, one JSON object per line.
///
/// Creates parent directories as needed; a `.gz`/`.zst` extension selects
/// compression.
///
/// # Returns
/// The number of records written.
///
/// # Errors
/// Returns an error if the file cannot be created or a record fails to
/// serialize.
pub fn write_jsonl_records(path: impl AsRef<Path>, records: &[Record]) -> Result<usize> {
    let path = path.as_ref();
    let mut w = crate::io::create_output(path)?;
    for (i, rec) in records.iter().enumerate() {
        serde_json::to_writer(&mut w, rec)
            .with_context(|| format!("serialize record #{} to {}", i + 1, path.display()))?;
        w.write_all(b"\n")?;
    }
    w.finish()
        .with_context(|| format!("finish {}", path.display()))?;
    debug!(path = %path.display(), rows = records.len(), "jsonl written");
    Ok(records.len())
}
