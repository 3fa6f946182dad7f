use crate::io::jsonl::{JsonlSource, write_jsonl_records};
use crate::pipeline::Pipeline;
use anyhow::Result;
use std::path::Path;

/// A pipeline reading JSON Lines records from `path`.
pub fn read_jsonl(path: impl AsRef<Path>) -> Pipeline {
    Pipeline::new(JsonlSource::from_path(path.as_ref()))
}

impl Pipeline {
    /// Run the pipeline and write one JSON object per record to `path`.
    /// Returns number of records written.
    ///
    /// # Errors
    /// Propagates the pipeline error before touching the file system.
    pub fn write_jsonl(self, path: impl AsRef<Path>) -> Result<usize> {
        let records = self.collect()?;
        write_jsonl_records(path, &records)
    }
}
