use crate::io::csv::{CsvOptions, CsvSource, write_csv_records};
use crate::pipeline::Pipeline;
use anyhow::Result;
use std::path::Path;

/// A pipeline reading CSV rows from `path` with the given reader settings.
///
/// Nothing is opened until the first record is pulled, so a missing file is
/// reported by `next`/`collect`, not here.
pub fn read_csv(path: impl AsRef<Path>, options: CsvOptions) -> Pipeline {
    Pipeline::new(CsvSource::from_path(path.as_ref()).with_options(options))
}

impl Pipeline {
    /// Run the pipeline and write its records to `path` as CSV.
    ///
    /// The pipeline is collected before the file is created, so an upstream
    /// error leaves no output behind. Returns the number of rows written.
    ///
    /// # Errors
    /// Propagates the pipeline error, or an I/O error from writing.
    pub fn write_csv(self, path: impl AsRef<Path>) -> Result<usize> {
        let records = self.collect()?;
        write_csv_records(path, &records)
    }
}
