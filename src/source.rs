//! The pull contract every record producer implements, plus the in-memory
//! reference producer.
//!
//! A [`Source`] answers one question, "what is the next record?", with one of
//! three outcomes:
//!
//! - `Ok(Some(record))`: here is a record
//! - `Ok(None)`: the stream is exhausted
//! - `Err(e)`: the stream failed
//!
//! Exhaustion is idempotent: once a source has returned `Ok(None)` every later
//! call must return `Ok(None)` too. After an error a source may either repeat
//! the error or report exhaustion; the [`Pipeline`](crate::Pipeline) layer
//! treats the first error as terminal and never asks the source again.
//!
//! ## Cloning
//!
//! [`Source::clone_source`] returns an independent producer. What "independent"
//! means is up to the implementation:
//!
//! - sources backed by an external resource (a file, a database cursor) clone as
//!   **restart**: the copy begins again from the first row;
//! - [`MemorySource`] clones as **snapshot**: the copy holds exactly the records
//!   the original has not yet handed out.

use crate::record::Record;
use anyhow::Result;
use std::collections::VecDeque;

/// A pull-based producer of records.
///
/// Sources are `Send` so that a clone can be drained on another thread.
pub trait Source: Send {
    /// Pull the next record.
    ///
    /// # Errors
    /// Returns whatever failure the underlying producer hit (I/O, decoding,
    /// parsing). The error is passed through the pipeline unchanged.
    fn next(&mut self) -> Result<Option<Record>>;

    /// Produce an independent copy of this source (restart or snapshot, see the
    /// module docs).
    fn clone_source(&self) -> BoxedSource;
}

/// Owned, type-erased source.
pub type BoxedSource = Box<dyn Source>;

impl Clone for BoxedSource {
    fn clone(&self) -> Self {
        self.clone_source()
    }
}

impl Source for BoxedSource {
    fn next(&mut self) -> Result<Option<Record>> {
        (**self).next()
    }

    fn clone_source(&self) -> BoxedSource {
        (**self).clone_source()
    }
}

/// Buffer-backed source that hands out its records front to back.
///
/// Cloning copies the records that are still buffered, so a clone taken
/// mid-stream yields the remaining records and never the ones already
/// consumed.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: VecDeque<Record>,
}

impl MemorySource {
    pub fn new(records: impl IntoIterator<Item = Record>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Number of records not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl Source for MemorySource {
    fn next(&mut self) -> Result<Option<Record>> {
        Ok(self.records.pop_front())
    }

    fn clone_source(&self) -> BoxedSource {
        Box::new(self.clone())
    }
}

impl From<Vec<Record>> for MemorySource {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for MemorySource {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter)
    }
}
