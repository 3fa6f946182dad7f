//! In-memory pipeline constructors.
//!
//! These wrap a [`MemorySource`] and are the usual starting point for tests,
//! demos, and pipelines whose input is already in memory.
//!
//! ```
//! use rowflow::{from_iter, record};
//!
//! let evens = from_iter((1..=6).map(|n| record! {"n" => n}))
//!     .filter(|r| r.as_int("n") % 2 == 0)
//!     .collect()
//!     .unwrap();
//! assert_eq!(evens.len(), 3);
//! ```

use crate::pipeline::Pipeline;
use crate::record::Record;
use crate::source::MemorySource;

/// A pipeline over the records of `data`, in order.
#[must_use]
pub fn from_vec(data: Vec<Record>) -> Pipeline {
    Pipeline::new(MemorySource::from(data))
}

/// A pipeline over any sequence of records. The sequence is buffered up front.
#[must_use]
pub fn from_iter<I>(iter: I) -> Pipeline
where
    I: IntoIterator<Item = Record>,
{
    Pipeline::new(MemorySource::new(iter))
}
