//! Testing utilities for rowflow pipelines.
//!
//! This module provides helpers for writing idiomatic Rust tests against
//! pipelines and custom sources:
//!
//! - **Assertions**: compare pipeline output with expected records
//! - **Builders**: generate record sets fluently
//! - **Fixtures**: failing sources for error-path tests and sample datasets
//! - **Mock I/O**: temporary files for exercising file sources and sinks
//!
//! # Quick Start
//!
//! ```
//! use rowflow::testing::*;
//! use rowflow::Pipeline;
//!
//! # fn main() -> anyhow::Result<()> {
//! let result = Pipeline::from_records(numbered_records("n", 1..=3))
//!     .map(|r| r.set("n", r.as_int("n") * 2))
//!     .collect()?;
//!
//! assert_records_equal(&result, &numbered_records("n", [2, 4, 6]));
//! # Ok(())
//! # }
//! ```
//!
//! # Error injection
//!
//! [`FailingSource`] fails on its first pull and [`FailAfter`] after a given
//! number of records. Both raise [`SourceFailure`], which can be recovered from
//! the pipeline's error with `downcast_ref`:
//!
//! ```
//! use rowflow::testing::{FailingSource, SourceFailure};
//! use rowflow::Pipeline;
//!
//! let err = Pipeline::new(FailingSource::new()).collect().unwrap_err();
//! assert!(err.downcast_ref::<SourceFailure>().is_some());
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;

#[cfg(any(feature = "io-csv", feature = "io-jsonl"))]
pub mod mock_io;

// Re-export commonly used items
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;

#[cfg(any(feature = "io-csv", feature = "io-jsonl"))]
pub use mock_io::*;
