//! # Rowflow
//!
//! A **lazy, pull-based record transformation engine**. Rowflow composes
//! operators over tabular rows ([`Record`]s of named [`Value`]s) into a
//! [`Pipeline`], and nothing runs until the consumer pulls.
//!
//! ## Key Features
//!
//! - **Pull model** - every stage is a [`Source`]; `next()` yields one record,
//!   exhaustion, or an error
//! - **Stateless operators** - `filter`, `map`
//! - **Blocking operators** - `reduce`, `reduce_by_key`, `sort_by`
//! - **Combining operators** - `concat` (bag union) and `inner_join` (hash join)
//! - **Replayable pipelines** - cloning a pipeline clones its whole upstream
//!   chain, each clone with its own copy of the operator state
//! - **Flat-file I/O** - CSV and JSON Lines sources and sinks with transparent
//!   gzip/zstd (all optional via feature flags)
//!
//! ## Quick Start
//!
//! ```
//! use rowflow::{record, Pipeline, SortKind};
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let sales = Pipeline::from_records(vec![
//!     record! {"region" => "north", "amount" => 10},
//!     record! {"region" => "south", "amount" => 4},
//!     record! {"region" => "north", "amount" => 5},
//! ]);
//!
//! let totals = sales
//!     .reduce_by_key("region", |acc, r| acc.set("amount", acc.as_int("amount") + r.as_int("amount")))
//!     .sort_by("amount", SortKind::Numeric)
//!     .collect()?;
//!
//! assert_eq!(totals[0].as_text("region"), "south");
//! assert_eq!(totals[1].as_int("amount"), 15);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Source
//!
//! [`Source`] is the two-method contract every producer implements:
//! `next()` returns `Ok(Some(record))`, `Ok(None)` once exhausted, or `Err`.
//! `clone_source()` returns an independent producer for the same data.
//! [`MemorySource`], [`io::csv::CsvSource`] and [`io::jsonl::JsonlSource`]
//! ship with the crate; anything else can be plugged in by implementing the
//! trait.
//!
//! ### Pipeline
//!
//! A [`Pipeline`] wraps an upstream source and at most one [`Transform`].
//! Each operator method consumes the pipeline and returns a new one with the
//! old one as its input, so a chain reads top to bottom. A pipeline is itself a
//! [`Source`], which is how pipelines feed `concat` and `inner_join`.
//!
//! ### Blocking vs. streaming
//!
//! `filter`, `map` and `concat` stream. `reduce`, `reduce_by_key` and `sort_by`
//! drain their upstream on the first pull. `inner_join` drains its right side
//! into a hash index on the first pull and streams the left side.
//!
//! ### Errors
//!
//! Errors are [`anyhow::Error`]s. The first upstream error is returned
//! unchanged from the pull that hit it and aborts `collect`; no partial results
//! are returned. Use `downcast_ref` to recover a typed source error. A failed
//! pipeline stays failed: later pulls return [`PipelineFailed`].
//!
//! ### Ordering
//!
//! `filter`, `map`, `concat` and `inner_join` preserve upstream order.
//! `reduce_by_key` emits groups in unspecified order, and `sort_by` is not
//! stable among equal keys.
//!
//! ## Feature Flags
//!
//! - `io-csv` - CSV source and sink (default)
//! - `io-jsonl` - JSON Lines source and sink (default)
//! - `compression-gzip` - gzip for file sources and sinks (default)
//! - `compression-zstd` - zstd for file sources and sinks (default)
//!
//! ## Logging
//!
//! Rowflow emits [`tracing`](https://docs.rs/tracing) events at `debug` (blocking
//! operators draining, files opened and written) and `trace` (per-record
//! detail). Install a subscriber in the application to see them.

pub mod collection;
pub mod helpers;
pub mod io;
pub mod node;
pub mod pipeline;
pub mod record;
pub mod source;
pub mod testing;
pub mod value;

// General re-exports
pub use helpers::*;
pub use node::Transform;
pub use pipeline::{Pipeline, PipelineFailed, Records};
pub use record::Record;
pub use source::{BoxedSource, MemorySource, Source};
pub use value::{Value, ValueKind};

// Gated re-exports
#[cfg(feature = "io-csv")]
pub use io::csv::{CsvOptions, CsvSource};

#[cfg(feature = "io-jsonl")]
pub use io::jsonl::JsonlSource;
