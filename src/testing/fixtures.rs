//! Pre-built sources and datasets for common testing scenarios.

use crate::record::Record;
use crate::source::{BoxedSource, Source};
use crate::value::Value;
use anyhow::Result;
use std::sync::Arc;

/// The error raised by [`FailingSource`] and [`FailAfter`].
///
/// Tests recover it from a pipeline error with
/// `err.downcast_ref::<SourceFailure>()`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("source failure: {0}")]
pub struct SourceFailure(pub String);

impl Default for SourceFailure {
    fn default() -> Self {
        Self("injected".to_string())
    }
}

/// A source whose every pull fails with a [`SourceFailure`].
#[derive(Debug, Clone, Default)]
pub struct FailingSource {
    failure: SourceFailure,
}

impl FailingSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with a specific message, to tell several failing inputs apart.
    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            failure: SourceFailure(message.into()),
        }
    }
}

impl Source for FailingSource {
    fn next(&mut self) -> Result<Option<Record>> {
        Err(self.failure.clone().into())
    }

    fn clone_source(&self) -> BoxedSource {
        Box::new(self.clone())
    }
}

/// A source that yields `records` in order and then fails, instead of
/// reporting exhaustion. Every pull after the failure fails again, unless
/// [`FailAfter::then_exhausted`] asks for exhaustion instead.
///
/// Clones restart from the first record.
///
/// # Example
///
/// ```
/// use rowflow::testing::{numbered_records, FailAfter};
/// use rowflow::Pipeline;
///
/// let mut p = Pipeline::new(FailAfter::new(numbered_records("n", [1, 2])));
/// assert!(p.next().unwrap().is_some());
/// assert!(p.next().unwrap().is_some());
/// assert!(p.next().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct FailAfter {
    records: Arc<[Record]>,
    pos: usize,
    failure: SourceFailure,
    exhaust_after_failure: bool,
    failed: bool,
}

impl FailAfter {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
            pos: 0,
            failure: SourceFailure::default(),
            exhaust_after_failure: false,
            failed: false,
        }
    }

    /// Fail once, then report exhaustion on every later pull.
    #[must_use]
    pub fn then_exhausted(mut self) -> Self {
        self.exhaust_after_failure = true;
        self
    }
}

impl Source for FailAfter {
    fn next(&mut self) -> Result<Option<Record>> {
        if let Some(rec) = self.records.get(self.pos) {
            self.pos += 1;
            return Ok(Some(rec.clone()));
        }
        if self.failed && self.exhaust_after_failure {
            return Ok(None);
        }
        self.failed = true;
        Err(self.failure.clone().into())
    }

    fn clone_source(&self) -> BoxedSource {
        Box::new(FailAfter {
            records: Arc::clone(&self.records),
            pos: 0,
            failure: self.failure.clone(),
            exhaust_after_failure: self.exhaust_after_failure,
            failed: false,
        })
    }
}

/// One single-field record per value, in order.
///
/// # Example
///
/// ```
/// use rowflow::testing::numbered_records;
///
/// let rs = numbered_records("n", 1..=3);
/// assert_eq!(rs.len(), 3);
/// assert_eq!(rs[2].as_int("n"), 3);
/// ```
#[must_use]
pub fn numbered_records(field: &str, values: impl IntoIterator<Item = i64>) -> Vec<Record> {
    values
        .into_iter()
        .map(|v| Record::from_iter([(field, Value::Int(v))]))
        .collect()
}

/// Left side of the reference join dataset: `bar` is the join key and `foo`
/// numbers the rows 1 to 4.
#[must_use]
pub fn join_left() -> Vec<Record> {
    [(1, 1), (1, 2), (2, 3), (3, 4)]
        .into_iter()
        .map(|(bar, foo)| crate::record! {"bar" => bar, "foo" => foo})
        .collect()
}

/// Right side of the reference join dataset, keyed on `baz`.
///
/// Joining [`join_left`] on `bar = baz` yields five records: two times two for
/// key 1, one for key 2, and nothing for the left row with `bar = 3`.
#[must_use]
pub fn join_right() -> Vec<Record> {
    [(1, 1), (1, 2), (2, 3), (4, 4)]
        .into_iter()
        .map(|(baz, jib)| crate::record! {"baz" => baz, "jib" => jib})
        .collect()
}

/// A small sales table for grouping and sorting tests.
#[must_use]
pub fn sample_sales() -> Vec<Record> {
    vec![
        crate::record! {"region" => "north", "product" => "lamp", "amount" => 12},
        crate::record! {"region" => "south", "product" => "desk", "amount" => 40},
        crate::record! {"region" => "north", "product" => "desk", "amount" => 35},
        crate::record! {"region" => "east", "product" => "lamp", "amount" => 9},
        crate::record! {"region" => "south", "product" => "chair", "amount" => 15},
        crate::record! {"region" => "north", "product" => "chair", "amount" => 7},
    ]
}
