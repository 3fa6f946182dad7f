//! Fluent builders for record test data.

use crate::record::Record;
use crate::value::Value;

/// A fluent builder for lists of records.
///
/// # Example
///
/// ```
/// use rowflow::record;
/// use rowflow::testing::RecordsBuilder;
///
/// let data = RecordsBuilder::new()
///     .add_range("n", 1..=3)
///     .add_record(record! {"n" => 10, "tag" => "x"})
///     .add_repeated(record! {"n" => 0}, 2)
///     .build();
///
/// assert_eq!(data.len(), 6);
/// ```
#[derive(Debug, Default)]
pub struct RecordsBuilder {
    records: Vec<Record>,
}

impl RecordsBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn add_record(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    #[must_use]
    pub fn add_records(mut self, records: impl IntoIterator<Item = Record>) -> Self {
        self.records.extend(records);
        self
    }

    #[must_use]
    pub fn add_repeated(mut self, record: Record, count: usize) -> Self {
        self.records
            .extend(std::iter::repeat_n(record, count));
        self
    }

    /// One `{field: n}` record per integer in `range`.
    #[must_use]
    pub fn add_range(mut self, field: &str, range: std::ops::RangeInclusive<i64>) -> Self {
        self.records
            .extend(range.map(|n| Record::from_iter([(field, Value::Int(n))])));
        self
    }

    /// Add `count` records produced by `generator(index)`.
    ///
    /// ```
    /// use rowflow::record;
    /// use rowflow::testing::RecordsBuilder;
    ///
    /// let data = RecordsBuilder::new()
    ///     .add_generated(3, |i| record! {"id" => i as i64, "even" => i % 2 == 0})
    ///     .build();
    /// assert!(data[2].as_bool("even"));
    /// ```
    #[must_use]
    pub fn add_generated<F>(mut self, count: usize, generator: F) -> Self
    where
        F: Fn(usize) -> Record,
    {
        self.records.extend((0..count).map(generator));
        self
    }

    /// Set `field` to `value` on every record added so far.
    #[must_use]
    pub fn with_field(mut self, field: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.records = self
            .records
            .iter()
            .map(|r| r.set(field, value.clone()))
            .collect();
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn build(self) -> Vec<Record> {
        self.records
    }
}
