//! Sorting operator: [`Pipeline::sort_by`].
//!
//! Sorting is blocking: the first pull drains the upstream into a buffer, sorts
//! it once, then serves records from the buffer in ascending order.
//!
//! The sort is **not stable**. Records with equal keys may come out in any
//! relative order; sort on a second key afterwards if ties must be broken.
//!
//! A clone taken after the first pull copies the records still buffered.

use crate::node::Transform;
use crate::pipeline::Pipeline;
use crate::record::Record;
use crate::source::Source;
use anyhow::Result;
use std::sync::Arc;
use std::vec;
use tracing::debug;

/// Comparator used by [`Pipeline::sort_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKind {
    /// Integer order over [`Record::as_int`], so text fields are parsed and
    /// anything unparsable sorts as `0`.
    #[default]
    Numeric,
    /// Byte-wise order over [`Record::as_text`].
    Lexical,
}

fn sort_keyed<K: Ord>(records: Vec<Record>, key_fn: impl Fn(&Record) -> K) -> Vec<Record> {
    let mut keyed: Vec<(K, Record)> = records.into_iter().map(|r| (key_fn(&r), r)).collect();
    keyed.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, r)| r).collect()
}

struct SortOp {
    key: Arc<str>,
    kind: SortKind,
    sorted: Option<vec::IntoIter<Record>>,
}

impl SortOp {
    fn drain(&self, input: &mut dyn Source) -> Result<Vec<Record>> {
        let mut buf = Vec::new();
        while let Some(rec) = input.next()? {
            buf.push(rec);
        }
        debug!(key = %self.key, kind = ?self.kind, rows = buf.len(), "sort_by drained upstream");
        let key = &*self.key;
        Ok(match self.kind {
            SortKind::Numeric => sort_keyed(buf, |r| r.as_int(key)),
            SortKind::Lexical => sort_keyed(buf, |r| r.as_text(key)),
        })
    }
}

impl Transform for SortOp {
    fn name(&self) -> &'static str {
        "sort_by"
    }

    fn step(&mut self, input: &mut dyn Source) -> Result<Option<Record>> {
        if self.sorted.is_none() {
            self.sorted = Some(self.drain(input)?.into_iter());
        }
        Ok(self.sorted.as_mut().and_then(Iterator::next))
    }

    fn fresh(&self) -> Box<dyn Transform> {
        Box::new(SortOp {
            key: Arc::clone(&self.key),
            kind: self.kind,
            sorted: None,
        })
    }

    fn snapshot(&self) -> Box<dyn Transform> {
        Box::new(SortOp {
            key: Arc::clone(&self.key),
            kind: self.kind,
            sorted: self.sorted.clone(),
        })
    }
}

impl Pipeline {
    /// Sort ascending on the field `key` using the comparator `kind`.
    ///
    /// ```
    /// use rowflow::{record, Pipeline, SortKind};
    ///
    /// let out = Pipeline::from_records(vec![record! {"k" => 3}, record! {"k" => 1}, record! {"k" => 2}])
    ///     .sort_by("k", SortKind::Numeric)
    ///     .collect()
    ///     .unwrap();
    /// let keys: Vec<i64> = out.iter().map(|r| r.as_int("k")).collect();
    /// assert_eq!(keys, vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn sort_by(self, key: &str, kind: SortKind) -> Pipeline {
        self.transform(SortOp {
            key: Arc::from(key),
            kind,
            sorted: None,
        })
    }

    /// Shorthand for `sort_by(key, SortKind::Numeric)`.
    #[must_use]
    pub fn sort_int(self, key: &str) -> Pipeline {
        self.sort_by(key, SortKind::Numeric)
    }

    /// Shorthand for `sort_by(key, SortKind::Lexical)`.
    #[must_use]
    pub fn sort_text(self, key: &str) -> Pipeline {
        self.sort_by(key, SortKind::Lexical)
    }
}
