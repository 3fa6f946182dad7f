//! Folding operators: [`Pipeline::reduce`] and [`Pipeline::reduce_by_key`].
//!
//! Both take a fold `f(acc, record) -> acc`. The first record seen (globally, or
//! per group) seeds the accumulator; there is no separate initial value, so an
//! empty input produces no output at all.
//!
//! ## Group order
//! `reduce_by_key` emits its groups in **hash-table iteration order, which is
//! unspecified** and may differ between runs of the same program. Follow it with
//! [`Pipeline::sort_by`](crate::Pipeline::sort_by) when the order matters.

use crate::node::Transform;
use crate::pipeline::Pipeline;
use crate::record::Record;
use crate::source::Source;
use crate::value::Value;
use anyhow::Result;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::vec;
use tracing::debug;

type Folder = Arc<dyn Fn(&Record, &Record) -> Record + Send + Sync>;

struct ReduceOp {
    f: Folder,
    acc: Option<Record>,
    done: bool,
}

impl Transform for ReduceOp {
    fn name(&self) -> &'static str {
        "reduce"
    }

    fn step(&mut self, input: &mut dyn Source) -> Result<Option<Record>> {
        if self.done {
            return Ok(None);
        }
        while let Some(rec) = input.next()? {
            self.acc = Some(match self.acc.take() {
                None => rec,
                Some(acc) => (self.f)(&acc, &rec),
            });
        }
        self.done = true;
        Ok(self.acc.take())
    }

    fn fresh(&self) -> Box<dyn Transform> {
        Box::new(ReduceOp {
            f: Arc::clone(&self.f),
            acc: None,
            done: false,
        })
    }

    fn snapshot(&self) -> Box<dyn Transform> {
        Box::new(ReduceOp {
            f: Arc::clone(&self.f),
            acc: self.acc.clone(),
            done: self.done,
        })
    }
}

/// Groups are keyed on the raw field value; records missing the field share
/// the `None` group.
type GroupKey = Option<Value>;

struct ReduceByKeyOp {
    key: Arc<str>,
    f: Folder,
    groups: Option<vec::IntoIter<Record>>,
}

impl ReduceByKeyOp {
    fn drain(&self, input: &mut dyn Source) -> Result<HashMap<GroupKey, Record>> {
        let mut keyed: HashMap<GroupKey, Record> = HashMap::new();
        let mut rows = 0usize;
        while let Some(rec) = input.next()? {
            rows += 1;
            match keyed.entry(rec.get(&self.key).cloned()) {
                Entry::Occupied(mut e) => {
                    let folded = (self.f)(e.get(), &rec);
                    e.insert(folded);
                }
                Entry::Vacant(e) => {
                    e.insert(rec);
                }
            }
        }
        debug!(key = %self.key, rows, groups = keyed.len(), "reduce_by_key drained upstream");
        Ok(keyed)
    }
}

impl Transform for ReduceByKeyOp {
    fn name(&self) -> &'static str {
        "reduce_by_key"
    }

    fn step(&mut self, input: &mut dyn Source) -> Result<Option<Record>> {
        if self.groups.is_none() {
            let groups: Vec<Record> = self.drain(input)?.into_values().collect();
            self.groups = Some(groups.into_iter());
        }
        Ok(self.groups.as_mut().and_then(Iterator::next))
    }

    fn fresh(&self) -> Box<dyn Transform> {
        Box::new(ReduceByKeyOp {
            key: Arc::clone(&self.key),
            f: Arc::clone(&self.f),
            groups: None,
        })
    }

    fn snapshot(&self) -> Box<dyn Transform> {
        Box::new(ReduceByKeyOp {
            key: Arc::clone(&self.key),
            f: Arc::clone(&self.f),
            groups: self.groups.clone(),
        })
    }
}

impl Pipeline {
    /// Fold the whole stream into a single record.
    ///
    /// Emits exactly one record for a non-empty input and nothing for an empty
    /// one. Memory use is one accumulator regardless of input size.
    ///
    /// ```
    /// use rowflow::{record, Pipeline};
    ///
    /// let total = Pipeline::from_records(vec![record! {"n" => 1}, record! {"n" => 2}, record! {"n" => 3}])
    ///     .reduce(|acc, r| acc.set("n", acc.as_int("n") + r.as_int("n")))
    ///     .collect()
    ///     .unwrap();
    /// assert_eq!(total, vec![record! {"n" => 6}]);
    /// ```
    #[must_use]
    pub fn reduce<F>(self, f: F) -> Pipeline
    where
        F: Fn(&Record, &Record) -> Record + Send + Sync + 'static,
    {
        self.transform(ReduceOp {
            f: Arc::new(f),
            acc: None,
            done: false,
        })
    }

    /// Group records by the raw value of `key` and fold each group with `f`.
    ///
    /// Blocking: the first pull drains the whole upstream. Values are compared
    /// by kind and value, so `1` and `"1"` land in different groups. The
    /// output order of groups is unspecified (see the module docs).
    #[must_use]
    pub fn reduce_by_key<F>(self, key: &str, f: F) -> Pipeline
    where
        F: Fn(&Record, &Record) -> Record + Send + Sync + 'static,
    {
        self.transform(ReduceByKeyOp {
            key: Arc::from(key),
            f: Arc::new(f),
            groups: None,
        })
    }
}
