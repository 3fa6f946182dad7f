//! Hash join: [`Pipeline::inner_join`].
//!
//! The join is eager on the right side only. On the first pull the right
//! pipeline is drained into a multimap from the raw value of `right_key` to the
//! right records carrying it (duplicates kept, arrival order kept per key). The
//! left side then streams: each left record is looked up by the raw value of
//! `left_key` and emits one merged record per match, one match per pull.
//!
//! ## Semantics
//! - Inner join: a left record with no match contributes nothing.
//! - Keys compare by kind and value: `1` does not match `"1"`.
//! - A record missing its key field never matches anything.
//! - Merged records are `left.merge(&right)`, so right fields win on name
//!   collisions.
//! - Output follows left order; within one left record, matches follow right
//!   arrival order.
//!
//! ## Example
//! ```
//! use rowflow::{record, Pipeline};
//!
//! let users = Pipeline::from_records(vec![
//!     record! {"uid" => 1, "name" => "ada"},
//!     record! {"uid" => 2, "name" => "bob"},
//! ]);
//! let orders = Pipeline::from_records(vec![
//!     record! {"owner" => 1, "item" => "lamp"},
//!     record! {"owner" => 1, "item" => "desk"},
//! ]);
//!
//! let joined = users.inner_join("uid", "owner", orders).collect().unwrap();
//! assert_eq!(joined.len(), 2);
//! assert!(joined.iter().all(|r| r.as_text("name") == "ada"));
//! ```

use crate::node::Transform;
use crate::pipeline::Pipeline;
use crate::record::Record;
use crate::source::Source;
use crate::value::Value;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

type JoinIndex = HashMap<Value, Vec<Record>>;

/// The left record currently being expanded, its key, and the position of the
/// next right match to emit.
#[derive(Clone)]
struct Probe {
    left: Record,
    key: Value,
    pos: usize,
}

struct InnerJoinOp {
    left_key: Arc<str>,
    right_key: Arc<str>,
    right: Pipeline,
    index: Option<Arc<JoinIndex>>,
    probe: Option<Probe>,
}

impl InnerJoinOp {
    fn build_index(&mut self) -> Result<JoinIndex> {
        let mut index = JoinIndex::new();
        let mut rows = 0usize;
        while let Some(rec) = self.right.next()? {
            rows += 1;
            if let Some(k) = rec.get(&self.right_key).cloned() {
                index.entry(k).or_default().push(rec);
            }
        }
        debug!(
            right_key = %self.right_key,
            rows,
            keys = index.len(),
            "inner_join built right-side index"
        );
        Ok(index)
    }
}

impl Transform for InnerJoinOp {
    fn name(&self) -> &'static str {
        "inner_join"
    }

    fn step(&mut self, input: &mut dyn Source) -> Result<Option<Record>> {
        if self.index.is_none() {
            self.index = Some(Arc::new(self.build_index()?));
        }
        let Some(index) = self.index.as_ref() else {
            return Ok(None);
        };

        loop {
            if let Some(probe) = self.probe.as_mut() {
                if let Some(matched) = index.get(&probe.key).and_then(|m| m.get(probe.pos)) {
                    probe.pos += 1;
                    return Ok(Some(probe.left.merge(matched)));
                }
                self.probe = None;
            }

            let Some(left) = input.next()? else {
                return Ok(None);
            };
            let key = match left.get(&self.left_key) {
                Some(key) if index.contains_key(key) => key.clone(),
                _ => {
                    trace!(left_key = %self.left_key, "inner_join: left record has no match");
                    continue;
                }
            };
            self.probe = Some(Probe { left, key, pos: 0 });
        }
    }

    fn fresh(&self) -> Box<dyn Transform> {
        Box::new(InnerJoinOp {
            left_key: Arc::clone(&self.left_key),
            right_key: Arc::clone(&self.right_key),
            right: self.right.clone(),
            index: None,
            probe: None,
        })
    }

    /// The index is read-only once built, so copies share it.
    fn snapshot(&self) -> Box<dyn Transform> {
        Box::new(InnerJoinOp {
            left_key: Arc::clone(&self.left_key),
            right_key: Arc::clone(&self.right_key),
            right: self.right.clone(),
            index: self.index.clone(),
            probe: self.probe.clone(),
        })
    }
}

impl Pipeline {
    /// Inner hash join of `self` (left) with `right` on
    /// `left[left_key] == right[right_key]`.
    ///
    /// Keys compare by kind and value, and a record missing its key never
    /// matches. Output follows left order; right fields win on name collisions.
    #[must_use]
    pub fn inner_join(self, left_key: &str, right_key: &str, right: Pipeline) -> Pipeline {
        self.transform(InnerJoinOp {
            left_key: Arc::from(left_key),
            right_key: Arc::from(right_key),
            right,
            index: None,
            probe: None,
        })
    }
}
