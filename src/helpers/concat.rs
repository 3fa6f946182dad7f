//! Concatenation operator: [`Pipeline::concat`].
//!
//! This is a bag union ("union all"): every record of the first pipeline, then
//! every record of the second, duplicates kept. There is no set semantics.

use crate::node::Transform;
use crate::pipeline::Pipeline;
use crate::record::Record;
use crate::source::Source;
use anyhow::Result;
use tracing::trace;

struct ConcatOp {
    other: Pipeline,
    first_done: bool,
}

impl Transform for ConcatOp {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn step(&mut self, input: &mut dyn Source) -> Result<Option<Record>> {
        if !self.first_done {
            if let Some(rec) = input.next()? {
                return Ok(Some(rec));
            }
            trace!("concat: first input exhausted, switching to second");
            self.first_done = true;
        }
        self.other.next()
    }

    fn fresh(&self) -> Box<dyn Transform> {
        Box::new(ConcatOp {
            other: self.other.clone(),
            first_done: false,
        })
    }

    fn snapshot(&self) -> Box<dyn Transform> {
        Box::new(ConcatOp {
            other: self.other.clone(),
            first_done: self.first_done,
        })
    }
}

impl Pipeline {
    /// All records of `self` followed by all records of `other`.
    ///
    /// Both sides stay lazy: `other` is not touched until `self` is exhausted.
    ///
    /// ```
    /// use rowflow::{record, Pipeline};
    ///
    /// let a = Pipeline::from_records(vec![record! {"n" => 1}, record! {"n" => 2}]);
    /// let twice = a.clone().concat(a).collect().unwrap();
    /// assert_eq!(twice.len(), 4);
    /// ```
    #[must_use]
    pub fn concat(self, other: Pipeline) -> Pipeline {
        self.transform(ConcatOp {
            other,
            first_done: false,
        })
    }
}
