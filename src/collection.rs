//! Stateless, element-wise operators: [`Pipeline::filter`] and [`Pipeline::map`].
//!
//! Neither operator buffers. `map` pulls exactly one upstream record per output;
//! `filter` keeps pulling until a record matches or upstream runs out.

use crate::node::Transform;
use crate::pipeline::Pipeline;
use crate::record::Record;
use crate::source::Source;
use anyhow::Result;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;
type Mapper = Arc<dyn Fn(&Record) -> Record + Send + Sync>;

#[derive(Clone)]
struct FilterOp(Predicate);

impl Transform for FilterOp {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn step(&mut self, input: &mut dyn Source) -> Result<Option<Record>> {
        while let Some(rec) = input.next()? {
            if (self.0)(&rec) {
                return Ok(Some(rec));
            }
        }
        Ok(None)
    }

    fn fresh(&self) -> Box<dyn Transform> {
        Box::new(self.clone())
    }
}

#[derive(Clone)]
struct MapOp(Mapper);

impl Transform for MapOp {
    fn name(&self) -> &'static str {
        "map"
    }

    fn step(&mut self, input: &mut dyn Source) -> Result<Option<Record>> {
        Ok(input.next()?.map(|rec| (self.0)(&rec)))
    }

    fn fresh(&self) -> Box<dyn Transform> {
        Box::new(self.clone())
    }
}

impl Pipeline {
    /// Keep only the records for which `pred` returns `true`, in order.
    ///
    /// ```
    /// use rowflow::{record, Pipeline};
    ///
    /// let odd = Pipeline::from_records(vec![record! {"n" => 1}, record! {"n" => 2}, record! {"n" => 3}])
    ///     .filter(|r| r.as_int("n") % 2 == 1)
    ///     .collect()
    ///     .unwrap();
    /// assert_eq!(odd, vec![record! {"n" => 1}, record! {"n" => 3}]);
    /// ```
    #[must_use]
    pub fn filter<F>(self, pred: F) -> Pipeline
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.transform(FilterOp(Arc::new(pred)))
    }

    /// Replace every record with `f(record)`, in order.
    #[must_use]
    pub fn map<F>(self, f: F) -> Pipeline
    where
        F: Fn(&Record) -> Record + Send + Sync + 'static,
    {
        self.transform(MapOp(Arc::new(f)))
    }
}
