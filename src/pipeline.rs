use crate::node::Transform;
use crate::record::Record;
use crate::source::{BoxedSource, MemorySource, Source};
use anyhow::Result;
use std::fmt;
use std::iter::FusedIterator;
use tracing::debug;

/// Returned by every pull on a pipeline that has already reported an error.
///
/// The first error is handed out once, unchanged; later pulls get this instead
/// of a partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("pipeline already failed")]
pub struct PipelineFailed;

/// -------- Pipeline --------
/// A pull node: an exclusively owned upstream plus an optional transform.
///
/// Operators (`filter`, `map`, `reduce`, ...) consume the pipeline and wrap it
/// as the upstream of a new one, so a chain is a nest of pipelines with the
/// original source at the core. Nothing runs until a record is pulled with
/// [`Pipeline::next`], [`Pipeline::collect`] or by iterating.
///
/// An error is terminal: once `next` has returned `Err`, the pipeline never
/// pulls upstream again and every later call fails with [`PipelineFailed`].
pub struct Pipeline {
    input: BoxedSource,
    transform: Option<Box<dyn Transform>>,
    failed: bool,
}

impl Pipeline {
    /// Wrap a source without any transform.
    pub fn new<S: Source + 'static>(input: S) -> Self {
        Self {
            input: Box::new(input),
            transform: None,
            failed: false,
        }
    }

    /// Pipeline over an in-memory buffer of records.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        Self::new(MemorySource::new(records))
    }

    /// Wrap this pipeline as the upstream of `transform`.
    ///
    /// All built-in operators are implemented on top of this; it is also the
    /// extension point for custom operators.
    #[must_use]
    pub fn transform<T: Transform + 'static>(self, transform: T) -> Pipeline {
        Pipeline {
            input: Box::new(self),
            transform: Some(Box::new(transform)),
            failed: false,
        }
    }

    /// Pull the next record.
    ///
    /// Without a transform this delegates straight to the upstream source.
    ///
    /// # Errors
    /// Propagates the first error raised anywhere upstream, then
    /// [`PipelineFailed`] on every later call.
    pub fn next(&mut self) -> Result<Option<Record>> {
        if self.failed {
            return Err(PipelineFailed.into());
        }
        let pulled = match self.transform.as_mut() {
            None => self.input.next(),
            Some(t) => t.step(&mut *self.input),
        };
        if pulled.is_err() {
            self.failed = true;
        }
        pulled
    }

    /// Drain the pipeline into a vector.
    ///
    /// # Errors
    /// Returns the first error raised anywhere in the chain. Records pulled
    /// before the failure are discarded; there is no partial result.
    pub fn collect(mut self) -> Result<Vec<Record>> {
        let mut out = Vec::new();
        while let Some(rec) = self.next()? {
            out.push(rec);
        }
        debug!(records = out.len(), "pipeline collected");
        Ok(out)
    }
}

impl Source for Pipeline {
    fn next(&mut self) -> Result<Option<Record>> {
        Pipeline::next(self)
    }

    fn clone_source(&self) -> BoxedSource {
        Box::new(self.clone())
    }
}

/// Clones the upstream (restart or snapshot, depending on the source) and
/// gives the copy its own transform state, copied from the original's.
impl Clone for Pipeline {
    fn clone(&self) -> Self {
        Pipeline {
            input: self.input.clone_source(),
            transform: self.transform.as_ref().map(|t| t.snapshot()),
            failed: self.failed,
        }
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("transform", &self.transform.as_ref().map(|t| t.name()))
            .finish_non_exhaustive()
    }
}

impl IntoIterator for Pipeline {
    type Item = Result<Record>;
    type IntoIter = Records;

    fn into_iter(self) -> Records {
        Records {
            pipeline: self,
            done: false,
        }
    }
}

/// Iterator over a pipeline's records.
///
/// Yields `Ok(record)` until exhaustion; an error is yielded once and ends the
/// iteration.
pub struct Records {
    pipeline: Pipeline,
    done: bool,
}

impl Iterator for Records {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.pipeline.next() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for Records {}
