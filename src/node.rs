use crate::record::Record;
use crate::source::Source;
use anyhow::Result;

/// One step of a [`Pipeline`](crate::Pipeline): turns pulls on an upstream
/// source into output records.
///
/// A transform owns whatever mutable state it needs (an accumulator, a sorted
/// buffer, a join index) and keeps its immutable parameters (key names, the
/// user's closures behind an `Arc`) separately. Cloning a pipeline never shares
/// that state: [`Transform::snapshot`] rebuilds the transform from its
/// parameters while nothing has been pulled, and deep-copies the state once it
/// exists, so the copy serves the same remaining records as the original.
pub trait Transform: Send {
    /// Stable operator name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Produce the next output record, pulling from `input` as many times as
    /// needed (zero, one or many).
    ///
    /// # Errors
    /// Propagates the first upstream error unchanged.
    fn step(&mut self, input: &mut dyn Source) -> Result<Option<Record>>;

    /// A new instance with the same parameters and pristine state.
    fn fresh(&self) -> Box<dyn Transform>;

    /// An independent copy positioned where this instance is.
    ///
    /// Stateless transforms keep the default; operators that buffer override
    /// it to copy their buffer.
    fn snapshot(&self) -> Box<dyn Transform> {
        self.fresh()
    }
}
