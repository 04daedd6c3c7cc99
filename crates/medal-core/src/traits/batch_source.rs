use crate::errors::MedalResult;
use crate::models::Batch;

/// Iterator over batches of one pass.
pub type BatchIter<'a> = Box<dyn Iterator<Item = MedalResult<Batch>> + 'a>;

/// Builds batched views over dataset items.
pub trait IBatchSource: Send + Sync {
    /// Yield the items at `indices`, in exactly that order, grouped into batches.
    /// Called again with a fresh index list whenever the pool changes.
    fn batches<'a>(&'a self, indices: &'a [usize]) -> MedalResult<BatchIter<'a>>;
}
