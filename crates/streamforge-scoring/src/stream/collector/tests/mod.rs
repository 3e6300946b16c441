// Tests for collector module.

mod collection;
mod count;
mod map;
mod sum;
mod wrapper;

use super::Collector;

/// Accumulates every tuple and returns the undo tokens in insertion order.
pub(super) fn accumulate_all<T, C>(collector: &C, acc: &mut C::Accumulator, tuples: &[T]) -> Vec<C::Undo>
where
    C: Collector<T>,
{
    tuples
        .iter()
        .map(|tuple| collector.accumulate(acc, tuple))
        .collect()
}
