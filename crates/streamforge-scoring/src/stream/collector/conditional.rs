//! Collector decorator that only admits tuples matching a predicate.

use std::marker::PhantomData;

use streamforge_core::Result;

use super::Collector;

/// Undo token of [`conditionally()`].
#[must_use = "dropping an undo token makes the insertion irreversible"]
#[derive(Debug, PartialEq, Eq)]
pub enum ConditionalUndo<U> {
    /// The tuple reached the delegate; its undo is kept here.
    Delegated(U),
    /// The predicate rejected the tuple; retracting it does nothing.
    Skipped,
}

/// Wraps `delegate` so that tuples failing `predicate` leave the accumulator
/// untouched.
///
/// The accumulator and result types are the delegate's own.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::collector::{conditionally, count, Collector};
///
/// let adults = conditionally(|age: &u32| *age >= 18, count());
/// let mut acc = adults.create_accumulator();
///
/// let _a = adults.accumulate(&mut acc, &34);
/// let b = adults.accumulate(&mut acc, &9);
/// assert_eq!(adults.finish(&acc), 1);
///
/// adults.retract(&mut acc, b).unwrap();
/// assert_eq!(adults.finish(&acc), 1);
/// ```
pub fn conditionally<A, P, C>(predicate: P, delegate: C) -> ConditionalCollector<A, P, C>
where
    P: Fn(&A) -> bool + Send + Sync,
    C: Collector<A>,
{
    ConditionalCollector {
        predicate,
        delegate,
        _phantom: PhantomData,
    }
}

/// Created by the [`conditionally()`] function.
pub struct ConditionalCollector<A, P, C> {
    predicate: P,
    delegate: C,
    _phantom: PhantomData<fn(&A)>,
}

impl<A, P, C> Collector<A> for ConditionalCollector<A, P, C>
where
    P: Fn(&A) -> bool + Send + Sync,
    C: Collector<A>,
{
    type Accumulator = C::Accumulator;
    type Undo = ConditionalUndo<C::Undo>;
    type Result = C::Result;

    fn create_accumulator(&self) -> C::Accumulator {
        self.delegate.create_accumulator()
    }

    #[inline]
    fn accumulate(&self, acc: &mut C::Accumulator, tuple: &A) -> Self::Undo {
        if (self.predicate)(tuple) {
            ConditionalUndo::Delegated(self.delegate.accumulate(acc, tuple))
        } else {
            ConditionalUndo::Skipped
        }
    }

    #[inline]
    fn retract(&self, acc: &mut C::Accumulator, undo: Self::Undo) -> Result<()> {
        match undo {
            ConditionalUndo::Delegated(inner) => self.delegate.retract(acc, inner),
            ConditionalUndo::Skipped => Ok(()),
        }
    }

    #[inline]
    fn finish(&self, acc: &C::Accumulator) -> C::Result {
        self.delegate.finish(acc)
    }
}
