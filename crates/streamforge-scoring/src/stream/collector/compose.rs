//! Collectors that run several collectors side by side.

use std::marker::PhantomData;

use streamforge_core::Result;

use super::Collector;

/// Undo token of [`compose()`]: one token per inner collector.
#[must_use = "dropping an undo token makes the insertion irreversible"]
#[derive(Debug)]
pub struct ComposeUndo<U1, U2>(U1, U2);

/// Undo token of [`compose3()`].
#[must_use = "dropping an undo token makes the insertion irreversible"]
#[derive(Debug)]
pub struct Compose3Undo<U1, U2, U3>(U1, U2, U3);

/// Creates a collector feeding every tuple to two collectors and combining
/// their results with `finisher`.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::collector::{compose, count, max, Collector};
///
/// // (number of ages, oldest age)
/// let collector = compose(
///     count(),
///     max(|age: &u32| *age),
///     |n: usize, oldest: Option<u32>| (n, oldest),
/// );
/// let mut acc = collector.create_accumulator();
///
/// let _a = collector.accumulate(&mut acc, &31);
/// let _b = collector.accumulate(&mut acc, &47);
/// assert_eq!(collector.finish(&acc), (2, Some(47)));
/// ```
pub fn compose<A, C1, C2, F, R>(first: C1, second: C2, finisher: F) -> ComposeCollector<A, C1, C2, F>
where
    C1: Collector<A>,
    C2: Collector<A>,
    F: Fn(C1::Result, C2::Result) -> R + Send + Sync,
{
    ComposeCollector {
        first,
        second,
        finisher,
        _phantom: PhantomData,
    }
}

/// Creates a collector feeding every tuple to three collectors.
pub fn compose3<A, C1, C2, C3, F, R>(
    first: C1,
    second: C2,
    third: C3,
    finisher: F,
) -> Compose3Collector<A, C1, C2, C3, F>
where
    C1: Collector<A>,
    C2: Collector<A>,
    C3: Collector<A>,
    F: Fn(C1::Result, C2::Result, C3::Result) -> R + Send + Sync,
{
    Compose3Collector {
        first,
        second,
        third,
        finisher,
        _phantom: PhantomData,
    }
}

/// A collector combining two collectors.
///
/// Created by the [`compose()`] function.
pub struct ComposeCollector<A, C1, C2, F> {
    first: C1,
    second: C2,
    finisher: F,
    _phantom: PhantomData<fn(&A)>,
}

impl<A, C1, C2, F, R> Collector<A> for ComposeCollector<A, C1, C2, F>
where
    C1: Collector<A>,
    C2: Collector<A>,
    F: Fn(C1::Result, C2::Result) -> R + Send + Sync,
{
    type Accumulator = (C1::Accumulator, C2::Accumulator);
    type Undo = ComposeUndo<C1::Undo, C2::Undo>;
    type Result = R;

    fn create_accumulator(&self) -> Self::Accumulator {
        (
            self.first.create_accumulator(),
            self.second.create_accumulator(),
        )
    }

    fn accumulate(&self, acc: &mut Self::Accumulator, tuple: &A) -> Self::Undo {
        ComposeUndo(
            self.first.accumulate(&mut acc.0, tuple),
            self.second.accumulate(&mut acc.1, tuple),
        )
    }

    fn retract(&self, acc: &mut Self::Accumulator, undo: Self::Undo) -> Result<()> {
        let ComposeUndo(u1, u2) = undo;
        self.first.retract(&mut acc.0, u1)?;
        self.second.retract(&mut acc.1, u2)
    }

    fn finish(&self, acc: &Self::Accumulator) -> R {
        (self.finisher)(self.first.finish(&acc.0), self.second.finish(&acc.1))
    }
}

/// A collector combining three collectors.
///
/// Created by the [`compose3()`] function.
pub struct Compose3Collector<A, C1, C2, C3, F> {
    first: C1,
    second: C2,
    third: C3,
    finisher: F,
    _phantom: PhantomData<fn(&A)>,
}

impl<A, C1, C2, C3, F, R> Collector<A> for Compose3Collector<A, C1, C2, C3, F>
where
    C1: Collector<A>,
    C2: Collector<A>,
    C3: Collector<A>,
    F: Fn(C1::Result, C2::Result, C3::Result) -> R + Send + Sync,
{
    type Accumulator = (C1::Accumulator, C2::Accumulator, C3::Accumulator);
    type Undo = Compose3Undo<C1::Undo, C2::Undo, C3::Undo>;
    type Result = R;

    fn create_accumulator(&self) -> Self::Accumulator {
        (
            self.first.create_accumulator(),
            self.second.create_accumulator(),
            self.third.create_accumulator(),
        )
    }

    fn accumulate(&self, acc: &mut Self::Accumulator, tuple: &A) -> Self::Undo {
        Compose3Undo(
            self.first.accumulate(&mut acc.0, tuple),
            self.second.accumulate(&mut acc.1, tuple),
            self.third.accumulate(&mut acc.2, tuple),
        )
    }

    fn retract(&self, acc: &mut Self::Accumulator, undo: Self::Undo) -> Result<()> {
        let Compose3Undo(u1, u2, u3) = undo;
        self.first.retract(&mut acc.0, u1)?;
        self.second.retract(&mut acc.1, u2)?;
        self.third.retract(&mut acc.2, u3)
    }

    fn finish(&self, acc: &Self::Accumulator) -> R {
        (self.finisher)(
            self.first.finish(&acc.0),
            self.second.finish(&acc.1),
            self.third.finish(&acc.2),
        )
    }
}
