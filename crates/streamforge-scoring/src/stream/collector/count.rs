//! Count collectors.

use std::hash::Hash;
use std::marker::PhantomData;

use streamforge_core::{Result, StreamError};
use tracing::error;

use super::{Collector, MultiplicityTracker, ValueUndo};

/// Undo token of [`count()`] and [`count_long()`].
#[must_use = "dropping an undo token makes the insertion irreversible"]
#[derive(Debug, PartialEq, Eq)]
pub struct CountUndo(());

/// Creates a collector that counts tuples as `usize`.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::collector::{count, Collector};
///
/// let collector = count::<i32>();
/// let mut acc = collector.create_accumulator();
///
/// let _a = collector.accumulate(&mut acc, &1);
/// let b = collector.accumulate(&mut acc, &2);
/// let _c = collector.accumulate(&mut acc, &3);
/// assert_eq!(collector.finish(&acc), 3);
///
/// collector.retract(&mut acc, b).unwrap();
/// assert_eq!(collector.finish(&acc), 2);
/// ```
pub fn count<A>() -> CountCollector<A> {
    CountCollector {
        _phantom: PhantomData,
    }
}

/// Creates a collector that counts tuples as `u64`.
pub fn count_long<A>() -> CountLongCollector<A> {
    CountLongCollector {
        _phantom: PhantomData,
    }
}

macro_rules! impl_count_collector {
    ($(#[$meta:meta])* $name:ident, $n:ty) => {
        $(#[$meta])*
        pub struct $name<A> {
            _phantom: PhantomData<fn(&A)>,
        }

        impl<A> Collector<A> for $name<A> {
            type Accumulator = $n;
            type Undo = CountUndo;
            type Result = $n;

            fn create_accumulator(&self) -> $n {
                0
            }

            #[inline]
            fn accumulate(&self, acc: &mut $n, _tuple: &A) -> CountUndo {
                *acc += 1;
                CountUndo(())
            }

            #[inline]
            fn retract(&self, acc: &mut $n, _undo: CountUndo) -> Result<()> {
                if *acc == 0 {
                    let err = StreamError::underflow::<$n>();
                    error!("{err}");
                    return Err(err);
                }
                *acc -= 1;
                Ok(())
            }

            #[inline]
            fn finish(&self, acc: &$n) -> $n {
                *acc
            }
        }
    };
}

impl_count_collector!(
    /// A collector that counts tuples.
    ///
    /// Created by the [`count()`] function.
    CountCollector,
    usize
);

impl_count_collector!(
    /// A collector that counts tuples as `u64`.
    ///
    /// Created by the [`count_long()`] function.
    CountLongCollector,
    u64
);

/// Creates a collector that counts distinct mapped values.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::collector::{count_distinct, Collector};
///
/// let collector = count_distinct(|age: &u32| *age);
/// let mut acc = collector.create_accumulator();
///
/// let undos: Vec<_> = [20, 25, 30, 30, 20]
///     .iter()
///     .map(|age| collector.accumulate(&mut acc, age))
///     .collect();
/// assert_eq!(collector.finish(&acc), 3);
///
/// for undo in undos {
///     collector.retract(&mut acc, undo).unwrap();
/// }
/// assert_eq!(collector.finish(&acc), 0);
/// ```
pub fn count_distinct<A, K, F>(mapper: F) -> CountDistinctCollector<A, K, F>
where
    K: Eq + Hash + Clone,
    F: Fn(&A) -> K + Send + Sync,
{
    CountDistinctCollector {
        mapper,
        _phantom: PhantomData,
    }
}

/// A collector that counts distinct mapped values.
///
/// Created by the [`count_distinct()`] function.
pub struct CountDistinctCollector<A, K, F> {
    mapper: F,
    _phantom: PhantomData<fn(&A) -> K>,
}

impl<A, K, F> Collector<A> for CountDistinctCollector<A, K, F>
where
    K: Eq + Hash + Clone,
    F: Fn(&A) -> K + Send + Sync,
{
    type Accumulator = MultiplicityTracker<K>;
    type Undo = ValueUndo<K>;
    type Result = usize;

    fn create_accumulator(&self) -> Self::Accumulator {
        MultiplicityTracker::new()
    }

    fn accumulate(&self, acc: &mut Self::Accumulator, tuple: &A) -> Self::Undo {
        let key = (self.mapper)(tuple);
        acc.add(key.clone());
        ValueUndo::new(key)
    }

    fn retract(&self, acc: &mut Self::Accumulator, undo: Self::Undo) -> Result<()> {
        acc.remove(undo.value()).map(|_| ())
    }

    #[inline]
    fn finish(&self, acc: &Self::Accumulator) -> usize {
        acc.len()
    }
}
