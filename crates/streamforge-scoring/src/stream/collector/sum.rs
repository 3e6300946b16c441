// Sum and average collectors.
//
// A sum keeps one running total per group. Retraction subtracts the exact
// value that was added, so any additive type with an inverse works: the
// primitive numbers, `Duration`, `rust_decimal::Decimal`, or a caller type
// through `sum_with`.

use std::marker::PhantomData;
use std::ops::{AddAssign, SubAssign};

use num_traits::ToPrimitive;
use streamforge_core::Result;

use super::{compose, count, Collector, ComposeCollector, CountCollector, ValueUndo};

// Creates a collector that sums values extracted from tuples.
//
// # Example
//
// ```
// use streamforge_scoring::stream::collector::{sum, Collector};
//
// struct Item { value: i64 }
//
// let collector = sum(|item: &Item| item.value);
// let mut acc = collector.create_accumulator();
//
// let _a = collector.accumulate(&mut acc, &Item { value: 5 });
// let b = collector.accumulate(&mut acc, &Item { value: 3 });
// let _c = collector.accumulate(&mut acc, &Item { value: 7 });
// assert_eq!(collector.finish(&acc), 15);
//
// collector.retract(&mut acc, b).unwrap();
// assert_eq!(collector.finish(&acc), 12);
// ```
pub fn sum<A, T, F>(mapper: F) -> SumCollector<A, T, F, fn(&T, &T) -> T, fn(&T, &T) -> T>
where
    T: Default + Clone + AddAssign + SubAssign,
    F: Fn(&A) -> T + Send + Sync,
{
    SumCollector {
        mapper,
        zero: T::default(),
        add: add_assign::<T>,
        subtract: sub_assign::<T>,
        _phantom: PhantomData,
    }
}

// Creates a sum collector over a caller-defined additive type.
//
// `subtract` must be the exact inverse of `add`: for every total `t` and
// value `v`, `subtract(add(t, v), v) == t`.
//
// # Example
//
// ```
// use streamforge_scoring::stream::collector::{sum_with, Collector};
//
// // Concatenated length, tracked as a u64
// let collector = sum_with(
//     |s: &&str| s.len() as u64,
//     0u64,
//     |total: &u64, v: &u64| total + v,
//     |total: &u64, v: &u64| total - v,
// );
// let mut acc = collector.create_accumulator();
// let _undo = collector.accumulate(&mut acc, &"abc");
// assert_eq!(collector.finish(&acc), 3);
// ```
pub fn sum_with<A, T, F, Add, Sub>(
    mapper: F,
    zero: T,
    add: Add,
    subtract: Sub,
) -> SumCollector<A, T, F, Add, Sub>
where
    T: Clone,
    F: Fn(&A) -> T + Send + Sync,
    Add: Fn(&T, &T) -> T + Send + Sync,
    Sub: Fn(&T, &T) -> T + Send + Sync,
{
    SumCollector {
        mapper,
        zero,
        add,
        subtract,
        _phantom: PhantomData,
    }
}

fn add_assign<T: Clone + AddAssign>(total: &T, value: &T) -> T {
    let mut result = total.clone();
    result += value.clone();
    result
}

fn sub_assign<T: Clone + SubAssign>(total: &T, value: &T) -> T {
    let mut result = total.clone();
    result -= value.clone();
    result
}

// A collector that sums values extracted from tuples.
//
// Created by the [`sum()`] and [`sum_with()`] functions.
pub struct SumCollector<A, T, F, Add, Sub> {
    mapper: F,
    zero: T,
    add: Add,
    subtract: Sub,
    _phantom: PhantomData<fn(&A)>,
}

impl<A, T, F, Add, Sub> Collector<A> for SumCollector<A, T, F, Add, Sub>
where
    T: Clone,
    F: Fn(&A) -> T + Send + Sync,
    Add: Fn(&T, &T) -> T + Send + Sync,
    Sub: Fn(&T, &T) -> T + Send + Sync,
{
    type Accumulator = T;
    type Undo = ValueUndo<T>;
    type Result = T;

    fn create_accumulator(&self) -> T {
        self.zero.clone()
    }

    #[inline]
    fn accumulate(&self, acc: &mut T, tuple: &A) -> Self::Undo {
        let value = (self.mapper)(tuple);
        *acc = (self.add)(acc, &value);
        ValueUndo::new(value)
    }

    #[inline]
    fn retract(&self, acc: &mut T, undo: Self::Undo) -> Result<()> {
        *acc = (self.subtract)(acc, undo.value());
        Ok(())
    }

    #[inline]
    fn finish(&self, acc: &T) -> T {
        acc.clone()
    }
}

/// A collector computing the arithmetic mean of mapped values.
///
/// Created by the [`average()`] function.
pub type AverageCollector<A, T, F> = ComposeCollector<
    A,
    CountCollector<A>,
    SumCollector<A, T, F, fn(&T, &T) -> T, fn(&T, &T) -> T>,
    fn(usize, T) -> Option<f64>,
>;

/// Creates a collector that averages mapped values.
///
/// Built from [`count()`] and [`sum()`]; the result is `None` for an empty
/// group.
///
/// # Example
///
/// ```
/// use streamforge_scoring::stream::collector::{average, Collector};
///
/// let collector = average(|x: &i64| *x);
/// let mut acc = collector.create_accumulator();
/// assert_eq!(collector.finish(&acc), None);
///
/// let _a = collector.accumulate(&mut acc, &2);
/// let b = collector.accumulate(&mut acc, &5);
/// assert_eq!(collector.finish(&acc), Some(3.5));
///
/// collector.retract(&mut acc, b).unwrap();
/// assert_eq!(collector.finish(&acc), Some(2.0));
/// ```
pub fn average<A, T, F>(mapper: F) -> AverageCollector<A, T, F>
where
    T: Default + Clone + AddAssign + SubAssign + ToPrimitive,
    F: Fn(&A) -> T + Send + Sync,
{
    compose(count(), sum(mapper), mean::<T> as fn(usize, T) -> Option<f64>)
}

fn mean<T: ToPrimitive>(count: usize, total: T) -> Option<f64> {
    if count == 0 {
        return None;
    }
    total.to_f64().map(|total| total / count as f64)
}
