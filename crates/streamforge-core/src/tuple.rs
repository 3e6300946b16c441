//! Fixed-arity tuples and tuple identities.
//!
//! Tuples are plain Rust tuples from `(A,)` up to `(A, B, C, D, E)`.
//! A join of an N-tuple with one more fact produces an (N+1)-tuple via [`Append`].
//!
//! # Example
//!
//! ```
//! use streamforge_core::tuple::{uni, Append, Tuple};
//!
//! let shift = uni("night");
//! let pair = shift.append(7u32);
//! let triple = pair.append('x');
//!
//! assert_eq!(<(&str, u32, char) as Tuple>::ARITY, 3);
//! assert_eq!(triple, ("night", 7, 'x'));
//! ```

use std::fmt;

/// A fixed-length ordered grouping of facts.
pub trait Tuple {
    /// Number of facts in the tuple.
    const ARITY: usize;

    /// Returns the number of facts in this tuple.
    #[inline]
    fn arity(&self) -> usize {
        Self::ARITY
    }
}

/// Widens a tuple by one fact.
///
/// Implemented for arities 1 through 4, so joins top out at 5 facts.
pub trait Append<X>: Tuple {
    /// The tuple one slot wider than `Self`.
    type Output: Tuple;

    /// Consumes the tuple and appends `x` as its last fact.
    fn append(self, x: X) -> Self::Output;
}

/// Wraps a single fact into a 1-tuple.
#[inline]
pub fn uni<A>(a: A) -> (A,) {
    (a,)
}

macro_rules! impl_tuple {
    ($arity:expr; $($t:ident),+) => {
        impl<$($t),+> Tuple for ($($t,)+) {
            const ARITY: usize = $arity;
        }
    };
}

impl_tuple!(1; A);
impl_tuple!(2; A, B);
impl_tuple!(3; A, B, C);
impl_tuple!(4; A, B, C, D);
impl_tuple!(5; A, B, C, D, E);

macro_rules! impl_append {
    ($($t:ident => $v:ident),+) => {
        impl<$($t,)+ X> Append<X> for ($($t,)+) {
            type Output = ($($t,)+ X);

            #[inline]
            fn append(self, x: X) -> Self::Output {
                let ($($v,)+) = self;
                ($($v,)+ x)
            }
        }
    };
}

impl_append!(A => a);
impl_append!(A => a, B => b);
impl_append!(A => a, B => b, C => c);
impl_append!(A => a, B => b, C => c, D => d);

/// Identity of one inserted tuple occurrence.
///
/// Two occurrences of equal facts get different ids; nodes key their
/// retained state by id, never by tuple equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TupleId(pub u64);

impl fmt::Display for TupleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for TupleId {
    fn from(id: u64) -> Self {
        TupleId(id)
    }
}

/// Identity of a join output: the pair of input ids that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoinedId {
    pub left: TupleId,
    pub right: TupleId,
}

impl JoinedId {
    pub fn new(left: TupleId, right: TupleId) -> Self {
        Self { left, right }
    }
}

impl fmt::Display for JoinedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.left, self.right)
    }
}
