//! Comparison kinds reported by joiners.

use std::cmp::Ordering;

/// What a joiner (or one component of a composite joiner) compares.
///
/// Every indexable type reads as `left_key OP right_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinerType {
    /// Keys are equal; answered by a hash index.
    Equal,
    /// `left < right`; answered by a sorted index.
    LessThan,
    /// `left <= right`; answered by a sorted index.
    LessThanOrEqual,
    /// `left > right`; answered by a sorted index.
    GreaterThan,
    /// `left >= right`; answered by a sorted index.
    GreaterThanOrEqual,
    /// Arbitrary predicate; needs a full scan, evaluated last.
    Filtering,
}

impl JoinerType {
    /// Returns true if an index can answer this comparison.
    #[inline]
    pub fn is_indexable(self) -> bool {
        !matches!(self, JoinerType::Filtering)
    }

    /// Returns true if this comparison needs a sorted (range) index.
    #[inline]
    pub fn is_range(self) -> bool {
        matches!(
            self,
            JoinerType::LessThan
                | JoinerType::LessThanOrEqual
                | JoinerType::GreaterThan
                | JoinerType::GreaterThanOrEqual
        )
    }

    /// The same comparison read with the two sides swapped.
    ///
    /// `a < b` holds exactly when `b > a` does.
    #[inline]
    pub fn flip(self) -> JoinerType {
        match self {
            JoinerType::LessThan => JoinerType::GreaterThan,
            JoinerType::LessThanOrEqual => JoinerType::GreaterThanOrEqual,
            JoinerType::GreaterThan => JoinerType::LessThan,
            JoinerType::GreaterThanOrEqual => JoinerType::LessThanOrEqual,
            other => other,
        }
    }

    /// Applies this comparison to `left.cmp(right)`.
    ///
    /// `Filtering` accepts every ordering.
    #[inline]
    pub fn matches(self, ordering: Ordering) -> bool {
        match self {
            JoinerType::Equal => ordering == Ordering::Equal,
            JoinerType::LessThan => ordering == Ordering::Less,
            JoinerType::LessThanOrEqual => ordering != Ordering::Greater,
            JoinerType::GreaterThan => ordering == Ordering::Greater,
            JoinerType::GreaterThanOrEqual => ordering != Ordering::Less,
            JoinerType::Filtering => true,
        }
    }
}
