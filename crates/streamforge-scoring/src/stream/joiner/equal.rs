// Equal joiner for matching on property equality.
//
// Equality joiners are answered by a hash index keyed on the mapped value.

use std::hash::Hash;
use std::marker::PhantomData;

use super::{IndexedJoiner, Joiner, JoinerType};
use crate::stream::index::HashIndex;

// Creates a joiner that matches when a property is equal on both sides.
//
// This is the primary joiner for self-joins where you're matching
// entities from the same collection on a shared property.
//
// # Example
//
// ```
// use streamforge_scoring::stream::joiner::{Joiner, equal};
//
// #[derive(Clone)]
// struct Shift { employee_id: Option<usize>, start: i64 }
//
// // Match shifts with the same employee (self-join)
// let same_employee = equal(|s: &Shift| s.employee_id);
//
// let a = Shift { employee_id: Some(5), start: 0 };
// let b = Shift { employee_id: Some(5), start: 8 };
// let c = Shift { employee_id: Some(3), start: 16 };
//
// assert!(same_employee.matches(&a, &b));
// assert!(!same_employee.matches(&a, &c));
// ```
pub fn equal<A, T, F>(key: F) -> EqualJoiner<F, F, T>
where
    T: PartialEq,
    F: Fn(&A) -> T + Clone + Send + Sync,
{
    EqualJoiner {
        left: key.clone(),
        right: key,
        _phantom: PhantomData,
    }
}

// Creates a joiner that matches when extracted values are equal.
//
// Use this for cross-joins between different entity types.
//
// # Example
//
// ```
// use streamforge_scoring::stream::joiner::{Joiner, equal_bi};
//
// #[derive(Clone)]
// struct Employee { id: usize, department: String }
// #[derive(Clone)]
// struct Task { assigned_to: usize, name: String }
//
// // Match employees to their assigned tasks
// let by_id = equal_bi(
//     |e: &Employee| e.id,
//     |t: &Task| t.assigned_to
// );
//
// let emp = Employee { id: 5, department: "Engineering".into() };
// let task1 = Task { assigned_to: 5, name: "Review".into() };
// let task2 = Task { assigned_to: 3, name: "Test".into() };
//
// assert!(by_id.matches(&emp, &task1));
// assert!(!by_id.matches(&emp, &task2));
// ```
pub fn equal_bi<A, B, T, Fa, Fb>(left: Fa, right: Fb) -> EqualJoiner<Fa, Fb, T>
where
    T: PartialEq,
    Fa: Fn(&A) -> T + Send + Sync,
    Fb: Fn(&B) -> T + Send + Sync,
{
    EqualJoiner {
        left,
        right,
        _phantom: PhantomData,
    }
}

// Creates a joiner that matches when the two facts themselves are equal.
//
// Same as `equal(|a| a.clone())`: a self-join on the whole fact.
//
// # Example
//
// ```
// use streamforge_scoring::stream::joiner::{Joiner, identity};
//
// let same = identity::<&str>();
// assert!(same.matches(&"Ann", &"Ann"));
// assert!(!same.matches(&"Ann", &"Beth"));
// ```
pub fn identity<A>() -> EqualJoiner<fn(&A) -> A, fn(&A) -> A, A>
where
    A: Clone + PartialEq,
{
    let key: fn(&A) -> A = A::clone;
    EqualJoiner {
        left: key,
        right: key,
        _phantom: PhantomData,
    }
}

// A joiner that matches when extracted values are equal.
//
// Created by the [`equal()`], [`equal_bi()`] or [`identity()`] functions.
pub struct EqualJoiner<Fa, Fb, T> {
    left: Fa,
    right: Fb,
    _phantom: PhantomData<fn() -> T>,
}

impl<A, B, T, Fa, Fb> Joiner<A, B> for EqualJoiner<Fa, Fb, T>
where
    T: PartialEq,
    Fa: Fn(&A) -> T + Send + Sync,
    Fb: Fn(&B) -> T + Send + Sync,
{
    #[inline]
    fn matches(&self, a: &A, b: &B) -> bool {
        (self.left)(a) == (self.right)(b)
    }

    #[inline]
    fn matches_indexed(&self, a: &A, b: &B) -> bool {
        self.matches(a, b)
    }

    #[inline]
    fn matches_filter(&self, _a: &A, _b: &B) -> bool {
        true
    }

    fn joiner_types(&self) -> Vec<JoinerType> {
        vec![JoinerType::Equal]
    }
}

impl<A, B, T, Fa, Fb> IndexedJoiner<A, B> for EqualJoiner<Fa, Fb, T>
where
    T: Eq + Hash + Clone,
    Fa: Fn(&A) -> T + Send + Sync,
    Fb: Fn(&B) -> T + Send + Sync,
{
    type Key = T;
    type Index = HashIndex<T>;

    #[inline]
    fn index_type(&self) -> JoinerType {
        JoinerType::Equal
    }

    #[inline]
    fn left_key(&self, a: &A) -> T {
        (self.left)(a)
    }

    #[inline]
    fn right_key(&self, b: &B) -> T {
        (self.right)(b)
    }
}
