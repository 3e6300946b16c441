use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use indexmap::IndexSet;
use streamforge_core::StreamError;
use streamforge_test::Person;

use super::accumulate_all;
use crate::stream::collector::{
    to_map, to_map_merged, to_map_with, to_sorted_map, to_sorted_map_merged, to_sorted_map_with,
    Collector,
};

fn names(values: &[&str]) -> IndexSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_to_map_drops_empty_keys() {
    let collector = to_map(|p: &Person| p.age, |p: &Person| p.name.clone());
    let mut acc = collector.create_accumulator();
    assert!(collector.finish(&acc).is_empty());

    let mut undos = accumulate_all(
        &collector,
        &mut acc,
        &[
            Person::new("Ann", 20),
            Person::new("Eric", 20),
            Person::new("Beth", 25),
        ],
    );
    assert_eq!(
        collector.finish(&acc),
        HashMap::from([(20, names(&["Ann", "Eric"])), (25, names(&["Beth"]))])
    );

    collector.retract(&mut acc, undos.remove(0)).unwrap();
    assert_eq!(
        collector.finish(&acc),
        HashMap::from([(20, names(&["Eric"])), (25, names(&["Beth"]))])
    );

    collector.retract(&mut acc, undos.remove(0)).unwrap();
    let result = collector.finish(&acc);
    assert_eq!(result, HashMap::from([(25, names(&["Beth"]))]));
    assert!(!result.contains_key(&20));
}

#[test]
fn test_to_map_duplicate_values() {
    let collector = to_map(|x: &(char, u8)| x.0, |x: &(char, u8)| x.1);
    let mut acc = collector.create_accumulator();
    let mut undos = accumulate_all(&collector, &mut acc, &[('a', 1), ('a', 1)]);

    collector.retract(&mut acc, undos.remove(0)).unwrap();
    assert_eq!(collector.finish(&acc), HashMap::from([('a', IndexSet::from([1]))]));
}

#[test]
fn test_to_map_unknown_key_underflows() {
    let collector = to_map(|x: &(char, u8)| x.0, |x: &(char, u8)| x.1);
    let mut a = collector.create_accumulator();
    let mut b = collector.create_accumulator();

    let undo = collector.accumulate(&mut a, &('z', 0));
    assert_eq!(undo.key(), &'z');
    assert!(matches!(
        collector.retract(&mut b, undo),
        Err(StreamError::Underflow { .. })
    ));
}

fn values_of(set: &IndexSet<String>) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

#[test]
fn test_to_sorted_map_sorts_keys_not_values() {
    let collector = to_sorted_map(|p: &Person| p.age, |p: &Person| p.name.clone());
    let mut acc = collector.create_accumulator();
    let mut undos = accumulate_all(
        &collector,
        &mut acc,
        &[Person::new("Eric", 20), Person::new("Beth", 25), Person::new("Ann", 20)],
    );

    let result = collector.finish(&acc);
    assert_eq!(result.keys().copied().collect::<Vec<_>>(), vec![20, 25]);
    assert_eq!(values_of(&result[&20]), vec!["Eric", "Ann"]);

    // Eric leaves and comes back behind Ann.
    collector.retract(&mut acc, undos.remove(0)).unwrap();
    let _eric = collector.accumulate(&mut acc, &Person::new("Eric", 20));
    assert_eq!(values_of(&collector.finish(&acc)[&20]), vec!["Ann", "Eric"]);
}

#[test]
fn test_to_map_keeps_value_order() {
    let collector = to_map(|p: &Person| p.age, |p: &Person| p.name.clone());
    let mut acc = collector.create_accumulator();
    let _undos = accumulate_all(
        &collector,
        &mut acc,
        &[Person::new("Eric", 20), Person::new("Ann", 20), Person::new("Eric", 20)],
    );

    assert_eq!(values_of(&collector.finish(&acc)[&20]), vec!["Eric", "Ann"]);
}

#[test]
fn test_map_with_custom_value_set() {
    let sorted_values = to_sorted_map_with(
        |p: &Person| p.age,
        |p: &Person| p.name.clone(),
        BTreeSet::<String>::new,
    );
    let mut acc = sorted_values.create_accumulator();
    let mut undos = accumulate_all(
        &sorted_values,
        &mut acc,
        &[Person::new("Eric", 20), Person::new("Ann", 20), Person::new("Beth", 25)],
    );
    assert_eq!(
        sorted_values.finish(&acc),
        BTreeMap::from([
            (20, BTreeSet::from(["Ann".to_string(), "Eric".to_string()])),
            (25, BTreeSet::from(["Beth".to_string()])),
        ])
    );

    sorted_values.retract(&mut acc, undos.remove(2)).unwrap();
    assert!(!sorted_values.finish(&acc).contains_key(&25));

    let hashed = to_map_with(|x: &(char, u8)| x.0, |x: &(char, u8)| x.1, HashSet::<u8>::new);
    let mut acc = hashed.create_accumulator();
    let _undos = accumulate_all(&hashed, &mut acc, &[('a', 1), ('a', 2), ('a', 1)]);
    assert_eq!(hashed.finish(&acc), HashMap::from([('a', HashSet::from([1, 2]))]));
}

#[test]
fn test_to_map_merged_recomputes_on_retract() {
    // Concatenation exposes the fold order.
    let collector = to_map_merged(
        |x: &(u8, &str)| x.0,
        |x: &(u8, &str)| x.1.to_string(),
        |a: &String, b: &String| format!("{a}+{b}"),
    );
    let mut acc = collector.create_accumulator();

    let mut undos = accumulate_all(&collector, &mut acc, &[(1, "x"), (1, "y"), (1, "x"), (2, "z")]);
    assert_eq!(
        collector.finish(&acc),
        HashMap::from([(1, "x+y".to_string()), (2, "z".to_string())])
    );

    // One "x" is still present.
    collector.retract(&mut acc, undos.remove(0)).unwrap();
    assert_eq!(collector.finish(&acc)[&1], "x+y");

    collector.retract(&mut acc, undos.remove(1)).unwrap();
    assert_eq!(collector.finish(&acc)[&1], "y");

    collector.retract(&mut acc, undos.remove(0)).unwrap();
    assert_eq!(
        collector.finish(&acc),
        HashMap::from([(2, "z".to_string())])
    );
}

#[test]
fn test_to_sorted_map_merged_sums_per_key() {
    let collector = to_sorted_map_merged(
        |p: &Person| p.age / 10,
        |p: &Person| p.age,
        |a: &u32, b: &u32| a + b,
    );
    let mut acc = collector.create_accumulator();
    let _undos = accumulate_all(
        &collector,
        &mut acc,
        &[Person::new("Ann", 20), Person::new("Beth", 25), Person::new("Cory", 30)],
    );

    assert_eq!(collector.finish(&acc), BTreeMap::from([(2, 45), (3, 30)]));
}
