//! Person fixtures.
//!
//! # Example
//!
//! ```
//! use streamforge_test::person::{people, Person};
//!
//! let all = people();
//! assert_eq!(all[0], Person::new("Ann", 20));
//! ```

use streamforge_core::tuple::uni;

/// A fact with a string and an integer property.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: &str, age: u32) -> Self {
        Self {
            name: name.to_string(),
            age,
        }
    }

    /// Wraps the person into a 1-tuple.
    pub fn into_uni(self) -> (Person,) {
        uni(self)
    }
}

/// Five people whose ages are `[20, 25, 30, 30, 20]`.
pub fn people() -> Vec<Person> {
    vec![
        Person::new("Ann", 20),
        Person::new("Beth", 25),
        Person::new("Cory", 30),
        Person::new("Dana", 30),
        Person::new("Eric", 20),
    ]
}
