//! Variable environment read by formula evaluation.

use indexmap::IndexMap;
use log::debug;

use crate::error::LookupError;
use crate::formula::Formula;
use crate::normalize::{FALSE, TRUE};

/// Variable environment: name -> truth value, in first-seen order.
///
/// Registration never overwrites an existing value, so re-parsing a formula
/// keeps whatever the user already assigned. Only the owner clears it.
///
/// # Invariants
///
/// - Names are non-empty
/// - `T` and `F` are literals, never variable names
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    entries: IndexMap<String, bool>,
}

/// Whether `name` can be stored as a variable.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != TRUE && name != FALSE
}

fn check_name(name: &str) {
    assert!(is_valid_name(name), "Invalid variable name: {:?}", name);
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Register `name` with `value` unless it is already present.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or is one of the literals `T`/`F`.
    pub fn add(&mut self, name: &str, value: bool) {
        check_name(name);
        self.entries.entry(name.to_string()).or_insert(value);
    }

    /// Assign `value` to `name`, registering it if needed.
    /// An existing name keeps its position.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or is one of the literals `T`/`F`.
    pub fn set(&mut self, name: &str, value: bool) {
        check_name(name);
        self.entries.insert(name.to_string(), value);
    }

    pub fn set_values<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        for (name, value) in values {
            self.set(name.as_ref(), value);
        }
    }

    pub fn get(&self, name: &str) -> Result<bool, LookupError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| LookupError { name: name.to_string() })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over `(name, value)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Register every free variable of `formula` with the default value `false`.
    pub fn register_formula(&mut self, formula: &Formula) {
        for name in formula.variables() {
            if !self.contains(name) {
                debug!("register_formula: new variable {}", name);
            }
            self.add(name, false);
        }
    }
}
