//! Per-location variable bookkeeping: merged descriptions and row addresses.
//!
//! Both maps live for exactly one location. Descriptions are merged across
//! all stages up front, because a variable's row shows every definition of
//! it, including those from stages laid out after the row itself.

use std::collections::{BTreeMap, HashMap};

use super::stage::Stage;

/// Row number of each variable's descriptor row.
///
/// Addresses are assigned on first occurrence and never change afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Addresses(BTreeMap<char, usize>);

impl Addresses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `row` for `letter` unless it already has an address.
    /// Returns the address in effect afterwards.
    pub fn assign(&mut self, letter: char, row: usize) -> usize {
        *self.0.entry(letter).or_insert(row)
    }

    pub fn get(&self, letter: char) -> Option<usize> {
        self.0.get(&letter).copied()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains_key(&letter)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Known letters in alphabetical order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(char, usize)> for Addresses {
    fn from_iter<I: IntoIterator<Item = (char, usize)>>(iter: I) -> Self {
        Addresses(iter.into_iter().collect())
    }
}

/// Every task description naming a variable, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Descriptions(HashMap<char, Vec<String>>);

impl Descriptions {
    pub fn get(&self, letter: char) -> &[String] {
        self.0.get(&letter).map(Vec::as_slice).unwrap_or_default()
    }

    /// Cell text for a variable's descriptor row.
    pub fn joined(&self, letter: char) -> String {
        self.get(letter).join("\n")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Collect the descriptions of every variable across `stages`.
///
/// Stages, tasks and letters are visited in order. A task naming the same
/// letter twice contributes its description once; two tasks with identical
/// text both contribute.
pub fn merge(stages: &[Stage]) -> Descriptions {
    let mut merged: HashMap<char, Vec<String>> = HashMap::new();
    for stage in stages {
        for task in &stage.tasks {
            for letter in task.letters() {
                merged
                    .entry(letter)
                    .or_default()
                    .push(task.description.clone());
            }
        }
    }
    Descriptions(merged)
}
