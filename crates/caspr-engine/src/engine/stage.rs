//! Stages and their variable-definition tasks.

use serde::{Deserialize, Serialize};

use super::coordinate::CoordinateFilter;
use super::description;

/// One variable definition taken from a description, e.g. `BC = year on the plaque`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// The defining text, trimmed.
    pub description: String,
    /// Every letter sharing this definition, in the order written.
    pub variables: String,
}

impl Task {
    pub fn new(description: impl Into<String>, variables: impl Into<String>) -> Self {
        Task {
            description: description.into(),
            variables: variables.into(),
        }
    }

    /// Variable letters in order. Letters repeated within the task are yielded once.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.variables
            .char_indices()
            .filter(|(idx, ch)| !self.variables[..*idx].contains(*ch))
            .map(|(_, ch)| ch)
    }
}

/// One waypoint of a multi-stage cache, or the synthetic stage for the cache listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    /// Raw coordinate text as found on the page, possibly `???`.
    pub coordinates: String,
    pub description: String,
    pub tasks: Vec<Task>,
}

impl Stage {
    /// Build a stage, parsing its tasks from `description`.
    pub fn new(
        name: impl Into<String>,
        coordinates: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let description = description.into();
        let tasks = description::parse(&description).collect();
        Stage {
            name: name.into(),
            coordinates: coordinates.into(),
            description,
            tasks,
        }
    }

    /// The resolved coordinate pair of this stage, when its position is already known.
    pub fn fixed_coordinates(&self) -> Option<&str> {
        CoordinateFilter::find(&self.coordinates)
    }
}
