//! Cache files: the listing and waypoints of one multi-stage cache.

mod io;

pub use io::read_page;

use caspr_engine::engine::Stage;
use serde::{Deserialize, Serialize};

/// One multi-stage cache as described by a cache file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cache {
    /// Geocaching code such as `GC2A62B`.
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    /// Listing coordinates, usually the start of the hunt.
    #[serde(default)]
    pub coordinates: String,
    /// Listing text, which often defines variables too.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

/// One row of the waypoint table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Waypoint {
    pub name: String,
    #[serde(default)]
    pub coordinates: String,
    #[serde(default)]
    pub description: String,
}

impl Cache {
    /// Stages in sheet order: the listing first, then every waypoint.
    pub fn stages(&self) -> Vec<Stage> {
        let listing = Stage::new(&self.name, &self.coordinates, &self.description);
        std::iter::once(listing)
            .chain(
                self.waypoints
                    .iter()
                    .map(|wp| Stage::new(&wp.name, &wp.coordinates, &wp.description)),
            )
            .collect()
    }
}
