//! Puzzle engine API.
//!
//! This module turns stage descriptions into a documented variable sheet:
//!
//! - [`Stage`], [`Task`] - Waypoints and their variable definitions
//! - [`parse`] - Split a description into tasks
//! - [`CoordinateFilter`] - Recognize fixed coordinates
//! - [`FormulaConverter`] - Rewrite coordinate arithmetic as spreadsheet formulas
//! - [`merge`], [`Addresses`] - Per-location variable descriptions and rows
//! - [`layout`] - Produce the rows of one location
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)

mod cell_ref;
mod convert;
mod coordinate;
mod description;
mod dimension;
mod error;
mod layout;
mod merge;
mod stage;

pub use cell_ref::CellRef;
pub use convert::{FormulaConverter, unresolved_letters};
pub use coordinate::CoordinateFilter;
pub use description::{Tasks, parse};
pub use dimension::{Dimension, Fragment, Orientation};
pub use error::{EngineError, Result};
pub use layout::{Diagnostic, LayoutOptions, Row, Rows, assemble, layout, layout_with};
pub use merge::{Addresses, Descriptions, merge};
pub use stage::{Stage, Task};
