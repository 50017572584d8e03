//! caspr-core - Cache files, sheet model and storage around the puzzle engine.

pub mod cache;
pub mod caches;
pub mod error;
pub mod sheet;
pub mod storage;

pub use cache::{Cache, Waypoint};
pub use caches::{
    CacheFileParser, Caches, DirectorySource, FileSheetWriter, PageParser, PageSource,
    SheetWriter, StreamSheetWriter,
};
pub use error::{CasprError, Result};
pub use sheet::Sheet;
pub use storage::Format;

pub use caspr_engine::engine::{CellRef, Diagnostic, LayoutOptions, Row, Stage};
