//! In-memory sheet built from laid-out rows.

use caspr_engine::engine::{CellRef, Row};
use std::collections::BTreeMap;

/// Sparse grid of cell values, ordered row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    cells: BTreeMap<CellRef, String>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet by applying `rows` in order.
    pub fn from_rows<I: IntoIterator<Item = Row>>(rows: I) -> Self {
        let mut sheet = Sheet::new();
        for row in rows {
            sheet.apply(&row);
        }
        sheet
    }

    /// Write the cells of `row`. Empty values are skipped, so earlier content survives.
    pub fn apply(&mut self, row: &Row) {
        let Some(row_idx) = row.row.checked_sub(1) else {
            tracing::warn!("ignoring cells for row 0");
            return;
        };
        for (offset, value) in row.cells.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            self.cells
                .insert(CellRef::new(row.column + offset, row_idx), value.clone());
        }
    }

    pub fn get(&self, cell: &CellRef) -> Option<&str> {
        self.cells.get(cell).map(String::as_str)
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&CellRef, &str)> {
        self.cells.iter().map(|(cell, value)| (cell, value.as_str()))
    }

    /// Last used column and row (zero-based), or None for an empty sheet.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        let max_row = self.cells.keys().next_back()?.row;
        let max_col = self.cells.keys().map(|cell| cell.col).max()?;
        Some((max_col, max_row))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
