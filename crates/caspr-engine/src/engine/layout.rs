//! Row layout of one location.
//!
//! For every stage, in order, the sheet gets:
//!
//! 1. `[name, coordinates]`
//! 2. `[description]`
//! 3. `[merged description, letter]` for each variable seen for the first time;
//!    the row number becomes the variable's address
//! 4. the stage's coordinate formulas, placed on the description row from
//!    the formula column onwards, one dimension per column
//!
//! Row numbers are 1-based and shared by all stages of the location.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use super::cell_ref::CellRef;
use super::convert::{FormulaConverter, unresolved_letters};
use super::dimension::{Dimension, Fragment, Orientation};
use super::error::{EngineError, Result};
use super::merge::{Addresses, Descriptions, merge};
use super::stage::Stage;

/// Where variable values and formulas go (zero-based columns).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Column the user fills variable values into; formulas reference it.
    pub variable_column: usize,
    /// First column of the formula cells on a description row.
    pub formula_column: usize,
}

impl LayoutOptions {
    /// Build options from column letters such as `"C"` and `"B"`.
    pub fn from_letters(variable_column: &str, formula_column: &str) -> Result<Self> {
        let column = |letters: &str| {
            CellRef::letters_to_col(letters.trim())
                .ok_or_else(|| EngineError::InvalidColumn(letters.to_string()))
        };
        Ok(LayoutOptions {
            variable_column: column(variable_column)?,
            formula_column: column(formula_column)?,
        })
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            variable_column: 2,
            formula_column: 1,
        }
    }
}

/// Cells written side by side, starting at (`row`, `column`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// 1-based row number.
    pub row: usize,
    /// Zero-based first column.
    pub column: usize,
    pub cells: Vec<String>,
}

/// Something the user should look at, without failing the layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A stage's coordinates use letters that have no address when the stage is laid out.
    UnresolvedVariables { stage: String, letters: Vec<char> },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedVariables { stage, letters } => {
                let letters: Vec<String> = letters.iter().map(char::to_string).collect();
                write!(
                    f,
                    "stage '{}' uses undefined variables {}",
                    stage,
                    letters.join(", ")
                )
            }
        }
    }
}

/// Lay out `stages` with the default columns.
pub fn layout(stages: &[Stage]) -> Rows<'_> {
    layout_with(stages, LayoutOptions::default())
}

/// Lay out `stages` of one location.
///
/// Descriptions are merged immediately; rows are produced lazily, one stage
/// at a time, in sheet order.
pub fn layout_with(stages: &[Stage], options: LayoutOptions) -> Rows<'_> {
    Rows {
        stages: stages.iter(),
        options,
        descriptions: merge(stages),
        addresses: Addresses::new(),
        next_row: 1,
        pending: VecDeque::new(),
        diagnostics: Vec::new(),
    }
}

/// Assemble a dimension into a formula: `="N"&" "&47&"° "&(C2-C3)&"."&(...)`.
///
/// `O` (Ost) is written as `E`.
pub fn assemble(dimension: &Dimension) -> String {
    let letter = dimension
        .orientation()
        .map_or(dimension.letter, Orientation::letter);
    let mut parts = vec![quote(&letter.to_string())];
    for fragment in &dimension.fragments {
        match fragment {
            Fragment::Literal(text) => parts.push(quote(text)),
            Fragment::Formula(formula) => parts.push(formula.clone()),
        }
    }
    format!("={}", parts.join("&"))
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Rows of one location. See [`layout_with`].
pub struct Rows<'a> {
    stages: std::slice::Iter<'a, Stage>,
    options: LayoutOptions,
    descriptions: Descriptions,
    addresses: Addresses,
    next_row: usize,
    pending: VecDeque<Row>,
    diagnostics: Vec<Diagnostic>,
}

impl Rows<'_> {
    /// Addresses assigned so far.
    pub fn addresses(&self) -> &Addresses {
        &self.addresses
    }

    /// Diagnostics of the stages laid out so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn push_row(&mut self, cells: Vec<String>) -> usize {
        let row = self.next_row;
        self.next_row += 1;
        self.pending.push_back(Row {
            row,
            column: 0,
            cells,
        });
        row
    }

    fn lay_out(&mut self, stage: &Stage) {
        tracing::debug!(stage = %stage.name, tasks = stage.tasks.len(), "laying out stage");

        self.push_row(vec![stage.name.clone(), stage.coordinates.clone()]);
        let description_row = self.push_row(vec![stage.description.clone()]);

        for task in &stage.tasks {
            for letter in task.letters() {
                if self.addresses.contains(letter) {
                    continue;
                }
                self.addresses.assign(letter, self.next_row);
                let cells = vec![self.descriptions.joined(letter), letter.to_string()];
                self.push_row(cells);
            }
        }

        let unresolved = unresolved_letters(&stage.description, &self.addresses);
        if !unresolved.is_empty() {
            let diagnostic = Diagnostic::UnresolvedVariables {
                stage: stage.name.clone(),
                letters: unresolved.into_iter().collect(),
            };
            tracing::warn!("{}", diagnostic);
            self.diagnostics.push(diagnostic);
        }

        if self.addresses.is_empty() {
            return;
        }

        let converter = match FormulaConverter::new(&self.addresses, self.options.variable_column) {
            Ok(converter) => converter,
            Err(err) => {
                tracing::error!(stage = %stage.name, "cannot convert formulas: {}", err);
                return;
            }
        };

        let formulas: Vec<String> = converter
            .dimensions(&stage.description)
            .iter()
            .map(assemble)
            .collect();
        if !formulas.is_empty() {
            self.pending.push_back(Row {
                row: description_row,
                column: self.options.formula_column,
                cells: formulas,
            });
        }
    }
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        loop {
            if let Some(row) = self.pending.pop_front() {
                return Some(row);
            }
            let stage = self.stages.next()?;
            self.lay_out(stage);
        }
    }
}
