//! CSV export

use crate::sheet::Sheet;
use caspr_engine::engine::CellRef;

/// Rectangular CSV from A1 to the last used cell.
///
/// Formulas are written as-is, so a spreadsheet import evaluates them.
pub fn write_csv_content(sheet: &Sheet) -> String {
    let Some((max_col, max_row)) = sheet.bounds() else {
        return String::new();
    };

    let mut out = String::new();
    for row in 0..=max_row {
        let fields: Vec<String> = (0..=max_col)
            .map(|col| escape_csv_field(sheet.get(&CellRef::new(col, row)).unwrap_or("")))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
