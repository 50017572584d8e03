//! Writer for .grd file format

use crate::sheet::Sheet;

/// Write a Sheet to a .grd format string
pub fn write_grd_content(sheet: &Sheet) -> String {
    let mut lines = vec!["# Caspr Sheet".to_string()];

    for (cell_ref, value) in sheet.iter() {
        let value_str = match value.strip_prefix('=') {
            Some(formula) => format!("={}", formula),
            None => format!("\"{}\"", escape_grd_text(value)),
        };
        lines.push(format!("{}: {}", cell_ref, value_str));
    }

    lines.join("\n") + "\n"
}

fn escape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}
