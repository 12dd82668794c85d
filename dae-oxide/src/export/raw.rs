//! Plain text dump of the flattened streams, one tuple per line with a running
//! index comment:
//!
//! ```text
//! @vertex = [
//!            [0.0, 1.0, -2.0],  # 0
//!           ]
//! ```

use std::fmt::Write;

use crate::export::ArrayData;

pub(crate) const RULE_WIDTH: usize = 40;

/// Writes the header rule that starts a dump.
pub fn write_rule(out: &mut String) {
    let _ = writeln!(out, "# {}", "-".repeat(RULE_WIDTH));
}

/// Writes one `@name = [ ... ]` block. Float data is grouped `width` values
/// per line; packed data one value per line.
pub fn write_block(out: &mut String, name: &str, data: &ArrayData, width: usize) {
    let title = format!("@{} = [", name);
    let indent = " ".repeat(title.len());
    let _ = writeln!(out, "{}", title);
    match data {
        ArrayData::Float(values) => {
            for (i, tuple) in values.chunks_exact(width.max(1)).enumerate() {
                let items = tuple.iter().map(|v| format!("{:?}", v)).collect::<Vec<_>>();
                let _ = writeln!(out, "{}[{}],  # {}", indent, items.join(", "), i);
            }
        },
        ArrayData::Packed(values) => {
            for (i, v) in values.iter().enumerate() {
                let _ = writeln!(out, "{}{},  # {}", indent, v, i);
            }
        },
    }
    let _ = writeln!(out, "{}]", " ".repeat(title.len() - 1));
    let _ = writeln!(out);
}

/// Reads a block written by [`write_block`] back into numbers, one inner
/// `Vec` per line. Used to check the dump against the JSON output.
pub fn parse_block(text: &str, name: &str) -> Option<Vec<Vec<f64>>> {
    let title = format!("@{} = [", name);
    let mut lines = text.lines().skip_while(|l| *l != title);
    lines.next()?;
    let mut rows = Vec::new();
    for line in lines {
        let body = line.trim();
        if body == "]" {
            return Some(rows);
        }
        let body = body.split("  #").next()?.trim().trim_end_matches(',');
        let body = body.trim_start_matches('[').trim_end_matches(']');
        let row = body.split(',')
            .map(|v| v.trim().parse::<f64>().ok())
            .collect::<Option<Vec<_>>>()?;
        rows.push(row);
    }
    None
}
