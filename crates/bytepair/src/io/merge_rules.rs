//! # Merge-Rule Model File Codec
//!
//! Plain-text model format: one merge rule per line, `<left> <right>\n`, two
//! decimal token IDs. Line order is significant — it *is* the rank order —
//! so the reader and writer never reorder what they see.

use std::io::{BufRead, BufReader, BufWriter, Read, Write};

use crate::errors::{BpeError, BpeResult};
use crate::types::Pair;

/// Read an ordered merge-rule list from a reader.
///
/// Tolerant of extra whitespace between the two fields and a trailing
/// newline on the last line; rejects any line that doesn't parse as exactly
/// two integers with [`BpeError::InvalidModelLine`].
pub fn read_merge_rules<R: Read>(reader: R) -> BpeResult<Vec<Pair>> {
    let reader = BufReader::new(reader);
    let mut rules = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parse_error = || BpeError::InvalidModelLine {
            line_number: idx + 1,
            text: line.clone(),
        };

        let mut fields = trimmed.split_whitespace();
        let first = fields.next().ok_or_else(parse_error)?;
        let second = fields.next().ok_or_else(parse_error)?;
        if fields.next().is_some() {
            return Err(parse_error());
        }

        let left: u32 = first.parse().map_err(|_| parse_error())?;
        let right: u32 = second.parse().map_err(|_| parse_error())?;

        rules.push((left, right));
    }

    Ok(rules)
}

/// Write an ordered merge-rule list, one rule per line, in order.
pub fn write_merge_rules<W: Write>(
    rules: &[Pair],
    writer: W,
) -> BpeResult<()> {
    let mut writer = BufWriter::new(writer);
    for &(left, right) in rules {
        writeln!(writer, "{left} {right}")?;
    }
    writer.flush()?;
    Ok(())
}
