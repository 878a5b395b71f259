//! Cell tokenizing and strict typed cell parsing.
//!
//! Rows are split on commas only. The last cell keeps the row's line
//! terminator, so every consumer of a cell that may be last strips it with
//! [`strip_line_terminator`] or relies on the typed parsers, which accept
//! leading whitespace and exactly one trailing `\n`.

use crate::errors::{ProfileError, Result};

const DELIMITER: char = ',';

/// Feed each comma-delimited cell of `line` to `parse_cell` with its index.
///
/// Stops at the first cell the callback rejects. Column-count checks are up
/// to the callback.
pub fn parse_cells<'a, F>(line: &'a str, mut parse_cell: F) -> Result<()>
where
    F: FnMut(&'a str, usize) -> Result<()>,
{
    line.split(DELIMITER)
        .enumerate()
        .try_for_each(|(i, tok)| parse_cell(tok, i))
}

/// Remove a single trailing `\n`, if present.
pub fn strip_line_terminator(tok: &str) -> &str {
    tok.strip_suffix('\n').unwrap_or(tok)
}

/// Whether a cell is blank: empty or a bare line terminator.
pub fn is_blank_cell(tok: &str) -> bool {
    strip_line_terminator(tok).is_empty()
}

/// Parse a base-10 integer cell, consuming the rest of the token after
/// leading whitespace.
pub fn parse_int(tok: &str) -> Result<i64> {
    strip_line_terminator(tok)
        .trim_start()
        .parse::<i64>()
        .map_err(|_| ProfileError::InvalidInteger {
            token: tok.to_string(),
        })
}

/// Parse a floating-point cell, consuming the rest of the token after
/// leading whitespace.
pub fn parse_double(tok: &str) -> Result<f64> {
    strip_line_terminator(tok)
        .trim_start()
        .parse::<f64>()
        .map_err(|_| ProfileError::InvalidDouble {
            token: tok.to_string(),
        })
}

/// Parse an integer cell that must fit in `T`.
pub fn parse_int_in_range<T>(tok: &str, field: &'static str) -> Result<T>
where
    T: TryFrom<i64>,
{
    let value = parse_int(tok)?;
    T::try_from(value).map_err(|_| ProfileError::OutOfRange { field, value })
}
