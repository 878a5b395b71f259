//! Line handlers for the profile parser.
//!
//! Each handler consumes one line of a given [`LineKind`] and updates the
//! [`MethodProfiles`] it is given. No I/O happens here; the driving loop in
//! `parser` reads lines and picks the handler from the current mode.
//!
//! # Handler Types
//!
//! - `handle_metadata_header` - `interaction,appear#[,...]`
//! - `handle_metadata_row` - the single `<interaction>,<count>` row
//! - `handle_main_header` - `index,name,...,min_api_level[,extra...]`
//! - `handle_data_row` - one method row, resolved or buffered

use super::cells::{
    is_blank_cell, parse_cells, parse_double, parse_int_in_range, strip_line_terminator,
};
use super::types::{
    LineKind, MethodProfiles, OptionalColumns, Stats, UnresolvedLine, APPEAR100, APPEAR_NUMBER,
    AVG_CALL, AVG_ORDER, AVG_RANK100, INDEX, MAIN_COLUMNS, METADATA_MARKER, MIN_API_LEVEL, NAME,
};
use crate::errors::{ProfileError, Result};
use crate::registry::{MethodId, MethodRegistry};
use std::sync::Arc;

/// What happened to a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowOutcome {
    Resolved(MethodId),
    Unresolved,
}

fn check_header_cell(expected: &'static str, tok: &str, column: usize) -> Result<()> {
    let found = strip_line_terminator(tok);
    if found == expected {
        Ok(())
    } else {
        Err(ProfileError::HeaderMismatch {
            column,
            found: found.to_string(),
            expected,
        })
    }
}

/// Dispatch a line to the handler for its kind.
pub(crate) fn handle_line<R>(
    profiles: &mut MethodProfiles,
    registry: &R,
    kind: LineKind,
    line: &str,
) -> Result<Option<RowOutcome>>
where
    R: MethodRegistry + ?Sized,
{
    match kind {
        LineKind::MetadataHeader => handle_metadata_header(line).map(|_| None),
        LineKind::MainHeader => handle_main_header(profiles, line).map(|_| None),
        LineKind::MetadataRow => handle_metadata_row(profiles, line).map(|_| None),
        LineKind::DataRow => {
            let columns = Arc::clone(&profiles.context.columns);
            let default_interaction = profiles.context.interaction_id.clone();
            handle_data_row(profiles, registry, line, &columns, &default_interaction).map(Some)
        }
    }
}

/// Validate the metadata header: `interaction,appear#` then blank cells only.
pub(crate) fn handle_metadata_header(line: &str) -> Result<()> {
    parse_cells(line, |tok, i| match i {
        0 => check_header_cell(METADATA_MARKER, tok, i),
        1 => check_header_cell("appear#", tok, i),
        _ if is_blank_cell(tok) => Ok(()),
        _ => Err(ProfileError::UnexpectedMetadataColumn {
            column: i,
            found: tok.to_string(),
        }),
    })
}

/// Record the metadata row's interaction id and appearance count.
///
/// The id becomes the default interaction for the data rows that follow.
pub(crate) fn handle_metadata_row(profiles: &mut MethodProfiles, line: &str) -> Result<()> {
    let mut interaction_id = String::new();
    let mut interaction_count = 0u32;
    parse_cells(line, |tok, i| match i {
        0 => {
            interaction_id = strip_line_terminator(tok).to_string();
            Ok(())
        }
        1 => {
            interaction_count = parse_int_in_range::<u32>(tok, "appear#")?;
            Ok(())
        }
        _ if is_blank_cell(tok) => Ok(()),
        _ => Err(ProfileError::UnexpectedMetadataColumn {
            column: i,
            found: tok.to_string(),
        }),
    })?;

    tracing::debug!(
        "Interaction {:?} appeared {} times",
        interaction_id,
        interaction_count
    );
    profiles
        .interaction_counts
        .insert(interaction_id.clone(), interaction_count);
    profiles.context.interaction_id = interaction_id;
    Ok(())
}

/// First fixed column a line of `cells` cells does not reach, if any.
fn first_missing_column(cells: usize) -> Option<(usize, &'static str)> {
    MAIN_COLUMNS
        .get(cells..)
        .and_then(|missing| missing.first())
        .map(|&expected| (cells, expected))
}

/// Validate the fixed columns and record any extra ones verbatim.
pub(crate) fn handle_main_header(profiles: &mut MethodProfiles, line: &str) -> Result<()> {
    let mut columns = OptionalColumns::default();
    let mut cells = 0;
    parse_cells(line, |tok, i| {
        cells = i + 1;
        match MAIN_COLUMNS.get(i) {
            Some(&expected) => check_header_cell(expected, tok, i),
            None => {
                columns.declare(i, strip_line_terminator(tok).to_string());
                Ok(())
            }
        }
    })?;
    if let Some((column, expected)) = first_missing_column(cells) {
        return Err(ProfileError::HeaderMismatch {
            column,
            found: String::new(),
            expected,
        });
    }

    if !columns.is_empty() {
        tracing::debug!("Header declares {} optional columns", columns.len());
    }
    profiles.context.columns = Arc::new(columns);
    Ok(())
}

/// Parse one data row.
///
/// A row whose method does not resolve is not an error: its raw text is
/// buffered under the row's interaction id for a later retry. An
/// `interaction` cell on the row takes precedence over `default_interaction`.
pub(crate) fn handle_data_row<R>(
    profiles: &mut MethodProfiles,
    registry: &R,
    line: &str,
    columns: &Arc<OptionalColumns>,
    default_interaction: &str,
) -> Result<RowOutcome>
where
    R: MethodRegistry + ?Sized,
{
    let mut stats = Stats::default();
    let mut interaction_id = String::new();
    let mut method = None;
    let mut name = "";
    let mut cells = 0;

    parse_cells(line, |tok, i| {
        cells = i + 1;
        match i {
            // Line number in the source file; meaningless here
            INDEX => {}
            NAME => {
                name = tok;
                method = registry.resolve(tok);
            }
            APPEAR100 => stats.appear_percent = parse_double(tok)?,
            // Raw forms of appear100 / avg_rank100
            APPEAR_NUMBER | AVG_ORDER => {}
            AVG_CALL => stats.call_count = parse_double(tok)?,
            AVG_RANK100 => stats.order_percent = parse_double(tok)?,
            MIN_API_LEVEL => {
                stats.min_api_level = parse_int_in_range::<i16>(tok, "min_api_level")?
            }
            _ if columns.is_interaction(i) => {
                interaction_id = strip_line_terminator(tok).to_string();
            }
            _ => return Err(ProfileError::UnknownColumn { column: i }),
        }
        Ok(())
    })?;
    if let Some((column, expected)) = first_missing_column(cells) {
        return Err(ProfileError::MissingColumn { column, expected });
    }

    if interaction_id.is_empty() {
        interaction_id = default_interaction.to_string();
    }

    match method {
        Some(method) => {
            tracing::trace!(
                "({}, {}) -> {{{}, {}, {}, {}}}",
                name,
                interaction_id,
                stats.appear_percent,
                stats.call_count,
                stats.order_percent,
                stats.min_api_level
            );
            profiles
                .method_stats
                .entry(interaction_id)
                .or_default()
                .insert(method, stats);
            Ok(RowOutcome::Resolved(method))
        }
        None => {
            tracing::trace!("unresolved: {}", name);
            profiles
                .unresolved_lines
                .entry(interaction_id)
                .or_default()
                .push(UnresolvedLine {
                    text: line.to_string(),
                    columns: Arc::clone(columns),
                });
            Ok(RowOutcome::Unresolved)
        }
    }
}
