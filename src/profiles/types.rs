//! Core data types for aggregated method profiles.
//!
//! Pure data definitions with no I/O. Everything else in the `profiles`
//! module builds on these.
//!
//! # Types
//!
//! - [`Stats`] - Per (interaction, method) statistics
//! - [`StatsMap`] - Method handle to [`Stats`]
//! - [`ParserMode`] - State of the line-oriented parser
//! - [`MethodProfiles`] - The parsed profile store

use crate::registry::MethodId;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Distinguished interaction id for application launch.
///
/// Profiles written before the interaction column existed only covered cold
/// start and use the empty string instead.
pub const COLD_START: &str = "ColdStart";

/// Statistics recorded for one method within one interaction.
///
/// Percent fields are stored exactly as parsed; no 0..=100 validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stats {
    /// Percentage of profiled runs in which the method executed
    pub appear_percent: f64,
    /// Average number of invocations per run
    pub call_count: f64,
    /// Normalized average position within the interaction (lower is earlier)
    pub order_percent: f64,
    /// Platform version floor, informational only
    pub min_api_level: i16,
}

pub type StatsMap = HashMap<MethodId, Stats>;

/// Fixed columns of the main header, in file order.
pub(crate) const MAIN_COLUMNS: [&str; 8] = [
    "index",
    "name",
    "appear100",
    "appear#",
    "avg_call",
    "avg_order",
    "avg_rank100",
    "min_api_level",
];

pub(crate) const INDEX: usize = 0;
pub(crate) const NAME: usize = 1;
pub(crate) const APPEAR100: usize = 2;
pub(crate) const APPEAR_NUMBER: usize = 3;
pub(crate) const AVG_CALL: usize = 4;
pub(crate) const AVG_ORDER: usize = 5;
pub(crate) const AVG_RANK100: usize = 6;
pub(crate) const MIN_API_LEVEL: usize = 7;

/// Leading token that marks a metadata header line.
pub(crate) const METADATA_MARKER: &str = "interaction";

/// The only optional column whose content is interpreted.
pub(crate) const INTERACTION_COLUMN: &str = "interaction";

/// Which kind of line the parser expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserMode {
    /// Next line is a header (metadata or main)
    #[default]
    Uninitialized,
    /// Next line is the single metadata row
    Metadata,
    /// Every following line is a data row
    Main,
}

/// Classification of a line given the mode it was read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    MetadataHeader,
    MainHeader,
    MetadataRow,
    DataRow,
}

impl ParserMode {
    /// Classify `line` and compute the mode for the line after it.
    ///
    /// Metadata is a two-line prologue: after its single row the parser goes
    /// back to `Uninitialized` so the real column header is detected next.
    pub fn transition(self, line: &str) -> (LineKind, ParserMode) {
        match self {
            ParserMode::Uninitialized if line.starts_with(METADATA_MARKER) => {
                (LineKind::MetadataHeader, ParserMode::Metadata)
            }
            ParserMode::Uninitialized => (LineKind::MainHeader, ParserMode::Main),
            ParserMode::Metadata => (LineKind::MetadataRow, ParserMode::Uninitialized),
            ParserMode::Main => (LineKind::DataRow, ParserMode::Main),
        }
    }
}

/// Optional columns declared by a main header, keyed by zero-based index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalColumns {
    names: HashMap<usize, String>,
}

impl OptionalColumns {
    pub(crate) fn declare(&mut self, index: usize, name: String) {
        self.names.insert(index, name);
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(&index).map(String::as_str)
    }

    pub fn is_interaction(&self, index: usize) -> bool {
        self.name(index) == Some(INTERACTION_COLUMN)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Per-file parser state, reset at the start of every parsed file.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParseContext {
    pub mode: ParserMode,
    /// Interaction id from the metadata row, empty when absent
    pub interaction_id: String,
    /// Shared with every line buffered from this file
    pub columns: Arc<OptionalColumns>,
}

/// A data row whose method did not resolve on first sight.
#[derive(Debug, Clone)]
pub(crate) struct UnresolvedLine {
    /// Raw row text, including its line terminator
    pub text: String,
    /// Column layout of the file the row came from
    pub columns: Arc<OptionalColumns>,
}

/// Parsed method profile store.
///
/// Maps interaction id to per-method [`Stats`]. Also records interaction
/// appearance counts from metadata rows and the rows still waiting for their
/// method to become resolvable.
///
/// # Example
///
/// ```ignore
/// use method_profiles::profiles::{MethodProfiles, COLD_START};
///
/// let mut profiles = MethodProfiles::new();
/// profiles.parse_stats_file(Path::new("agg_method_stats.csv"), &registry)?;
/// let cold_start = profiles.method_stats(COLD_START);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MethodProfiles {
    pub(crate) method_stats: HashMap<String, StatsMap>,
    pub(crate) interaction_counts: HashMap<String, u32>,
    pub(crate) unresolved_lines: HashMap<String, Vec<UnresolvedLine>>,
    pub(crate) context: ParseContext,
}

impl MethodProfiles {
    pub fn new() -> Self {
        Self::default()
    }
}
