//! Profile file parser - the I/O boundary.
//!
//! Reads a profile line by line and hands each line to the handler picked by
//! the current [`ParserMode`](super::types::ParserMode). The first failing line
//! aborts the parse; the store must then be discarded.
//!
//! # Example
//!
//! ```ignore
//! use method_profiles::profiles::MethodProfiles;
//!
//! let mut profiles = MethodProfiles::new();
//! let summary = profiles.parse_stats_file(Path::new("agg_method_stats.csv"), &registry)?;
//! println!("{} rows, {} unresolved", summary.resolved_rows, summary.unresolved_rows);
//! ```

use super::handlers::{handle_line, RowOutcome};
use super::types::{MethodProfiles, ParseContext};
use crate::errors::{ProfileError, Result};
use crate::registry::MethodRegistry;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::info_span;

/// Counts for one parsed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Lines read, including headers and skipped blank lines
    pub lines: usize,
    /// Data rows stored in the profile
    pub resolved_rows: usize,
    /// Data rows buffered for the second pass
    pub unresolved_rows: usize,
}

impl MethodProfiles {
    /// Parse one aggregated method stats file into this store.
    ///
    /// Can be called once per file; the store, interaction counts and the
    /// unresolved buffer accumulate across calls while the header state starts
    /// fresh each time.
    ///
    /// # Errors
    ///
    /// [`ProfileError::MissingProfilePath`] for an empty path, leaving the
    /// store untouched. Any I/O, header or cell error aborts the parse.
    pub fn parse_stats_file<R>(&mut self, path: &Path, registry: &R) -> Result<ParseSummary>
    where
        R: MethodRegistry + ?Sized,
    {
        tracing::debug!("input csv filename: {}", path.display());
        if path.as_os_str().is_empty() {
            tracing::info!("No csv file given");
            return Err(ProfileError::MissingProfilePath);
        }

        let file = File::open(path).map_err(|e| ProfileError::io(path, e))?;
        self.parse_stats_reader(BufReader::new(file), path, registry)
    }

    /// Parse profile rows from any buffered reader.
    ///
    /// `origin` is only used to label I/O errors.
    pub fn parse_stats_reader<B, R>(
        &mut self,
        mut reader: B,
        origin: &Path,
        registry: &R,
    ) -> Result<ParseSummary>
    where
        B: BufRead,
        R: MethodRegistry + ?Sized,
    {
        let _span = info_span!("parse_method_profiles", file = %origin.display()).entered();
        let start = Instant::now();

        self.context = ParseContext::default();
        let mut summary = ParseSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| ProfileError::io(origin, e).at_line(summary.lines + 1))?;
            if read == 0 {
                break;
            }
            summary.lines += 1;
            let line = std::str::from_utf8(&buf).map_err(|source| {
                ProfileError::InvalidEncoding { source }.at_line(summary.lines)
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let (kind, next_mode) = self.context.mode.transition(line);
            match handle_line(self, registry, kind, line)
                .map_err(|e| e.at_line(summary.lines))?
            {
                Some(RowOutcome::Resolved(_)) => summary.resolved_rows += 1,
                Some(RowOutcome::Unresolved) => summary.unresolved_rows += 1,
                None => {}
            }
            self.context.mode = next_mode;
        }

        tracing::info!(
            "MethodProfiles successfully parsed {} rows; {} unresolved lines ({:?})",
            self.resolved_size(),
            self.unresolved_size(),
            start.elapsed()
        );
        Ok(summary)
    }

    /// Parse several files in order, stopping at the first failure.
    pub fn initialize<P, R>(&mut self, paths: &[P], registry: &R) -> Result<ParseSummary>
    where
        P: AsRef<Path>,
        R: MethodRegistry + ?Sized,
    {
        paths.iter().try_fold(ParseSummary::default(), |total, path| {
            let summary = self.parse_stats_file(path.as_ref(), registry)?;
            Ok(ParseSummary {
                lines: total.lines + summary.lines,
                resolved_rows: total.resolved_rows + summary.resolved_rows,
                unresolved_rows: total.unresolved_rows + summary.unresolved_rows,
            })
        })
    }
}
