//! Second pass over rows whose method did not resolve during parsing.
//!
//! Rows can reference methods that only exist once later passes have run.
//! Once the registry is complete the caller drains the buffer here, exactly
//! once per batch of buffered rows.

use super::handlers::{handle_data_row, RowOutcome};
use super::types::MethodProfiles;
use crate::errors::{ProfileError, Result};
use crate::registry::MethodRegistry;
use std::time::Instant;
use tracing::info_span;

impl MethodProfiles {
    /// Retry every buffered row against `registry`.
    ///
    /// The live buffer is emptied before any row is retried, so a failed
    /// attempt never leaves a stale snapshot behind. Rows that still do not
    /// resolve are buffered again. Returns the number of rows resolved.
    ///
    /// # Errors
    ///
    /// [`ProfileError::Internal`] if a buffered row fails to parse. These rows
    /// already parsed once, so this means the buffering itself is broken.
    pub fn process_unresolved_lines<R>(&mut self, registry: &R) -> Result<usize>
    where
        R: MethodRegistry + ?Sized,
    {
        let _span = info_span!("process_unresolved_lines").entered();
        let start = Instant::now();

        let pending = std::mem::take(&mut self.unresolved_lines);
        let mut resolved = 0;
        for (interaction_id, lines) in pending {
            for line in lines {
                let outcome =
                    handle_data_row(self, registry, &line.text, &line.columns, &interaction_id)
                        .map_err(|e| {
                            ProfileError::Internal(format!(
                                "buffered line {:?} failed to parse again: {e}",
                                line.text
                            ))
                        })?;
                if let RowOutcome::Resolved(_) = outcome {
                    resolved += 1;
                }
            }
        }

        tracing::info!(
            "After processing unresolved lines: MethodProfiles successfully parsed {} rows; {} unresolved lines ({:?})",
            self.resolved_size(),
            self.unresolved_size(),
            start.elapsed()
        );
        Ok(resolved)
    }
}
