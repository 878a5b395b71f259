//! Read-only queries over a parsed [`MethodProfiles`].
//!
//! # Lookup Rules
//!
//! 1. Exact interaction id match
//! 2. For [`COLD_START`] only: the empty id written by profiles that predate
//!    the interaction column
//! 3. A shared empty map

use super::types::{MethodProfiles, StatsMap, COLD_START};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static EMPTY_STATS: Lazy<StatsMap> = Lazy::new(StatsMap::new);

impl MethodProfiles {
    /// Per-method stats for an interaction; never fails, may be empty.
    pub fn method_stats(&self, interaction_id: &str) -> &StatsMap {
        if let Some(stats) = self.method_stats.get(interaction_id) {
            return stats;
        }
        if interaction_id == COLD_START {
            if let Some(stats) = self.method_stats.get("") {
                return stats;
            }
        }
        &EMPTY_STATS
    }

    /// Appearance count from a metadata row; exact match only.
    pub fn get_interaction_count(&self, interaction_id: &str) -> Option<u32> {
        self.interaction_counts.get(interaction_id).copied()
    }

    /// Every interaction with at least one resolved row.
    pub fn all_interactions(&self) -> &HashMap<String, StatsMap> {
        &self.method_stats
    }

    pub fn interactions(&self) -> impl Iterator<Item = &str> + '_ {
        self.method_stats.keys().map(String::as_str)
    }

    pub fn has_stats(&self) -> bool {
        self.method_stats.values().any(|stats| !stats.is_empty())
    }

    /// Resolved rows across all interactions.
    pub fn resolved_size(&self) -> usize {
        self.method_stats.values().map(HashMap::len).sum()
    }

    /// Rows waiting for [`process_unresolved_lines`](Self::process_unresolved_lines).
    pub fn unresolved_size(&self) -> usize {
        self.unresolved_lines.values().map(Vec::len).sum()
    }
}
