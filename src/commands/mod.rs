//! CLI command implementations.
//!
//! Available commands:
//! - **order**: Sort every known method into profiled layout order
//! - **stats**: Dump the parsed per-interaction statistics
//!
//! Both share the same loading pipeline: read the method list, parse every
//! profile file, then retry rows whose method did not resolve.

pub mod order;
pub mod stats;

pub use order::{run_order, OrderCommand};
pub use stats::{run_stats, StatsCommand};

use crate::profiles::MethodProfiles;
use crate::registry::MethodTable;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load the method table and every profile file into a resolved store.
pub fn load_profiles(
    methods: &Path,
    profile_files: &[PathBuf],
) -> Result<(MethodTable, MethodProfiles)> {
    let table = MethodTable::load_method_list(methods)
        .with_context(|| format!("Failed to load method list: {}", methods.display()))?;

    let mut profiles = MethodProfiles::new();
    if profile_files.is_empty() {
        tracing::warn!("No profile files given; only whitelisted methods will be moved");
        return Ok((table, profiles));
    }

    profiles
        .initialize(profile_files, &table)
        .context("Failed to parse method profiles")?;
    profiles
        .process_unresolved_lines(&table)
        .context("Failed to resolve buffered profile rows")?;

    if profiles.unresolved_size() > 0 {
        tracing::warn!(
            "{} profile rows reference methods missing from {}",
            profiles.unresolved_size(),
            methods.display()
        );
    }
    Ok((table, profiles))
}
