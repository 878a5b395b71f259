// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod ordering;
pub mod profiles;
pub mod registry;

// Re-export commonly used types
pub use crate::errors::{ProfileError, Result};
pub use crate::ordering::{ProfiledComparator, SortKeyCache};
pub use crate::profiles::{MethodProfiles, ParseSummary, Stats, StatsMap, COLD_START};
pub use crate::registry::{MethodId, MethodRegistry, MethodTable};
