//! Aggregated method profile parsing and querying.
//!
//! A profile is a CSV file with one row per (interaction, method) pair,
//! optionally preceded by a one-row metadata prologue:
//!
//! ```text
//! interaction,appear#
//! ColdStart,1234
//! index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level[,interaction]
//! 0,LFoo;.bar:()V,98.5,1216,3.0,12,4.25,21
//! ```
//!
//! # Module Structure
//!
//! - [`types`] - Core data structures
//! - [`cells`] - Cell tokenizer and strict typed cell parsers
//! - `handlers` - Per-line handlers driven by [`ParserMode`]
//! - [`parser`] - File reading loop (I/O boundary)
//! - `resolver` - Second pass over rows whose method did not resolve
//! - `query` - Lookups with the cold start fallback
//!
//! # Quick Start
//!
//! ```ignore
//! use method_profiles::profiles::{MethodProfiles, COLD_START};
//!
//! let mut profiles = MethodProfiles::new();
//! profiles.parse_stats_file(Path::new("agg_method_stats.csv"), &registry)?;
//! // ... later passes add methods to the registry ...
//! profiles.process_unresolved_lines(&registry)?;
//!
//! for (method, stats) in profiles.method_stats(COLD_START) {
//!     println!("{method}: {:.1}%", stats.appear_percent);
//! }
//! ```

pub mod cells;
mod handlers;
pub mod parser;
mod query;
mod resolver;
pub mod types;

pub use parser::ParseSummary;
pub use types::{LineKind, MethodProfiles, OptionalColumns, ParserMode, Stats, StatsMap, COLD_START};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProfileError;
    use crate::registry::{MethodRegistry, MethodTable};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_profile(contents: &str) -> NamedTempFile {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(contents.as_bytes()).unwrap();
        temp
    }

    /// Integration test for the full parsing pipeline
    #[test]
    fn test_full_parsing_pipeline() {
        let mut table = MethodTable::new();
        let a = table.add("LFoo;.a:()V", None).unwrap();
        let b = table.add("LFoo;.b:()V", None).unwrap();
        let profile = write_profile(indoc! {"
            interaction,appear#
            ColdStart,1234
            index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level
            0,LFoo;.a:()V,100,1234,1.5,3,0.25,21
            1,LFoo;.b:()V,45.5,560,3,40,60,-1
        "});

        let mut profiles = MethodProfiles::new();
        let summary = profiles.parse_stats_file(profile.path(), &table).unwrap();

        assert_eq!(summary.resolved_rows, 2);
        assert_eq!(profiles.get_interaction_count(COLD_START), Some(1234));
        let cold = profiles.method_stats(COLD_START);
        assert_eq!(
            cold[&a],
            Stats {
                appear_percent: 100.0,
                call_count: 1.5,
                order_percent: 0.25,
                min_api_level: 21,
            }
        );
        assert_eq!(cold[&b].min_api_level, -1);
    }

    #[test]
    fn test_metadata_count_for_named_interaction() {
        let table = MethodTable::new();
        let profile = write_profile(indoc! {"
            interaction,appear#
            foo,1234
            index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level
        "});
        let mut profiles = MethodProfiles::new();
        profiles.parse_stats_file(profile.path(), &table).unwrap();
        assert_eq!(profiles.get_interaction_count("foo"), Some(1234));
        assert_eq!(profiles.get_interaction_count("bar"), None);
    }

    #[test]
    fn test_legacy_file_without_interactions() {
        let mut table = MethodTable::new();
        let a = table.add("LFoo;.a:()V", None).unwrap();
        let profile = write_profile(indoc! {"
            index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level
            0,LFoo;.a:()V,99,10,1,1,5,21
        "});
        let mut profiles = MethodProfiles::new();
        profiles.parse_stats_file(profile.path(), &table).unwrap();

        assert_eq!(profiles.method_stats(COLD_START), profiles.method_stats(""));
        assert!(profiles.method_stats(COLD_START).contains_key(&a));
        assert_eq!(profiles.interactions().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_interaction_column_overrides_metadata_per_row() {
        let mut table = MethodTable::new();
        let a = table.add("LFoo;.a:()V", None).unwrap();
        let b = table.add("LFoo;.b:()V", None).unwrap();
        let profile = write_profile(indoc! {"
            interaction,appear#
            ColdStart,10
            index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level,interaction
            0,LFoo;.a:()V,99,10,1,1,5,21,AppSwitch
            1,LFoo;.b:()V,99,10,1,1,5,21,
        "});
        let mut profiles = MethodProfiles::new();
        profiles.parse_stats_file(profile.path(), &table).unwrap();

        assert!(profiles.method_stats("AppSwitch").contains_key(&a));
        assert!(!profiles.method_stats(COLD_START).contains_key(&a));
        assert!(profiles.method_stats(COLD_START).contains_key(&b));
    }

    #[test]
    fn test_unresolved_rows_resolve_after_registry_grows() {
        let mut table = MethodTable::new();
        let profile = write_profile(indoc! {"
            index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level,interaction
            0,LLate;.m:()V,91,10,2,1,33,24,AppSwitch
        "});
        let mut profiles = MethodProfiles::new();
        let summary = profiles.parse_stats_file(profile.path(), &table).unwrap();
        assert_eq!(summary.unresolved_rows, 1);
        assert!(profiles.method_stats("AppSwitch").is_empty());

        let late = table.add("LLate;.m:()V", None).unwrap();
        assert_eq!(profiles.process_unresolved_lines(&table).unwrap(), 1);
        assert_eq!(
            profiles.method_stats("AppSwitch")[&late],
            Stats {
                appear_percent: 91.0,
                call_count: 2.0,
                order_percent: 33.0,
                min_api_level: 24,
            }
        );

        // Buffer already drained
        assert_eq!(profiles.process_unresolved_lines(&table).unwrap(), 0);
        assert_eq!(profiles.resolved_size(), 1);
    }

    #[test]
    fn test_malformed_api_level_fails_parse() {
        let mut table = MethodTable::new();
        table.add("LFoo;.a:()V", None).unwrap();
        let profile = write_profile(indoc! {"
            index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level
            0,LFoo;.a:()V,99,10,1,1,5,abc
        "});
        let mut profiles = MethodProfiles::new();
        let err = profiles.parse_stats_file(profile.path(), &table).unwrap_err();
        assert!(matches!(err, ProfileError::AtLine { line: 2, .. }));
    }

    #[test]
    fn test_header_mismatch_fails_parse() {
        let table = MethodTable::new();
        let profile = write_profile("index,name,appear,appear#,avg_call,avg_order,avg_rank100,min_api_level\n");
        let mut profiles = MethodProfiles::new();
        assert!(profiles.parse_stats_file(profile.path(), &table).is_err());
    }

    #[test]
    fn test_multiple_files_accumulate() {
        let mut table = MethodTable::new();
        let a = table.add("LFoo;.a:()V", None).unwrap();
        let first = write_profile(indoc! {"
            interaction,appear#
            ColdStart,5
            index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level
            0,LFoo;.a:()V,99,10,1,1,5,21
        "});
        let second = write_profile(indoc! {"
            index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level,interaction
            0,LFoo;.a:()V,92,10,1,1,40,21,AppSwitch
        "});

        let mut profiles = MethodProfiles::new();
        let summary = profiles
            .initialize(&[first.path(), second.path()], &table)
            .unwrap();

        assert_eq!(summary.resolved_rows, 2);
        assert!(profiles.method_stats(COLD_START).contains_key(&a));
        assert_eq!(profiles.method_stats("AppSwitch")[&a].order_percent, 40.0);
        assert_eq!(profiles.get_interaction_count(COLD_START), Some(5));
        assert_eq!(table.signature(a), Some("LFoo;.a:()V"));
    }
}
