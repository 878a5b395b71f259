//! `order` command: print every known method in profiled layout order.

use super::load_profiles;
use crate::cli::OutputFormat;
use crate::config::OrderingConfig;
use crate::ordering::{ProfiledComparator, SortKeyCache, VERY_END};
use crate::profiles::MethodProfiles;
use crate::registry::{MethodId, MethodRegistry, MethodTable};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct OrderCommand {
    pub methods: PathBuf,
    pub ordering: OrderingConfig,
    pub format: OutputFormat,
}

/// One line of the layout, as emitted in JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderedMethod {
    pub signature: String,
    /// `null` in JSON for methods without profile data
    pub sort_key: Option<f64>,
}

/// Sort all methods of `table` and pair each with its sort key.
pub fn compute_order(
    table: &MethodTable,
    profiles: &MethodProfiles,
    ordering: &OrderingConfig,
) -> Vec<OrderedMethod> {
    let mut cache = SortKeyCache::new();
    let mut methods: Vec<MethodId> = table.ids().collect();
    let mut comparator = ProfiledComparator::new(
        profiles,
        table,
        &ordering.whitelisted_substrings,
        &mut cache,
        ordering.legacy_order,
    );
    comparator.sort(&mut methods);

    methods
        .into_iter()
        .map(|method| {
            let key = comparator.sort_key(method);
            OrderedMethod {
                signature: table.signature(method).unwrap_or_default().to_string(),
                sort_key: (key != VERY_END).then_some(key),
            }
        })
        .collect()
}

pub fn run_order<W: Write>(command: OrderCommand, out: &mut W) -> Result<()> {
    let (table, profiles) = load_profiles(&command.methods, &command.ordering.profile_files)?;
    let ordered = compute_order(&table, &profiles, &command.ordering);

    match command.format {
        OutputFormat::Text => {
            for method in &ordered {
                writeln!(out, "{}", method.signature)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &ordered)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir) -> (PathBuf, PathBuf) {
        let methods = dir.path().join("methods.txt");
        let profile = dir.path().join("profile.csv");
        std::fs::write(
            &methods,
            indoc! {"
                LA;.cold:()V
                LA;.late:()V
                LA;.switch:()V
                LB;.named:()V com.app.Startup.run
                LB;.rest:()V
            "},
        )
        .unwrap();
        std::fs::write(
            &profile,
            indoc! {"
                index,name,appear100,appear#,avg_call,avg_order,avg_rank100,min_api_level,interaction
                0,LA;.cold:()V,99,1,1,1,10,21,ColdStart
                1,LA;.late:()V,99,1,1,1,90,21,ColdStart
                2,LA;.switch:()V,95,1,1,1,10,21,AppSwitch
            "},
        )
        .unwrap();
        (methods, profile)
    }

    #[test]
    fn test_run_order_text() {
        let dir = TempDir::new().unwrap();
        let (methods, profile) = fixture(&dir);
        let command = OrderCommand {
            methods,
            ordering: OrderingConfig {
                profile_files: vec![profile],
                whitelisted_substrings: vec!["Startup".to_string()],
                legacy_order: false,
            },
            format: OutputFormat::Text,
        };
        let mut out = Vec::new();
        run_order(command, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                "LA;.cold:()V",
                "LB;.named:()V",
                "LA;.late:()V",
                "LA;.switch:()V",
                "LB;.rest:()V"
            ]
        );
    }

    #[test]
    fn test_run_order_json_marks_unprofiled() {
        let dir = TempDir::new().unwrap();
        let (methods, profile) = fixture(&dir);
        let command = OrderCommand {
            methods,
            ordering: OrderingConfig {
                profile_files: vec![profile],
                whitelisted_substrings: vec![],
                legacy_order: true,
            },
            format: OutputFormat::Json,
        };
        let mut out = Vec::new();
        run_order(command, &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0]["sort_key"], serde_json::json!(0.5));
        assert!(entries[4]["sort_key"].is_null());
    }
}
