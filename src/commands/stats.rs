//! `stats` command: dump parsed per-interaction statistics.

use super::load_profiles;
use crate::cli::OutputFormat;
use crate::profiles::{MethodProfiles, Stats, StatsMap};
use crate::registry::{MethodRegistry, MethodTable};
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct StatsCommand {
    pub methods: PathBuf,
    pub profile_files: Vec<PathBuf>,
    pub interaction: Option<String>,
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct MethodStatsRow {
    pub signature: String,
    #[serde(flatten)]
    pub stats: Stats,
}

#[derive(Debug, Serialize)]
pub struct InteractionReport {
    /// Appearance count from the metadata row, when present
    pub count: Option<u32>,
    pub methods: Vec<MethodStatsRow>,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub interactions: BTreeMap<String, InteractionReport>,
    pub unresolved_lines: usize,
}

fn interaction_report(
    table: &MethodTable,
    profiles: &MethodProfiles,
    interaction_id: &str,
    stats: &StatsMap,
) -> InteractionReport {
    let mut methods: Vec<MethodStatsRow> = stats
        .iter()
        .map(|(method, stats)| MethodStatsRow {
            signature: table.signature(*method).unwrap_or_default().to_string(),
            stats: *stats,
        })
        .collect();
    methods.sort_by(|a, b| a.signature.cmp(&b.signature));
    InteractionReport {
        count: profiles.get_interaction_count(interaction_id),
        methods,
    }
}

/// Build the report for one interaction, or all of them.
pub fn build_report(
    table: &MethodTable,
    profiles: &MethodProfiles,
    interaction: Option<&str>,
) -> StatsReport {
    let interactions = match interaction {
        Some(id) => BTreeMap::from([(
            id.to_string(),
            interaction_report(table, profiles, id, profiles.method_stats(id)),
        )]),
        None => profiles
            .all_interactions()
            .iter()
            .map(|(id, stats)| (id.clone(), interaction_report(table, profiles, id, stats)))
            .collect(),
    };
    StatsReport {
        interactions,
        unresolved_lines: profiles.unresolved_size(),
    }
}

fn write_text<W: Write>(report: &StatsReport, out: &mut W) -> Result<()> {
    for (id, interaction) in &report.interactions {
        let label = if id.is_empty() { "<default>" } else { id.as_str() };
        match interaction.count {
            Some(count) => writeln!(out, "{} (appeared {} times)", label, count)?,
            None => writeln!(out, "{}", label)?,
        }
        for row in &interaction.methods {
            writeln!(
                out,
                "  {} appear={:.2}% calls={:.2} order={:.2}% min_api={}",
                row.signature,
                row.stats.appear_percent,
                row.stats.call_count,
                row.stats.order_percent,
                row.stats.min_api_level
            )?;
        }
    }
    if report.unresolved_lines > 0 {
        writeln!(out, "{} unresolved lines", report.unresolved_lines)?;
    }
    Ok(())
}

pub fn run_stats<W: Write>(command: StatsCommand, out: &mut W) -> Result<()> {
    let (table, profiles) = load_profiles(&command.methods, &command.profile_files)?;
    let report = build_report(&table, &profiles, command.interaction.as_deref());

    match command.format {
        OutputFormat::Text => write_text(&report, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
