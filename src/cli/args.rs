use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "method-profiles")]
#[command(about = "Profile-guided method layout ordering", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print all known methods in profiled layout order
    Order {
        /// Method list: one signature per line, optionally followed by its deobfuscated name
        #[arg(long)]
        methods: PathBuf,

        /// Aggregated method stats CSV (repeatable; replaces the configured files)
        #[arg(short, long = "profile")]
        profiles: Vec<PathBuf>,

        /// Deobfuscated name substring to pull into cold start (repeatable)
        #[arg(short, long = "whitelist")]
        whitelist: Vec<String>,

        /// Cold start only, with the legacy appear threshold
        #[arg(long)]
        legacy_order: bool,

        /// Configuration file (defaults to .method-profiles.toml)
        #[arg(short, long, env = "METHOD_PROFILES_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Print parsed per-interaction stats
    Stats {
        /// Method list: one signature per line, optionally followed by its deobfuscated name
        #[arg(long)]
        methods: PathBuf,

        /// Aggregated method stats CSV (repeatable; replaces the configured files)
        #[arg(short, long = "profile")]
        profiles: Vec<PathBuf>,

        /// Only show this interaction
        #[arg(short, long)]
        interaction: Option<String>,

        /// Configuration file (defaults to .method-profiles.toml)
        #[arg(short, long, env = "METHOD_PROFILES_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
