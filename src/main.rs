use anyhow::Result;
use method_profiles::cli::{self, Commands};
use method_profiles::commands::{run_order, run_stats, OrderCommand, StatsCommand};
use method_profiles::config::load_config_or_default;

fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        Commands::Order {
            methods,
            profiles,
            whitelist,
            legacy_order,
            config,
            format,
            verbosity,
        } => {
            cli::init_logging(verbosity);
            let ordering = load_config_or_default(config.as_deref())
                .ordering
                .with_overrides(profiles, whitelist, legacy_order);
            run_order(
                OrderCommand {
                    methods,
                    ordering,
                    format,
                },
                &mut std::io::stdout().lock(),
            )
        }
        Commands::Stats {
            methods,
            profiles,
            interaction,
            config,
            format,
            verbosity,
        } => {
            cli::init_logging(verbosity);
            let ordering = load_config_or_default(config.as_deref())
                .ordering
                .with_overrides(profiles, vec![], false);
            run_stats(
                StatsCommand {
                    methods,
                    profile_files: ordering.profile_files,
                    interaction,
                    format,
                },
                &mut std::io::stdout().lock(),
            )
        }
    }
}
