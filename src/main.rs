use anyhow::Result;
use clap::Parser;
use smelter::cli::{Cli, Commands};
use smelter::commands::analyze::{analyze_file, AnalyzeConfig};
use smelter::commands::refactor::{refactor_file, RefactorConfig};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            config,
            threshold_lines,
            threshold_params,
            window_size,
            similarity,
            semantic,
        } => analyze_file(AnalyzeConfig {
            path,
            format,
            config,
            threshold_lines,
            threshold_params,
            window_size,
            similarity,
            semantic,
        }),
        Commands::Refactor {
            path,
            output,
            config,
            window_size,
            similarity,
            namer,
        } => refactor_file(RefactorConfig {
            path,
            output,
            config,
            window_size,
            similarity,
            namer,
        }),
    }
}
