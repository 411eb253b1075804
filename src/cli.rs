use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "smelter")]
#[command(about = "Code smell and duplication analyzer for Python files", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a Python file for smells and duplication
    Analyze {
        /// Python file to analyze
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Threshold config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Non-empty line count above which a method is long
        #[arg(long)]
        threshold_lines: Option<usize>,

        /// Parameter count above which a parameter list is long
        #[arg(long)]
        threshold_params: Option<usize>,

        /// Statements per duplicate-block window
        #[arg(long)]
        window_size: Option<usize>,

        /// Jaccard similarity threshold for duplicate blocks
        #[arg(long)]
        similarity: Option<f64>,

        /// Also report structurally similar function pairs
        #[arg(long)]
        semantic: bool,
    },

    /// Rewrite a Python file, collapsing duplicate functions and extracting
    /// duplicate blocks
    Refactor {
        /// Python file to refactor
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Threshold config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Statements per duplicate-block window
        #[arg(long)]
        window_size: Option<usize>,

        /// Jaccard similarity threshold for duplicate blocks
        #[arg(long)]
        similarity: Option<f64>,

        /// External command that names extracted helpers (snippet on stdin,
        /// name on stdout)
        #[arg(long)]
        namer: Option<String>,
    },
}
