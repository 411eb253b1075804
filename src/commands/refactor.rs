use crate::analyzers::{parse_module, serialize};
use crate::config::Thresholds;
use crate::debt::duplication::{detect_duplicate_blocks, detect_duplicate_functions};
use crate::io::write_output;
use crate::refactor::naming::{CommandOracle, NamingOracle, NullOracle};
use crate::refactor::rewrite::{refactor_duplicate_blocks, refactor_duplicate_functions};
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

pub struct RefactorConfig {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub window_size: Option<usize>,
    pub similarity: Option<f64>,
    pub namer: Option<String>,
}

pub fn refactor_file(config: RefactorConfig) -> Result<()> {
    let thresholds = load_thresholds(&config)?;
    let source = fs::read_to_string(&config.path)
        .with_context(|| format!("failed to read {}", config.path.display()))?;
    let tree = parse_module(&source)
        .with_context(|| format!("failed to parse {}", config.path.display()))?;

    let oracle: Box<dyn NamingOracle> = match &config.namer {
        Some(program) => Box::new(CommandOracle::new(program.clone())),
        None => Box::new(NullOracle),
    };

    // Collapse duplicate functions first, then look for shared blocks in the
    // rewritten tree so forwarding bodies never seed an extraction.
    let pairs = detect_duplicate_functions(&tree);
    info!("collapsing {} duplicate function(s)", pairs.len());
    let tree = refactor_duplicate_functions(tree, &pairs)?;

    let groups = detect_duplicate_blocks(&tree, thresholds.window_size, thresholds.similarity);
    info!("extracting {} duplicate block group(s)", groups.len());
    let tree = refactor_duplicate_blocks(tree, &groups, thresholds.window_size, oracle.as_ref())?;

    let rendered = serialize(&tree)?;
    write_output(config.output.as_deref(), &rendered)
}

fn load_thresholds(config: &RefactorConfig) -> Result<Thresholds> {
    let mut thresholds = match &config.config {
        Some(path) => Thresholds::from_file(path)?,
        None => Thresholds::default(),
    };
    if let Some(window) = config.window_size {
        thresholds.window_size = window;
    }
    if let Some(similarity) = config.similarity {
        thresholds.similarity = similarity;
    }
    Ok(thresholds)
}
