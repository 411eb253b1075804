use crate::analyzers::parse_module;
use crate::config::Thresholds;
use crate::core::ast::SourceTree;
use crate::debt::duplication::{detect_duplicate_blocks, detect_duplicate_functions};
use crate::debt::semantic::detect_semantic_duplicates;
use crate::debt::smells::{detect_long_methods, detect_long_parameter_list};
use crate::io::{create_writer, AnalysisReport, OutputFormat};
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
    pub threshold_lines: Option<usize>,
    pub threshold_params: Option<usize>,
    pub window_size: Option<usize>,
    pub similarity: Option<f64>,
    pub semantic: bool,
}

pub fn analyze_file(config: AnalyzeConfig) -> Result<()> {
    let thresholds = load_thresholds(&config)?;
    let source = fs::read_to_string(&config.path)
        .with_context(|| format!("failed to read {}", config.path.display()))?;
    let tree = parse_module(&source)
        .with_context(|| format!("failed to parse {}", config.path.display()))?;

    let report = build_report(&tree, &thresholds, config.semantic);
    info!(
        "analyzed {}: {} findings, {} duplicate pairs, {} block groups",
        config.path.display(),
        report.findings.len(),
        report.duplicate_functions.len(),
        report.duplicate_blocks.len()
    );

    create_writer(config.format).write_report(&report)?;

    if report.is_clean() && report.errors.is_empty() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

/// Run every detector over the tree. Detectors are independent; a failing
/// one contributes an error line instead of aborting the run.
pub fn build_report(tree: &SourceTree, thresholds: &Thresholds, semantic: bool) -> AnalysisReport {
    let mut report = AnalysisReport::default();

    match detect_long_methods(tree, thresholds.long_method_lines) {
        Ok(findings) => report.findings.extend(findings),
        Err(e) => report.errors.push(e.to_string()),
    }
    report
        .findings
        .extend(detect_long_parameter_list(tree, thresholds.max_parameters));
    report.duplicate_functions = detect_duplicate_functions(tree);
    report.duplicate_blocks =
        detect_duplicate_blocks(tree, thresholds.window_size, thresholds.similarity);
    if semantic {
        report.semantic_duplicates =
            detect_semantic_duplicates(tree, thresholds.semantic_similarity);
    }

    report
}

fn load_thresholds(config: &AnalyzeConfig) -> Result<Thresholds> {
    let mut thresholds = match &config.config {
        Some(path) => Thresholds::from_file(path)?,
        None => Thresholds::default(),
    };
    if let Some(lines) = config.threshold_lines {
        thresholds.long_method_lines = lines;
    }
    if let Some(params) = config.threshold_params {
        thresholds.max_parameters = params;
    }
    if let Some(window) = config.window_size {
        thresholds.window_size = window;
    }
    if let Some(similarity) = config.similarity {
        thresholds.similarity = similarity;
    }
    Ok(thresholds)
}
