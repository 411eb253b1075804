use crate::core::{
    DuplicateBlockGroup, DuplicateFunctionPair, Finding, SemanticDuplicatePair, SmellKind,
};
use crate::debt::group_by_kind;
use anyhow::Context;
use colored::*;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

/// Everything a single analysis run produced. Detectors run independently;
/// one failing leaves the others' results intact and adds a line to
/// `errors`.
#[derive(Debug, Default, Serialize)]
pub struct AnalysisReport {
    pub findings: Vec<Finding>,
    pub duplicate_functions: Vec<DuplicateFunctionPair>,
    pub duplicate_blocks: Vec<DuplicateBlockGroup>,
    pub semantic_duplicates: Vec<SemanticDuplicatePair>,
    pub errors: Vec<String>,
}

impl AnalysisReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
            && self.duplicate_functions.is_empty()
            && self.duplicate_blocks.is_empty()
            && self.semantic_duplicates.is_empty()
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        print_header();
        print_smells(report);
        print_duplicate_functions(report);
        print_duplicate_blocks(report);
        print_semantic_duplicates(report);
        print_errors(report);
        print_verdict(report);
        Ok(())
    }
}

fn print_header() {
    println!("{}", "Smelter Analysis Report".bold().blue());
    println!("{}", "=======================".blue());
    println!();
}

fn print_smells(report: &AnalysisReport) {
    if report.findings.is_empty() {
        return;
    }

    let by_kind = group_by_kind(report.findings.clone());
    for kind in [SmellKind::LongMethod, SmellKind::LongParameterList] {
        let Some(findings) = by_kind.get(&kind) else {
            continue;
        };
        println!(
            "{} ({}):",
            kind.display_name().yellow().bold(),
            findings.len()
        );
        for finding in findings {
            println!(
                "  - {} ({}): {}",
                finding.subject.yellow(),
                finding.metric,
                finding.detail
            );
        }
        println!();
    }
}

fn print_duplicate_functions(report: &AnalysisReport) {
    if report.duplicate_functions.is_empty() {
        return;
    }

    println!(
        "{} ({}):",
        "Duplicate Functions".red().bold(),
        report.duplicate_functions.len()
    );
    for pair in &report.duplicate_functions {
        println!("  - {} duplicates {}", pair.duplicate.red(), pair.primary);
    }
    println!();
}

fn print_duplicate_blocks(report: &AnalysisReport) {
    if report.duplicate_blocks.is_empty() {
        return;
    }

    println!(
        "{} ({}):",
        "Duplicate Blocks".red().bold(),
        report.duplicate_blocks.len()
    );
    for group in &report.duplicate_blocks {
        println!("  - shared by {}", group.function_names().join(", "));
        if let Some(representative) = group.representative() {
            for line in representative.text.lines() {
                println!("      {}", line.dimmed());
            }
        }
    }
    println!();
}

fn print_semantic_duplicates(report: &AnalysisReport) {
    if report.semantic_duplicates.is_empty() {
        return;
    }

    println!(
        "{} ({}):",
        "Semantic Duplicates".magenta().bold(),
        report.semantic_duplicates.len()
    );
    for pair in &report.semantic_duplicates {
        println!(
            "  - {} ~ {} ({:.0}% similar)",
            pair.first,
            pair.second,
            pair.similarity * 100.0
        );
    }
    println!();
}

fn print_errors(report: &AnalysisReport) {
    if report.errors.is_empty() {
        return;
    }

    println!("{} ({}):", "Detector Errors".red().bold(), report.errors.len());
    for error in &report.errors {
        println!("  - {error}");
    }
    println!();
}

fn print_verdict(report: &AnalysisReport) {
    if report.is_clean() && report.errors.is_empty() {
        println!("{} no smells detected", "✓".green());
    } else {
        let total = report.findings.len()
            + report.duplicate_functions.len()
            + report.duplicate_blocks.len()
            + report.semantic_duplicates.len();
        println!("{} {} issue(s) found", "✗".red(), total);
    }
}

/// Write rendered source to `path`, or to stdout when no path is given
pub fn write_output(path: Option<&std::path::Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_includes_every_section() {
        let report = AnalysisReport {
            findings: vec![Finding {
                kind: SmellKind::LongParameterList,
                subject: "f".to_string(),
                metric: 4,
                detail: "4 parameters".to_string(),
            }],
            duplicate_functions: vec![DuplicateFunctionPair {
                primary: "a".to_string(),
                duplicate: "b".to_string(),
            }],
            ..Default::default()
        };

        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_report(&report).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(json["findings"][0]["subject"], "f");
        assert_eq!(json["duplicate_functions"][0]["duplicate"], "b");
        assert!(json["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn empty_report_is_clean() {
        assert!(AnalysisReport::default().is_clean());
    }
}
