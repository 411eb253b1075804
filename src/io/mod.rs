pub mod output;

pub use output::{create_writer, write_output, AnalysisReport, OutputFormat, OutputWriter};
