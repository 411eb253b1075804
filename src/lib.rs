pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod debt;
pub mod io;
pub mod refactor;

pub use analyzers::{parse_module, serialize};
pub use config::Thresholds;
pub use core::ast::SourceTree;
pub use core::errors::{Error, Result};
