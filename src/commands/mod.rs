pub mod analyze;
pub mod refactor;
