pub mod free_vars;
pub mod naming;
pub mod rewrite;

pub use free_vars::free_variables;
pub use naming::{CommandOracle, FnOracle, NamingOracle, NullOracle, DEFAULT_HELPER_NAME};
pub use rewrite::{refactor_duplicate_blocks, refactor_duplicate_functions};
