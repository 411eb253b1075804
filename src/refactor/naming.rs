//! Helper naming: an injected oracle with a deterministic fallback.
//!
//! The oracle is the only boundary that may touch the network or another
//! process, and it is never allowed to fail the rewrite: any unusable answer
//! falls back to [`DEFAULT_HELPER_NAME`].

use log::{debug, warn};
use std::collections::HashSet;
use std::io::Write;
use std::process::{Command, Stdio};

/// Name used when the oracle is unavailable or answers with something that
/// is not an identifier
pub const DEFAULT_HELPER_NAME: &str = "common_block";

/// External capability that proposes an identifier for an extracted snippet
pub trait NamingOracle {
    /// A single-line candidate name, or `None` when no suggestion is
    /// available. Implementations are responsible for their own bounds
    /// (timeouts etc.); the engine treats any `None` as a fallback signal.
    fn suggest_name(&self, snippet: &str) -> Option<String>;
}

/// Oracle that never suggests anything; extraction then always uses the
/// deterministic default
pub struct NullOracle;

impl NamingOracle for NullOracle {
    fn suggest_name(&self, _snippet: &str) -> Option<String> {
        None
    }
}

/// Adapter that turns a plain closure into an oracle
pub struct FnOracle<F>(pub F);

impl<F> NamingOracle for FnOracle<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn suggest_name(&self, snippet: &str) -> Option<String> {
        (self.0)(snippet)
    }
}

/// Oracle backed by an external command: the snippet is written to the
/// command's stdin and the first line of its stdout is the candidate
pub struct CommandOracle {
    program: String,
}

impl CommandOracle {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl NamingOracle for CommandOracle {
    fn suggest_name(&self, snippet: &str) -> Option<String> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .ok()?;
        child
            .stdin
            .take()?
            .write_all(snippet.as_bytes())
            .ok()?;
        let output = child.wait_with_output().ok()?;
        if !output.status.success() {
            return None;
        }
        let stdout = String::from_utf8(output.stdout).ok()?;
        let candidate = stdout.lines().next()?.trim().trim_matches('`').to_string();
        (!candidate.is_empty()).then_some(candidate)
    }
}

/// Whether `candidate` can be used as a Python identifier
pub fn is_valid_identifier(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Ask the oracle for a name, validate it, fall back to the default, and
/// resolve collisions against `taken` by appending `_1`, `_2`, ... in
/// increasing order until an unused name is found
pub fn resolve_helper_name(
    oracle: &dyn NamingOracle,
    snippet: &str,
    taken: &HashSet<String>,
) -> String {
    let base = match oracle.suggest_name(snippet) {
        Some(candidate) if is_valid_identifier(&candidate) => candidate,
        Some(candidate) => {
            warn!(
                "naming oracle returned invalid identifier {:?}, using '{}'",
                candidate, DEFAULT_HELPER_NAME
            );
            DEFAULT_HELPER_NAME.to_string()
        }
        None => {
            debug!("naming oracle unavailable, using '{}'", DEFAULT_HELPER_NAME);
            DEFAULT_HELPER_NAME.to_string()
        }
    };

    if !taken.contains(&base) {
        return base;
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{base}_{suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_validation() {
        assert!(is_valid_identifier("common_block"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("sum2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2fast"));
        assert!(!is_valid_identifier("with space"));
        assert!(!is_valid_identifier("dash-name"));
    }

    #[test]
    fn null_oracle_falls_back_to_default() {
        let name = resolve_helper_name(&NullOracle, "x = 1", &HashSet::new());
        assert_eq!(name, DEFAULT_HELPER_NAME);
    }

    #[test]
    fn invalid_suggestions_fall_back_to_default() {
        let oracle = FnOracle(|_: &str| Some("not an identifier".to_string()));
        let name = resolve_helper_name(&oracle, "x = 1", &HashSet::new());
        assert_eq!(name, DEFAULT_HELPER_NAME);
    }

    #[test]
    fn valid_suggestions_are_used_verbatim() {
        let oracle = FnOracle(|_: &str| Some("compute_total".to_string()));
        let name = resolve_helper_name(&oracle, "x = 1", &HashSet::new());
        assert_eq!(name, "compute_total");
    }

    #[test]
    fn collisions_get_increasing_numeric_suffixes() {
        let taken = HashSet::from([
            "common_block".to_string(),
            "common_block_1".to_string(),
        ]);
        let name = resolve_helper_name(&NullOracle, "x = 1", &taken);
        assert_eq!(name, "common_block_2");
    }
}
