pub mod ast;
pub mod errors;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The size-based code smells reported by the detectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmellKind {
    LongMethod,
    LongParameterList,
}

impl SmellKind {
    pub fn display_name(&self) -> &str {
        match self {
            SmellKind::LongMethod => "Long Method",
            SmellKind::LongParameterList => "Long Parameter List",
        }
    }
}

/// A detected code smell with its subject and measured metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub kind: SmellKind,
    pub subject: String,
    pub metric: usize,
    pub detail: String,
}

/// Two functions with identical canonical bodies. `primary` is the one
/// declared first; all later same-body functions are duplicates of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateFunctionPair {
    pub primary: String,
    pub duplicate: String,
}

/// One window of consecutive statements inside a function body.
/// Ephemeral: recomputed on every detection run.
#[derive(Debug, Clone, Serialize)]
pub struct BlockOccurrence {
    pub owning_function: String,
    /// 0-based offset of the window within the owning function's body
    pub start_index: usize,
    pub text: String,
    #[serde(skip)]
    pub tokens: BTreeSet<String>,
}

/// A group of mutually similar windows from different functions. Always has
/// at least two members; the first is the representative used to synthesize
/// the extracted helper.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateBlockGroup {
    pub occurrences: Vec<BlockOccurrence>,
}

impl DuplicateBlockGroup {
    pub fn representative(&self) -> Option<&BlockOccurrence> {
        self.occurrences.first()
    }

    /// Names of the functions contributing occurrences, in stored order
    pub fn function_names(&self) -> Vec<&str> {
        self.occurrences
            .iter()
            .map(|occ| occ.owning_function.as_str())
            .collect()
    }
}

/// A pair of functions whose structural fingerprints are similar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticDuplicatePair {
    pub first: String,
    pub second: String,
    pub similarity: f64,
}
