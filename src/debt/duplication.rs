//! Duplicate detection: exact canonical-body matching for whole functions,
//! and windowed Jaccard matching for statement blocks across functions.

use crate::core::ast::{FunctionDecl, SourceTree, Statement};
use crate::core::{BlockOccurrence, DuplicateBlockGroup, DuplicateFunctionPair};
use std::collections::{BTreeSet, HashMap, HashSet};

pub const DEFAULT_WINDOW_SIZE: usize = 2;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.75;

/// A function body rendered one trimmed logical line at a time, blank lines
/// dropped and the signature excluded. Exact equality of this form is the
/// function-level duplicate criterion.
pub fn canonical_body(func: &FunctionDecl) -> String {
    func.body
        .iter()
        .flat_map(|stmt| stmt.text.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Report pairs of functions with identical canonical bodies. The first
/// function declared with a given body is the primary of every later match;
/// no fuzzy comparison happens at this level. Functions with empty bodies
/// all share the empty canonical form and are reported as mutual duplicates.
pub fn detect_duplicate_functions(tree: &SourceTree) -> Vec<DuplicateFunctionPair> {
    let mut first_seen: HashMap<String, String> = HashMap::new();
    let mut pairs = Vec::new();

    for func in tree.functions() {
        let canonical = canonical_body(func);
        match first_seen.get(&canonical) {
            Some(primary) => pairs.push(DuplicateFunctionPair {
                primary: primary.clone(),
                duplicate: func.name.clone(),
            }),
            None => {
                first_seen.insert(canonical, func.name.clone());
            }
        }
    }

    pairs
}

/// Jaccard similarity of two token sets; 0 when the union is empty
pub fn jaccard_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Slide a `window_size` window over every function body and group windows
/// from different functions whose token sets reach `similarity_threshold`.
///
/// Grouping is greedy and order-dependent: windows are visited in
/// declaration-then-start order, each unused window seeds a group, and later
/// unused windows join if they are similar to the seed (not to the other
/// members). A window similar to a member but not to the seed stays out, so
/// grouping is deliberately not transitive. A function contributes at most
/// one occurrence per group.
pub fn detect_duplicate_blocks(
    tree: &SourceTree,
    window_size: usize,
    similarity_threshold: f64,
) -> Vec<DuplicateBlockGroup> {
    let occurrences = enumerate_windows(tree, window_size);

    let mut groups = Vec::new();
    let mut used = vec![false; occurrences.len()];

    for seed in 0..occurrences.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        let mut members = vec![seed];
        let mut owners: HashSet<&str> =
            HashSet::from([occurrences[seed].owning_function.as_str()]);

        for candidate in seed + 1..occurrences.len() {
            if used[candidate] || owners.contains(occurrences[candidate].owning_function.as_str())
            {
                continue;
            }
            let similarity =
                jaccard_similarity(&occurrences[seed].tokens, &occurrences[candidate].tokens);
            if similarity >= similarity_threshold {
                owners.insert(occurrences[candidate].owning_function.as_str());
                members.push(candidate);
                used[candidate] = true;
            }
        }

        if members.len() > 1 {
            groups.push(DuplicateBlockGroup {
                occurrences: members.iter().map(|&i| occurrences[i].clone()).collect(),
            });
        }
    }

    groups
}

fn enumerate_windows(tree: &SourceTree, window_size: usize) -> Vec<BlockOccurrence> {
    let mut occurrences = Vec::new();
    if window_size == 0 {
        return occurrences;
    }

    for func in tree.functions() {
        if func.body.len() < window_size {
            continue;
        }
        for start in 0..=func.body.len() - window_size {
            let text = window_text(&func.body[start..start + window_size]);
            occurrences.push(BlockOccurrence {
                owning_function: func.name.clone(),
                start_index: start,
                tokens: tokenize(&text),
                text,
            });
        }
    }

    occurrences
}

fn window_text(statements: &[Statement]) -> String {
    statements
        .iter()
        .map(|stmt| stmt.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn tokenize(text: &str) -> BTreeSet<String> {
    text.split_whitespace().map(str::to_string).collect()
}
