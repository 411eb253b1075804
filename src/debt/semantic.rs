//! Structural duplicate detection over whole functions.
//!
//! Each function is reduced to a sequence of structural labels (names and
//! literals erased) during lowering; pairs whose label sequences are similar
//! enough are reported. This catches functions that do the same thing with
//! different variable names, which the exact canonical-body comparison
//! misses. Read-only: these pairs never feed the rewriter.

use crate::core::ast::{SourceTree, StructuralLabel};
use crate::core::SemanticDuplicatePair;

pub const DEFAULT_SEMANTIC_THRESHOLD: f64 = 0.80;

/// Compare every pair of top-level functions once and report the pairs whose
/// structural similarity exceeds `threshold`
pub fn detect_semantic_duplicates(
    tree: &SourceTree,
    threshold: f64,
) -> Vec<SemanticDuplicatePair> {
    let functions: Vec<_> = tree.functions().collect();
    let mut pairs = Vec::new();

    for i in 0..functions.len() {
        for j in i + 1..functions.len() {
            let similarity =
                sequence_similarity(&functions[i].structure, &functions[j].structure);
            if similarity > threshold {
                pairs.push(SemanticDuplicatePair {
                    first: functions[i].name.clone(),
                    second: functions[j].name.clone(),
                    similarity,
                });
            }
        }
    }

    pairs
}

/// Matching ratio of two label sequences: `2 * lcs / (len_a + len_b)`,
/// 1.0 when both are empty
pub fn sequence_similarity(a: &[StructuralLabel], b: &[StructuralLabel]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let matches = longest_common_subsequence(a, b);
    2.0 * matches as f64 / (a.len() + b.len()) as f64
}

fn longest_common_subsequence(a: &[StructuralLabel], b: &[StructuralLabel]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &label_a in a {
        let mut diagonal = 0;
        for (j, &label_b) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if label_a == label_b {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::parse_module;
    use indoc::indoc;

    #[test]
    fn renamed_functions_with_identical_structure_are_flagged() {
        let source = indoc! {"
            def total_price(items):
                result = 0
                for item in items:
                    result = result + item
                return result

            def sum_weights(weights):
                acc = 0
                for w in weights:
                    acc = acc + w
                return acc
        "};
        let tree = parse_module(source).unwrap();
        let pairs = detect_semantic_duplicates(&tree, DEFAULT_SEMANTIC_THRESHOLD);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].first, "total_price");
        assert_eq!(pairs[0].second, "sum_weights");
        assert!(pairs[0].similarity > 0.99);
    }

    #[test]
    fn structurally_different_functions_are_not_flagged() {
        let source = indoc! {"
            def looping(items):
                total = 0
                for item in items:
                    total = total + item
                return total

            def constant():
                return 42
        "};
        let tree = parse_module(source).unwrap();
        assert!(detect_semantic_duplicates(&tree, DEFAULT_SEMANTIC_THRESHOLD).is_empty());
    }

    #[test]
    fn similarity_is_symmetric_in_sequence_order() {
        let a = vec![
            StructuralLabel::Function,
            StructuralLabel::Assign,
            StructuralLabel::Loop,
        ];
        let b = vec![StructuralLabel::Function, StructuralLabel::Assign];
        assert_eq!(sequence_similarity(&a, &b), sequence_similarity(&b, &a));
        assert_eq!(sequence_similarity(&a, &b), 0.8);
    }
}
