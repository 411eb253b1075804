//! Size-based smell detectors: long methods and long parameter lists.
//!
//! Both walk the tree read-only and report findings in declaration order.

use crate::core::ast::SourceTree;
use crate::core::errors::{Error, Result};
use crate::core::{Finding, SmellKind};

pub const DEFAULT_LONG_METHOD_LINES: usize = 15;
pub const DEFAULT_MAX_PARAMETERS: usize = 3;

/// Report every function whose span contains more than `threshold` non-empty
/// physical lines. Counts source lines, not body statements, so multi-line
/// and nested statements count each line they occupy.
pub fn detect_long_methods(tree: &SourceTree, threshold: usize) -> Result<Vec<Finding>> {
    let lines: Vec<&str> = tree.source.lines().collect();
    let mut findings = Vec::new();

    for func in tree.functions() {
        let (start, end) = func.line_span.ok_or_else(|| Error::MissingSpan {
            function: func.name.clone(),
        })?;
        let first = (start - 1).min(lines.len());
        let last = end.min(lines.len());
        let count = lines[first..last]
            .iter()
            .filter(|line| !line.trim().is_empty())
            .count();

        if count > threshold {
            findings.push(Finding {
                kind: SmellKind::LongMethod,
                subject: func.name.clone(),
                metric: count,
                detail: format!(
                    "Function '{}' has {} non-empty lines (threshold: {})",
                    func.name, count, threshold
                ),
            });
        }
    }

    Ok(findings)
}

/// Report every function with more than `threshold` parameters
pub fn detect_long_parameter_list(tree: &SourceTree, threshold: usize) -> Vec<Finding> {
    tree.functions()
        .filter(|func| func.parameters.len() > threshold)
        .map(|func| Finding {
            kind: SmellKind::LongParameterList,
            subject: func.name.clone(),
            metric: func.parameters.len(),
            detail: format!(
                "Function '{}' has {} parameters (threshold: {})",
                func.name,
                func.parameters.len(),
                threshold
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::parse_module;
    use indoc::indoc;

    #[test]
    fn long_method_counts_non_empty_lines_exactly() {
        let source = indoc! {"
            def busy():
                a = 1
                b = 2

                c = 3
                return a + b + c

            def tiny():
                return 0
        "};
        let tree = parse_module(source).unwrap();
        let findings = detect_long_methods(&tree, 4).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].subject, "busy");
        // signature plus four statements; the blank line does not count
        assert_eq!(findings[0].metric, 5);
    }

    #[test]
    fn long_method_respects_threshold_boundary() {
        let source = "def edge():\n    a = 1\n    return a\n";
        let tree = parse_module(source).unwrap();
        // exactly 3 non-empty lines is not over a threshold of 3
        assert!(detect_long_methods(&tree, 3).unwrap().is_empty());
        assert_eq!(detect_long_methods(&tree, 2).unwrap().len(), 1);
    }

    #[test]
    fn long_method_requires_positional_metadata() {
        let source = "def f():\n    return 1\n";
        let mut tree = parse_module(source).unwrap();
        if let Some(func) = tree.function_mut("f") {
            func.line_span = None;
        }
        let err = detect_long_methods(&tree, 15).unwrap_err();
        assert!(matches!(err, Error::MissingSpan { .. }));
    }

    #[test]
    fn parameter_list_metric_equals_arity() {
        let source = indoc! {"
            def wide(a, b, c, d):
                return a

            def narrow(a, b, c):
                return a
        "};
        let tree = parse_module(source).unwrap();
        let findings = detect_long_parameter_list(&tree, 3);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].subject, "wide");
        assert_eq!(findings[0].metric, 4);
    }
}
