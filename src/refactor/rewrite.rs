//! Tree rewriting: collapse duplicate functions onto their primaries and
//! extract duplicate blocks into shared helpers.
//!
//! Both entry points consume the tree and hand back the mutated one. On
//! error the partially mutated tree is dropped with the `Result`, so a
//! failed rewrite can never leak back into the pipeline.

use crate::core::ast::{Declaration, FunctionDecl, SourceTree, Statement};
use crate::core::errors::{Error, Result};
use crate::core::{DuplicateBlockGroup, DuplicateFunctionPair};
use crate::refactor::free_vars::free_variables;
use crate::refactor::naming::{resolve_helper_name, NamingOracle};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Replace each duplicate function's body with a single statement that
/// forwards its own parameters to the primary and returns the result. Names
/// and parameter lists are untouched; only bodies change.
pub fn refactor_duplicate_functions(
    mut tree: SourceTree,
    pairs: &[DuplicateFunctionPair],
) -> Result<SourceTree> {
    let mut forward: HashMap<&str, &str> = HashMap::new();
    for pair in pairs {
        if tree.function(&pair.primary).is_none() {
            return Err(Error::Rewrite {
                name: pair.primary.clone(),
            });
        }
        forward.insert(pair.duplicate.as_str(), pair.primary.as_str());
    }

    for decl in &mut tree.declarations {
        let Declaration::Function(func) = decl else {
            continue;
        };
        if let Some(primary) = forward.get(func.name.as_str()) {
            debug!("forwarding duplicate '{}' to '{}'", func.name, primary);
            func.body = vec![Statement::return_call(primary, &func.parameters)];
            func.line_span = None;
        }
    }

    Ok(tree)
}

/// Extract each duplicate block group into a new helper function and replace
/// every occurrence with a call to it.
///
/// Groups are processed in detection order and occurrences in stored order.
/// Each occurrence touches only its own function's body and is visited
/// exactly once, so the indices recorded at detection time stay valid.
pub fn refactor_duplicate_blocks(
    mut tree: SourceTree,
    groups: &[DuplicateBlockGroup],
    window_size: usize,
    oracle: &dyn NamingOracle,
) -> Result<SourceTree> {
    let mut session_names: HashSet<String> = HashSet::new();

    for group in groups {
        let Some(representative) = group.representative() else {
            continue;
        };

        let rep_statements = clone_block(&tree, representative, window_size)?;
        let parameters: Vec<String> = free_variables(&rep_statements).into_iter().collect();

        let helper_name = resolve_helper_name(oracle, &representative.text, &session_names);
        session_names.insert(helper_name.clone());
        debug!(
            "extracting block of {} statements into '{}' ({} occurrences)",
            window_size,
            helper_name,
            group.occurrences.len()
        );

        let helper_body = with_return_contract(rep_statements);

        for occurrence in &group.occurrences {
            let func = tree
                .function_mut(&occurrence.owning_function)
                .ok_or_else(|| Error::Rewrite {
                    name: occurrence.owning_function.clone(),
                })?;

            let replacement = match func
                .body
                .get(occurrence.start_index)
                .and_then(Statement::assign_target)
            {
                Some(target) => Statement::assign_call(target, &helper_name, &parameters),
                None => Statement::expr_call(&helper_name, &parameters),
            };

            let start = occurrence.start_index.min(func.body.len());
            let end = (occurrence.start_index + window_size).min(func.body.len());
            func.body.splice(start..end, std::iter::once(replacement));
            func.line_span = None;
        }

        tree.push_function(FunctionDecl::synthesized(
            helper_name,
            parameters,
            helper_body,
        ));
    }

    Ok(tree)
}

fn clone_block(
    tree: &SourceTree,
    occurrence: &crate::core::BlockOccurrence,
    window_size: usize,
) -> Result<Vec<Statement>> {
    let func = tree
        .function(&occurrence.owning_function)
        .ok_or_else(|| Error::Rewrite {
            name: occurrence.owning_function.clone(),
        })?;
    let end = (occurrence.start_index + window_size).min(func.body.len());
    Ok(func
        .body
        .get(occurrence.start_index..end)
        .map(<[Statement]>::to_vec)
        .unwrap_or_default())
}

/// Append a synthesized return when the block does not already end in one:
/// the first statement's assignment target when it has one, `None` otherwise
fn with_return_contract(mut body: Vec<Statement>) -> Vec<Statement> {
    if body.last().is_some_and(Statement::is_return) {
        return body;
    }
    let target = body
        .first()
        .and_then(|stmt| stmt.assign_target().map(str::to_string));
    body.push(match target {
        Some(name) => Statement::return_name(&name),
        None => Statement::return_none(),
    });
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::{parse_module, serialize};
    use crate::debt::duplication::{detect_duplicate_blocks, detect_duplicate_functions};
    use crate::refactor::naming::{FnOracle, NullOracle};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicate_function_body_becomes_forwarding_return() {
        let source = indoc! {"
            def add_one(n):
                return n + 1

            def plus_one(n):
                return n + 1
        "};
        let tree = parse_module(source).unwrap();
        let pairs = detect_duplicate_functions(&tree);
        let tree = refactor_duplicate_functions(tree, &pairs).unwrap();

        let duplicate = tree.function("plus_one").unwrap();
        assert_eq!(duplicate.parameters, vec!["n"]);
        assert_eq!(duplicate.body.len(), 1);
        assert_eq!(duplicate.body[0].text, "return add_one(n)");
        // the primary is untouched
        assert_eq!(tree.function("add_one").unwrap().body[0].text, "return n + 1");
    }

    #[test]
    fn missing_primary_is_a_rewrite_error() {
        let tree = parse_module("def f(n):\n    return n\n").unwrap();
        let pairs = vec![DuplicateFunctionPair {
            primary: "vanished".to_string(),
            duplicate: "f".to_string(),
        }];
        let err = refactor_duplicate_functions(tree, &pairs).unwrap_err();
        assert!(matches!(err, Error::Rewrite { name } if name == "vanished"));
    }

    #[test]
    fn extracted_block_replaces_every_occurrence() {
        let source = indoc! {"
            def first(a, b):
                total = a + b
                print(total)

            def second(a, b):
                total = a + b
                print(total)
        "};
        let tree = parse_module(source).unwrap();
        let groups = detect_duplicate_blocks(&tree, 2, 0.75);
        let tree = refactor_duplicate_blocks(tree, &groups, 2, &NullOracle).unwrap();

        let helper = tree.function("common_block").unwrap();
        assert_eq!(helper.parameters, vec!["a", "b", "print"]);
        assert_eq!(helper.body.len(), 3);
        assert_eq!(helper.body[2].text, "return total");

        for name in ["first", "second"] {
            let func = tree.function(name).unwrap();
            assert_eq!(func.body.len(), 1);
            assert_eq!(func.body[0].text, "total = common_block(a, b, print)");
        }
    }

    #[test]
    fn non_assignment_blocks_get_bare_calls_and_return_none() {
        let source = indoc! {"
            def first(x):
                print(x)
                print(x + 1)

            def second(x):
                print(x)
                print(x + 1)
        "};
        let tree = parse_module(source).unwrap();
        let groups = detect_duplicate_blocks(&tree, 2, 0.75);
        let tree = refactor_duplicate_blocks(tree, &groups, 2, &NullOracle).unwrap();

        let helper = tree.function("common_block").unwrap();
        assert_eq!(helper.body.last().unwrap().text, "return None");
        assert_eq!(
            tree.function("first").unwrap().body[0].text,
            "common_block(print, x)"
        );
    }

    #[test]
    fn blocks_ending_in_return_get_no_synthesized_return() {
        let body = vec![
            Statement::assign_call("x", "load", &[]),
            Statement::return_name("x"),
        ];
        let contracted = with_return_contract(body);
        assert_eq!(contracted.len(), 2);
    }

    #[test]
    fn oracle_suggestions_name_the_helper() {
        let source = indoc! {"
            def first(a, b):
                total = a + b
                print(total)

            def second(a, b):
                total = a + b
                print(total)
        "};
        let tree = parse_module(source).unwrap();
        let groups = detect_duplicate_blocks(&tree, 2, 0.75);
        let oracle = FnOracle(|_: &str| Some("sum_and_report".to_string()));
        let tree = refactor_duplicate_blocks(tree, &groups, 2, &oracle).unwrap();
        assert!(tree.function("sum_and_report").is_some());
    }

    #[test]
    fn rewritten_tree_serializes_to_valid_source() {
        let source = indoc! {"
            def first(a, b):
                total = a + b
                print(total)

            def second(a, b):
                total = a + b
                print(total)
        "};
        let tree = parse_module(source).unwrap();
        let groups = detect_duplicate_blocks(&tree, 2, 0.75);
        let tree = refactor_duplicate_blocks(tree, &groups, 2, &NullOracle).unwrap();
        let rendered = serialize(&tree).unwrap();
        assert!(parse_module(&rendered).is_ok());
        assert!(rendered.contains("def common_block(a, b, print):"));
    }
}
