//! Flow-insensitive free-variable analysis.
//!
//! A name written anywhere in the block is considered block-local, even if a
//! read appears before the write. This never detects read-before-write
//! mistakes; it only enumerates a safe superset of the parameters an
//! extracted helper needs. Builtins read inside the block (e.g. `print`)
//! count as free like any other name.

use crate::core::ast::Statement;
use std::collections::BTreeSet;

/// Names read somewhere in `statements` but written nowhere in them
pub fn free_variables(statements: &[Statement]) -> BTreeSet<String> {
    let mut reads = BTreeSet::new();
    let mut writes = BTreeSet::new();
    for stmt in statements {
        reads.extend(stmt.reads.iter().cloned());
        writes.extend(stmt.writes.iter().cloned());
    }
    &reads - &writes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::parse_module;
    use indoc::indoc;

    fn free_of(source: &str, function: &str) -> BTreeSet<String> {
        let tree = parse_module(source).unwrap();
        free_variables(&tree.function(function).unwrap().body)
    }

    #[test]
    fn locally_written_names_are_excluded() {
        let free = free_of("def f(a, b):\n    x = a + b\n    return x\n", "f");
        assert_eq!(
            free,
            BTreeSet::from(["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn read_before_write_still_counts_as_local() {
        // flow-insensitive: the later write to y removes it even though the
        // first statement reads it
        let free = free_of("def f(y):\n    z = y + 1\n    y = 0\n    return z\n", "f");
        assert_eq!(free, BTreeSet::new());
    }

    #[test]
    fn called_names_are_free() {
        let source = indoc! {"
            def f(a, b):
                total = a + b
                print(total)
        "};
        let free = free_of(source, "f");
        assert_eq!(
            free,
            BTreeSet::from(["a".to_string(), "b".to_string(), "print".to_string()])
        );
    }

    #[test]
    fn loop_targets_are_local() {
        let source = indoc! {"
            def f(items):
                for item in items:
                    emit(item)
        "};
        let free = free_of(source, "f");
        assert_eq!(
            free,
            BTreeSet::from(["emit".to_string(), "items".to_string()])
        );
    }
}
