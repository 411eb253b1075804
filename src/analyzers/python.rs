//! Python front end: parses source text into the core tree model and
//! renders trees back to source.
//!
//! Lowering keeps, per statement, the dedented source text (what the
//! serializer re-emits), the identifier-usage sets, and a structural label
//! sequence per function. Parsing is the only place the concrete Python
//! grammar is visible; everything downstream works on the core model.

use crate::core::ast::{
    Declaration, FunctionDecl, RawDecl, SourceTree, Statement, StatementKind, StructuralLabel,
};
use crate::core::errors::{Error, Result};
use rustpython_parser::ast::{self, Ranged};
use rustpython_parser::{parse, Mode};
use std::collections::BTreeSet;

/// Parse UTF-8 Python source into a [`SourceTree`]
pub fn parse_module(source: &str) -> Result<SourceTree> {
    let index = LineIndex::new(source);
    let module = parse(source, Mode::Module, "<input>").map_err(|err| {
        let offset = u32::from(err.offset) as usize;
        Error::parse(
            index.line_of(offset),
            index.column_of(offset),
            err.error.to_string(),
        )
    })?;

    let ast::Mod::Module(module) = module else {
        return Err(Error::parse(1, 0, "expected a module"));
    };

    let mut declarations = Vec::new();
    for stmt in &module.body {
        match stmt {
            ast::Stmt::FunctionDef(func_def) => {
                declarations.push(Declaration::Function(lower_function(
                    func_def, stmt, source, &index,
                )));
            }
            other => declarations.push(Declaration::Other(RawDecl {
                text: statement_text(source, &index, other),
            })),
        }
    }

    Ok(SourceTree {
        declarations,
        source: source.to_string(),
    })
}

/// Render a tree back to source text, verifying that the result parses.
/// A tree that fails this check must be treated as not rewritten.
pub fn serialize(tree: &SourceTree) -> Result<String> {
    let rendered = render_module(tree);
    parse(&rendered, Mode::Module, "<rendered>")
        .map_err(|err| Error::Serialization(format!("rendered output does not parse: {err}")))?;
    Ok(rendered)
}

/// Render a tree to source text without the validity check
pub fn render_module(tree: &SourceTree) -> String {
    let mut out = String::new();
    for (i, decl) in tree.declarations.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match decl {
            Declaration::Function(func) => render_function(func, &mut out),
            Declaration::Other(raw) => {
                out.push_str(&raw.text);
                out.push('\n');
            }
        }
    }
    out
}

fn render_function(func: &FunctionDecl, out: &mut String) {
    match &func.header {
        Some(header) => {
            out.push_str(header);
            out.push('\n');
        }
        None => {
            out.push_str("def ");
            out.push_str(&func.name);
            out.push('(');
            out.push_str(&func.parameters.join(", "));
            out.push_str("):\n");
        }
    }

    if func.body.is_empty() {
        out.push_str("    pass\n");
        return;
    }
    for stmt in &func.body {
        for line in stmt.text.lines() {
            if line.trim().is_empty() {
                out.push('\n');
            } else {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }
}

fn lower_function(
    func_def: &ast::StmtFunctionDef,
    stmt: &ast::Stmt,
    source: &str,
    index: &LineIndex,
) -> FunctionDecl {
    let range = stmt.range();
    let start_line = index.line_of(u32::from(range.start()) as usize);
    let end_line = index.line_of((u32::from(range.end()) as usize).saturating_sub(1));

    let parameters = func_def
        .args
        .posonlyargs
        .iter()
        .chain(func_def.args.args.iter())
        .map(|arg| arg.def.arg.to_string())
        .collect();

    let body = func_def
        .body
        .iter()
        .map(|s| lower_statement(s, source, index))
        .collect();

    let mut structure = vec![StructuralLabel::Function];
    for s in &func_def.body {
        collect_structure_from_stmt(s, &mut structure);
    }

    FunctionDecl {
        name: func_def.name.to_string(),
        parameters,
        body,
        header: function_header(func_def, stmt, source, index),
        line_span: Some((start_line, end_line)),
        structure,
    }
}

/// The verbatim decorator and signature lines, from the first decorator (or
/// the `def` line) through the line the signature's colon falls on. `None`
/// when the header cannot be isolated, e.g. a one-line `def f(): return 1`;
/// the serializer then falls back to the bare synthesized form.
fn function_header(
    func_def: &ast::StmtFunctionDef,
    stmt: &ast::Stmt,
    source: &str,
    index: &LineIndex,
) -> Option<String> {
    let def_start = u32::from(stmt.range().start()) as usize;
    let start = func_def
        .decorator_list
        .iter()
        .map(|dec| u32::from(dec.range().start()) as usize)
        .min()
        .map_or(def_start, |dec_start| dec_start.min(def_start));
    let first_line = index.line_of(start);

    let body = func_def.body.first()?;
    let body_line = index.line_of(u32::from(body.range().start()) as usize);
    if body_line <= first_line {
        return None;
    }

    let text = source
        .lines()
        .skip(first_line - 1)
        .take(body_line - first_line)
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed = text.trim_end();
    trimmed.ends_with(':').then(|| trimmed.to_string())
}

fn lower_statement(stmt: &ast::Stmt, source: &str, index: &LineIndex) -> Statement {
    let mut reads = BTreeSet::new();
    let mut writes = BTreeSet::new();
    collect_usage_from_stmt(stmt, &mut reads, &mut writes);

    Statement {
        kind: classify_statement(stmt),
        text: statement_text(source, index, stmt),
        reads,
        writes,
    }
}

fn classify_statement(stmt: &ast::Stmt) -> StatementKind {
    match stmt {
        ast::Stmt::Assign(assign) => {
            let target = match assign.targets.as_slice() {
                [ast::Expr::Name(name)] => Some(name.id.to_string()),
                _ => None,
            };
            StatementKind::Assign { target }
        }
        ast::Stmt::Expr(expr) if matches!(expr.value.as_ref(), ast::Expr::Call(_)) => {
            StatementKind::Call
        }
        ast::Stmt::If(_) => StatementKind::Conditional,
        ast::Stmt::While(_) | ast::Stmt::For(_) | ast::Stmt::AsyncFor(_) => StatementKind::Loop,
        ast::Stmt::Return(_) => StatementKind::Return,
        _ => StatementKind::Other,
    }
}

/// The statement's source text with the statement's own indentation removed,
/// so nested lines keep only their relative indent
fn statement_text(source: &str, index: &LineIndex, stmt: &ast::Stmt) -> String {
    let range = stmt.range();
    let start = u32::from(range.start()) as usize;
    let end = u32::from(range.end()) as usize;
    let snippet = &source[start..end];
    let indent = index.column_of(start);

    let mut lines = snippet.lines();
    let mut text = lines.next().unwrap_or("").to_string();
    for line in lines {
        text.push('\n');
        text.push_str(dedent_line(line, indent));
    }
    text
}

fn dedent_line(line: &str, indent: usize) -> &str {
    let cut = line
        .bytes()
        .take(indent)
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    &line[cut..]
}

// ----------------------------------------------------------------
// Identifier usage
// ----------------------------------------------------------------

fn collect_usage_from_stmt(
    stmt: &ast::Stmt,
    reads: &mut BTreeSet<String>,
    writes: &mut BTreeSet<String>,
) {
    match stmt {
        ast::Stmt::FunctionDef(func) => {
            for s in &func.body {
                collect_usage_from_stmt(s, reads, writes);
            }
        }
        ast::Stmt::AsyncFunctionDef(func) => {
            for s in &func.body {
                collect_usage_from_stmt(s, reads, writes);
            }
        }
        ast::Stmt::ClassDef(class) => {
            for s in &class.body {
                collect_usage_from_stmt(s, reads, writes);
            }
        }
        ast::Stmt::Return(ret) => {
            if let Some(value) = &ret.value {
                collect_usage_from_expr(value, reads, writes);
            }
        }
        ast::Stmt::Delete(delete) => {
            for target in &delete.targets {
                collect_usage_from_expr(target, reads, writes);
            }
        }
        ast::Stmt::Assign(assign) => {
            collect_usage_from_expr(&assign.value, reads, writes);
            for target in &assign.targets {
                collect_usage_from_expr(target, reads, writes);
            }
        }
        ast::Stmt::AugAssign(aug) => {
            collect_usage_from_expr(&aug.target, reads, writes);
            collect_usage_from_expr(&aug.value, reads, writes);
        }
        ast::Stmt::AnnAssign(ann) => {
            collect_usage_from_expr(&ann.target, reads, writes);
            collect_usage_from_expr(&ann.annotation, reads, writes);
            if let Some(value) = &ann.value {
                collect_usage_from_expr(value, reads, writes);
            }
        }
        ast::Stmt::For(for_stmt) => {
            collect_usage_from_expr(&for_stmt.target, reads, writes);
            collect_usage_from_expr(&for_stmt.iter, reads, writes);
            for s in for_stmt.body.iter().chain(&for_stmt.orelse) {
                collect_usage_from_stmt(s, reads, writes);
            }
        }
        ast::Stmt::AsyncFor(for_stmt) => {
            collect_usage_from_expr(&for_stmt.target, reads, writes);
            collect_usage_from_expr(&for_stmt.iter, reads, writes);
            for s in for_stmt.body.iter().chain(&for_stmt.orelse) {
                collect_usage_from_stmt(s, reads, writes);
            }
        }
        ast::Stmt::While(while_stmt) => {
            collect_usage_from_expr(&while_stmt.test, reads, writes);
            for s in while_stmt.body.iter().chain(&while_stmt.orelse) {
                collect_usage_from_stmt(s, reads, writes);
            }
        }
        ast::Stmt::If(if_stmt) => {
            collect_usage_from_expr(&if_stmt.test, reads, writes);
            for s in if_stmt.body.iter().chain(&if_stmt.orelse) {
                collect_usage_from_stmt(s, reads, writes);
            }
        }
        ast::Stmt::With(with_stmt) => {
            for item in &with_stmt.items {
                collect_usage_from_expr(&item.context_expr, reads, writes);
                if let Some(vars) = &item.optional_vars {
                    collect_usage_from_expr(vars, reads, writes);
                }
            }
            for s in &with_stmt.body {
                collect_usage_from_stmt(s, reads, writes);
            }
        }
        ast::Stmt::AsyncWith(with_stmt) => {
            for item in &with_stmt.items {
                collect_usage_from_expr(&item.context_expr, reads, writes);
                if let Some(vars) = &item.optional_vars {
                    collect_usage_from_expr(vars, reads, writes);
                }
            }
            for s in &with_stmt.body {
                collect_usage_from_stmt(s, reads, writes);
            }
        }
        ast::Stmt::Match(match_stmt) => {
            collect_usage_from_expr(&match_stmt.subject, reads, writes);
            for case in &match_stmt.cases {
                if let Some(guard) = &case.guard {
                    collect_usage_from_expr(guard, reads, writes);
                }
                for s in &case.body {
                    collect_usage_from_stmt(s, reads, writes);
                }
            }
        }
        ast::Stmt::Raise(raise_stmt) => {
            if let Some(exc) = &raise_stmt.exc {
                collect_usage_from_expr(exc, reads, writes);
            }
            if let Some(cause) = &raise_stmt.cause {
                collect_usage_from_expr(cause, reads, writes);
            }
        }
        ast::Stmt::Try(try_stmt) => {
            for s in &try_stmt.body {
                collect_usage_from_stmt(s, reads, writes);
            }
            for handler in &try_stmt.handlers {
                let ast::ExceptHandler::ExceptHandler(h) = handler;
                if let Some(type_) = &h.type_ {
                    collect_usage_from_expr(type_, reads, writes);
                }
                for s in &h.body {
                    collect_usage_from_stmt(s, reads, writes);
                }
            }
            for s in try_stmt.orelse.iter().chain(&try_stmt.finalbody) {
                collect_usage_from_stmt(s, reads, writes);
            }
        }
        ast::Stmt::Assert(assert_stmt) => {
            collect_usage_from_expr(&assert_stmt.test, reads, writes);
            if let Some(msg) = &assert_stmt.msg {
                collect_usage_from_expr(msg, reads, writes);
            }
        }
        ast::Stmt::Expr(expr_stmt) => {
            collect_usage_from_expr(&expr_stmt.value, reads, writes);
        }
        // Import, Global, Nonlocal, Pass, Break, Continue carry no name
        // references the analysis classifies
        _ => {}
    }
}

fn collect_usage_from_expr(
    expr: &ast::Expr,
    reads: &mut BTreeSet<String>,
    writes: &mut BTreeSet<String>,
) {
    match expr {
        ast::Expr::Name(name) => match name.ctx {
            ast::ExprContext::Load => {
                reads.insert(name.id.to_string());
            }
            ast::ExprContext::Store => {
                writes.insert(name.id.to_string());
            }
            ast::ExprContext::Del => {}
        },
        ast::Expr::BoolOp(op) => {
            for value in &op.values {
                collect_usage_from_expr(value, reads, writes);
            }
        }
        ast::Expr::NamedExpr(named) => {
            collect_usage_from_expr(&named.target, reads, writes);
            collect_usage_from_expr(&named.value, reads, writes);
        }
        ast::Expr::BinOp(bin) => {
            collect_usage_from_expr(&bin.left, reads, writes);
            collect_usage_from_expr(&bin.right, reads, writes);
        }
        ast::Expr::UnaryOp(unary) => {
            collect_usage_from_expr(&unary.operand, reads, writes);
        }
        ast::Expr::Lambda(lambda) => {
            collect_usage_from_expr(&lambda.body, reads, writes);
        }
        ast::Expr::IfExp(if_exp) => {
            collect_usage_from_expr(&if_exp.test, reads, writes);
            collect_usage_from_expr(&if_exp.body, reads, writes);
            collect_usage_from_expr(&if_exp.orelse, reads, writes);
        }
        ast::Expr::Dict(dict) => {
            for key in dict.keys.iter().flatten() {
                collect_usage_from_expr(key, reads, writes);
            }
            for value in &dict.values {
                collect_usage_from_expr(value, reads, writes);
            }
        }
        ast::Expr::Set(set) => {
            for elt in &set.elts {
                collect_usage_from_expr(elt, reads, writes);
            }
        }
        ast::Expr::ListComp(comp) => {
            collect_usage_from_expr(&comp.elt, reads, writes);
            for gen in &comp.generators {
                collect_usage_from_comprehension(gen, reads, writes);
            }
        }
        ast::Expr::SetComp(comp) => {
            collect_usage_from_expr(&comp.elt, reads, writes);
            for gen in &comp.generators {
                collect_usage_from_comprehension(gen, reads, writes);
            }
        }
        ast::Expr::DictComp(comp) => {
            collect_usage_from_expr(&comp.key, reads, writes);
            collect_usage_from_expr(&comp.value, reads, writes);
            for gen in &comp.generators {
                collect_usage_from_comprehension(gen, reads, writes);
            }
        }
        ast::Expr::GeneratorExp(comp) => {
            collect_usage_from_expr(&comp.elt, reads, writes);
            for gen in &comp.generators {
                collect_usage_from_comprehension(gen, reads, writes);
            }
        }
        ast::Expr::Await(await_expr) => {
            collect_usage_from_expr(&await_expr.value, reads, writes);
        }
        ast::Expr::Yield(yield_expr) => {
            if let Some(value) = &yield_expr.value {
                collect_usage_from_expr(value, reads, writes);
            }
        }
        ast::Expr::YieldFrom(yield_from) => {
            collect_usage_from_expr(&yield_from.value, reads, writes);
        }
        ast::Expr::Compare(compare) => {
            collect_usage_from_expr(&compare.left, reads, writes);
            for comparator in &compare.comparators {
                collect_usage_from_expr(comparator, reads, writes);
            }
        }
        ast::Expr::Call(call) => {
            collect_usage_from_expr(&call.func, reads, writes);
            for arg in &call.args {
                collect_usage_from_expr(arg, reads, writes);
            }
            for keyword in &call.keywords {
                collect_usage_from_expr(&keyword.value, reads, writes);
            }
        }
        ast::Expr::FormattedValue(formatted) => {
            collect_usage_from_expr(&formatted.value, reads, writes);
        }
        ast::Expr::JoinedStr(joined) => {
            for value in &joined.values {
                collect_usage_from_expr(value, reads, writes);
            }
        }
        ast::Expr::Attribute(attr) => {
            collect_usage_from_expr(&attr.value, reads, writes);
        }
        ast::Expr::Subscript(sub) => {
            collect_usage_from_expr(&sub.value, reads, writes);
            collect_usage_from_expr(&sub.slice, reads, writes);
        }
        ast::Expr::Starred(starred) => {
            collect_usage_from_expr(&starred.value, reads, writes);
        }
        ast::Expr::List(list) => {
            for elt in &list.elts {
                collect_usage_from_expr(elt, reads, writes);
            }
        }
        ast::Expr::Tuple(tuple) => {
            for elt in &tuple.elts {
                collect_usage_from_expr(elt, reads, writes);
            }
        }
        ast::Expr::Slice(slice) => {
            for bound in [&slice.lower, &slice.upper, &slice.step].into_iter().flatten() {
                collect_usage_from_expr(bound, reads, writes);
            }
        }
        // Constants carry no names
        _ => {}
    }
}

fn collect_usage_from_comprehension(
    gen: &ast::Comprehension,
    reads: &mut BTreeSet<String>,
    writes: &mut BTreeSet<String>,
) {
    collect_usage_from_expr(&gen.target, reads, writes);
    collect_usage_from_expr(&gen.iter, reads, writes);
    for if_clause in &gen.ifs {
        collect_usage_from_expr(if_clause, reads, writes);
    }
}

// ----------------------------------------------------------------
// Structural fingerprints
// ----------------------------------------------------------------

fn collect_structure_from_stmt(stmt: &ast::Stmt, labels: &mut Vec<StructuralLabel>) {
    match stmt {
        ast::Stmt::FunctionDef(func) => {
            labels.push(StructuralLabel::Function);
            for s in &func.body {
                collect_structure_from_stmt(s, labels);
            }
        }
        ast::Stmt::If(if_stmt) => {
            labels.push(StructuralLabel::Conditional);
            collect_structure_from_expr(&if_stmt.test, labels);
            for s in if_stmt.body.iter().chain(&if_stmt.orelse) {
                collect_structure_from_stmt(s, labels);
            }
        }
        ast::Stmt::While(while_stmt) => {
            labels.push(StructuralLabel::Loop);
            collect_structure_from_expr(&while_stmt.test, labels);
            for s in &while_stmt.body {
                collect_structure_from_stmt(s, labels);
            }
        }
        ast::Stmt::For(for_stmt) => {
            labels.push(StructuralLabel::Loop);
            collect_structure_from_expr(&for_stmt.iter, labels);
            for s in &for_stmt.body {
                collect_structure_from_stmt(s, labels);
            }
        }
        ast::Stmt::Assign(assign) => {
            labels.push(StructuralLabel::Assign);
            collect_structure_from_expr(&assign.value, labels);
        }
        ast::Stmt::Return(ret) => {
            if let Some(value) = &ret.value {
                collect_structure_from_expr(value, labels);
            }
        }
        ast::Stmt::Expr(expr_stmt) => {
            collect_structure_from_expr(&expr_stmt.value, labels);
        }
        _ => {}
    }
}

fn collect_structure_from_expr(expr: &ast::Expr, labels: &mut Vec<StructuralLabel>) {
    match expr {
        ast::Expr::BinOp(bin) => {
            labels.push(StructuralLabel::BinaryOp);
            collect_structure_from_expr(&bin.left, labels);
            collect_structure_from_expr(&bin.right, labels);
        }
        ast::Expr::Call(call) => {
            labels.push(StructuralLabel::Call);
            for arg in &call.args {
                collect_structure_from_expr(arg, labels);
            }
        }
        ast::Expr::Compare(compare) => {
            collect_structure_from_expr(&compare.left, labels);
            for comparator in &compare.comparators {
                collect_structure_from_expr(comparator, labels);
            }
        }
        _ => {}
    }
}

// ----------------------------------------------------------------
// Line index
// ----------------------------------------------------------------

/// Byte offsets of line starts, for offset-to-position lookups
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based line containing the byte offset
    fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }

    /// 0-based column of the byte offset within its line
    fn column_of(&self, offset: usize) -> usize {
        let line = self.line_of(offset);
        offset - self.line_starts[line - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_top_level_functions_with_parameters() {
        let source = indoc! {"
            def add(a, b):
                return a + b

            def shout(message):
                print(message)
        "};
        let tree = parse_module(source).unwrap();
        let names: Vec<_> = tree.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["add", "shout"]);
        assert_eq!(tree.function("add").unwrap().parameters, vec!["a", "b"]);
    }

    #[test]
    fn records_line_spans_for_parsed_functions() {
        let source = indoc! {"
            def one():
                return 1


            def two():
                x = 1
                return x
        "};
        let tree = parse_module(source).unwrap();
        assert_eq!(tree.function("one").unwrap().line_span, Some((1, 2)));
        assert_eq!(tree.function("two").unwrap().line_span, Some((5, 7)));
    }

    #[test]
    fn classifies_statement_kinds() {
        let source = indoc! {"
            def sample(items):
                total = 0
                for item in items:
                    total += item
                if total > 10:
                    print(total)
                report(total)
                return total
        "};
        let tree = parse_module(source).unwrap();
        let kinds: Vec<_> = tree
            .function("sample")
            .unwrap()
            .body
            .iter()
            .map(|s| s.kind.clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                StatementKind::Assign {
                    target: Some("total".to_string())
                },
                StatementKind::Loop,
                StatementKind::Conditional,
                StatementKind::Call,
                StatementKind::Return,
            ]
        );
    }

    #[test]
    fn statement_text_keeps_relative_indent_of_nested_lines() {
        let source = indoc! {"
            def guard(x):
                if x > 0:
                    return x
        "};
        let tree = parse_module(source).unwrap();
        let stmt = &tree.function("guard").unwrap().body[0];
        assert_eq!(stmt.text, "if x > 0:\n    return x");
    }

    #[test]
    fn tracks_reads_and_writes_through_nested_blocks() {
        let source = indoc! {"
            def tally(items, limit):
                total = 0
                for item in items:
                    if item < limit:
                        total = total + item
                return total
        "};
        let tree = parse_module(source).unwrap();
        let loop_stmt = &tree.function("tally").unwrap().body[1];
        assert!(loop_stmt.reads.contains("items"));
        assert!(loop_stmt.reads.contains("limit"));
        assert!(loop_stmt.reads.contains("total"));
        assert!(loop_stmt.writes.contains("total"));
        assert!(loop_stmt.writes.contains("item"));
    }

    #[test]
    fn parse_error_reports_location() {
        let err = parse_module("def broken(:\n    pass\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn round_trip_preserves_structure() {
        let source = indoc! {"
            import math

            def area(r):
                return math.pi * r * r

            def volume(r, h):
                base = math.pi * r * r
                return base * h
        "};
        let tree = parse_module(source).unwrap();
        let rendered = serialize(&tree).unwrap();
        let reparsed = parse_module(&rendered).unwrap();

        let originals: Vec<_> = tree.functions().collect();
        let round_tripped: Vec<_> = reparsed.functions().collect();
        assert_eq!(originals.len(), round_tripped.len());
        for (a, b) in originals.iter().zip(&round_tripped) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.parameters, b.parameters);
            let texts =
                |f: &FunctionDecl| f.body.iter().map(|s| s.text.clone()).collect::<Vec<_>>();
            assert_eq!(texts(a), texts(b));
        }
    }

    #[test]
    fn serialize_preserves_defaults_varargs_and_decorators() {
        let source = indoc! {"
            @cached
            def total(*items, scale=2, **extras):
                return sum(items) * scale

            def greet(name, punct='!'):
                return name + punct
        "};
        let tree = parse_module(source).unwrap();
        assert_eq!(serialize(&tree).unwrap(), source);
    }

    #[test]
    fn serialize_preserves_multiline_signatures() {
        let source = "def pick(first,\n         second):\n    return first\n";
        let tree = parse_module(source).unwrap();
        assert_eq!(serialize(&tree).unwrap(), source);
    }

    #[test]
    fn one_line_defs_fall_back_to_the_synthesized_signature() {
        let tree = parse_module("def one(): return 1\n").unwrap();
        assert_eq!(serialize(&tree).unwrap(), "def one():\n    return 1\n");
    }

    #[test]
    fn serialize_renders_empty_bodies_as_pass() {
        let mut tree = parse_module("def stub():\n    pass\n").unwrap();
        if let Some(func) = tree.function_mut("stub") {
            func.body.clear();
        }
        let rendered = serialize(&tree).unwrap();
        assert_eq!(rendered, "def stub():\n    pass\n");
    }
}
