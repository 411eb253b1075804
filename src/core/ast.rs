use std::collections::BTreeSet;

/// A parsed Python module: an ordered sequence of top-level declarations
/// plus the source text it was built from.
///
/// A tree is owned by whichever pipeline stage is processing it. Rewrites
/// consume the tree by value and hand back the mutated one, so callers can
/// never hold references into pre-mutation substructure.
#[derive(Clone, Debug)]
pub struct SourceTree {
    pub declarations: Vec<Declaration>,
    pub source: String,
}

impl SourceTree {
    /// Iterate over the top-level function declarations in source order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Function(func) => Some(func),
            Declaration::Other(_) => None,
        })
    }

    /// Look up a top-level function by name
    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions().find(|func| func.name == name)
    }

    /// Look up a top-level function by name, mutably
    pub fn function_mut(&mut self, name: &str) -> Option<&mut FunctionDecl> {
        self.declarations.iter_mut().find_map(|decl| match decl {
            Declaration::Function(func) if func.name == name => Some(func),
            _ => None,
        })
    }

    /// Append a function to the end of the top-level sequence
    pub fn push_function(&mut self, func: FunctionDecl) {
        self.declarations.push(Declaration::Function(func));
    }
}

/// A top-level declaration. Anything that is not a plain function definition
/// is carried verbatim and re-emitted unchanged.
#[derive(Clone, Debug)]
pub enum Declaration {
    Function(FunctionDecl),
    Other(RawDecl),
}

/// An unrecognized top-level statement, kept as its source rendering
#[derive(Clone, Debug)]
pub struct RawDecl {
    pub text: String,
}

/// A top-level function definition
#[derive(Clone, Debug)]
pub struct FunctionDecl {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Statement>,
    /// The verbatim decorator and signature lines from the source, through
    /// the `def ...:` line. Re-emitted unchanged by the serializer so
    /// defaults, `*args`/`**kwargs`, annotations, and decorators survive.
    /// Absent on synthesized helpers, which render the bare
    /// `def name(params):` form.
    pub header: Option<String>,
    /// 1-based inclusive line span in the tree's source. Present exactly
    /// while the body still corresponds to the parsed text; cleared by the
    /// rewriter, and absent on synthesized helpers.
    pub line_span: Option<(usize, usize)>,
    /// Structural labels for semantic duplicate comparison, collected during
    /// lowering. Empty on synthesized functions.
    pub structure: Vec<StructuralLabel>,
}

impl FunctionDecl {
    /// Create a function with no source backing, e.g. an extracted helper
    pub fn synthesized(name: String, parameters: Vec<String>, body: Vec<Statement>) -> Self {
        Self {
            name,
            parameters,
            body,
            header: None,
            line_span: None,
            structure: Vec::new(),
        }
    }
}

/// One statement in a function body.
///
/// `text` is the dedented source rendering (nested lines keep their relative
/// indentation) and is exactly what the serializer re-emits. `reads` and
/// `writes` are the identifier-usage sets collected over the whole statement,
/// nested blocks included.
#[derive(Clone, Debug)]
pub struct Statement {
    pub kind: StatementKind,
    pub text: String,
    pub reads: BTreeSet<String>,
    pub writes: BTreeSet<String>,
}

/// The statement kinds the analysis distinguishes. Everything else falls
/// through to `Other` and is passed along unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatementKind {
    /// An assignment; carries the target name only for a plain
    /// single-target name assignment like `x = ...`
    Assign { target: Option<String> },
    /// An expression statement whose expression is a call
    Call,
    Conditional,
    Loop,
    Return,
    Other,
}

impl Statement {
    pub fn is_return(&self) -> bool {
        self.kind == StatementKind::Return
    }

    /// The target name when this is a plain single-target name assignment
    pub fn assign_target(&self) -> Option<&str> {
        match &self.kind {
            StatementKind::Assign { target } => target.as_deref(),
            _ => None,
        }
    }

    /// Synthesize `return function(args...)`
    pub fn return_call(function: &str, args: &[String]) -> Self {
        Self {
            kind: StatementKind::Return,
            text: format!("return {}", call_text(function, args)),
            reads: call_reads(function, args),
            writes: BTreeSet::new(),
        }
    }

    /// Synthesize `return name`
    pub fn return_name(name: &str) -> Self {
        Self {
            kind: StatementKind::Return,
            text: format!("return {name}"),
            reads: BTreeSet::from([name.to_string()]),
            writes: BTreeSet::new(),
        }
    }

    /// Synthesize `return None`
    pub fn return_none() -> Self {
        Self {
            kind: StatementKind::Return,
            text: "return None".to_string(),
            reads: BTreeSet::new(),
            writes: BTreeSet::new(),
        }
    }

    /// Synthesize `target = function(args...)`
    pub fn assign_call(target: &str, function: &str, args: &[String]) -> Self {
        Self {
            kind: StatementKind::Assign {
                target: Some(target.to_string()),
            },
            text: format!("{target} = {}", call_text(function, args)),
            reads: call_reads(function, args),
            writes: BTreeSet::from([target.to_string()]),
        }
    }

    /// Synthesize a bare `function(args...)` statement
    pub fn expr_call(function: &str, args: &[String]) -> Self {
        Self {
            kind: StatementKind::Call,
            text: call_text(function, args),
            reads: call_reads(function, args),
            writes: BTreeSet::new(),
        }
    }
}

/// A structural fingerprint element for semantic duplicate comparison
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructuralLabel {
    Function,
    Conditional,
    Loop,
    BinaryOp,
    Call,
    Assign,
}

fn call_text(function: &str, args: &[String]) -> String {
    format!("{}({})", function, args.join(", "))
}

fn call_reads(function: &str, args: &[String]) -> BTreeSet<String> {
    let mut reads: BTreeSet<String> = args.iter().cloned().collect();
    reads.insert(function.to_string());
    reads
}
