// AST (Abstract Syntax Tree) definitions for C- programs
//
// One type per grammar nonterminal. Every node owns its children outright, so
// the tree is strict and dropping the `Program` releases everything once.

/// Source location information for error reporting
///
/// `line` is 1-based. `column` is the zero-based offset of the first character
/// of the token within its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// `int` or `void`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSpecifier {
    Int,
    Void,
}

impl TypeSpecifier {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeSpecifier::Int => "int",
            TypeSpecifier::Void => "void",
        }
    }
}

/// Relational operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl RelOp {
    pub fn symbol(self) -> &'static str {
        match self {
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
        }
    }
}

/// `+` or `-`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Sub,
}

impl AddOp {
    pub fn symbol(self) -> char {
        match self {
            AddOp::Add => '+',
            AddOp::Sub => '-',
        }
    }
}

/// `*` or `/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Mul,
    Div,
}

impl MulOp {
    pub fn symbol(self) -> char {
        match self {
            MulOp::Mul => '*',
            MulOp::Div => '/',
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Number of nodes reachable from this program, the program itself included.
    ///
    /// Visits exactly the child slots the parser fills in, so for a fresh parse
    /// this equals [`Parser::nodes_built`](crate::parser::parse::Parser::nodes_built).
    pub fn node_count(&self) -> usize {
        1 + self
            .declarations
            .iter()
            .map(Declaration::node_count)
            .sum::<usize>()
    }
}

/// Global declaration: either a variable or a function
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Var(VarDeclaration),
    Fun(FunDeclaration),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Var(var) => &var.name,
            Declaration::Fun(fun) => &fun.name,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Declaration::Var(var) => var.location,
            Declaration::Fun(fun) => fun.location,
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        match self {
            Declaration::Var(var) => var.node_count(),
            Declaration::Fun(fun) => fun.node_count(),
        }
    }
}

/// `int x;` or `int x[10];`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    pub type_spec: TypeSpecifier,
    pub name: String,
    pub array_size: Option<usize>, // Some(n) for `name[n]`
    pub location: SourceLocation,
}

impl VarDeclaration {
    pub fn is_array(&self) -> bool {
        self.array_size.is_some()
    }

    pub(crate) fn node_count(&self) -> usize {
        1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunDeclaration {
    pub return_type: TypeSpecifier,
    pub name: String,
    pub params: Vec<Param>, // empty for `(void)`
    pub body: CompoundStmt,
    pub location: SourceLocation,
}

impl FunDeclaration {
    pub(crate) fn node_count(&self) -> usize {
        1 + self.params.len() + self.body.node_count()
    }
}

/// Function parameter; `int a[]` sets `is_array`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub type_spec: TypeSpecifier,
    pub name: String,
    pub is_array: bool,
    pub location: SourceLocation,
}

/// `{ local-declarations statement-list }`
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundStmt {
    pub local_declarations: Vec<VarDeclaration>,
    pub statements: Vec<Statement>,
    pub location: SourceLocation,
}

impl CompoundStmt {
    pub(crate) fn node_count(&self) -> usize {
        1 + self
            .local_declarations
            .iter()
            .map(VarDeclaration::node_count)
            .sum::<usize>()
            + self
                .statements
                .iter()
                .map(Statement::node_count)
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(ExpressionStmt),
    Compound(CompoundStmt),
    Selection(SelectionStmt),
    Iteration(IterationStmt),
    Return(ReturnStmt),
}

impl Statement {
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Expression(stmt) => stmt.location,
            Statement::Compound(stmt) => stmt.location,
            Statement::Selection(stmt) => stmt.location,
            Statement::Iteration(stmt) => stmt.location,
            Statement::Return(stmt) => stmt.location,
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        match self {
            Statement::Expression(stmt) => {
                1 + stmt.expr.as_ref().map_or(0, Expression::node_count)
            }
            Statement::Compound(stmt) => stmt.node_count(),
            Statement::Selection(stmt) => {
                1 + stmt.condition.node_count()
                    + stmt.then_branch.node_count()
                    + stmt.else_branch.as_ref().map_or(0, |s| s.node_count())
            }
            Statement::Iteration(stmt) => {
                1 + stmt.condition.node_count() + stmt.body.node_count()
            }
            Statement::Return(stmt) => {
                1 + stmt.value.as_ref().map_or(0, Expression::node_count)
            }
        }
    }
}

/// `expression ;` or the empty statement `;`
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expr: Option<Expression>,
    pub location: SourceLocation,
}

/// `if (condition) then_branch [else else_branch]`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionStmt {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
    pub location: SourceLocation,
}

/// `while (condition) body`
#[derive(Debug, Clone, PartialEq)]
pub struct IterationStmt {
    pub condition: Expression,
    pub body: Box<Statement>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expression>,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Assign(AssignExpr),
    Simple(SimpleExpr),
}

impl Expression {
    pub fn location(&self) -> SourceLocation {
        match self {
            Expression::Assign(assign) => assign.location,
            Expression::Simple(simple) => simple.location,
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        match self {
            Expression::Assign(assign) => {
                1 + assign.target.node_count() + assign.value.node_count()
            }
            Expression::Simple(simple) => simple.node_count(),
        }
    }
}

/// `target = value`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub target: Variable,
    pub value: Box<Expression>,
    pub location: SourceLocation,
}

/// Variable reference, optionally indexed: `x` or `x[i]`
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub index: Option<Box<Expression>>,
    pub location: SourceLocation,
}

impl Variable {
    pub(crate) fn node_count(&self) -> usize {
        1 + self.index.as_ref().map_or(0, |index| index.node_count())
    }
}

/// `left [relop right]`
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleExpr {
    pub left: AdditiveExpr,
    pub comparison: Option<(RelOp, AdditiveExpr)>,
    pub location: SourceLocation,
}

impl SimpleExpr {
    pub(crate) fn node_count(&self) -> usize {
        1 + self.left.node_count()
            + self
                .comparison
                .as_ref()
                .map_or(0, |(_, right)| right.node_count())
    }
}

/// Left-associative chain of terms joined by `+`/`-`
#[derive(Debug, Clone, PartialEq)]
pub enum AdditiveExpr {
    Term(Term),
    Binary {
        left: Box<AdditiveExpr>,
        op: AddOp,
        right: Term,
        location: SourceLocation,
    },
}

impl AdditiveExpr {
    pub fn location(&self) -> SourceLocation {
        match self {
            AdditiveExpr::Term(term) => term.location(),
            AdditiveExpr::Binary { location, .. } => *location,
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        match self {
            AdditiveExpr::Term(term) => 1 + term.node_count(),
            AdditiveExpr::Binary { left, right, .. } => {
                1 + left.node_count() + right.node_count()
            }
        }
    }
}

/// Left-associative chain of factors joined by `*`/`/`
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Factor(Factor),
    Binary {
        left: Box<Term>,
        op: MulOp,
        right: Factor,
        location: SourceLocation,
    },
}

impl Term {
    pub fn location(&self) -> SourceLocation {
        match self {
            Term::Factor(factor) => factor.location(),
            Term::Binary { location, .. } => *location,
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        match self {
            Term::Factor(factor) => 1 + factor.node_count(),
            Term::Binary { left, right, .. } => {
                1 + left.node_count() + right.node_count()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Factor {
    Group(Box<Expression>, SourceLocation), // ( expression )
    Var(Variable),
    Call(Activation),
    Num(i32, SourceLocation),
}

impl Factor {
    pub fn location(&self) -> SourceLocation {
        match self {
            Factor::Group(_, loc) => *loc,
            Factor::Var(var) => var.location,
            Factor::Call(call) => call.location,
            Factor::Num(_, loc) => *loc,
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        let children = match self {
            Factor::Group(expr, _) => expr.node_count(),
            Factor::Var(var) => var.node_count(),
            Factor::Call(call) => call.node_count(),
            Factor::Num(..) => 0,
        };
        1 + children
    }
}

/// Function call: `name(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    pub name: String,
    pub args: Vec<Expression>,
    pub location: SourceLocation,
}

impl Activation {
    pub(crate) fn node_count(&self) -> usize {
        1 + self.args.iter().map(Expression::node_count).sum::<usize>()
    }
}
