//! AST - Abstract Syntax Tree for the C-Minus language
//!
//! Every node owns its children outright; the tree has no sharing and
//! no back references. Each node records the source line it came from.

use cminus_lexer::TokenKind;
use std::fmt;

/// Source line of a node
///
/// Lines are diagnostics metadata: two nodes that differ only in their
/// lines compare equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Line(pub u32);

impl PartialEq for Line {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for Line {}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The sixteen node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    VarDeclaration,
    ArrayDeclaration,
    FunDeclaration,
    Param,
    CompoundStmt,
    ExpressionStmt,
    SelectionStmt,
    IterationStmt,
    ReturnStmt,
    AssignExpr,
    SimpleExpr,
    Var,
    Call,
    Num,
    BinOp,
}

/// Common access to any node
pub trait AstNode {
    fn kind(&self) -> NodeKind;
    fn line(&self) -> u32;
}

/// `int` or `void`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSpecifier {
    Int,
    Void,
}

impl TypeSpecifier {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(TypeSpecifier::Int),
            TokenKind::Void => Some(TypeSpecifier::Void),
            _ => None,
        }
    }
}

impl fmt::Display for TypeSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpecifier::Int => write!(f, "int"),
            TypeSpecifier::Void => write!(f, "void"),
        }
    }
}

/// Relational operators (`< <= > >= == !=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl RelOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Lt => Some(RelOp::Lt),
            TokenKind::Le => Some(RelOp::Le),
            TokenKind::Gt => Some(RelOp::Gt),
            TokenKind::Ge => Some(RelOp::Ge),
            TokenKind::Eq => Some(RelOp::Eq),
            TokenKind::Ne => Some(RelOp::Ne),
            _ => None,
        }
    }

    pub fn token(&self) -> TokenKind {
        match self {
            RelOp::Lt => TokenKind::Lt,
            RelOp::Le => TokenKind::Le,
            RelOp::Gt => TokenKind::Gt,
            RelOp::Ge => TokenKind::Ge,
            RelOp::Eq => TokenKind::Eq,
            RelOp::Ne => TokenKind::Ne,
        }
    }
}

/// Arithmetic operators (`+ - * /`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(ArithOp::Add),
            TokenKind::Minus => Some(ArithOp::Sub),
            TokenKind::Times => Some(ArithOp::Mul),
            TokenKind::Divide => Some(ArithOp::Div),
            _ => None,
        }
    }

    pub fn token(&self) -> TokenKind {
        match self {
            ArithOp::Add => TokenKind::Plus,
            ArithOp::Sub => TokenKind::Minus,
            ArithOp::Mul => TokenKind::Times,
            ArithOp::Div => TokenKind::Divide,
        }
    }
}

// =========================================
// Declarations
// =========================================

/// Complete program (source file)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub line: Line,
}

/// Top-level or local declaration
///
/// Local declarations inside a compound statement are never `Fun`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `int x;`
    Var(VarDeclaration),
    /// `int a[10];`
    Array(ArrayDeclaration),
    /// `int f(int a, int b[]) { ... }`
    Fun(FunDeclaration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDeclaration {
    pub ty: TypeSpecifier,
    pub name: String,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayDeclaration {
    pub ty: TypeSpecifier,
    pub name: String,
    /// Always positive
    pub size: u32,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunDeclaration {
    pub return_type: TypeSpecifier,
    pub name: String,
    /// In declaration order
    pub params: Vec<Param>,
    pub body: CompoundStmt,
    pub line: Line,
}

/// Function parameter: `int a` or `int a[]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: TypeSpecifier,
    pub name: String,
    pub is_array: bool,
    pub line: Line,
}

// =========================================
// Statements
// =========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `{ decls stmts }`
    Compound(CompoundStmt),
    /// `expr;` or `;`
    Expression(ExpressionStmt),
    /// `if (cond) stmt [else stmt]`
    Selection(SelectionStmt),
    /// `while (cond) stmt`
    Iteration(IterationStmt),
    /// `return [expr];`
    Return(ReturnStmt),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundStmt {
    /// Var and array declarations, all before the first statement
    pub local_declarations: Vec<Declaration>,
    pub statements: Vec<Stmt>,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStmt {
    /// `None` for the empty statement
    pub expression: Option<Expr>,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionStmt {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationStmt {
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStmt {
    /// `None` for a void return
    pub expression: Option<Expr>,
    pub line: Line,
}

// =========================================
// Expressions
// =========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `var = expr`
    Assign(AssignExpr),
    /// `left relop right`
    Simple(SimpleExpr),
    /// `x` or `x[expr]`
    Var(Var),
    /// `f(args)`
    Call(Call),
    /// Integer literal
    Num(Num),
    /// `left (+|-|*|/) right`
    BinOp(BinOp),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignExpr {
    pub target: Var,
    pub value: Box<Expr>,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleExpr {
    pub left: Box<Expr>,
    pub op: RelOp,
    pub right: Box<Expr>,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    pub name: String,
    pub index: Option<Box<Expr>>,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Num {
    pub value: i32,
    pub line: Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinOp {
    pub op: ArithOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub line: Line,
}

// =========================================
// Node kinds and lines
// =========================================

macro_rules! leaf_node {
    ($($ty:ident),* $(,)?) => {
        $(
            impl AstNode for $ty {
                fn kind(&self) -> NodeKind {
                    NodeKind::$ty
                }

                fn line(&self) -> u32 {
                    self.line.0
                }
            }
        )*
    };
}

leaf_node!(
    Program,
    VarDeclaration,
    ArrayDeclaration,
    FunDeclaration,
    Param,
    CompoundStmt,
    ExpressionStmt,
    SelectionStmt,
    IterationStmt,
    ReturnStmt,
    AssignExpr,
    SimpleExpr,
    Var,
    Call,
    Num,
    BinOp,
);

impl AstNode for Declaration {
    fn kind(&self) -> NodeKind {
        match self {
            Declaration::Var(decl) => decl.kind(),
            Declaration::Array(decl) => decl.kind(),
            Declaration::Fun(decl) => decl.kind(),
        }
    }

    fn line(&self) -> u32 {
        match self {
            Declaration::Var(decl) => decl.line(),
            Declaration::Array(decl) => decl.line(),
            Declaration::Fun(decl) => decl.line(),
        }
    }
}

impl AstNode for Stmt {
    fn kind(&self) -> NodeKind {
        match self {
            Stmt::Compound(stmt) => stmt.kind(),
            Stmt::Expression(stmt) => stmt.kind(),
            Stmt::Selection(stmt) => stmt.kind(),
            Stmt::Iteration(stmt) => stmt.kind(),
            Stmt::Return(stmt) => stmt.kind(),
        }
    }

    fn line(&self) -> u32 {
        match self {
            Stmt::Compound(stmt) => stmt.line(),
            Stmt::Expression(stmt) => stmt.line(),
            Stmt::Selection(stmt) => stmt.line(),
            Stmt::Iteration(stmt) => stmt.line(),
            Stmt::Return(stmt) => stmt.line(),
        }
    }
}

impl AstNode for Expr {
    fn kind(&self) -> NodeKind {
        match self {
            Expr::Assign(expr) => expr.kind(),
            Expr::Simple(expr) => expr.kind(),
            Expr::Var(expr) => expr.kind(),
            Expr::Call(expr) => expr.kind(),
            Expr::Num(expr) => expr.kind(),
            Expr::BinOp(expr) => expr.kind(),
        }
    }

    fn line(&self) -> u32 {
        match self {
            Expr::Assign(expr) => expr.line(),
            Expr::Simple(expr) => expr.line(),
            Expr::Var(expr) => expr.line(),
            Expr::Call(expr) => expr.line(),
            Expr::Num(expr) => expr.line(),
            Expr::BinOp(expr) => expr.line(),
        }
    }
}

impl Declaration {
    /// Declared name
    pub fn name(&self) -> &str {
        match self {
            Declaration::Var(decl) => &decl.name,
            Declaration::Array(decl) => &decl.name,
            Declaration::Fun(decl) => &decl.name,
        }
    }
}
