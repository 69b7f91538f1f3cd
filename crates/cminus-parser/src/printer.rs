//! Indented outline of a syntax tree
//!
//! ```text
//! Program:
//!   FunDeclaration: int f(
//!     Param: int a[]
//!   )
//!     CompoundStmt:
//!       LocalDeclarations:
//!       Statements:
//!         ReturnStmt: (void)
//! ```

use crate::ast::*;
use std::fmt;

/// Renders AST nodes as an outline, two spaces per level
#[derive(Default)]
pub struct AstPrinter {
    output: String,
    indent: usize,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders a complete program
    pub fn print_program(mut self, program: &Program) -> String {
        self.program(program);
        self.output
    }

    /// Renders a single expression
    pub fn print_expr(mut self, expr: &Expr) -> String {
        self.expr(expr);
        self.output
    }

    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
        self.output.push_str(text.as_ref());
        self.output.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    /// Writes `label:` and the node one level deeper
    fn section(&mut self, label: &str, f: impl FnOnce(&mut Self)) {
        self.line(format!("{}:", label));
        self.nested(f);
    }

    fn program(&mut self, program: &Program) {
        self.line("Program:");
        self.nested(|p| {
            for decl in &program.declarations {
                p.declaration(decl);
            }
        });
    }

    fn declaration(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Var(var) => self.line(format!("VarDeclaration: {} {}", var.ty, var.name)),
            Declaration::Array(array) => self.line(format!(
                "ArrayDeclaration: {} {}[{}]",
                array.ty, array.name, array.size
            )),
            Declaration::Fun(fun) => {
                self.line(format!("FunDeclaration: {} {}(", fun.return_type, fun.name));
                self.nested(|p| {
                    for param in &fun.params {
                        p.param(param);
                    }
                });
                self.line(")");
                self.nested(|p| p.compound(&fun.body));
            }
        }
    }

    fn param(&mut self, param: &Param) {
        let brackets = if param.is_array { "[]" } else { "" };
        self.line(format!("Param: {} {}{}", param.ty, param.name, brackets));
    }

    fn compound(&mut self, block: &CompoundStmt) {
        self.line("CompoundStmt:");
        self.nested(|p| {
            p.section("LocalDeclarations", |p| {
                for decl in &block.local_declarations {
                    p.declaration(decl);
                }
            });
            p.section("Statements", |p| {
                for stmt in &block.statements {
                    p.stmt(stmt);
                }
            });
        });
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Compound(block) => self.compound(block),
            Stmt::Expression(ExpressionStmt { expression: None, .. }) => {
                self.line("ExpressionStmt: ;")
            }
            Stmt::Expression(ExpressionStmt {
                expression: Some(expr),
                ..
            }) => {
                self.line("ExpressionStmt:");
                self.nested(|p| p.expr(expr));
            }
            Stmt::Selection(selection) => {
                self.line("IfStmt:");
                self.nested(|p| {
                    p.section("Condition", |p| p.expr(&selection.condition));
                    p.section("Then", |p| p.stmt(&selection.then_branch));
                    if let Some(else_branch) = &selection.else_branch {
                        p.section("Else", |p| p.stmt(else_branch));
                    }
                });
            }
            Stmt::Iteration(iteration) => {
                self.line("WhileStmt:");
                self.nested(|p| {
                    p.section("Condition", |p| p.expr(&iteration.condition));
                    p.section("Body", |p| p.stmt(&iteration.body));
                });
            }
            Stmt::Return(ReturnStmt { expression: None, .. }) => self.line("ReturnStmt: (void)"),
            Stmt::Return(ReturnStmt {
                expression: Some(expr),
                ..
            }) => {
                self.line("ReturnStmt:");
                self.nested(|p| p.expr(expr));
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Assign(assign) => {
                self.line("AssignExpression:");
                self.nested(|p| {
                    p.section("Left", |p| p.var(&assign.target));
                    p.section("Right", |p| p.expr(&assign.value));
                });
            }
            Expr::Simple(simple) => {
                self.line(format!("SimpleExpression ({}):", simple.op.token().name()));
                self.operands(&simple.left, &simple.right);
            }
            Expr::BinOp(binop) => {
                self.line(format!("BinaryOp: {}", binop.op.token().name()));
                self.operands(&binop.left, &binop.right);
            }
            Expr::Var(var) => self.var(var),
            Expr::Call(call) => {
                self.line(format!("Call: {}", call.name));
                self.nested(|p| {
                    p.section("Args", |p| {
                        for arg in &call.args {
                            p.expr(arg);
                        }
                    });
                });
            }
            Expr::Num(num) => self.line(format!("Number: {}", num.value)),
        }
    }

    fn operands(&mut self, left: &Expr, right: &Expr) {
        self.nested(|p| {
            p.section("Left", |p| p.expr(left));
            p.section("Right", |p| p.expr(right));
        });
    }

    fn var(&mut self, var: &Var) {
        self.line(format!("Variable: {}", var.name));
        if let Some(index) = &var.index {
            self.nested(|p| p.section("Index", |p| p.expr(index)));
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&AstPrinter::new().print_program(self))
    }
}
