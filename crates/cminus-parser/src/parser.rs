//! Parser for the C-Minus language
//!
//! Converts a sequence of tokens into AST using recursive descent, one
//! method per grammar rule. The first error aborts the parse.

use crate::ast::*;
use crate::error::{ParseError, ParseErrorKind};
use crate::window::TokenWindow;
use cminus_lexer::{Token, TokenKind};

type PResult<T> = Result<T, ParseError>;

/// Token kinds that can start a statement
const STATEMENT_START: [TokenKind; 8] = [
    TokenKind::Semicolon,
    TokenKind::Id,
    TokenKind::Num,
    TokenKind::LParen,
    TokenKind::LBrace,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Return,
];

/// Token kinds that can start a factor
const FACTOR_START: [TokenKind; 3] = [TokenKind::LParen, TokenKind::Id, TokenKind::Num];

/// Parser options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Accept a declaration such as `int (void) { ... }` whose name is
    /// missing, producing a function with an empty name. Off by default.
    pub allow_anonymous_functions: bool,
}

/// Parser for the C-Minus language
///
/// Nested expressions and statements are parsed by direct recursion, so
/// the nesting depth the parser can handle is bounded by the thread's
/// stack size.
pub struct Parser {
    /// Tokens to be parsed
    window: TokenWindow,
    config: ParserConfig,
}

impl Parser {
    /// Creates a new parser with the default configuration
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    /// Creates a new parser
    pub fn with_config(tokens: Vec<Token>, config: ParserConfig) -> Self {
        Self {
            window: TokenWindow::new(tokens),
            config,
        }
    }

    // =========================================
    // Helpers
    // =========================================

    fn current_line(&self) -> Line {
        Line(self.window.current().line())
    }

    /// Consumes the token if it matches the expected type
    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.window.check(kind) {
            self.window.advance();
            true
        } else {
            false
        }
    }

    /// Requires a specific token
    fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.window.check(kind) {
            Ok(self.window.advance())
        } else {
            Err(self.error_at_current(ParseErrorKind::UnexpectedToken, &[kind]))
        }
    }

    /// Builds an error at the current token
    fn error_at_current(&self, kind: ParseErrorKind, expected: &[TokenKind]) -> ParseError {
        ParseError::expected(kind, expected, self.window.current())
    }

    /// Requires `int` or `void`
    fn parse_type(&mut self) -> PResult<TypeSpecifier> {
        match TypeSpecifier::from_token(self.window.kind()) {
            Some(ty) => {
                self.window.advance();
                Ok(ty)
            }
            None => Err(self.error_at_current(
                ParseErrorKind::ExpectedType,
                &[TokenKind::Int, TokenKind::Void],
            )),
        }
    }

    fn literal_value(token: &Token) -> PResult<i32> {
        token.lexeme.parse::<i32>().map_err(|_| {
            ParseError::invalid_literal(
                format!("integer literal '{}' is out of range", token.lexeme),
                token,
            )
        })
    }

    // =========================================
    // Main parsing
    // =========================================

    /// Parses the complete program
    ///
    /// `program -> declaration+`, followed by end of input.
    pub fn parse(&mut self) -> PResult<Program> {
        let line = self.current_line();
        let mut declarations = vec![self.parse_declaration()?];

        while self.window.kind().is_type_specifier() {
            declarations.push(self.parse_declaration()?);
        }

        if !self.window.is_at_end() {
            return Err(self.error_at_current(
                ParseErrorKind::UnexpectedToken,
                &[TokenKind::Int, TokenKind::Void, TokenKind::Eof],
            ));
        }

        tracing::debug!(declarations = declarations.len(), "parsed program");
        Ok(Program { declarations, line })
    }

    /// Parses a single expression that must span the whole input
    pub fn parse_standalone_expression(&mut self) -> PResult<Expr> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Eof)?;
        Ok(expr)
    }

    // =========================================
    // Declarations
    // =========================================

    /// `declaration -> var_declaration | fun_declaration`
    ///
    /// The type and name are read first. If `(` follows, this is a
    /// function; otherwise both tokens go back to the window and the
    /// variable rule reads them again.
    fn parse_declaration(&mut self) -> PResult<Declaration> {
        let line = self.current_line();
        let ty = self.parse_type()?;

        if self.config.allow_anonymous_functions && self.window.check(TokenKind::LParen) {
            tracing::debug!(line = line.0, "parsing anonymous function declaration");
            return self
                .parse_fun_declaration(ty, String::new(), line)
                .map(Declaration::Fun);
        }

        let name = self.expect(TokenKind::Id)?;

        if self.window.check(TokenKind::LParen) {
            tracing::debug!(name = %name.lexeme, line = line.0, "parsing function declaration");
            return self
                .parse_fun_declaration(ty, name.lexeme, line)
                .map(Declaration::Fun);
        }

        self.window.rewind_two();
        let declaration = self.parse_var_declaration()?;
        tracing::debug!(name = declaration.name(), line = line.0, "parsed variable declaration");
        Ok(declaration)
    }

    /// `var_declaration -> type ID ';' | type ID '[' NUM ']' ';'`
    fn parse_var_declaration(&mut self) -> PResult<Declaration> {
        let line = self.current_line();
        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Id)?.lexeme;

        if self.match_token(TokenKind::LBracket) {
            let size_token = self.expect(TokenKind::Num)?;
            let size = Self::literal_value(&size_token)?;
            if size == 0 {
                return Err(ParseError::invalid_literal(
                    format!("array '{}' must have a positive size", name),
                    &size_token,
                ));
            }

            self.expect(TokenKind::RBracket)?;
            self.expect(TokenKind::Semicolon)?;

            return Ok(Declaration::Array(ArrayDeclaration {
                ty,
                name,
                size: size.unsigned_abs(),
                line,
            }));
        }

        if !self.match_token(TokenKind::Semicolon) {
            return Err(self.error_at_current(
                ParseErrorKind::UnexpectedToken,
                &[TokenKind::LBracket, TokenKind::Semicolon],
            ));
        }

        Ok(Declaration::Var(VarDeclaration { ty, name, line }))
    }

    /// `fun_declaration -> type ID '(' params? ')' compound_stmt`
    ///
    /// Called with the type and name already consumed.
    fn parse_fun_declaration(
        &mut self,
        return_type: TypeSpecifier,
        name: String,
        line: Line,
    ) -> PResult<FunDeclaration> {
        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;

        let body = self.parse_compound_stmt()?;

        Ok(FunDeclaration {
            return_type,
            name,
            params,
            body,
            line,
        })
    }

    /// `params -> param (',' param)*`, or nothing for `()` and `(void)`
    fn parse_params(&mut self) -> PResult<Vec<Param>> {
        if self.window.check(TokenKind::RParen) {
            return Ok(Vec::new());
        }

        if self.window.check(TokenKind::Void) && self.window.peek().is(TokenKind::RParen) {
            self.window.advance(); // consume 'void'
            return Ok(Vec::new());
        }

        let mut params = vec![self.parse_param()?];
        while self.match_token(TokenKind::Comma) {
            params.push(self.parse_param()?);
        }

        if !self.window.check(TokenKind::RParen) {
            return Err(self.error_at_current(
                ParseErrorKind::UnexpectedToken,
                &[TokenKind::Comma, TokenKind::RParen],
            ));
        }

        Ok(params)
    }

    /// `param -> type ID ('[' ']')?`
    fn parse_param(&mut self) -> PResult<Param> {
        let line = self.current_line();
        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Id)?.lexeme;

        let is_array = if self.match_token(TokenKind::LBracket) {
            self.expect(TokenKind::RBracket)?;
            true
        } else {
            false
        };

        Ok(Param {
            ty,
            name,
            is_array,
            line,
        })
    }

    // =========================================
    // Statements
    // =========================================

    /// `compound_stmt -> '{' var_declaration* statement* '}'`
    ///
    /// Declarations are only accepted before the first statement.
    fn parse_compound_stmt(&mut self) -> PResult<CompoundStmt> {
        let line = Line(self.expect(TokenKind::LBrace)?.line());

        let mut local_declarations = Vec::new();
        while self.window.kind().is_type_specifier() {
            local_declarations.push(self.parse_var_declaration()?);
        }

        let mut statements = Vec::new();
        while STATEMENT_START.contains(&self.window.kind()) {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace)?;

        Ok(CompoundStmt {
            local_declarations,
            statements,
            line,
        })
    }

    /// `statement -> expr_stmt | compound_stmt | if_stmt | while_stmt | return_stmt`
    fn parse_statement(&mut self) -> PResult<Stmt> {
        match self.window.kind() {
            TokenKind::LBrace => self.parse_compound_stmt().map(Stmt::Compound),
            TokenKind::If => self.parse_selection_stmt().map(Stmt::Selection),
            TokenKind::While => self.parse_iteration_stmt().map(Stmt::Iteration),
            TokenKind::Return => self.parse_return_stmt().map(Stmt::Return),
            TokenKind::Semicolon | TokenKind::Id | TokenKind::Num | TokenKind::LParen => {
                self.parse_expression_stmt().map(Stmt::Expression)
            }
            _ => Err(self.error_at_current(ParseErrorKind::UnexpectedToken, &STATEMENT_START)),
        }
    }

    /// `expr_stmt -> expression? ';'`
    fn parse_expression_stmt(&mut self) -> PResult<ExpressionStmt> {
        let line = self.current_line();

        let expression = if self.window.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect(TokenKind::Semicolon)?;

        Ok(ExpressionStmt { expression, line })
    }

    /// `if_stmt -> 'if' '(' expression ')' statement ('else' statement)?`
    ///
    /// The innermost open `if` takes the `else`.
    fn parse_selection_stmt(&mut self) -> PResult<SelectionStmt> {
        let line = Line(self.expect(TokenKind::If)?.line());

        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(SelectionStmt {
            condition,
            then_branch,
            else_branch,
            line,
        })
    }

    /// `while_stmt -> 'while' '(' expression ')' statement`
    fn parse_iteration_stmt(&mut self) -> PResult<IterationStmt> {
        let line = Line(self.expect(TokenKind::While)?.line());

        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;

        let body = Box::new(self.parse_statement()?);

        Ok(IterationStmt {
            condition,
            body,
            line,
        })
    }

    /// `return_stmt -> 'return' expression? ';'`
    fn parse_return_stmt(&mut self) -> PResult<ReturnStmt> {
        let line = Line(self.expect(TokenKind::Return)?.line());

        let expression = if self.window.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect(TokenKind::Semicolon)?;

        Ok(ReturnStmt { expression, line })
    }

    // =========================================
    // Expressions
    // =========================================

    /// `expression -> var '=' expression | simple_expression`
    ///
    /// The left side is parsed as a simple expression first; if that
    /// turned out to be a bare variable and `=` follows, it becomes the
    /// assignment target. Assignment groups to the right.
    fn parse_expression(&mut self) -> PResult<Expr> {
        let starts_with_var =
            self.window.check(TokenKind::Id) && !self.window.peek().is(TokenKind::LParen);

        let expr = self.parse_simple_expression()?;

        match expr {
            Expr::Var(target) if starts_with_var && self.window.check(TokenKind::Assign) => {
                self.window.advance(); // consume '='
                let value = self.parse_expression()?;
                let line = target.line;

                Ok(Expr::Assign(AssignExpr {
                    target,
                    value: Box::new(value),
                    line,
                }))
            }
            other => Ok(other),
        }
    }

    /// `simple_expression -> additive (relop additive)?`
    ///
    /// At most one relational operator: `1 < 2 < 3` leaves the second
    /// `<` for the caller to reject.
    fn parse_simple_expression(&mut self) -> PResult<Expr> {
        let left = self.parse_additive()?;

        let Some(op) = RelOp::from_token(self.window.kind()) else {
            return Ok(left);
        };
        self.window.advance();

        let right = self.parse_additive()?;
        let line = Line(left.line());

        Ok(Expr::Simple(SimpleExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
            line,
        }))
    }

    fn additive_operator(&self) -> Option<ArithOp> {
        ArithOp::from_token(self.window.kind()).filter(|op| matches!(op, ArithOp::Add | ArithOp::Sub))
    }

    fn multiplicative_operator(&self) -> Option<ArithOp> {
        ArithOp::from_token(self.window.kind()).filter(|op| matches!(op, ArithOp::Mul | ArithOp::Div))
    }

    /// `additive -> term (('+'|'-') term)*`, left-associative
    fn parse_additive(&mut self) -> PResult<Expr> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.additive_operator() {
            self.window.advance();
            let right = self.parse_term()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    /// `term -> factor (('*'|'/') factor)*`, left-associative
    fn parse_term(&mut self) -> PResult<Expr> {
        let mut left = self.parse_factor()?;

        while let Some(op) = self.multiplicative_operator() {
            self.window.advance();
            let right = self.parse_factor()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    /// `factor -> '(' expression ')' | var | call | NUM`
    fn parse_factor(&mut self) -> PResult<Expr> {
        match self.window.kind() {
            TokenKind::LParen => {
                self.window.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Id if self.window.peek().is(TokenKind::LParen) => {
                self.parse_call().map(Expr::Call)
            }
            TokenKind::Id => self.parse_var().map(Expr::Var),
            TokenKind::Num => {
                let token = self.window.advance();
                Ok(Expr::Num(Num {
                    value: Self::literal_value(&token)?,
                    line: Line(token.line()),
                }))
            }
            _ => Err(self.error_at_current(ParseErrorKind::ExpectedExpression, &FACTOR_START)),
        }
    }

    /// `var -> ID ('[' expression ']')?`
    fn parse_var(&mut self) -> PResult<Var> {
        let token = self.expect(TokenKind::Id)?;

        let index = if self.match_token(TokenKind::LBracket) {
            let index = self.parse_expression()?;
            self.expect(TokenKind::RBracket)?;
            Some(Box::new(index))
        } else {
            None
        };

        Ok(Var {
            line: Line(token.line()),
            name: token.lexeme,
            index,
        })
    }

    /// `call -> ID '(' args? ')'`
    fn parse_call(&mut self) -> PResult<Call> {
        let token = self.expect(TokenKind::Id)?;
        self.expect(TokenKind::LParen)?;

        let args = if self.window.check(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_args()?
        };

        self.expect(TokenKind::RParen)?;

        Ok(Call {
            line: Line(token.line()),
            name: token.lexeme,
            args,
        })
    }

    /// `args -> expression (',' expression)*`
    fn parse_args(&mut self) -> PResult<Vec<Expr>> {
        let mut args = vec![self.parse_expression()?];

        while self.match_token(TokenKind::Comma) {
            args.push(self.parse_expression()?);
        }

        if !self.window.check(TokenKind::RParen) {
            return Err(self.error_at_current(
                ParseErrorKind::UnexpectedToken,
                &[TokenKind::Comma, TokenKind::RParen],
            ));
        }

        Ok(args)
    }
}

/// Folds `left op right` into a new node carrying the left operand's line
fn binary(op: ArithOp, left: Expr, right: Expr) -> Expr {
    let line = Line(left.line());
    Expr::BinOp(BinOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
        line,
    })
}

/// Parses tokens with the default configuration
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse()
}
