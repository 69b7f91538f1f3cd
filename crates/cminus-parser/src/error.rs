//! Parse error types

use cminus_error::{Diagnostic, ErrorCode, Position, ToDiagnostic};
use cminus_lexer::{ScanError, Token, TokenKind};
use thiserror::Error;

/// Category of parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Found a token other than the one(s) the grammar allows here
    UnexpectedToken,
    /// Found something that cannot start an expression
    ExpectedExpression,
    /// Found something other than `int` or `void`
    ExpectedType,
    /// A literal that does not fit, or an array size of zero
    InvalidLiteral,
}

/// Parse error with the offending token and its position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {}", .position.line)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Token kinds that would have been accepted (empty when the
    /// problem is not the kind of the token)
    pub expected: Vec<TokenKind>,
    /// Kind of the offending token
    pub found: TokenKind,
    /// Source text of the offending token
    pub lexeme: String,
    /// Where the offending token starts
    pub position: Position,
    /// Width of the offending token, for the underline
    pub width: usize,
}

impl ParseError {
    /// Creates an "expected X, found Y" error at `found`
    pub fn expected(kind: ParseErrorKind, expected: &[TokenKind], found: &Token) -> Self {
        let message = format!(
            "expected {}, found {}",
            describe_expected(expected),
            describe_found(found)
        );
        Self {
            kind,
            message,
            expected: expected.to_vec(),
            found: found.kind,
            lexeme: found.lexeme.clone(),
            position: found.position,
            width: found.width(),
        }
    }

    /// Creates an error about the value of a literal token
    pub fn invalid_literal(message: impl Into<String>, token: &Token) -> Self {
        Self {
            kind: ParseErrorKind::InvalidLiteral,
            message: message.into(),
            expected: Vec::new(),
            found: token.kind,
            lexeme: token.lexeme.clone(),
            position: token.position,
            width: token.width(),
        }
    }

    /// Line the error is reported at
    pub fn line(&self) -> u32 {
        self.position.line
    }

    fn code(&self) -> ErrorCode {
        if self.found == TokenKind::Error {
            return ErrorCode::UNEXPECTED_CHAR;
        }
        match self.kind {
            ParseErrorKind::UnexpectedToken => ErrorCode::UNEXPECTED_TOKEN,
            ParseErrorKind::ExpectedExpression => ErrorCode::EXPECTED_EXPRESSION,
            ParseErrorKind::ExpectedType => ErrorCode::EXPECTED_TYPE,
            ParseErrorKind::InvalidLiteral => ErrorCode::INVALID_LITERAL,
        }
    }
}

fn describe_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => "something else".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{} or {}", init.join(", "), last)
        }
    }
}

fn describe_found(found: &Token) -> String {
    match found.kind {
        TokenKind::Id | TokenKind::Num | TokenKind::Error => {
            format!("{} '{}'", found.kind, found.lexeme)
        }
        kind => kind.to_string(),
    }
}

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.found {
            TokenKind::Eof => "input ends here".to_string(),
            TokenKind::Error => "unrecognized character".to_string(),
            _ => format!("unexpected {}", self.found),
        };

        let diagnostic = Diagnostic::error(self.message.clone())
            .with_code(self.code())
            .with_label(self.position, self.width, label);

        match (self.kind, self.found) {
            (_, TokenKind::Error) => {
                diagnostic.with_note("only letters, digits, operators and ; , ( ) [ ] { } are valid")
            }
            (ParseErrorKind::InvalidLiteral, _) => {
                diagnostic.with_note(format!("integer literals range from 0 to {}", i32::MAX))
            }
            _ => diagnostic,
        }
    }
}

/// Any failure of the scan-then-parse pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FrontendError {
    /// Position the error is reported at
    pub fn position(&self) -> Position {
        match self {
            FrontendError::Scan(err) => err.position(),
            FrontendError::Parse(err) => err.position,
        }
    }
}

impl ToDiagnostic for FrontendError {
    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            FrontendError::Scan(err) => err.to_diagnostic(),
            FrontendError::Parse(err) => err.to_diagnostic(),
        }
    }
}
