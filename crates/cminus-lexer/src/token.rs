//! Tokens for the C-Minus language
//!
//! Defines all token types that the lexer can produce.

use cminus_error::Position;
use std::fmt;

/// All token types for the C-Minus language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Keywords
    // =========================================
    /// `if`
    If,
    /// `else`
    Else,
    /// `int`
    Int,
    /// `return`
    Return,
    /// `void`
    Void,
    /// `while`
    While,

    // =========================================
    // Operators
    // =========================================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Times,
    /// `/`
    Divide,
    /// `=`
    Assign,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,

    // =========================================
    // Punctuation
    // =========================================
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,

    // =========================================
    // Identifiers and literals
    // =========================================
    /// Identifier
    Id,
    /// Decimal integer literal (lexeme holds the digits)
    Num,

    /// End of file
    Eof,

    /// Unrecognized character; the lexeme holds it
    Error,
}

impl TokenKind {
    /// Returns true if the token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::Int
                | TokenKind::Return
                | TokenKind::Void
                | TokenKind::While
        )
    }

    /// Returns true for the type specifiers `int` and `void`
    pub fn is_type_specifier(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Void)
    }

    /// Converts a string to a keyword (if it is one). Case-sensitive.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "int" => Some(TokenKind::Int),
            "return" => Some(TokenKind::Return),
            "void" => Some(TokenKind::Void),
            "while" => Some(TokenKind::While),
            _ => None,
        }
    }

    /// Fixed source text of the token, if it has one
    pub fn symbol(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Int => "int",
            TokenKind::Return => "return",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Times => "*",
            TokenKind::Divide => "/",
            TokenKind::Assign => "=",
            TokenKind::Eq => "==",
            TokenKind::Ne => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Id | TokenKind::Num | TokenKind::Eof | TokenKind::Error => return None,
        };
        Some(text)
    }

    /// Upper-case kind name used in token dumps and AST outlines
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Int => "INT",
            TokenKind::Return => "RETURN",
            TokenKind::Void => "VOID",
            TokenKind::While => "WHILE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Eq => "EQ",
            TokenKind::Ne => "NE",
            TokenKind::Lt => "LT",
            TokenKind::Le => "LE",
            TokenKind::Gt => "GT",
            TokenKind::Ge => "GE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Id => "ID",
            TokenKind::Num => "NUM",
            TokenKind::Eof => "EOF",
            TokenKind::Error => "ERROR",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Id => write!(f, "identifier"),
            TokenKind::Num => write!(f, "number"),
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Error => write!(f, "invalid character"),
            other => match other.symbol() {
                Some(text) => write!(f, "'{}'", text),
                None => write!(f, "{}", other.name()),
            },
        }
    }
}

/// A token with its location in the source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token type
    pub kind: TokenKind,
    /// Source text of the token (empty for EOF)
    pub lexeme: String,
    /// Where the token starts
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    /// Source line of the token
    pub fn line(&self) -> u32 {
        self.position.line
    }

    /// Checks if the token is of a specific type
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Checks if it is end of file
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Checks if it is an error
    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error)
    }

    /// Width of the token in characters, as shown under a diagnostic
    pub fn width(&self) -> usize {
        self.lexeme.chars().count().max(1)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Id | TokenKind::Num | TokenKind::Error => {
                write!(f, "{} '{}' at {}", self.kind, self.lexeme, self.position)
            }
            _ => write!(f, "{} at {}", self.kind, self.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_is_case_sensitive() {
        assert_eq!(TokenKind::keyword_from_str("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword_from_str("While"), None);
        assert_eq!(TokenKind::keyword_from_str("integer"), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TokenKind::Le.to_string(), "'<='");
        assert_eq!(TokenKind::Return.to_string(), "'return'");
        assert_eq!(TokenKind::Id.to_string(), "identifier");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Error, "@", Position::new(4, 2));
        assert_eq!(token.to_string(), "invalid character '@' at 4:2");
        assert!(token.is_error());
        assert_eq!(token.line(), 4);
    }

    #[test]
    fn test_symbols_round_trip_through_keywords() {
        for kind in [TokenKind::If, TokenKind::Else, TokenKind::Int, TokenKind::Return, TokenKind::Void, TokenKind::While] {
            assert!(kind.is_keyword());
            let text = kind.symbol().unwrap();
            assert_eq!(TokenKind::keyword_from_str(text), Some(kind));
        }
    }
}
