//! cminus-parser - Parser for the C-Minus language
//!
//! Converts a sequence of tokens into an AST (Abstract Syntax Tree).
//! The first syntax error ends the parse; there is no partial tree.
//!
//! # Example
//!
//! ```rust
//! use cminus_lexer::tokenize;
//! use cminus_parser::{parse, Declaration};
//!
//! let tokens = tokenize("int x; int main(void) { x = 1; return x; }").unwrap();
//! let program = parse(tokens).unwrap();
//!
//! assert_eq!(program.declarations.len(), 2);
//! assert!(matches!(program.declarations[1], Declaration::Fun(_)));
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod printer;
pub mod window;

pub use ast::*;
pub use error::{FrontendError, ParseError, ParseErrorKind};
pub use parser::{parse, Parser, ParserConfig};
pub use printer::AstPrinter;

/// Scans and parses `source` with the default configuration
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    parse_source_with(source, ParserConfig::default())
}

/// Scans and parses `source`
pub fn parse_source_with(source: &str, config: ParserConfig) -> Result<Program, FrontendError> {
    let tokens = cminus_lexer::tokenize(source)?;
    let program = Parser::with_config(tokens, config).parse()?;
    Ok(program)
}

/// Scans and parses a single expression that must span all of `source`
pub fn parse_expression_source(source: &str) -> Result<Expr, FrontendError> {
    let tokens = cminus_lexer::tokenize(source)?;
    let expr = Parser::new(tokens).parse_standalone_expression()?;
    Ok(expr)
}
