//! cminus-lexer - Scanner for the C-Minus language
//!
//! This crate converts C-Minus source code into a sequence of tokens.
//!
//! # Features
//!
//! - Keywords: `if else int return void while`
//! - Decimal integer literals, kept as raw text
//! - One- and two-character operators (longest match wins)
//! - `/* ... */` comments (not nested)
//! - Unknown characters surface as `TokenKind::Error` tokens
//!
//! # Example
//!
//! ```rust
//! use cminus_lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("int x; /* comment */").unwrap();
//!
//! assert_eq!(tokens[0].kind, TokenKind::Int);
//! assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
//! ```

pub mod error;
pub mod lexer;
pub mod token;

pub use error::ScanError;
pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
