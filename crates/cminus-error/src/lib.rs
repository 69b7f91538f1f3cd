//! cminus-error - Diagnostics for the C-Minus front end
//!
//! This crate provides the structures used to report scan and parse
//! failures in a clear and detailed way, in the style of the Rust compiler.
//!
//! # Example
//!
//! ```rust
//! use cminus_error::{Diagnostic, DiagnosticRenderer, ErrorCode, Position, SourceFile};
//!
//! let file = SourceFile::new("example.cm", "int x");
//!
//! let diagnostic = Diagnostic::error("expected ';', found end of input")
//!     .with_code(ErrorCode::UNEXPECTED_TOKEN)
//!     .with_label(Position::new(1, 6), 1, "expected ';' here");
//!
//! let renderer = DiagnosticRenderer::new(&file).without_colors();
//! println!("{}", renderer.render(&diagnostic));
//! ```

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticRenderer, ErrorCode, Label, SourceFile, ToDiagnostic};
pub use span::Position;
