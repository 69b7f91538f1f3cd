//! Scan errors

use cminus_error::{Diagnostic, ErrorCode, Position, ToDiagnostic};
use thiserror::Error;

/// Fatal scanner failures
///
/// Unrecognized characters are not scan errors: they come out as
/// `TokenKind::Error` tokens and are rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// End of input reached inside a `/* ... */` comment
    #[error("unterminated comment at line {}", end.line)]
    UnterminatedComment {
        /// Where the comment opened
        start: Position,
        /// End of input
        end: Position,
    },
}

impl ScanError {
    /// Position the error is reported at
    pub fn position(&self) -> Position {
        match self {
            ScanError::UnterminatedComment { end, .. } => *end,
        }
    }

    /// Line the error is reported at
    pub fn line(&self) -> u32 {
        self.position().line
    }
}

impl ToDiagnostic for ScanError {
    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ScanError::UnterminatedComment { start, end } => Diagnostic::error(self.to_string())
                .with_code(ErrorCode::UNTERMINATED_COMMENT)
                .with_label(*start, 2, "comment starts here but was not closed")
                .with_note(format!("end of input reached at {}", end))
                .with_help("add */ to close the comment"),
        }
    }
}
