//! Diagnostic - compiler-style error messages
//!
//! Generates detailed error messages with:
//! - Error code (EL002, EP001, etc.)
//! - Precise location
//! - Source code snippet
//! - Fix suggestions
//!
//! The front end stops at its first error, so every diagnostic is fatal.

use crate::span::Position;
use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const BOLD_RED: &str = "\x1b[1;31m";
const BOLD_BLUE: &str = "\x1b[1;34m";
const BOLD_GREEN: &str = "\x1b[1;32m";

/// A label pointing to a specific region of the code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Where the region starts
    pub position: Position,
    /// Width of the region in characters (at least 1 when rendered)
    pub width: usize,
    /// Label message
    pub message: String,
}

impl Label {
    pub fn new(position: Position, width: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            width,
            message: message.into(),
        }
    }
}

/// Structured error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    /// Category (L = Lexer, P = Parser)
    pub category: char,
    /// Error number
    pub number: u16,
}

impl ErrorCode {
    pub const fn new(category: char, number: u16) -> Self {
        Self { category, number }
    }

    // Lexer errors
    pub const UNEXPECTED_CHAR: Self = Self::new('L', 1);
    pub const UNTERMINATED_COMMENT: Self = Self::new('L', 2);

    // Parser errors
    pub const UNEXPECTED_TOKEN: Self = Self::new('P', 1);
    pub const EXPECTED_EXPRESSION: Self = Self::new('P', 2);
    pub const EXPECTED_TYPE: Self = Self::new('P', 3);
    pub const INVALID_LITERAL: Self = Self::new('P', 4);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}{:03}", self.category, self.number)
    }
}

/// A complete diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Error code (optional)
    pub code: Option<ErrorCode>,
    /// Main message
    pub message: String,
    /// Labels pointing to the code
    pub labels: Vec<Label>,
    /// Additional notes
    pub notes: Vec<String>,
    /// Fix suggestions
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a new error
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Sets the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Adds a label
    pub fn with_label(mut self, position: Position, width: usize, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(position, width, message));
        self
    }

    /// Adds a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a fix suggestion
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

/// Converts an error value into a renderable diagnostic
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}

/// A named source text with fast line lookup
#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Offset of each line
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Returns the text of a 1-indexed line, without its line terminator
    pub fn get_line(&self, line: u32) -> Option<&str> {
        let line_idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|&e| e.saturating_sub(1))
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches('\r'))
    }

    /// Number of lines in the file
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Renders a diagnostic for display
pub struct DiagnosticRenderer<'a> {
    file: &'a SourceFile,
    use_colors: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        Self {
            file,
            use_colors: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.use_colors {
            code
        } else {
            ""
        }
    }

    /// Renders the diagnostic as a string
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();
        let reset = self.paint(RESET);
        let red = self.paint(BOLD_RED);
        let blue = self.paint(BOLD_BLUE);
        let bold = self.paint(BOLD);

        // error[EP001]: message
        output.push_str(red);
        output.push_str("error");
        if let Some(code) = &diagnostic.code {
            output.push_str(&format!("[{}]", code));
        }
        output.push_str(reset);
        output.push_str(bold);
        output.push_str(": ");
        output.push_str(&diagnostic.message);
        output.push_str(reset);
        output.push('\n');

        for label in &diagnostic.labels {
            let position = label.position;
            output.push_str(&format!(
                " {}-->{} {}:{}\n",
                blue, reset, self.file.name, position
            ));

            let Some(line_content) = self.file.get_line(position.line) else {
                continue;
            };

            let line_num = position.line.to_string();
            let padding = " ".repeat(line_num.len());

            output.push_str(&format!(" {} {}|{}\n", padding, blue, reset));
            output.push_str(&format!(
                " {}{}{} |{} {}\n",
                blue, line_num, reset, reset, line_content
            ));

            let spaces = " ".repeat(position.column.saturating_sub(1) as usize);
            let underline = "^".repeat(label.width.max(1));
            output.push_str(&format!(
                " {} {}|{} {}{}{} {}{}\n",
                padding, blue, reset, spaces, red, underline, label.message, reset
            ));
        }

        for note in &diagnostic.notes {
            output.push_str(&format!("   = {}note{}: {}\n", bold, reset, note));
        }

        let green = self.paint(BOLD_GREEN);
        for help in &diagnostic.help {
            output.push_str(&format!("   = {}help{}: {}\n", green, reset, help));
        }

        output
    }
}
