//! Token window
//!
//! The whole token sequence is produced before parsing starts, so the
//! window is just the sequence plus a cursor. Lookahead is an index and
//! returning tokens to the stream is a cursor move.

use cminus_error::Position;
use cminus_lexer::{Token, TokenKind};

/// Cursor over a complete token sequence
pub struct TokenWindow {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenWindow {
    /// Creates a window over `tokens`
    ///
    /// A trailing EOF token is appended if the sequence does not end with
    /// one, so reads past the end always yield EOF.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let position = tokens.last().map(|t| t.position).unwrap_or(Position::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", position));
        }

        Self { tokens, pos: 0 }
    }

    fn get(&self, index: usize) -> &Token {
        // The constructor guarantees a final EOF token
        &self.tokens[index.min(self.tokens.len() - 1)]
    }

    /// Token at the cursor
    pub fn current(&self) -> &Token {
        self.get(self.pos)
    }

    /// Token one past the cursor
    pub fn peek(&self) -> &Token {
        self.get(self.pos + 1)
    }

    /// Kind of the token at the cursor
    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Checks the kind of the token at the cursor
    pub fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Consumes the current token and returns it
    ///
    /// At EOF the cursor stays put and EOF is returned again.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Returns the two most recently consumed tokens to the front
    ///
    /// Only valid right after two successful `advance` calls.
    pub fn rewind_two(&mut self) {
        debug_assert!(self.pos >= 2, "rewind_two needs two consumed tokens");
        self.pos = self.pos.saturating_sub(2);
        tracing::trace!(at = %self.current().position, "returned two tokens to the window");
    }

    /// Whether only EOF is left
    pub fn is_at_end(&self) -> bool {
        self.current().is_eof()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cminus_lexer::tokenize;

    fn window(source: &str) -> TokenWindow {
        TokenWindow::new(tokenize(source).unwrap())
    }

    #[test]
    fn test_current_and_peek() {
        let mut window = window("int x ;");
        assert_eq!(window.kind(), TokenKind::Int);
        assert_eq!(window.peek().kind, TokenKind::Id);

        let consumed = window.advance();
        assert_eq!(consumed.kind, TokenKind::Int);
        assert_eq!(window.current().lexeme, "x");
        assert_eq!(window.peek().kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_rewind_two_restores_the_same_tokens() {
        let mut window = window("int x [ 3 ] ;");
        let ty = window.advance();
        let id = window.advance();
        assert!(window.check(TokenKind::LBracket));

        window.rewind_two();
        assert_eq!(window.advance(), ty);
        assert_eq!(window.advance(), id);
        assert!(window.check(TokenKind::LBracket));
    }

    #[test]
    fn test_reads_past_end_yield_eof() {
        let mut window = window("x");
        window.advance();
        assert!(window.is_at_end());
        assert!(window.peek().is_eof());
        assert!(window.advance().is_eof());
        assert!(window.advance().is_eof());
    }

    #[test]
    fn test_missing_eof_is_appended() {
        let tokens = vec![Token::new(TokenKind::Id, "a", Position::new(2, 5))];
        let mut window = TokenWindow::new(tokens);
        window.advance();
        assert!(window.is_at_end());
        assert_eq!(window.current().position, Position::new(2, 5));

        let empty = TokenWindow::new(Vec::new());
        assert!(empty.is_at_end());
    }
}
