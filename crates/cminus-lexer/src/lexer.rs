//! Lexer for the C-Minus language
//!
//! Converts source code into a sequence of tokens. Whitespace and
//! `/* ... */` comments are skipped; comments do not nest.

use crate::error::ScanError;
use crate::token::{Token, TokenKind};
use cminus_error::Position;

/// The C-Minus Lexer
pub struct Lexer<'src> {
    /// Source code being analyzed
    source: &'src str,
    /// Byte offset of the next unread character
    pos: usize,
    /// Current line (1-indexed)
    line: u32,
    /// Current column (1-indexed)
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source code
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Returns the next character without advancing
    fn peek_next(&self) -> Option<char> {
        self.source[self.pos..].chars().nth(1)
    }

    /// Advances to the next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Consumes the current character if it is `expected`
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Creates a position at the current location
    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Skips whitespace, newlines included
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C') {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skips a `/* ... */` comment; the first `*/` closes it
    fn skip_comment(&mut self) -> Result<(), ScanError> {
        let start = self.current_position();
        self.advance(); // consume '/'
        self.advance(); // consume '*'

        while let Some(ch) = self.advance() {
            if ch == '*' && self.match_char('/') {
                return Ok(());
            }
        }

        Err(ScanError::UnterminatedComment {
            start,
            end: self.current_position(),
        })
    }

    /// Skips any run of whitespace and comments
    fn skip_trivia(&mut self) -> Result<(), ScanError> {
        loop {
            self.skip_whitespace();

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.skip_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    /// Reads an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let start = self.current_position();
        let offset = self.pos;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() {
                self.advance();
            } else {
                break;
            }
        }

        let ident = &self.source[offset..self.pos];
        let kind = TokenKind::keyword_from_str(ident).unwrap_or(TokenKind::Id);

        Token::new(kind, ident, start)
    }

    /// Reads a decimal integer literal; the digits are kept as text
    fn read_number(&mut self) -> Token {
        let start = self.current_position();
        let offset = self.pos;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Num, &self.source[offset..self.pos], start)
    }

    /// Reads the next token
    ///
    /// Past the end of input this keeps returning an EOF token.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        self.skip_trivia()?;

        let start = self.current_position();
        let offset = self.pos;

        let ch = match self.peek() {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::Eof, "", start)),
        };

        if ch.is_ascii_alphabetic() {
            return Ok(self.read_identifier());
        }

        if ch.is_ascii_digit() {
            return Ok(self.read_number());
        }

        // Operators and punctuation
        self.advance();
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Times,
            '/' => TokenKind::Divide,
            '=' => {
                if self.match_char('=') {
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.match_char('=') {
                    TokenKind::Ne
                } else {
                    TokenKind::Error
                }
            }
            '<' => {
                if self.match_char('=') {
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            _ => TokenKind::Error,
        };

        Ok(Token::new(kind, &self.source[offset..self.pos], start))
    }

    /// Tokenizes the entire source code, ending with a single EOF token
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        tracing::trace!(count = tokens.len(), "tokenized source");
        Ok(tokens)
    }
}

/// Tokenizes source code and returns the tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScanError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !matches!(k, TokenKind::Eof))
            .collect()
    }

    fn lexemes(source: &str) -> Vec<String> {
        tokenize(source).unwrap().into_iter().map(|t| t.lexeme).collect()
    }

    #[test]
    fn test_basic_tokens() {
        let tokens = lex("int x[10];");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Int,
                TokenKind::Id,
                TokenKind::LBracket,
                TokenKind::Num,
                TokenKind::RBracket,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        let tokens = lex("if else int return void while");
        assert_eq!(
            tokens,
            vec![
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Int,
                TokenKind::Return,
                TokenKind::Void,
                TokenKind::While,
            ]
        );
    }

    #[test]
    fn test_keywords_are_exact_matches() {
        let tokens = lex("If whilex int2 voidd");
        assert_eq!(tokens, vec![TokenKind::Id; 4]);
        assert_eq!(lexemes("int2"), vec!["int2", ""]);
    }

    #[test]
    fn test_operators() {
        let tokens = lex("+ - * / = == != < <= > >=");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Times,
                TokenKind::Divide,
                TokenKind::Assign,
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Ge,
            ]
        );
    }

    #[test]
    fn test_longest_match_without_spaces() {
        assert_eq!(
            lex("a<=b==c>=d"),
            vec![
                TokenKind::Id,
                TokenKind::Le,
                TokenKind::Id,
                TokenKind::Eq,
                TokenKind::Id,
                TokenKind::Ge,
                TokenKind::Id,
            ]
        );
        assert_eq!(lex("=<"), vec![TokenKind::Assign, TokenKind::Lt]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            lex("; , ( ) [ ] { }"),
            vec![
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::RBrace,
            ]
        );
    }

    #[test]
    fn test_numbers_keep_raw_text_and_no_sign() {
        let tokens = tokenize("-0042").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Minus);
        assert_eq!(tokens[1].kind, TokenKind::Num);
        assert_eq!(tokens[1].lexeme, "0042");
    }

    #[test]
    fn test_digits_then_letters_split() {
        assert_eq!(lexemes("12ab"), vec!["12", "ab", ""]);
    }

    #[test]
    fn test_unknown_characters_become_error_tokens() {
        let tokens = tokenize("x = @ ! _").unwrap();
        let errors: Vec<_> = tokens
            .iter()
            .filter(|t| t.is_error())
            .map(|t| t.lexeme.as_str())
            .collect();
        assert_eq!(errors, vec!["@", "!", "_"]);
    }

    #[test]
    fn test_non_ascii_character_is_one_error_token() {
        let tokens = tokenize("é1").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].lexeme, "é");
        assert_eq!(tokens[1].kind, TokenKind::Num);
        assert_eq!(tokens[1].position, Position::new(1, 2));
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            lex("int /* a comment */ x /* another */;"),
            vec![TokenKind::Int, TokenKind::Id, TokenKind::Semicolon]
        );
    }

    #[test]
    fn test_comments_do_not_nest() {
        // The first */ closes the comment, leaving "*/" behind as tokens
        assert_eq!(
            lex("/* outer /* inner */ */"),
            vec![TokenKind::Times, TokenKind::Divide]
        );
    }

    #[test]
    fn test_comment_with_stars() {
        assert_eq!(lex("/***/ x /** y **/"), vec![TokenKind::Id]);
    }

    #[test]
    fn test_divide_is_not_a_comment() {
        assert_eq!(lex("a / b"), vec![TokenKind::Id, TokenKind::Divide, TokenKind::Id]);
    }

    #[test]
    fn test_line_counting() {
        let tokens = tokenize("int\n/* one\ntwo */ x\n\n;").unwrap();
        let lines: Vec<u32> = tokens.iter().map(|t| t.line()).collect();
        assert_eq!(lines, vec![1, 3, 5, 5]);
        assert_eq!(tokens[1].position, Position::new(3, 8));
    }

    #[test]
    fn test_unterminated_comment() {
        let err = tokenize("int x;\n/* never\ncloses").unwrap_err();
        assert_eq!(
            err,
            ScanError::UnterminatedComment {
                start: Position::new(2, 1),
                end: Position::new(3, 7),
            }
        );
        assert_eq!(err.line(), 3);
        assert_eq!(err.to_string(), "unterminated comment at line 3");
    }

    #[test]
    fn test_unterminated_comment_after_lone_slash_star() {
        assert!(tokenize("/*/").is_err());
    }

    #[test]
    fn test_eof_is_repeated() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Id);
        for _ in 0..3 {
            let token = lexer.next_token().unwrap();
            assert!(token.is_eof());
            assert_eq!(token.lexeme, "");
        }
    }

    #[test]
    fn test_empty_source() {
        let tokens = tokenize("   \n\t").unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert_eq!(tokens[0].line(), 2);
    }
}
