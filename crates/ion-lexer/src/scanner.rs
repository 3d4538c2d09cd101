use crate::token::{Span, Token, TokenKind};
use crate::LexerError;

/// Characters the scanner passes through as generic `Symbol` tokens.
/// Arithmetic operators live here; so does punctuation the expression
/// grammar does not use, which the parser reports on its own.
const SYMBOLS: &[char] = &[
    '+', '-', '*', '/', '%', ';', '@', '.', '!', '<', '>', '&', '|', '?', '[', ']', '#', '$',
    '^', '~',
];

/// Ion source scanner.
///
/// Tokenizes source text into a flat token stream terminated by `Eof`.
/// Uses a `Vec<char>` for index-based navigation and tracks line/column
/// on every token.
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    /// Create a new scanner for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens()?;
        tracing::trace!(count = scanner.tokens.len(), "scanned tokens");
        Ok(scanner.tokens)
    }

    /// Scan all tokens from the source.
    fn scan_tokens(&mut self) -> Result<(), LexerError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        self.emit(TokenKind::Eof, String::new(), self.pos, self.line, self.column);
        Ok(())
    }

    /// Scan the next token.
    fn scan_token(&mut self) -> Result<(), LexerError> {
        let ch = self.peek();

        match ch {
            ' ' | '\t' => {
                self.advance();
                Ok(())
            }
            '\n' => {
                self.advance();
                self.newline();
                Ok(())
            }
            '\r' => {
                self.advance();
                // Handle \r\n as single newline
                if !self.is_at_end() && self.peek() == '\n' {
                    self.advance();
                }
                self.newline();
                Ok(())
            }

            // Comments
            '/' if self.peek_next() == '/' => {
                self.skip_comment();
                Ok(())
            }

            '"' | '\'' => self.scan_string(),
            '0'..='9' => self.scan_number(),

            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            ':' => self.single(TokenKind::Colon),
            ',' => self.single(TokenKind::Comma),
            '=' => self.single(TokenKind::Equals),
            c if SYMBOLS.contains(&c) => self.single(TokenKind::Symbol),

            c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(),

            _ => Err(self.error(format!("Unexpected character: '{ch}'"))),
        }
    }

    // --- Scanners ---

    /// Emit a one-character token whose value is the character itself.
    fn single(&mut self, kind: TokenKind) -> Result<(), LexerError> {
        let (start, line, column) = (self.pos, self.line, self.column);
        let value = self.peek().to_string();
        self.advance();
        self.emit(kind, value, start, line, column);
        Ok(())
    }

    /// Scan a string literal. The token value is the unescaped contents.
    fn scan_string(&mut self) -> Result<(), LexerError> {
        let quote = self.peek();
        let (start, line, column) = (self.pos, self.line, self.column);
        self.advance(); // consume opening quote

        let mut value = String::new();

        while !self.is_at_end() && self.peek() != quote {
            match self.peek() {
                '\\' => {
                    self.advance(); // consume backslash
                    if self.is_at_end() {
                        return Err(self.error("Unterminated escape sequence".into()));
                    }
                    match self.peek() {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        '\\' => value.push('\\'),
                        '"' => value.push('"'),
                        '\'' => value.push('\''),
                        c => {
                            value.push('\\');
                            value.push(c);
                        }
                    }
                    self.advance();
                }
                '\n' => {
                    value.push('\n');
                    self.advance();
                    self.newline();
                }
                c => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        if self.is_at_end() {
            return Err(LexerError {
                message: "Unterminated string".into(),
                line,
                column,
            });
        }

        self.advance(); // consume closing quote
        self.emit(TokenKind::String, value, start, line, column);
        Ok(())
    }

    /// Scan an identifier or one of the literal keywords.
    fn scan_identifier(&mut self) -> Result<(), LexerError> {
        let (start, line, column) = (self.pos, self.line, self.column);

        while !self.is_at_end() && (self.peek().is_ascii_alphanumeric() || self.peek() == '_') {
            self.advance();
        }

        let ident = self.text_from(start);
        let kind = match ident.as_str() {
            "true" | "false" => TokenKind::Boolean,
            "null" => TokenKind::Null,
            _ => TokenKind::Identifier,
        };
        self.emit(kind, ident, start, line, column);
        Ok(())
    }

    /// Scan a number literal (integer or decimal fraction). The parser
    /// converts the text; a dot not followed by a digit is left alone.
    fn scan_number(&mut self) -> Result<(), LexerError> {
        let (start, line, column) = (self.pos, self.line, self.column);

        while !self.is_at_end() && self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.text_from(start);
        self.emit(TokenKind::Number, text, start, line, column);
        Ok(())
    }

    /// Skip a line comment (`// ...`) up to, not including, the line break.
    fn skip_comment(&mut self) {
        while !self.is_at_end() && self.peek() != '\n' && self.peek() != '\r' {
            self.advance();
        }
    }

    // --- Helpers ---

    fn emit(&mut self, kind: TokenKind, value: String, start: usize, line: usize, column: usize) {
        let span = Span::new(start, self.pos, line, column);
        self.tokens.push(Token::new(kind, value, span));
    }

    fn text_from(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos]
        }
    }

    fn peek_next(&self) -> char {
        if self.pos + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.pos + 1]
        }
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
            self.column += 1;
        }
    }

    fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.line,
            column: self.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: tokenize and return token kinds (ignoring spans).
    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    /// Helper: tokenize and return token values.
    fn values(source: &str) -> Vec<String> {
        Scanner::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.value)
            .collect()
    }

    fn tokens(source: &str) -> Vec<Token> {
        Scanner::tokenize(source).unwrap()
    }

    // =========================================================================
    // Structure
    // =========================================================================

    #[test]
    fn test_empty_source() {
        let toks = tokens("");
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Eof);
        assert_eq!(toks[0].span, Span::new(0, 0, 1, 1));
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(kinds("  \n\t \r\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_comment_skipped() {
        assert_eq!(
            kinds("a // the rest is ignored + 1\nb"),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    // =========================================================================
    // Literals
    // =========================================================================

    #[test]
    fn test_integer_and_float() {
        let toks = tokens("42 2.75");
        assert_eq!(toks[0].kind, TokenKind::Number);
        assert_eq!(toks[0].value, "42");
        assert_eq!(toks[1].kind, TokenKind::Number);
        assert_eq!(toks[1].value, "2.75");
    }

    #[test]
    fn test_number_followed_by_dot() {
        assert_eq!(values("1.x"), vec!["1", ".", "x", ""]);
    }

    #[test]
    fn test_double_and_single_quoted_strings() {
        let toks = tokens("\"hello\" 'world'");
        assert_eq!(toks[0].kind, TokenKind::String);
        assert_eq!(toks[0].value, "hello");
        assert_eq!(toks[1].value, "world");
    }

    #[test]
    fn test_string_escapes() {
        let toks = tokens(r#""a\nb\t\"q\"\\""#);
        assert_eq!(toks[0].value, "a\nb\t\"q\"\\");
    }

    #[test]
    fn test_string_unterminated() {
        let err = Scanner::tokenize("x = 'open").unwrap_err();
        assert!(err.message.contains("Unterminated string"));
        assert_eq!((err.line, err.column), (1, 5));
    }

    #[test]
    fn test_keyword_literals() {
        assert_eq!(
            kinds("true false null nullable"),
            vec![
                TokenKind::Boolean,
                TokenKind::Boolean,
                TokenKind::Null,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifier_with_underscore_and_digits() {
        let toks = tokens("_tmp1 snake_case");
        assert_eq!(toks[0].value, "_tmp1");
        assert_eq!(toks[1].value, "snake_case");
    }

    // =========================================================================
    // Punctuation and symbols
    // =========================================================================

    #[test]
    fn test_object_literal_tokens() {
        assert_eq!(
            kinds("{ x, y: 1 }"),
            vec![
                TokenKind::LBrace,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Number,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_arithmetic_operators_are_symbols() {
        let toks = tokens("a + b - c * d / e % f");
        let ops: Vec<&str> = toks
            .iter()
            .filter(|t| t.kind == TokenKind::Symbol)
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(ops, vec!["+", "-", "*", "/", "%"]);
    }

    #[test]
    fn test_assignment_and_parens() {
        assert_eq!(
            kinds("a = (b)"),
            vec![
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::LParen,
                TokenKind::Identifier,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_stray_symbol_passes_through() {
        let toks = tokens("@");
        assert_eq!(toks[0].kind, TokenKind::Symbol);
        assert!(toks[0].is_symbol("@"));
    }

    #[test]
    fn test_unknown_character_rejected() {
        let err = Scanner::tokenize("a\n  `b`").unwrap_err();
        assert!(err.message.contains("Unexpected character"));
        assert_eq!((err.line, err.column), (2, 3));
    }

    // =========================================================================
    // Positions
    // =========================================================================

    #[test]
    fn test_line_and_column_tracking() {
        let toks = tokens("a +\n  bc");
        assert_eq!((toks[0].span.line, toks[0].span.column), (1, 1));
        assert_eq!((toks[1].span.line, toks[1].span.column), (1, 3));
        assert_eq!((toks[2].span.line, toks[2].span.column), (2, 3));
        assert_eq!((toks[2].span.start, toks[2].span.end), (6, 8));
    }

    #[test]
    fn test_windows_line_endings() {
        let toks = tokens("a\r\nb");
        assert_eq!(toks[1].span.line, 2);
        assert_eq!(toks[1].span.column, 1);
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let toks = tokens("'a\nb' c");
        assert_eq!(toks[0].value, "a\nb");
        assert_eq!(toks[1].span.line, 2);
    }
}
