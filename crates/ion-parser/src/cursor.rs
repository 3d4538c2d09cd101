//! Token cursor.
//!
//! `TokenStream` is the narrow interface the expression parser consumes:
//! one-token lookahead, consumption, expectation checks and diagnostic
//! reporting. `TokenCursor` is the implementation used by `Parser`.

use ion_lexer::{Span, Token, TokenKind};

use crate::ast::Position;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};

/// Cursor primitives over a token stream.
pub trait TokenStream {
    /// The current token, without consuming it.
    fn current(&self) -> &Token;

    /// Consume and return the current token. At end of input this keeps
    /// returning the `Eof` token.
    fn advance(&mut self) -> Token;

    /// True while the current token is not `Eof`.
    fn has_more(&self) -> bool;

    /// Consume the current token if it has the given kind. Otherwise report
    /// `ExpectedTokenMissing` and return `None` without consuming.
    fn expect(&mut self, kind: TokenKind) -> Option<Token>;

    /// Record a diagnostic at the current token.
    fn report(&mut self, kind: DiagnosticKind, message: String);

    /// Position of the most recently consumed token.
    fn position(&self) -> Position;

    /// Position of the current token.
    fn peek_position(&self) -> Position {
        self.current().span.into()
    }
}

/// A `TokenStream` over a token vector, writing into a borrowed
/// diagnostics collector.
pub struct TokenCursor<'d> {
    tokens: Vec<Token>,
    pos: usize,
    last: Position,
    diagnostics: &'d mut Diagnostics,
}

impl<'d> TokenCursor<'d> {
    /// Create a cursor. An `Eof` token is appended if the stream lacks one.
    pub fn new(mut tokens: Vec<Token>, diagnostics: &'d mut Diagnostics) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let span = tokens
                .last()
                .map(|t| Span::new(t.span.end, t.span.end, t.span.line, t.span.column))
                .unwrap_or(Span::new(0, 0, 1, 1));
            tokens.push(Token::eof(span));
        }

        let last = tokens[0].span.into();
        Self {
            tokens,
            pos: 0,
            last,
            diagnostics,
        }
    }
}

impl TokenStream for TokenCursor<'_> {
    fn current(&self) -> &Token {
        // `new` guarantees a trailing Eof and `advance` never moves past it
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        self.last = token.span.into();
        token
    }

    fn has_more(&self) -> bool {
        self.current().kind != TokenKind::Eof
    }

    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.current().kind == kind {
            return Some(self.advance());
        }

        let message = format!(
            "expected {}, found {}",
            kind.describe(),
            self.current().describe()
        );
        self.report(DiagnosticKind::ExpectedTokenMissing, message);
        None
    }

    fn report(&mut self, kind: DiagnosticKind, message: String) {
        let Position { line, column } = self.peek_position();
        self.diagnostics
            .push(Diagnostic::new(kind, message, line, column));
    }

    fn position(&self) -> Position {
        self.last
    }
}
