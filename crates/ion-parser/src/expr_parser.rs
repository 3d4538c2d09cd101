//! Expression parser for Ion.
//!
//! Recursive descent over a `TokenStream`, loosest rule first:
//!
//! ```text
//! expression  → assignment
//! assignment  → object_or_arithmetic ( "=" expression )?
//! object_or_arithmetic → object | additive
//! object      → "{" ( IDENT ( ":" expression )? ","? )* "}"
//! additive    → multiplicative ( ( "+" | "-" ) multiplicative )*
//! multiplicative → primary ( ( "*" | "/" | "%" ) primary )*
//! primary     → "(" expression ")" | IDENT | STRING | NUMBER | BOOLEAN | "null"
//! ```
//!
//! Parsing never fails. When `primary` cannot start on the current token it
//! reports `AT1001`, consumes that token and yields a `Null` placeholder, so
//! the caller always gets a tree back. Nesting deeper than `MAX_DEPTH` is
//! handled the same way: one diagnostic, and the nested group is skipped.

use ion_lexer::TokenKind;

use crate::ast::{BinaryOp, Expr, ExprKind, Position, Property};
use crate::cursor::TokenStream;
use crate::diagnostics::DiagnosticKind;
use crate::options::{ParserOptions, PositionMode};

/// Binary precedence levels, loosest first. Every level is left-associative.
const PRECEDENCE: &[&[BinaryOp]] = &[
    &[BinaryOp::Add, BinaryOp::Sub],
    &[BinaryOp::Mul, BinaryOp::Div, BinaryOp::Mod],
];

/// Deepest `parse_expression` recursion allowed, counting every `(`,
/// object value and assignment right-hand side.
pub const MAX_DEPTH: usize = 256;

/// Ion expression parser.
///
/// Borrows the token stream for its lifetime; the statement-level caller
/// keeps ownership and may build a new `ExprParser` for every expression.
pub struct ExprParser<'s, S: TokenStream> {
    stream: &'s mut S,
    options: ParserOptions,
    depth: usize,
}

impl<'s, S: TokenStream> ExprParser<'s, S> {
    /// Create an expression parser with default options.
    pub fn new(stream: &'s mut S) -> Self {
        Self::with_options(stream, ParserOptions::default())
    }

    pub fn with_options(stream: &'s mut S, options: ParserOptions) -> Self {
        Self {
            stream,
            options,
            depth: 0,
        }
    }

    /// Parse one full expression starting at the current token.
    pub fn parse_expression(&mut self) -> Expr {
        tracing::trace!(
            at = %self.stream.peek_position(),
            depth = self.depth,
            "parse_expression"
        );

        if self.depth >= MAX_DEPTH {
            return self.skip_too_deep();
        }

        self.depth += 1;
        let expr = self.parse_assignment();
        self.depth -= 1;
        expr
    }

    /// Report an over-deep expression and skip it: the current token, plus
    /// everything up to the bracket that closes the enclosing group.
    fn skip_too_deep(&mut self) -> Expr {
        let start = self.stream.peek_position();
        self.stream.report(
            DiagnosticKind::UnexpectedToken,
            "expression nested too deeply".to_string(),
        );

        let first = self.stream.advance();
        let mut open = usize::from(matches!(first.kind, TokenKind::LParen | TokenKind::LBrace));

        while self.stream.has_more() {
            match self.stream.current().kind {
                TokenKind::LParen | TokenKind::LBrace => open += 1,
                TokenKind::RParen | TokenKind::RBrace => {
                    if open == 0 {
                        break;
                    }
                    open -= 1;
                }
                _ => {}
            }
            self.stream.advance();
        }

        Expr::placeholder(self.stamp(start))
    }

    // =========================================================================
    // Assignment and object literals
    // =========================================================================

    /// `target = value`, right-associative. The target is parsed one level
    /// up, so it is never itself an assignment.
    fn parse_assignment(&mut self) -> Expr {
        let start = self.stream.peek_position();
        let left = self.parse_object_or_arithmetic();

        if self.stream.current().kind == TokenKind::Equals {
            self.stream.advance();
            let value = self.parse_expression();
            return self.node(
                ExprKind::Assign {
                    target: Box::new(left),
                    value: Box::new(value),
                },
                start,
            );
        }

        left
    }

    /// An object literal if the current token is `{`, otherwise arithmetic.
    fn parse_object_or_arithmetic(&mut self) -> Expr {
        if self.stream.current().kind != TokenKind::LBrace {
            return self.parse_binary(0);
        }

        let start = self.stream.peek_position();
        self.stream.advance(); // consume {

        let mut properties = Vec::new();

        while self.stream.has_more() && self.stream.current().kind != TokenKind::RBrace {
            let key_start = self.stream.peek_position();
            let key = self
                .stream
                .expect(TokenKind::Identifier)
                .map(|token| token.value)
                .unwrap_or_default();

            // Shorthand: `{ x, ... }` or `{ ..., x }`. The closing brace is
            // left for the loop condition.
            match self.stream.current().kind {
                TokenKind::Comma => {
                    self.stream.advance();
                    properties.push(self.property(key, None, key_start));
                    continue;
                }
                TokenKind::RBrace => {
                    properties.push(self.property(key, None, key_start));
                    continue;
                }
                _ => {}
            }

            self.stream.expect(TokenKind::Colon);
            let value = self.parse_expression();
            properties.push(self.property(key, Some(value), key_start));

            if self.stream.current().kind != TokenKind::RBrace {
                self.stream.expect(TokenKind::Comma);
            }
        }

        self.stream.expect(TokenKind::RBrace);

        self.node(ExprKind::Object { properties }, start)
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// One precedence level: an operand from the next level, then a loop
    /// folding same-level operators to the left.
    fn parse_binary(&mut self, level: usize) -> Expr {
        let Some(operators) = PRECEDENCE.get(level) else {
            return self.parse_primary();
        };

        let start = self.stream.peek_position();
        let mut left = self.parse_binary(level + 1);

        while let Some(op) = self.current_operator(operators) {
            self.stream.advance();
            let right = self.parse_binary(level + 1);
            left = self.node(
                ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
                start,
            );
        }

        left
    }

    /// The current token as one of `operators`, if it is one.
    fn current_operator(&self, operators: &[BinaryOp]) -> Option<BinaryOp> {
        let token = self.stream.current();
        if token.kind != TokenKind::Symbol {
            return None;
        }
        BinaryOp::from_symbol(&token.value).filter(|op| operators.contains(op))
    }

    // =========================================================================
    // Primary
    // =========================================================================

    fn parse_primary(&mut self) -> Expr {
        let start = self.stream.peek_position();

        match self.stream.current().kind {
            TokenKind::LParen => {
                self.stream.advance();
                let expr = self.parse_expression();
                self.stream.expect(TokenKind::RParen);
                expr
            }
            TokenKind::Identifier => {
                let name = self.stream.advance().value;
                self.node(ExprKind::Identifier { name }, start)
            }
            TokenKind::String => {
                let value = self.stream.advance().value;
                self.node(ExprKind::Str { value }, start)
            }
            TokenKind::Number => {
                let text = self.stream.advance().value;
                let value = text.parse::<f64>().unwrap_or_else(|_| {
                    tracing::warn!(%text, "malformed number literal");
                    f64::NAN
                });
                self.node(ExprKind::Num { value }, start)
            }
            TokenKind::Boolean => {
                let value = self.stream.advance().value == "true";
                self.node(ExprKind::Bool { value }, start)
            }
            TokenKind::Null => {
                self.stream.advance();
                self.node(ExprKind::Null, start)
            }
            _ => {
                let current = self.stream.current();
                let message = if current.kind == TokenKind::Eof {
                    "unexpected end of input".to_string()
                } else {
                    format!("unexpected token {}", current.describe())
                };
                self.stream.report(DiagnosticKind::UnexpectedToken, message);
                // Always consume, so callers looping on tokens make progress.
                self.stream.advance();
                Expr::placeholder(self.stamp(start))
            }
        }
    }

    // =========================================================================
    // Node construction
    // =========================================================================

    fn node(&self, kind: ExprKind, start: Position) -> Expr {
        Expr::new(kind, self.stamp(start))
    }

    fn property(&self, key: String, value: Option<Expr>, start: Position) -> Property {
        Property {
            key,
            value,
            pos: self.stamp(start),
        }
    }

    fn stamp(&self, start: Position) -> Position {
        match self.options.positions {
            PositionMode::Completion => self.stream.position(),
            PositionMode::Start => start,
        }
    }
}
