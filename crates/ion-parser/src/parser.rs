//! Program driver for Ion.
//!
//! Lexes source text (via `ion-lexer`) and parses it into a `Program`: a
//! flat list of top-level expressions, optionally separated by `;`.
//! Statement-level structure is out of scope here; this driver exists so
//! the expression parser can be used end to end.

use ion_lexer::{Scanner, Token};
use serde::Serialize;

use crate::ast::{Expr, Program};
use crate::cursor::{TokenCursor, TokenStream};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::expr_parser::ExprParser;
use crate::options::ParserOptions;
use crate::ParseError;

/// The result of parsing a program: always a tree, plus whatever went wrong.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutput {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Ion program parser.
pub struct Parser<'d> {
    cursor: TokenCursor<'d>,
    options: ParserOptions,
}

impl<'d> Parser<'d> {
    /// Create a parser over already-lexed tokens.
    pub fn new(tokens: Vec<Token>, diagnostics: &'d mut Diagnostics, options: ParserOptions) -> Self {
        Self {
            cursor: TokenCursor::new(tokens, diagnostics),
            options,
        }
    }

    /// Parse source code into a program with default options.
    pub fn parse(source: &str) -> Result<ParseOutput, ParseError> {
        Parser::parse_with(source, ParserOptions::default())
    }

    pub fn parse_with(source: &str, options: ParserOptions) -> Result<ParseOutput, ParseError> {
        let tokens = lex(source)?;

        let mut diagnostics = Diagnostics::new();
        let program = Parser::new(tokens, &mut diagnostics, options).parse_program();

        tracing::debug!(
            expressions = program.body.len(),
            diagnostics = diagnostics.len(),
            "parsed program"
        );

        Ok(ParseOutput {
            program,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Parse source that should hold exactly one expression. Anything left
    /// over is reported as `UnexpectedToken` and ignored.
    pub fn parse_expression_str(source: &str) -> Result<(Expr, Vec<Diagnostic>), ParseError> {
        let tokens = lex(source)?;

        let mut diagnostics = Diagnostics::new();
        let expr = {
            let mut parser = Parser::new(tokens, &mut diagnostics, ParserOptions::default());
            let expr = parser.parse_one();
            if parser.cursor.has_more() {
                let message = format!(
                    "unexpected token {} after expression",
                    parser.cursor.current().describe()
                );
                parser.cursor.report(DiagnosticKind::UnexpectedToken, message);
            }
            expr
        };

        Ok((expr, diagnostics.into_vec()))
    }

    /// Parse top-level expressions until the end of input.
    pub fn parse_program(&mut self) -> Program {
        let mut body = Vec::new();

        while self.cursor.has_more() {
            if self.cursor.current().is_symbol(";") {
                self.cursor.advance();
                continue;
            }
            body.push(self.parse_one());
        }

        Program { body }
    }

    fn parse_one(&mut self) -> Expr {
        ExprParser::with_options(&mut self.cursor, self.options).parse_expression()
    }
}

fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    Scanner::tokenize(source).map_err(|e| ParseError {
        message: e.message,
        line: e.line,
        column: e.column,
    })
}
