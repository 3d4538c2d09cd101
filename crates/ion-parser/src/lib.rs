//! Ion Parser
//!
//! Turns Ion source into an expression tree. `Parser` drives the whole
//! pipeline (lexing, then one `ExprParser` call per top-level expression);
//! `ExprParser` works against any `TokenStream`, so a statement parser can
//! hand it a cursor it already owns.
//!
//! Syntax errors never abort parsing. They are collected as `Diagnostic`s
//! and the offending input is replaced by a `Null` placeholder node. Only a
//! lexer failure produces a `ParseError`.
//!
//! ```
//! use ion_parser::{printer::to_source, Parser};
//!
//! let output = Parser::parse("total = price * (qty + 1)").unwrap();
//! assert_eq!(to_source(&output.program.body[0]), "total = (price * (qty + 1))");
//! assert!(output.diagnostics.is_empty());
//! ```

pub mod ast;
pub mod cursor;
pub mod diagnostics;
pub mod expr_parser;
pub mod options;
pub mod parser;
pub mod printer;

pub use ast::{BinaryOp, Expr, ExprKind, Position, Program, Property};
pub use cursor::{TokenCursor, TokenStream};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use expr_parser::ExprParser;
pub use options::{ParserOptions, PositionMode};
pub use parser::{ParseOutput, Parser};

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
