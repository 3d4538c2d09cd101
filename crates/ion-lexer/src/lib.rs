//! Ion Lexer
//!
//! Tokenizes Ion source text into a stream of tokens.
//! Every token carries its literal text and the line/column where it starts,
//! so the parser can report diagnostics without going back to the source.
//!
//! # Example
//!
//! ```
//! use ion_lexer::{Scanner, TokenKind};
//!
//! let tokens = Scanner::tokenize("count + 1").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! assert_eq!(tokens[1].value, "+");
//! assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind};

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer error at line {line}, column {column}: {message}")]
pub struct LexerError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
