//! Parse diagnostics.
//!
//! The expression parser never fails. Problems are recorded here and the
//! parser substitutes a placeholder node and keeps going, so one pass can
//! surface several independent syntax errors.

use serde::Serialize;

/// The kinds of diagnostic the parser produces, each with a stable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// A primary expression could not start with the current token.
    UnexpectedToken,
    /// A required token (`}`, `)`, `,`, `:`, a property key) was absent.
    ExpectedTokenMissing,
}

impl DiagnosticKind {
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::UnexpectedToken => "AT1001",
            DiagnosticKind::ExpectedTokenMissing => "AT1002",
        }
    }
}

/// A single diagnostic with its source position.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("error[{code}]: {message} (line {line}, column {column})", code = .kind.code())]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Collector the token cursor writes into while parsing.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            code = diagnostic.code(),
            line = diagnostic.line,
            column = diagnostic.column,
            "{}",
            diagnostic.message
        );
        self.items.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(DiagnosticKind::UnexpectedToken.code(), "AT1001");
        assert_eq!(DiagnosticKind::ExpectedTokenMissing.code(), "AT1002");
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::new(DiagnosticKind::UnexpectedToken, "unexpected token `@`", 1, 3);
        assert_eq!(
            d.to_string(),
            "error[AT1001]: unexpected token `@` (line 1, column 3)"
        );
    }

    #[test]
    fn test_collector_counts_by_kind() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());

        diagnostics.push(Diagnostic::new(DiagnosticKind::UnexpectedToken, "a", 1, 1));
        diagnostics.push(Diagnostic::new(DiagnosticKind::ExpectedTokenMissing, "b", 1, 2));
        diagnostics.push(Diagnostic::new(DiagnosticKind::UnexpectedToken, "c", 2, 1));

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count(DiagnosticKind::UnexpectedToken), 2);
        assert_eq!(diagnostics.count(DiagnosticKind::ExpectedTokenMissing), 1);

        let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }
}
