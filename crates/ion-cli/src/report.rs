//! Compiler-style rendering of parse problems.
//!
//! ```text
//! error[AT1001]: unexpected token `@`
//!   --> demo.ion:2:5
//!    |
//!  2 | b = @
//!    |     ^
//! ```

use ion_parser::{Diagnostic, ParseError};

/// Renders problems against the source they came from.
pub struct Reporter<'a> {
    file_name: &'a str,
    source: &'a str,
}

impl<'a> Reporter<'a> {
    pub fn new(file_name: &'a str, source: &'a str) -> Self {
        Self { file_name, source }
    }

    pub fn diagnostic(&self, diagnostic: &Diagnostic) -> String {
        self.render(
            &format!("error[{}]", diagnostic.code()),
            &diagnostic.message,
            diagnostic.line,
            diagnostic.column,
        )
    }

    /// Lexer failures carry no code.
    pub fn parse_error(&self, error: &ParseError) -> String {
        self.render("error", &error.message, error.line, error.column)
    }

    fn render(&self, header: &str, message: &str, line: usize, column: usize) -> String {
        let src_line = source_line(self.source, line);
        let underline = format!("{}^", " ".repeat(column.saturating_sub(1)));

        format!(
            "{header}: {message}\n  --> {}:{line}:{column}\n   |\n{line:>3} | {src_line}\n   | {underline}\n",
            self.file_name
        )
    }
}

/// The 1-based `line` of `source`, counting `\n`, `\r\n` and a lone `\r`
/// as line breaks the way the scanner does.
fn source_line(source: &str, line: usize) -> &str {
    let is_break = |c: char| c == '\r' || c == '\n';

    let mut rest = source;
    for _ in 1..line {
        let Some(i) = rest.find(is_break) else {
            return "";
        };
        let width = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[i + width..];
    }

    match rest.find(is_break) {
        Some(i) => &rest[..i],
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ion_parser::{DiagnosticKind, Parser};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diagnostic_with_caret() {
        let source = "a = 1\nb = @\n";
        let output = Parser::parse(source).unwrap();
        let rendered = Reporter::new("demo.ion", source).diagnostic(&output.diagnostics[0]);

        assert_eq!(
            rendered,
            "error[AT1001]: unexpected token `@`\n  --> demo.ion:2:5\n   |\n  2 | b = @\n   |     ^\n"
        );
    }

    #[test]
    fn test_parse_error_without_code() {
        let source = "x = 'open";
        let err = Parser::parse(source).unwrap_err();
        let rendered = Reporter::new("<stdin>", source).parse_error(&err);

        assert!(rendered.starts_with("error: Unterminated string\n  --> <stdin>:1:5\n"));
        assert!(rendered.ends_with("   |     ^\n"));
    }

    #[test]
    fn test_line_endings_match_scanner() {
        assert_eq!(source_line("a\nb\nc", 2), "b");
        assert_eq!(source_line("a\r\nb\r\nc", 3), "c");
        assert_eq!(source_line("a\rb\rc", 2), "b");
        assert_eq!(source_line("a\r\n\r\nd", 3), "d");
        assert_eq!(source_line("a\n", 2), "");
    }

    #[test]
    fn test_caret_under_carriage_return_line() {
        let source = "a = 1\rb = @\r";
        let output = Parser::parse(source).unwrap();
        let diagnostic = &output.diagnostics[0];
        assert_eq!((diagnostic.line, diagnostic.column), (2, 5));

        let rendered = Reporter::new("old.ion", source).diagnostic(diagnostic);
        assert!(rendered.contains("  2 | b = @\n   |     ^\n"));
    }

    #[test]
    fn test_position_past_last_line() {
        let diagnostic = Diagnostic::new(DiagnosticKind::ExpectedTokenMissing, "expected `)`", 9, 1);
        let rendered = Reporter::new("f.ion", "(1").diagnostic(&diagnostic);
        assert!(rendered.contains("  9 | \n   | ^\n"));
    }
}
