use serde::Serialize;

/// A position in source text, tracking line and column for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Token classification for Ion source.
///
/// The literal text always lives in `Token::value`, so kinds stay `Copy`
/// and can be compared cheaply by the parser's `expect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Literals
    Identifier,
    String,
    Number,
    Boolean,
    Null,

    // Delimiters
    LBrace,
    RBrace,
    LParen,
    RParen,

    // Punctuation
    Colon,
    Comma,
    Equals,

    /// Operators and any other punctuation (`+`, `-`, `*`, `;`, `@`, ...).
    /// The parser tells them apart by `Token::value`.
    Symbol,

    // End of input
    Eof,
}

impl TokenKind {
    /// Human-readable description, used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string literal",
            TokenKind::Number => "number literal",
            TokenKind::Boolean => "boolean literal",
            TokenKind::Null => "`null`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::Equals => "`=`",
            TokenKind::Symbol => "symbol",
            TokenKind::Eof => "end of input",
        }
    }
}

/// A token produced by the Ion scanner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", span)
    }

    /// Whether this is a `Symbol` token with exactly the given text.
    pub fn is_symbol(&self, text: &str) -> bool {
        self.kind == TokenKind::Symbol && self.value == text
    }

    /// Short form for messages: the literal text for symbols and names,
    /// the kind description otherwise.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => self.kind.describe().to_string(),
            TokenKind::String => format!("string \"{}\"", self.value),
            _ => format!("`{}`", self.value),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} {:?} {:?}",
            self.span.line, self.span.column, self.kind, self.value
        )
    }
}
