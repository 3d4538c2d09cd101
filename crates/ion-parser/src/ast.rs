//! Abstract Syntax Tree for Ion expressions.
//!
//! Nodes form a plain owned tree: children are boxed, nothing is shared,
//! and a tree is immutable once the parser hands it out. Every node carries
//! the line/column it was stamped with (see `ParserOptions::positions`).

use serde::Serialize;

/// A line/column pair in the source text, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl From<ion_lexer::Span> for Position {
    fn from(span: ion_lexer::Span) -> Self {
        Self::new(span.line, span.column)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A sequence of top-level expressions, as produced by `Parser::parse`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    pub body: Vec<Expr>,
}

/// A complete expression node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

impl Expr {
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Self { kind, pos }
    }

    /// The `Null` node the parser substitutes for input it cannot parse.
    pub fn placeholder(pos: Position) -> Self {
        Self::new(ExprKind::Null, pos)
    }
}

/// Expression variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ExprKind {
    /// `null`, also the error placeholder
    Null,

    /// Numeric literal: `42`, `3.5`
    Num { value: f64 },

    /// String literal: `"hello"`
    Str { value: String },

    /// Boolean literal: `true`, `false`
    Bool { value: bool },

    /// Identifier: `count`
    Identifier { name: String },

    /// Object literal: `{ x, y: 1 }`. Order is kept and duplicate keys
    /// are allowed; a later key shadows an earlier one when evaluated.
    Object { properties: Vec<Property> },

    /// Binary arithmetic: `a + b`. Chains lean left.
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// Assignment: `a = b`. The target is not checked for assignability.
    Assign { target: Box<Expr>, value: Box<Expr> },
}

/// One `key` or `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub key: String,
    /// `None` for shorthand properties, whose value is the variable named `key`.
    pub value: Option<Expr>,
    pub pos: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            "%" => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
