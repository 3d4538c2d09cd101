//! Render expressions back to Ion source.
//!
//! Output is fully parenthesised so the tree shape is visible at a glance:
//! every binary node is wrapped, an assignment is wrapped unless it is the
//! outermost node, and an object is wrapped when it is an arithmetic
//! operand. The result parses back to the same tree (positions aside).

use crate::ast::{Expr, ExprKind};

/// Where a node sits relative to its parent.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Slot {
    Outermost,
    Nested,
    /// Operand of a binary node. `{` cannot start an operand, so objects
    /// need parentheses here.
    Operand,
}

/// Render an expression as fully parenthesised source.
pub fn to_source(expr: &Expr) -> String {
    render(expr, Slot::Outermost)
}

fn render(expr: &Expr, slot: Slot) -> String {
    match &expr.kind {
        ExprKind::Null => "null".into(),
        ExprKind::Num { value } => format_number(*value),
        ExprKind::Str { value } => quote(value),
        ExprKind::Bool { value } => value.to_string(),
        ExprKind::Identifier { name } => name.clone(),
        ExprKind::Object { properties } => {
            let text = if properties.is_empty() {
                "{}".to_string()
            } else {
                let parts: Vec<String> = properties
                    .iter()
                    .map(|p| match &p.value {
                        Some(value) => format!("{}: {}", p.key, render(value, Slot::Nested)),
                        None => p.key.clone(),
                    })
                    .collect();
                format!("{{ {} }}", parts.join(", "))
            };
            if slot == Slot::Operand {
                format!("({text})")
            } else {
                text
            }
        }
        ExprKind::Binary { left, op, right } => {
            format!(
                "({} {} {})",
                render(left, Slot::Operand),
                op,
                render(right, Slot::Operand)
            )
        }
        ExprKind::Assign { target, value } => {
            let text = format!(
                "{} = {}",
                render(target, Slot::Nested),
                render(value, Slot::Nested)
            );
            if slot == Slot::Outermost {
                text
            } else {
                format!("({text})")
            }
        }
    }
}

/// Format a number, dropping the fraction when it is integral.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
