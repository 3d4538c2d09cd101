//! Parser configuration.
//!
//! Options deserialize from any serde format, with every field optional.

use serde::Deserialize;

/// Where a node's recorded position comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    /// The last token consumed when the node was finished. This is what
    /// existing diagnostics tooling expects, so it stays the default.
    #[default]
    Completion,
    /// The first token of the node's construct.
    Start,
}

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    pub positions: PositionMode,
}

impl ParserOptions {
    pub fn with_positions(mut self, positions: PositionMode) -> Self {
        self.positions = positions;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_completion() {
        assert_eq!(ParserOptions::default().positions, PositionMode::Completion);
    }

    #[test]
    fn test_deserialize() {
        let options: ParserOptions = serde_json::from_str(r#"{ "positions": "start" }"#).unwrap();
        assert_eq!(options.positions, PositionMode::Start);

        let options: ParserOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ParserOptions::default());
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result = serde_json::from_str::<ParserOptions>(r#"{ "positions": "end" }"#);
        assert!(result.is_err());
    }
}
