//! # Error Types
//!
//! Errors raised by grammar construction and by the matching engine.
//!
//! ## Overview
//!
//! Ordinary non-matching input is *not* an error: it is represented by a
//! failing [`MatchResult`](crate::result::MatchResult) and handled through
//! local backtracking inside the combinators. The types in this module cover
//! the two remaining categories:
//!
//! - [`GrammarError`]: misuse of [`GrammarBuilder`](crate::grammar::GrammarBuilder),
//!   such as referencing a node handle from another builder, leaving a reserved
//!   rule undefined, or giving a repetition a maximum below its minimum.
//! - [`EngineError`]: a breached engine invariant, such as reading past the end
//!   of the input. These indicate a bug in a combinator or in the engine itself,
//!   never a property of the input text.

use crate::grammar::NodeId;
use thiserror::Error;

/// Error raised while building a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("node {0} does not belong to this grammar")]
    UnknownNode(NodeId),

    #[error("node {0} is not a rule")]
    NotARule(NodeId),

    #[error("rule name must not be empty")]
    EmptyRuleName,

    #[error("rule '{name}' is already declared")]
    DuplicateRule { name: String },

    #[error("rule '{name}' already has a body")]
    RuleAlreadyDefined { name: String },

    #[error("rule '{name}' was reserved but never given a body")]
    UndefinedRule { name: String },

    #[error("invalid repetition bounds: minimum {min} exceeds maximum {max}")]
    InvalidRepetitionBounds { min: usize, max: usize },
}

/// Error raised when an engine invariant is breached during matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cursor read past end of input at position {position} (input length {len})")]
    CursorPastEnd { position: usize, len: usize },

    #[error("cursor position {position} is outside the input (length {len})")]
    PositionOutOfBounds { position: usize, len: usize },

    #[error("node {0} does not belong to the grammar being matched")]
    UnknownNode(NodeId),

    #[error("grammar has no rule named '{0}'")]
    UnknownRule(String),
}

impl EngineError {
    /// The input position the error refers to, if any.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::CursorPastEnd { position, .. } | Self::PositionOutOfBounds { position, .. } => {
                Some(*position)
            }
            Self::UnknownNode(_) | Self::UnknownRule(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GrammarError::InvalidRepetitionBounds { min: 3, max: 1 };
        assert_eq!(
            err.to_string(),
            "invalid repetition bounds: minimum 3 exceeds maximum 1"
        );

        let err = EngineError::CursorPastEnd { position: 4, len: 4 };
        assert_eq!(
            err.to_string(),
            "cursor read past end of input at position 4 (input length 4)"
        );
    }

    #[test]
    fn test_engine_error_position() {
        assert_eq!(
            EngineError::PositionOutOfBounds { position: 9, len: 3 }.position(),
            Some(9)
        );
        assert_eq!(EngineError::UnknownRule("Expr".into()).position(), None);
    }
}
