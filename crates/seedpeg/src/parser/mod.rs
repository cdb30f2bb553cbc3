//! # Parser
//!
//! Matching a [`Grammar`] against input.
//!
//! ## Overview
//!
//! The [`Parser`] ties a grammar to a [`MatchConfig`] and runs one match per
//! call, each in a fresh [`InputContext`]. Lower-level callers can drive the
//! dispatcher themselves through [`lazy_match`] with a context they own.
//!
//! PEG matching is anchored at the start of input only: a successful match
//! may stop before the end. [`MatchOutcome::is_complete`] tells whether the
//! whole input was consumed.
//!
//! ## Usage
//!
//! ```rust
//! use seedpeg::Parser;
//! use seedpeg::testing::fixtures::expression_grammar;
//!
//! let fixture = expression_grammar()?;
//! let parser = Parser::new(&fixture.grammar);
//! let outcome = parser.parse("1+25+7", fixture.start)?;
//! assert!(outcome.is_success());
//! assert!(outcome.is_complete());
//! assert_eq!(outcome.result.text(), "1+25+7");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod combinators;
pub mod context;
mod dispatch;
pub mod memo;
#[cfg(feature = "parallel")]
pub mod parallel;
mod stack;

pub use context::InputContext;
pub use dispatch::lazy_match;
pub use memo::GrowingMap;

use crate::config::MatchConfig;
use crate::error::EngineError;
use crate::event::EventHistory;
use crate::grammar::{Grammar, NodeId};
use crate::result::MatchResult;

/// The outcome of matching one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Result tree for the start node.
    pub result: MatchResult,
    /// Cursor after the match.
    pub position: usize,
    /// Input length in chars.
    pub input_len: usize,
    /// Furthest position at which a terminal failed, if tracked.
    pub furthest_failure: Option<usize>,
    /// Recorded events, if history was enabled.
    pub history: Option<EventHistory>,
}

impl MatchOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_success()
    }

    /// Whether the match succeeded and consumed the whole input.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.result.is_success() && self.position == self.input_len
    }
}

/// Matches inputs against a grammar.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
    config: MatchConfig,
}

impl<'g> Parser<'g> {
    #[must_use]
    pub fn new(grammar: &'g Grammar) -> Self {
        Self::with_config(grammar, MatchConfig::default())
    }

    #[must_use]
    pub const fn with_config(grammar: &'g Grammar, config: MatchConfig) -> Self {
        Self { grammar, config }
    }

    #[must_use]
    pub const fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Match `start` at the beginning of `input`.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is not part of the grammar or an engine
    /// invariant is breached. Input that does not match is not an error.
    pub fn parse(&self, input: &str, start: NodeId) -> Result<MatchOutcome, EngineError> {
        let mut ctx = InputContext::with_config(input, &self.config);
        tracing::debug!(start = %start, input_len = ctx.len(), "match started");

        let result = self.match_in(&mut ctx, start)?;
        let outcome = MatchOutcome {
            position: ctx.position(),
            input_len: ctx.len(),
            furthest_failure: ctx.furthest_failure(),
            history: ctx.take_history(),
            result,
        };

        tracing::debug!(
            success = outcome.is_success(),
            position = outcome.position,
            complete = outcome.is_complete(),
            memo_entries = ctx.result_count(),
            "match finished"
        );
        Ok(outcome)
    }

    /// Match the rule called `name` at the beginning of `input`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownRule`] if there is no such rule, and
    /// otherwise behaves like [`parse`](Self::parse).
    pub fn parse_rule(&self, input: &str, name: &str) -> Result<MatchOutcome, EngineError> {
        let start = self
            .grammar
            .rule(name)
            .ok_or_else(|| EngineError::UnknownRule(name.to_string()))?;
        self.parse(input, start)
    }

    /// Match `start` at the cursor of an existing context.
    ///
    /// # Errors
    ///
    /// Same as [`lazy_match`].
    pub fn match_in(
        &self,
        ctx: &mut InputContext,
        start: NodeId,
    ) -> Result<MatchResult, EngineError> {
        lazy_match(self.grammar, start, ctx)
    }
}
