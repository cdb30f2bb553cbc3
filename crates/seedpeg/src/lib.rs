//! # Seedpeg
//!
//! A packrat PEG matching engine with support for direct left recursion.
//!
//! ## Overview
//!
//! Grammars are built once as a graph of pattern nodes through a
//! [`GrammarBuilder`] and matched against character input by a [`Parser`].
//! Every named rule application is memoized per input position, so matching
//! runs in linear time for a fixed grammar.
//!
//! Direct left recursion (`Expression <- Expression "+" Number / Number`) is
//! handled by seed growing: the first application of a left-recursive rule at
//! a position fails, the non-recursive alternative plants a seed, and the
//! rule is re-evaluated until the match stops getting longer. The resulting
//! trees are left-associative.
//!
//! ## Quick Start
//!
//! ```rust
//! use seedpeg::{GrammarBuilder, Parser, RecursionStatus};
//!
//! let mut builder = GrammarBuilder::new();
//! let digit = builder.digit();
//! let digits = builder.one_or_more(digit);
//! let number = builder.rule("Number", digits)?;
//!
//! let expression = builder.reserve_rule("Expression")?;
//! let plus = builder.literal("+");
//! let sum = builder.sequence([expression, plus, number]);
//! let body = builder.choice([sum, number]);
//! builder.define_rule(expression, body)?;
//! let grammar = builder.build()?;
//!
//! let outcome = Parser::new(&grammar).parse("1+25+7", expression)?;
//! assert!(outcome.is_complete());
//! assert_eq!(outcome.result.status(), RecursionStatus::Detected);
//!
//! // ((1 + 25) + 7); anonymous literals are not part of the visible tree
//! let children = outcome.result.visible_children();
//! assert_eq!(children.len(), 2);
//! assert_eq!(children[0].text(), "1+25");
//! assert_eq!(children[1].text(), "7");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`grammar`] - Pattern nodes, the grammar builder and static analysis
//! - [`parser`] - The lazy-match dispatcher, input context and growing map
//! - [`result`] - Match result trees and their renderers
//! - [`event`] - Observable matching events
//! - [`config`] - Match configuration
//! - [`error`] - Error types
//! - [`testing`] - Reference grammars and snapshot helpers

pub mod config;
pub mod error;
pub mod event;
pub mod grammar;
pub mod parser;
pub mod result;
pub mod testing;

pub use config::MatchConfig;
pub use error::{EngineError, GrammarError};
pub use event::{EventHistory, EventKind, MatchEvent};
pub use grammar::{CharClass, Grammar, GrammarBuilder, NodeId, NodeKind, PatternKind};
pub use parser::{InputContext, MatchOutcome, Parser, lazy_match};
pub use result::{MatchResult, RecursionStatus};
