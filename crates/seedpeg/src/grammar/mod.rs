//! # Grammar Module
//!
//! Arena-allocated parsing expression grammars.
//!
//! ## Overview
//!
//! A [`Grammar`] is a flat arena of [`Node`]s addressed by [`NodeId`]. Every
//! node is one of a closed set of kinds ([`NodeKind`]): literals, character
//! classes, sequences, ordered choices, bounded repetitions, lookahead
//! predicates, and named rules. Sub-nodes are referenced by handle, which lets
//! a rule's body refer back to the rule itself without any in-line self
//! pointer: cycles are just handles.
//!
//! Node identity is the arena index assigned at insertion. The matcher uses it
//! as the memo key, so two structurally equal rules are still distinct entries.
//!
//! Grammars are built once through [`GrammarBuilder`] and are immutable
//! afterwards; a single grammar can be shared across threads and matched
//! against any number of inputs.
//!
//! ## Usage
//!
//! ```rust
//! use seedpeg::grammar::GrammarBuilder;
//!
//! let mut builder = GrammarBuilder::new();
//! let digit = builder.digit();
//! let digits = builder.one_or_more(digit);
//! let number = builder.rule("Number", digits)?;
//!
//! let expr = builder.reserve_rule("Expression")?;
//! let plus = builder.literal("+");
//! let sum = builder.sequence([expr, plus, number]);
//! let body = builder.choice([sum, number]);
//! builder.define_rule(expr, body)?;
//!
//! let grammar = builder.build()?;
//! assert!(grammar.is_left_recursive(expr));
//! assert_eq!(
//!     grammar.describe(expr),
//!     "Expression <- (Expression \"+\" Number) / (Number)"
//! );
//! # Ok::<(), seedpeg::GrammarError>(())
//! ```

pub mod analysis;
pub mod builder;
pub mod char_class;
pub mod display;

pub use analysis::GrammarMetrics;
pub use builder::GrammarBuilder;
pub use char_class::CharClass;

use compact_str::CompactString;
use hashbrown::HashMap;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Stable handle of a node inside a [`Grammar`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Arena index of the node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discriminant of a [`NodeKind`], carried by match results for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternKind {
    Literal,
    CharClass,
    Sequence,
    Choice,
    Repetition,
    Predicate,
    Rule,
}

impl PatternKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Literal => "Literal",
            Self::CharClass => "CharClass",
            Self::Sequence => "Sequence",
            Self::Choice => "Choice",
            Self::Repetition => "Repetition",
            Self::Predicate => "Predicate",
            Self::Rule => "Rule",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structural kind of a grammar node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Exact character sequence.
    Literal(CompactString),
    /// A single character satisfying a class predicate.
    CharClass(CharClass),
    /// All sub-nodes in order.
    Sequence(Vec<NodeId>),
    /// First succeeding alternative, in order.
    Choice(Vec<NodeId>),
    /// Greedy repetition of `node`, between `min` and `max` times.
    ///
    /// `max == None` means unbounded.
    Repetition {
        node: NodeId,
        min: usize,
        max: Option<usize>,
    },
    /// Zero-width lookahead. Succeeds iff `node`'s success equals
    /// `expect_success`.
    Predicate { node: NodeId, expect_success: bool },
    /// Named rule delegating to `body`.
    Rule { body: NodeId },
}

impl NodeKind {
    #[must_use]
    pub const fn pattern_kind(&self) -> PatternKind {
        match self {
            Self::Literal(_) => PatternKind::Literal,
            Self::CharClass(_) => PatternKind::CharClass,
            Self::Sequence(_) => PatternKind::Sequence,
            Self::Choice(_) => PatternKind::Choice,
            Self::Repetition { .. } => PatternKind::Repetition,
            Self::Predicate { .. } => PatternKind::Predicate,
            Self::Rule { .. } => PatternKind::Rule,
        }
    }

    /// Direct sub-nodes, in evaluation order.
    #[must_use]
    pub fn components(&self) -> SmallVec<[NodeId; 4]> {
        match self {
            Self::Literal(_) | Self::CharClass(_) => SmallVec::new(),
            Self::Sequence(items) | Self::Choice(items) => items.iter().copied().collect(),
            Self::Repetition { node, .. } | Self::Predicate { node, .. } => {
                smallvec::smallvec![*node]
            }
            Self::Rule { body } => smallvec::smallvec![*body],
        }
    }
}

/// A single grammar node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) name: Option<Arc<str>>,
    pub(crate) alias: bool,
}

impl Node {
    pub(crate) const fn anonymous(kind: NodeKind) -> Self {
        Self {
            kind,
            name: None,
            alias: false,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Display type of the node, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn is_alias(&self) -> bool {
        self.alias
    }

    /// Hidden nodes are neither memoized nor shown in the visible tree.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.alias || self.name.is_none()
    }

    #[must_use]
    pub const fn pattern_kind(&self) -> PatternKind {
        self.kind.pattern_kind()
    }

    /// Name if present, otherwise the kind.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name().unwrap_or_else(|| self.pattern_kind().as_str())
    }
}

/// An immutable grammar: an arena of nodes plus a rule name index.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub(crate) nodes: Vec<Node>,
    pub(crate) rules_by_name: HashMap<Arc<str>, NodeId, ahash::RandomState>,
}

impl Grammar {
    /// Look up a node, if `id` belongs to this grammar.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Look up a node by a handle known to be valid.
    ///
    /// Handles returned by the builder that produced this grammar are always
    /// valid, and `build` rejects dangling sub-node references.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this grammar.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Whether `id` refers to a node in this grammar.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Find a named rule.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<NodeId> {
        self.rules_by_name.get(name).copied()
    }

    /// All rule nodes, in arena order.
    pub fn rules(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.iter()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Rule { .. }))
    }

    /// All nodes, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::from_index(index), node))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the node can match the empty string.
    #[must_use]
    pub fn is_nullable(&self, id: NodeId) -> bool {
        analysis::is_nullable(self, id)
    }

    /// Sub-nodes that may be evaluated first, before any input is consumed.
    #[must_use]
    pub fn leftmost_components(&self, id: NodeId) -> SmallVec<[NodeId; 4]> {
        analysis::leftmost_components(self, id)
    }

    /// Whether the node can reach itself through leftmost components.
    #[must_use]
    pub fn is_left_recursive(&self, id: NodeId) -> bool {
        analysis::is_left_recursive(self, id)
    }

    /// PEG definition of the node. Named rules inside it are shown by name.
    #[must_use]
    pub fn definition(&self, id: NodeId) -> String {
        display::definition(self, id)
    }

    /// `Name <- definition` for rules, the plain definition otherwise.
    #[must_use]
    pub fn describe(&self, id: NodeId) -> String {
        display::describe(self, id)
    }

    #[must_use]
    pub fn metrics(&self) -> GrammarMetrics {
        GrammarMetrics::compute(self)
    }
}
