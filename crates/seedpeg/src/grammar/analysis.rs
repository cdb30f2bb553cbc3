//! # Grammar Analysis
//!
//! Structural analyses over the node arena.
//!
//! This module provides:
//! - Nullability (can a node match the empty string?)
//! - Leftmost components (which sub-nodes may run before any input is consumed)
//! - Left-recursion detection, both through any path and through anonymous
//!   scaffolding only
//! - Summary metrics
//!
//! None of these gate the matcher: the dispatcher detects left recursion at
//! run time regardless of structure. They exist for diagnostics and for the
//! builder's warnings.

use crate::grammar::{Grammar, NodeId, NodeKind};
use hashbrown::HashSet;
use smallvec::SmallVec;

type Visiting = HashSet<NodeId, ahash::RandomState>;

/// Whether `id` can match the empty string.
///
/// A node reached again while its own nullability is still being computed is
/// treated as the neutral element of the enclosing combinator: it neither
/// makes a sequence non-nullable nor makes a choice nullable. This keeps the
/// check finite on self-referential grammars.
#[must_use]
pub fn is_nullable(grammar: &Grammar, id: NodeId) -> bool {
    let mut visiting = Visiting::default();
    nullable(grammar, id, &mut visiting).unwrap_or(false)
}

fn nullable(grammar: &Grammar, id: NodeId, visiting: &mut Visiting) -> Option<bool> {
    let node = grammar.get(id)?;
    if !visiting.insert(id) {
        return None;
    }

    let result = match &node.kind {
        NodeKind::Literal(text) => Some(text.is_empty()),
        NodeKind::CharClass(_) => Some(false),
        NodeKind::Sequence(items) => {
            let mut decided = items.is_empty();
            let mut verdict = Some(true);
            for &item in items {
                match nullable(grammar, item, visiting) {
                    Some(false) => {
                        verdict = Some(false);
                        decided = true;
                        break;
                    }
                    Some(true) => decided = true,
                    None => {}
                }
            }
            if decided { verdict } else { None }
        }
        NodeKind::Choice(alternatives) => {
            let mut verdict = None;
            for &alternative in alternatives {
                match nullable(grammar, alternative, visiting) {
                    Some(true) => {
                        verdict = Some(true);
                        break;
                    }
                    Some(false) => verdict = Some(false),
                    None => {}
                }
            }
            verdict
        }
        NodeKind::Repetition { node, min, .. } => {
            if *min == 0 {
                Some(true)
            } else {
                nullable(grammar, *node, visiting)
            }
        }
        NodeKind::Predicate { .. } => Some(true),
        NodeKind::Rule { body } => nullable(grammar, *body, visiting),
    };

    visiting.remove(&id);
    result
}

/// Sub-nodes that may be evaluated first at a given position, before any
/// input has been consumed by `id` itself.
///
/// For a sequence this is the prefix up to and including the first
/// non-nullable element, or every element if all of them are nullable.
#[must_use]
pub fn leftmost_components(grammar: &Grammar, id: NodeId) -> SmallVec<[NodeId; 4]> {
    let Some(node) = grammar.get(id) else {
        return SmallVec::new();
    };
    match &node.kind {
        NodeKind::Literal(_) | NodeKind::CharClass(_) => SmallVec::new(),
        NodeKind::Sequence(items) => {
            let mut prefix = SmallVec::new();
            for &item in items {
                prefix.push(item);
                if !is_nullable(grammar, item) {
                    break;
                }
            }
            prefix
        }
        NodeKind::Choice(alternatives) => alternatives.iter().copied().collect(),
        NodeKind::Repetition { node, .. } | NodeKind::Predicate { node, .. } => {
            smallvec::smallvec![*node]
        }
        NodeKind::Rule { body } => smallvec::smallvec![*body],
    }
}

/// Whether `id` can reach itself through leftmost components.
#[must_use]
pub fn is_left_recursive(grammar: &Grammar, id: NodeId) -> bool {
    reaches_leftmost(grammar, id, false)
}

/// Whether `id` can reach itself through leftmost components without passing
/// through another memoized rule.
///
/// This is the only shape the matcher grows. A rule that is left-recursive
/// but not directly so is accepted, but its recursion is cut off rather than
/// grown.
#[must_use]
pub fn is_directly_left_recursive(grammar: &Grammar, id: NodeId) -> bool {
    reaches_leftmost(grammar, id, true)
}

fn reaches_leftmost(grammar: &Grammar, target: NodeId, stop_at_rules: bool) -> bool {
    let mut seen = Visiting::default();
    let mut stack: Vec<NodeId> = leftmost_components(grammar, target).into_vec();

    while let Some(current) = stack.pop() {
        if current == target {
            return true;
        }
        if !seen.insert(current) {
            continue;
        }
        if stop_at_rules && grammar.get(current).is_some_and(|node| !node.is_hidden()) {
            continue;
        }
        stack.extend(leftmost_components(grammar, current));
    }

    false
}

/// Metrics about a grammar's shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarMetrics {
    /// Total number of nodes in the arena
    pub node_count: usize,
    /// Number of rule nodes
    pub rule_count: usize,
    /// Number of nullable rules
    pub nullable_count: usize,
    /// Number of left-recursive rules
    pub left_recursive_count: usize,
    /// Rules that are left-recursive only through other rules
    pub indirect_left_recursive: Vec<NodeId>,
}

impl GrammarMetrics {
    /// Compute metrics for a grammar
    #[must_use]
    pub fn compute(grammar: &Grammar) -> Self {
        let mut metrics = Self {
            node_count: grammar.len(),
            ..Self::default()
        };

        for (id, _) in grammar.rules() {
            metrics.rule_count += 1;
            if is_nullable(grammar, id) {
                metrics.nullable_count += 1;
            }
            if is_left_recursive(grammar, id) {
                metrics.left_recursive_count += 1;
                if !is_directly_left_recursive(grammar, id) {
                    metrics.indirect_left_recursive.push(id);
                }
            }
        }

        metrics
    }
}
