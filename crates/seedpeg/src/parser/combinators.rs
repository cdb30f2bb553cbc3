//! Structural matching for each node kind.
//!
//! These functions are only reachable through the dispatcher, which owns
//! memoization and left-recursion handling. Sub-nodes are always evaluated
//! via [`dispatch`], never by calling back into this module directly.

use crate::error::EngineError;
use crate::event::EventKind;
use crate::grammar::{CharClass, Grammar, Node, NodeId, NodeKind};
use crate::parser::context::InputContext;
use crate::parser::dispatch::dispatch;
use crate::result::MatchResult;
use compact_str::CompactString;

pub(super) fn match_structure(
    grammar: &Grammar,
    node: &Node,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    match &node.kind {
        NodeKind::Literal(text) => literal(node, text, ctx),
        NodeKind::CharClass(class) => char_class(node, class, ctx),
        NodeKind::Sequence(items) => sequence(grammar, items, ctx),
        NodeKind::Choice(alternatives) => choice(grammar, alternatives, ctx),
        NodeKind::Repetition { node, min, max } => repetition(grammar, *node, *min, *max, ctx),
        NodeKind::Predicate {
            node,
            expect_success,
        } => predicate(grammar, *node, *expect_success, ctx),
        NodeKind::Rule { body } => rule(grammar, *body, ctx),
    }
}

fn literal(
    node: &Node,
    text: &CompactString,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    let start = ctx.position();
    let len = text.chars().count();
    let matched = ctx.common_prefix_len(text);

    if matched < len {
        ctx.note_failure(start + matched);
        return Ok(MatchResult::fail(start));
    }

    ctx.set_position(start + len)?;
    ctx.emit(EventKind::CharAccept, node.label(), start, start + len);
    Ok(MatchResult::terminal(start, text.clone()))
}

fn char_class(
    node: &Node,
    class: &CharClass,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    let start = ctx.position();
    match ctx.peek() {
        Some(c) if class.matches(c) => {
            ctx.advance()?;
            ctx.emit(EventKind::CharAccept, node.label(), start, start + 1);
            let mut text = CompactString::default();
            text.push(c);
            Ok(MatchResult::terminal(start, text))
        }
        _ => {
            ctx.note_failure(start);
            Ok(MatchResult::fail(start))
        }
    }
}

fn sequence(
    grammar: &Grammar,
    items: &[NodeId],
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    let start = ctx.position();
    let mut result = MatchResult::empty(start);

    for &item in items {
        let child = dispatch(grammar, item, ctx)?;
        if !child.is_success() {
            ctx.set_position(start)?;
            return Ok(MatchResult::fail(start));
        }
        result.push_child(child);
    }

    Ok(result)
}

fn choice(
    grammar: &Grammar,
    alternatives: &[NodeId],
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    let start = ctx.position();

    for &alternative in alternatives {
        let child = dispatch(grammar, alternative, ctx)?;
        if child.is_success() {
            let mut result = MatchResult::empty(start);
            result.push_child(child);
            return Ok(result);
        }
        ctx.set_position(start)?;
    }

    Ok(MatchResult::fail(start))
}

fn repetition(
    grammar: &Grammar,
    inner: NodeId,
    min: usize,
    max: Option<usize>,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    let start = ctx.position();
    let mut result = MatchResult::empty(start);
    let mut count = 0;

    while max.is_none_or(|max| count < max) {
        let before = ctx.position();
        let child = dispatch(grammar, inner, ctx)?;
        if !child.is_success() {
            ctx.set_position(before)?;
            break;
        }

        let progressed = child.end() > before;
        result.push_child(child);
        count += 1;

        // An empty match would repeat forever; it satisfies any minimum.
        if !progressed {
            count = count.max(min);
            break;
        }
    }

    if count < min {
        ctx.set_position(start)?;
        return Ok(MatchResult::fail(start));
    }
    Ok(result)
}

fn predicate(
    grammar: &Grammar,
    inner: NodeId,
    expect_success: bool,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    let start = ctx.position();
    let furthest = ctx.furthest_failure();

    let child = dispatch(grammar, inner, ctx)?;
    ctx.set_position(start)?;
    // Lookahead failures are not parse errors.
    ctx.restore_furthest_failure(furthest);

    if child.is_success() == expect_success {
        Ok(MatchResult::empty(start))
    } else {
        Ok(MatchResult::fail(start))
    }
}

fn rule(
    grammar: &Grammar,
    body: NodeId,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    let child = dispatch(grammar, body, ctx)?;

    // A named body keeps its own node in the tree.
    if child.is_success() && !child.is_hidden() {
        let mut result = MatchResult::empty(child.start());
        result.push_child(child);
        return Ok(result);
    }
    Ok(child)
}
