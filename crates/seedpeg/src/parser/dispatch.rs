//! The lazy-match dispatcher and the seed-growing loop.
//!
//! Every evaluation of a grammar node goes through [`lazy_match`]. Hidden
//! nodes (anonymous combinators and alias rules) are evaluated directly.
//! Named rules go through the growing map:
//!
//! - On a miss, a failing placeholder with status
//!   [`Possible`](RecursionStatus::Possible) is installed before the rule's
//!   body runs. If the body re-enters the same rule at the same position, that
//!   inner call hits the placeholder, flips it to
//!   [`Detected`](RecursionStatus::Detected) and fails, so the outer
//!   evaluation can only succeed through a non-recursive alternative: the
//!   seed.
//! - A successful seed for a detected rule is then grown: the rule is
//!   re-evaluated from the same position while each attempt strictly extends
//!   the previous one, and each extension is committed to the growing map so
//!   the next attempt's self-call consumes it.
//! - On a hit, the memoized result is reused and the cursor moves to its end.

use crate::error::EngineError;
use crate::event::EventKind;
use crate::grammar::{Grammar, Node, NodeId};
use crate::parser::combinators;
use crate::parser::context::InputContext;
use crate::parser::stack::ensure_sufficient_stack;
use crate::result::{MatchResult, RecursionStatus};

/// Match `node` at the context's cursor.
///
/// Ordinary non-matching input yields `Ok` with a failing result.
///
/// # Errors
///
/// Returns [`EngineError::UnknownNode`] if `node` is not part of `grammar`,
/// or any cursor error raised by a breached engine invariant.
pub fn lazy_match(
    grammar: &Grammar,
    node: NodeId,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    if !grammar.contains(node) {
        return Err(EngineError::UnknownNode(node));
    }
    dispatch(grammar, node, ctx)
}

pub(crate) fn dispatch(
    grammar: &Grammar,
    id: NodeId,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    ensure_sufficient_stack(|| {
        let node = grammar.get(id).ok_or(EngineError::UnknownNode(id))?;
        if node.is_hidden() {
            return match_and_name(grammar, node, ctx);
        }

        let position = ctx.position();
        ctx.emit(EventKind::MemoCheck, node.label(), position, position);
        match ctx.result_at(position, id).cloned() {
            Some(memo) => reuse(id, node, memo, ctx),
            None => evaluate(grammar, id, node, ctx),
        }
    })
}

/// First evaluation of a named rule at the cursor.
fn evaluate(
    grammar: &Grammar,
    id: NodeId,
    node: &Node,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    let position = ctx.position();
    ctx.set_result_at(position, id, MatchResult::placeholder(position));

    let mut answer = match_and_name(grammar, node, ctx)?;
    let slot_status = ctx
        .result_at(position, id)
        .map_or(RecursionStatus::Possible, MatchResult::status);

    if slot_status == RecursionStatus::Detected && answer.is_success() {
        answer.set_status(RecursionStatus::Detected);
        save(ctx, id, node, position, &answer);
        tracing::trace!(rule = node.label(), position, seed_end = answer.end(), "growing seed");
        ctx.emit(EventKind::BeginGrow, node.label(), answer.start(), answer.end());
        return grow(grammar, id, node, position, answer, ctx);
    }

    answer.set_status(RecursionStatus::Impossible);
    save(ctx, id, node, position, &answer);
    Ok(answer)
}

/// A memo hit.
fn reuse(
    id: NodeId,
    node: &Node,
    mut memo: MatchResult,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    let position = ctx.position();
    if memo.is_success() {
        ctx.set_position(memo.end())?;
    }

    if memo.status() == RecursionStatus::Possible {
        // Re-entered while the first evaluation here is still running.
        if let Some(slot) = ctx.result_at_mut(position, id) {
            slot.set_status(RecursionStatus::Detected);
        }
        memo.set_status(RecursionStatus::Detected);
        tracing::trace!(rule = node.label(), position, "left recursion detected");
        ctx.emit(EventKind::IdentifyLeftRecursion, node.label(), position, position);
        return Ok(memo);
    }

    ctx.emit(
        EventKind::AssumeResult {
            status: memo.status(),
        },
        node.label(),
        memo.start(),
        memo.end(),
    );
    Ok(memo)
}

/// Re-evaluate a left-recursive rule from `initial` until it stops making
/// progress.
///
/// Each accepted attempt must end strictly further than the last committed
/// one, so growing terminates within the length of the remaining input.
fn grow(
    grammar: &Grammar,
    id: NodeId,
    node: &Node,
    initial: usize,
    seed: MatchResult,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    let label = node.label();
    let mut farthest = seed.end();
    let mut committed = seed;
    let mut iteration = 1;

    loop {
        ctx.emit(EventKind::GrowAttempt { iteration }, label, initial, farthest);
        ctx.set_position(initial)?;

        let mut attempt = match_and_name(grammar, node, ctx)?;
        attempt.set_status(RecursionStatus::Detected);

        if !attempt.is_success() {
            ctx.emit(EventKind::GrowFail { iteration }, label, initial, initial);
            break;
        }
        if attempt.end() <= farthest {
            ctx.emit(EventKind::GrowReject { iteration }, label, initial, attempt.end());
            break;
        }

        ctx.emit(EventKind::GrowAccept { iteration }, label, initial, attempt.end());
        farthest = attempt.end();
        save(ctx, id, node, initial, &attempt);
        committed = attempt;
        iteration += 1;
    }

    let iterations = iteration - 1;
    tracing::trace!(rule = label, initial, farthest, iterations, "growing finished");
    ctx.emit(EventKind::GrowTerminate { iterations }, label, initial, farthest);
    ctx.set_position(farthest)?;
    Ok(committed)
}

/// Run the structural match of `node` and stamp its identity on the result.
fn match_and_name(
    grammar: &Grammar,
    node: &Node,
    ctx: &mut InputContext,
) -> Result<MatchResult, EngineError> {
    let start = ctx.position();
    ctx.emit(EventKind::Attempt, node.label(), start, start);

    let mut result = combinators::match_structure(grammar, node, ctx)?;
    result.set_identity(node.name.clone(), node.alias, node.pattern_kind());

    if result.is_success() {
        ctx.emit(EventKind::Accept, node.label(), result.start(), result.end());
    } else {
        ctx.emit(EventKind::Reject, node.label(), start, start);
    }
    Ok(result)
}

fn save(ctx: &mut InputContext, id: NodeId, node: &Node, position: usize, result: &MatchResult) {
    ctx.set_result_at(position, id, result.clone());
    ctx.emit(
        EventKind::MemoSave {
            status: result.status(),
        },
        node.label(),
        result.start(),
        result.end(),
    );
}
