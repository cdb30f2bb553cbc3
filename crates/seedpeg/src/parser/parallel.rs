//! # Parallel Matching Support
//!
//! Matching many inputs against one grammar on a thread pool.
//!
//! A [`Grammar`] is immutable once built, so it can be shared freely; each
//! input gets its own [`InputContext`](crate::parser::InputContext) and
//! growing map. Matching within a single input stays sequential.

use crate::config::MatchConfig;
use crate::error::EngineError;
use crate::grammar::{Grammar, NodeId};
use crate::parser::{MatchOutcome, Parser};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Result of matching a single input
#[derive(Debug)]
pub struct BatchOutcome {
    /// The input identifier
    pub input_id: String,
    /// The match outcome, or the engine error that aborted it
    pub outcome: Result<MatchOutcome, EngineError>,
    /// Matching duration
    pub duration: Duration,
}

impl BatchOutcome {
    /// Whether the input matched completely
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcome.as_ref().is_ok_and(MatchOutcome::is_complete)
    }
}

/// A batch of inputs to match
#[derive(Debug, Clone, Default)]
pub struct MatchBatch {
    /// Inputs to match: (`input_id`, `content`)
    pub inputs: Vec<(String, String)>,
}

impl MatchBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input to the batch
    pub fn add(&mut self, input_id: impl Into<String>, content: impl Into<String>) {
        self.inputs.push((input_id.into(), content.into()));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Match every input of `batch` against `start`, in parallel.
///
/// Outcomes are returned in batch order.
#[must_use]
pub fn match_batch(
    grammar: &Grammar,
    start: NodeId,
    batch: &MatchBatch,
    config: MatchConfig,
) -> Vec<BatchOutcome> {
    let parser = Parser::with_config(grammar, config);
    tracing::debug!(inputs = batch.len(), "matching batch");

    batch
        .inputs
        .par_iter()
        .map(|(input_id, content)| {
            let started = Instant::now();
            let outcome = parser.parse(content, start);
            BatchOutcome {
                input_id: input_id.clone(),
                outcome,
                duration: started.elapsed(),
            }
        })
        .collect()
}

/// Summary of batch matching results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Total number of inputs
    pub total: usize,
    /// Inputs matched completely
    pub complete: usize,
    /// Inputs matched only partially or not at all
    pub incomplete: usize,
    /// Inputs aborted by an engine error
    pub errors: usize,
    /// Total matching duration
    pub total_duration: Duration,
}

/// Aggregate results from batch matching
#[must_use]
pub fn summarize(outcomes: &[BatchOutcome]) -> BatchSummary {
    let total = outcomes.len();
    let complete = outcomes.iter().filter(|o| o.is_complete()).count();
    let errors = outcomes.iter().filter(|o| o.outcome.is_err()).count();

    BatchSummary {
        total,
        complete,
        incomplete: total - complete - errors,
        errors,
        total_duration: outcomes.iter().map(|o| o.duration).sum(),
    }
}
