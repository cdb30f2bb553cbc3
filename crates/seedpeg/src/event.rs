//! # Match Events
//!
//! An optional, append-only record of what the matcher did.
//!
//! When [`MatchConfig::record_history`](crate::MatchConfig) is set, the input
//! context keeps an [`EventHistory`] and the dispatcher, the grow loop and the
//! terminal combinators append a [`MatchEvent`] at every transition: pattern
//! attempts and their outcome, memo table reads and writes, the moment a
//! rule is identified as left-recursive, and each grow iteration.
//!
//! Recording never changes the outcome of a match. Independently of the
//! history, every event is also emitted as a `tracing` event at `TRACE`
//! level under the `seedpeg::event` target.

use crate::result::RecursionStatus;
use compact_str::CompactString;
use std::fmt::{self, Write};

/// Broad grouping of events, used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// Pattern attempts, accepts and rejects.
    Pattern,
    /// Memo table reads and writes.
    Memo,
    /// Left-recursion identification and growing.
    Control,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Attempt,
    Accept,
    Reject,
    /// A terminal consumed input.
    CharAccept,
    /// A named rule was looked up in the memo table.
    MemoCheck,
    /// A result was written to the memo table.
    MemoSave { status: RecursionStatus },
    /// A memoized result was reused.
    AssumeResult { status: RecursionStatus },
    /// A re-entrant call found its own placeholder.
    IdentifyLeftRecursion,
    /// A left-recursive seed was found and growing begins.
    BeginGrow,
    GrowAttempt { iteration: usize },
    GrowAccept { iteration: usize },
    /// The attempt succeeded without extending the match.
    GrowReject { iteration: usize },
    /// The attempt failed outright.
    GrowFail { iteration: usize },
    /// Growing stopped after `iterations` committed iterations.
    GrowTerminate { iterations: usize },
}

impl EventKind {
    #[must_use]
    pub const fn category(self) -> EventCategory {
        match self {
            Self::Attempt | Self::Accept | Self::Reject | Self::CharAccept => {
                EventCategory::Pattern
            }
            Self::MemoCheck | Self::MemoSave { .. } | Self::AssumeResult { .. } => {
                EventCategory::Memo
            }
            Self::IdentifyLeftRecursion
            | Self::BeginGrow
            | Self::GrowAttempt { .. }
            | Self::GrowAccept { .. }
            | Self::GrowReject { .. }
            | Self::GrowFail { .. }
            | Self::GrowTerminate { .. } => EventCategory::Control,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Attempt => "Pattern Attempt",
            Self::Accept => "Pattern Accept",
            Self::Reject => "Pattern Reject",
            Self::CharAccept => "Character Accept",
            Self::MemoCheck => "Memory Check",
            Self::MemoSave { .. } => "Memory Save",
            Self::AssumeResult { .. } => "Assume Result",
            Self::IdentifyLeftRecursion => "Identify Left Recursion",
            Self::BeginGrow => "Begin Grow",
            Self::GrowAttempt { .. } => "Growing Attempt",
            Self::GrowAccept { .. } => "Growing Accept",
            Self::GrowReject { .. } => "Growing Reject",
            Self::GrowFail { .. } => "Growing Fail",
            Self::GrowTerminate { .. } => "Growing Terminate",
        }
    }

    fn detail(self) -> Option<String> {
        match self {
            Self::MemoSave { status } | Self::AssumeResult { status } => Some(status.to_string()),
            Self::GrowAttempt { iteration }
            | Self::GrowAccept { iteration }
            | Self::GrowReject { iteration }
            | Self::GrowFail { iteration } => Some(format!("iteration {iteration}")),
            Self::GrowTerminate { iterations } => Some(format!("{iterations} valid iterations")),
            _ => None,
        }
    }
}

const WIDTH_NAME: usize = 25;
const WIDTH_LABEL: usize = 12;

/// A single recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEvent {
    pub kind: EventKind,
    /// Name or kind of the grammar node involved.
    pub label: CompactString,
    pub start: usize,
    pub end: usize,
    /// Input text covered by `start..end`.
    pub text: CompactString,
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<WIDTH_NAME$}{:<WIDTH_LABEL$} at {}..{}",
            self.kind.display_name(),
            self.label.as_str(),
            self.start,
            self.end
        )?;
        if !self.text.is_empty() {
            write!(f, ", {:?}", self.text.as_str())?;
        }
        if let Some(detail) = self.kind.detail() {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

/// Ordered log of [`MatchEvent`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventHistory {
    events: Vec<MatchEvent>,
}

impl EventHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events of one category, in order.
    pub fn filter(&self, category: EventCategory) -> impl Iterator<Item = &MatchEvent> {
        self.events
            .iter()
            .filter(move |event| event.kind.category() == category)
    }

    /// Count events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&EventKind) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(&event.kind)).count()
    }

    /// One numbered line per event.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (index, event) in self.events.iter().enumerate() {
            let _ = writeln!(out, "{index:4}:\t{event}");
        }
        out
    }
}

impl<'a> IntoIterator for &'a EventHistory {
    type Item = &'a MatchEvent;
    type IntoIter = std::slice::Iter<'a, MatchEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
