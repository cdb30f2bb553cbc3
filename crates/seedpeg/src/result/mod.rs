//! # Match Results
//!
//! The parse tree produced by the matcher.
//!
//! ## Overview
//!
//! Every evaluation of a grammar node yields a [`MatchResult`]: a success flag,
//! the half-open char span `start..end` it covers, the matched text, and a
//! [`RecursionStatus`] recording what the dispatcher learned about left
//! recursion for that node at that position.
//!
//! Composite results own their children through [`Arc`], so a memoized result
//! can be spliced into many parents without copying its subtree.
//!
//! ## Hidden nodes
//!
//! Results of anonymous nodes (plain sequences, choices, repetitions, ...)
//! and of alias rules are *hidden*. They are kept in the full tree, but
//! [`MatchResult::visible_children`] skips over them and splices their own
//! visible children in their place. Their text still contributes to the
//! parent's span.
//!
//! Failure is ordinary data here: a failing result has `start == end` and no
//! children.

pub mod render;

pub use render::RenderMode;

use crate::grammar::PatternKind;
use compact_str::CompactString;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// What is known about left recursion of a node at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum RecursionStatus {
    /// Evaluation is in progress; a re-entrant call would be left recursion.
    #[default]
    Possible,
    /// A re-entrant call happened: the node is left-recursive here.
    Detected,
    /// Evaluation finished without re-entry.
    Impossible,
}

impl RecursionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Possible => "POSSIBLE",
            Self::Detected => "DETECTED",
            Self::Impossible => "IMPOSSIBLE",
        }
    }
}

impl fmt::Display for RecursionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub(crate) success: bool,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) text: CompactString,
    pub(crate) status: RecursionStatus,
    pub(crate) type_name: Option<Arc<str>>,
    pub(crate) alias: bool,
    pub(crate) kind: Option<PatternKind>,
    pub(crate) children: Vec<Arc<MatchResult>>,
}

impl MatchResult {
    /// A final failure at `position`.
    pub(crate) const fn fail(position: usize) -> Self {
        Self::failing(position, RecursionStatus::Impossible)
    }

    /// The failure installed in the memo table while a rule is first
    /// evaluated at `position`.
    pub(crate) const fn placeholder(position: usize) -> Self {
        Self::failing(position, RecursionStatus::Possible)
    }

    const fn failing(position: usize, status: RecursionStatus) -> Self {
        Self {
            success: false,
            start: position,
            end: position,
            text: CompactString::const_new(""),
            status,
            type_name: None,
            alias: false,
            kind: None,
            children: Vec::new(),
        }
    }

    /// A zero-width success at `position`, to be extended with children.
    pub(crate) fn empty(position: usize) -> Self {
        Self {
            success: true,
            ..Self::failing(position, RecursionStatus::Possible)
        }
    }

    /// A successful leaf covering `start..start + text.chars().count()`.
    pub(crate) fn terminal(start: usize, text: CompactString) -> Self {
        let end = start + text.chars().count();
        Self {
            end,
            text,
            ..Self::empty(start)
        }
    }

    /// Append a child, extending this result's span and text.
    ///
    /// The first child also moves `start` to the child's start; every later
    /// child must start where the previous one ended.
    pub(crate) fn push_child(&mut self, child: impl Into<Arc<Self>>) {
        let child = child.into();
        if self.children.is_empty() {
            self.start = child.start;
            self.text.clear();
        } else {
            debug_assert_eq!(
                child.start, self.end,
                "child must start where the previous child ended"
            );
        }
        self.text.push_str(&child.text);
        self.end = child.end;
        self.children.push(child);
    }

    pub(crate) const fn set_status(&mut self, status: RecursionStatus) {
        self.status = status;
    }

    pub(crate) fn set_identity(
        &mut self,
        type_name: Option<Arc<str>>,
        alias: bool,
        kind: PatternKind,
    ) {
        self.type_name = type_name;
        self.alias = alias;
        self.kind = Some(kind);
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of chars covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn status(&self) -> RecursionStatus {
        self.status
    }

    /// Display type copied from the rule that produced this result.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    #[must_use]
    pub const fn is_alias(&self) -> bool {
        self.alias
    }

    /// Kind of the grammar node that produced this result.
    #[must_use]
    pub const fn kind(&self) -> Option<PatternKind> {
        self.kind
    }

    /// Type name if present, otherwise the producing node's kind.
    #[must_use]
    pub fn label(&self) -> &str {
        self.type_name()
            .or_else(|| self.kind.map(PatternKind::as_str))
            .unwrap_or("?")
    }

    /// Hidden results are elided from the visible tree.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.alias || self.type_name.is_none()
    }

    /// All children, hidden ones included.
    #[must_use]
    pub fn children(&self) -> &[Arc<Self>] {
        &self.children
    }

    /// Children as they appear in the visible tree: each hidden child is
    /// replaced by its own visible children, recursively.
    #[must_use]
    pub fn visible_children(&self) -> Vec<&Arc<Self>> {
        let mut visible = Vec::new();
        collect_visible(&self.children, &mut visible);
        visible
    }
}

fn collect_visible<'a>(children: &'a [Arc<MatchResult>], out: &mut Vec<&'a Arc<MatchResult>>) {
    for child in children {
        if child.is_hidden() {
            collect_visible(&child.children, out);
        } else {
            out.push(child);
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(
                f,
                "{} {:?} [{}..{}] {}",
                self.label(),
                self.text.as_str(),
                self.start,
                self.end,
                self.status
            )
        } else {
            write!(f, "{} failed at {} {}", self.label(), self.start, self.status)
        }
    }
}
