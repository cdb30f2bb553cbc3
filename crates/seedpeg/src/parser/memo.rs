use crate::grammar::NodeId;
use crate::result::MatchResult;
use hashbrown::HashMap;

type Row = HashMap<NodeId, MatchResult, ahash::RandomState>;

/// Memo table for one input: `(position, rule) -> MatchResult`.
///
/// The outer dimension has one row per input position, plus one for the end
/// of input. Each row is keyed by the rule's arena handle, so two
/// structurally identical rules never share an entry.
///
/// Entries start life as a placeholder failure while a rule is first
/// evaluated, and are overwritten as a left-recursive match grows.
#[derive(Debug, Clone)]
pub struct GrowingMap {
    rows: Vec<Row>,
}

impl GrowingMap {
    /// Create an empty table for an input of `len` chars.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            rows: (0..=len).map(|_| Row::default()).collect(),
        }
    }

    /// Number of positions, including the end of input.
    #[must_use]
    pub fn positions(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn get(&self, position: usize, node: NodeId) -> Option<&MatchResult> {
        self.rows.get(position)?.get(&node)
    }

    pub(crate) fn get_mut(&mut self, position: usize, node: NodeId) -> Option<&mut MatchResult> {
        self.rows.get_mut(position)?.get_mut(&node)
    }

    /// Store `result`, replacing any previous entry. Positions outside the
    /// table are ignored.
    pub(crate) fn insert(&mut self, position: usize, node: NodeId, result: MatchResult) {
        if let Some(row) = self.rows.get_mut(position) {
            row.insert(node, result);
        }
    }

    pub fn remove(&mut self, position: usize, node: NodeId) -> Option<MatchResult> {
        self.rows.get_mut(position)?.remove(&node)
    }

    /// Number of entries stored at `position`.
    #[must_use]
    pub fn count_at(&self, position: usize) -> usize {
        self.rows.get(position).map_or(0, HashMap::len)
    }

    /// Number of entries across all positions.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.iter().map(HashMap::len).sum()
    }

    pub fn clear(&mut self) {
        self.rows.iter_mut().for_each(HashMap::clear);
    }
}
