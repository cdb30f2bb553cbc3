use crate::config::MatchConfig;
use crate::error::EngineError;
use crate::event::{EventHistory, EventKind, MatchEvent};
use crate::grammar::NodeId;
use crate::parser::memo::GrowingMap;
use crate::result::MatchResult;
use compact_str::CompactString;

/// Mutable state of one match: the input, the cursor and the memo table.
///
/// A context is confined to a single match on a single thread. Matching the
/// same input again should use a fresh context; reusing one keeps memoized
/// results from the previous run.
#[derive(Debug, Clone)]
pub struct InputContext {
    chars: Vec<char>,
    position: usize,
    growing: GrowingMap,
    history: Option<EventHistory>,
    furthest_failure: Option<usize>,
    track_furthest_failure: bool,
    print_range: usize,
}

impl InputContext {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_config(input, &MatchConfig::default())
    }

    #[must_use]
    pub fn with_config(input: &str, config: &MatchConfig) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let growing = GrowingMap::new(chars.len());
        Self {
            chars,
            position: 0,
            growing,
            history: config.record_history.then(EventHistory::new),
            furthest_failure: None,
            track_furthest_failure: config.track_furthest_failure,
            print_range: config.print_range,
        }
    }

    // Cursor

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PositionOutOfBounds`] if `position` is past the
    /// end of input.
    pub fn set_position(&mut self, position: usize) -> Result<(), EngineError> {
        if position > self.chars.len() {
            return Err(EngineError::PositionOutOfBounds {
                position,
                len: self.chars.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Input length in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// The char under the cursor, if any.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// The char under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CursorPastEnd`] at the end of input.
    pub fn current_char(&self) -> Result<char, EngineError> {
        self.peek().ok_or(EngineError::CursorPastEnd {
            position: self.position,
            len: self.chars.len(),
        })
    }

    /// Step past the char under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CursorPastEnd`] at the end of input.
    pub fn advance(&mut self) -> Result<(), EngineError> {
        self.current_char()?;
        self.position += 1;
        Ok(())
    }

    /// Read the char under the cursor and step past it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CursorPastEnd`] at the end of input.
    pub fn next_char(&mut self) -> Result<char, EngineError> {
        let c = self.current_char()?;
        self.position += 1;
        Ok(c)
    }

    /// Whether the input at the cursor starts with `literal`.
    #[must_use]
    pub fn check_literal(&self, literal: &str) -> bool {
        self.common_prefix_len(literal) == literal.chars().count()
    }

    /// Number of leading chars of `literal` that match the input at the
    /// cursor.
    #[must_use]
    pub fn common_prefix_len(&self, literal: &str) -> usize {
        let rest = self.chars.get(self.position..).unwrap_or_default();
        literal
            .chars()
            .zip(rest)
            .take_while(|(expected, actual)| expected == *actual)
            .count()
    }

    /// Input text in `start..end`, clamped to the input.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> CompactString {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().copied().collect()
    }

    // Growing map

    /// Memoized result for `node` at the cursor.
    #[must_use]
    pub fn result_for(&self, node: NodeId) -> Option<&MatchResult> {
        self.growing.get(self.position, node)
    }

    #[must_use]
    pub fn result_at(&self, position: usize, node: NodeId) -> Option<&MatchResult> {
        self.growing.get(position, node)
    }

    pub(crate) fn result_at_mut(
        &mut self,
        position: usize,
        node: NodeId,
    ) -> Option<&mut MatchResult> {
        self.growing.get_mut(position, node)
    }

    pub(crate) fn set_result_at(&mut self, position: usize, node: NodeId, result: MatchResult) {
        self.growing.insert(position, node, result);
    }

    /// Forget the memoized result for `node` at the cursor.
    pub fn clear_result(&mut self, node: NodeId) -> Option<MatchResult> {
        self.growing.remove(self.position, node)
    }

    /// Number of memoized results across all positions.
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.growing.total()
    }

    #[must_use]
    pub const fn growing_map(&self) -> &GrowingMap {
        &self.growing
    }

    // Diagnostics

    #[must_use]
    pub const fn history(&self) -> Option<&EventHistory> {
        self.history.as_ref()
    }

    pub const fn take_history(&mut self) -> Option<EventHistory> {
        self.history.take()
    }

    /// Furthest position at which a terminal failed to match.
    #[must_use]
    pub const fn furthest_failure(&self) -> Option<usize> {
        self.furthest_failure
    }

    pub(crate) fn note_failure(&mut self, position: usize) {
        if self.track_furthest_failure {
            self.furthest_failure = Some(self.furthest_failure.map_or(position, |f| f.max(position)));
        }
    }

    /// Reset the furthest failure to a previously observed value.
    pub(crate) const fn restore_furthest_failure(&mut self, furthest: Option<usize>) {
        self.furthest_failure = furthest;
    }

    /// Record an event in the history and emit it as a trace event.
    ///
    /// Nothing is built unless a history is being kept or trace logging is
    /// enabled for this target.
    pub(crate) fn emit(&mut self, kind: EventKind, label: &str, start: usize, end: usize) {
        let tracing_enabled = tracing::enabled!(target: "seedpeg::event", tracing::Level::TRACE);
        if self.history.is_none() && !tracing_enabled {
            return;
        }

        let event = MatchEvent {
            kind,
            label: label.into(),
            start,
            end,
            text: self.slice(start, end),
        };
        if tracing_enabled {
            tracing::trace!(target: "seedpeg::event", "{event}");
        }
        if let Some(history) = self.history.as_mut() {
            history.record(event);
        }
    }

    /// The input around the cursor, with a caret under the current char.
    ///
    /// Up to `print_range` chars are shown on each side; `[` and `]` mark the
    /// start and end of input when they fall inside the window.
    ///
    /// ```text
    /// [1+25+7]
    ///    ^
    /// ```
    #[must_use]
    pub fn window(&self) -> String {
        let len = self.chars.len();
        let first = self.position.saturating_sub(self.print_range);
        let last = self.position.saturating_add(self.print_range).min(len);

        let mut out = String::new();
        let mut caret = self.position - first;
        if first == 0 {
            out.push('[');
            caret += 1;
        }
        for index in first..=last {
            match self.chars.get(index) {
                Some(c) => out.push(*c),
                None => out.push(']'),
            }
        }
        out.push('\n');
        out.extend(std::iter::repeat_n(' ', caret));
        out.push('^');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_movement() {
        let mut ctx = InputContext::new("ab");
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.next_char().unwrap(), 'a');
        assert_eq!(ctx.current_char().unwrap(), 'b');
        ctx.advance().unwrap();
        assert!(ctx.is_at_end());
        assert_eq!(
            ctx.current_char(),
            Err(EngineError::CursorPastEnd { position: 2, len: 2 })
        );
        assert!(ctx.advance().is_err());
        assert_eq!(ctx.position(), 2);
    }

    #[test]
    fn test_set_position_bounds() {
        let mut ctx = InputContext::new("abc");
        ctx.set_position(3).unwrap();
        assert_eq!(
            ctx.set_position(4),
            Err(EngineError::PositionOutOfBounds { position: 4, len: 3 })
        );
        assert_eq!(ctx.position(), 3);
    }

    #[test]
    fn test_check_literal_and_slice() {
        let mut ctx = InputContext::new("héllo");
        assert!(ctx.check_literal("hé"));
        assert!(ctx.check_literal(""));
        assert!(!ctx.check_literal("hello"));
        assert_eq!(ctx.common_prefix_len("hex"), 1);
        ctx.set_position(4).unwrap();
        assert!(!ctx.check_literal("oo"));
        assert_eq!(ctx.slice(1, 3), "él");
        assert_eq!(ctx.slice(3, 99), "lo");
    }

    #[test]
    fn test_memo_maintenance() {
        let mut ctx = InputContext::new("1");
        let rule = NodeId::from_index(0);
        ctx.set_result_at(0, rule, MatchResult::fail(0));
        ctx.set_result_at(1, rule, MatchResult::fail(1));
        assert_eq!(ctx.result_count(), 2);
        assert!(ctx.result_for(rule).is_some());

        assert!(ctx.clear_result(rule).is_some());
        assert!(ctx.result_for(rule).is_none());
        assert_eq!(ctx.result_count(), 1);
    }

    #[test]
    fn test_furthest_failure() {
        let mut ctx = InputContext::new("abc");
        assert_eq!(ctx.furthest_failure(), None);
        ctx.note_failure(2);
        ctx.note_failure(1);
        assert_eq!(ctx.furthest_failure(), Some(2));

        let config = MatchConfig::default().with_track_furthest_failure(false);
        let mut untracked = InputContext::with_config("abc", &config);
        untracked.note_failure(2);
        assert_eq!(untracked.furthest_failure(), None);
    }

    #[test]
    fn test_history_only_when_enabled() {
        let mut ctx = InputContext::new("ab");
        ctx.emit(EventKind::Attempt, "A", 0, 1);
        assert!(ctx.history().is_none());

        let config = MatchConfig::default().with_record_history(true);
        let mut ctx = InputContext::with_config("ab", &config);
        ctx.emit(EventKind::CharAccept, "Literal", 0, 1);
        let history = ctx.take_history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.events()[0].text, "a");
    }

    #[test]
    fn test_window() {
        let mut ctx = InputContext::new("1+25+7");
        ctx.set_position(2).unwrap();
        assert_eq!(ctx.window(), "[1+25+7]\n   ^");

        let config = MatchConfig::default().with_print_range(2);
        let mut ctx = InputContext::with_config("abcdefghij", &config);
        ctx.set_position(5).unwrap();
        assert_eq!(ctx.window(), "defgh\n  ^");

        ctx.set_position(10).unwrap();
        assert_eq!(ctx.window(), "ij]\n  ^");
    }
}
