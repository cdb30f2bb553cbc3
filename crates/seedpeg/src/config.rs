/// Configuration options for the matcher.
///
/// None of these options change what a grammar matches; they only control
/// how much diagnostic information a match collects.
///
/// # Example
///
/// ```rust
/// use seedpeg::MatchConfig;
///
/// // Use default configuration
/// let config = MatchConfig::default();
/// assert!(!config.record_history);
///
/// // Or customize it
/// let config = MatchConfig::default()
///     .with_record_history(true)
///     .with_print_range(4);
/// assert_eq!(config.print_range, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Record every dispatcher and grow transition in an
    /// [`EventHistory`](crate::event::EventHistory)
    pub record_history: bool,

    /// Number of chars shown on each side of the cursor by
    /// [`InputContext::window`](crate::parser::InputContext::window)
    pub print_range: usize,

    /// Track the furthest position at which a terminal failed to match
    pub track_furthest_failure: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            record_history: false,
            print_range: 10,
            track_furthest_failure: true,
        }
    }
}

impl MatchConfig {
    #[must_use]
    pub const fn with_record_history(mut self, record_history: bool) -> Self {
        self.record_history = record_history;
        self
    }

    #[must_use]
    pub const fn with_print_range(mut self, print_range: usize) -> Self {
        self.print_range = print_range;
        self
    }

    #[must_use]
    pub const fn with_track_furthest_failure(mut self, track: bool) -> Self {
        self.track_furthest_failure = track;
        self
    }
}
