//! # Snapshot Testing Utilities
//!
//! This module provides utilities for snapshot testing of match results.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seedpeg::testing::SnapshotTester;
//!
//! let tester = SnapshotTester::new("tests/snapshots");
//! tester.assert_result_snapshot("expression_sum", &outcome.result);
//! ```
//!
//! Set `UPDATE_SNAPSHOTS=1` to write the current output instead of comparing.

use crate::event::EventHistory;
use crate::grammar::{Grammar, NodeId};
use crate::result::{MatchResult, RenderMode, render};
use std::path::PathBuf;

/// Snapshot tester for match results
#[derive(Debug, Clone)]
pub struct SnapshotTester {
    snapshot_dir: PathBuf,
    update_mode: bool,
}

impl SnapshotTester {
    /// Create a new snapshot tester
    #[must_use]
    pub fn new(snapshot_dir: impl Into<PathBuf>) -> Self {
        let update_mode = std::env::var("UPDATE_SNAPSHOTS").is_ok()
            || std::env::var("SEEDPEG_UPDATE_SNAPSHOTS").is_ok();
        Self {
            snapshot_dir: snapshot_dir.into(),
            update_mode,
        }
    }

    /// Set update mode (for updating existing snapshots)
    #[must_use]
    pub const fn with_update_mode(mut self, update: bool) -> Self {
        self.update_mode = update;
        self
    }

    /// Assert that the visible tree of a result matches the snapshot
    ///
    /// # Panics
    /// Panics if the snapshot doesn't match (and update mode is disabled)
    pub fn assert_result_snapshot(&self, name: &str, result: &MatchResult) {
        self.check_snapshot(name, &render::tree(result, RenderMode::Visible));
    }

    /// Assert that the full tree of a result, hidden nodes included, matches
    /// the snapshot
    ///
    /// # Panics
    /// Panics if the snapshot doesn't match (and update mode is disabled)
    pub fn assert_full_snapshot(&self, name: &str, result: &MatchResult) {
        self.check_snapshot(name, &render::tree(result, RenderMode::Full));
    }

    /// Assert that an event history matches the snapshot
    ///
    /// # Panics
    /// Panics if the snapshot doesn't match (and update mode is disabled)
    pub fn assert_history_snapshot(&self, name: &str, history: &EventHistory) {
        self.check_snapshot(name, &history.render());
    }

    /// Assert that the definitions of `rules` match the snapshot
    ///
    /// # Panics
    /// Panics if the snapshot doesn't match (and update mode is disabled)
    pub fn assert_grammar_snapshot(&self, name: &str, grammar: &Grammar, rules: &[NodeId]) {
        let mut actual = String::new();
        for &rule in rules {
            actual.push_str(&grammar.describe(rule));
            actual.push('\n');
        }
        self.check_snapshot(name, &actual);
    }

    fn check_snapshot(&self, name: &str, actual: &str) {
        let path = self.snapshot_dir.join(format!("{name}.snap"));

        if self.update_mode {
            std::fs::create_dir_all(&self.snapshot_dir).ok();
            if let Err(err) = std::fs::write(&path, actual) {
                panic!("Failed to write snapshot {}: {err}", path.display());
            }
            return;
        }

        match std::fs::read_to_string(&path) {
            Ok(expected) => assert!(
                actual == expected,
                "Snapshot mismatch for '{name}':\n\
                --- Expected ---\n{expected}\n\
                --- Actual ---\n{actual}\n\
                \n\
                To update snapshots, run with UPDATE_SNAPSHOTS=1"
            ),
            Err(_) => panic!(
                "Snapshot '{name}' not found at {}.\n\
                To create it, run with UPDATE_SNAPSHOTS=1",
                path.display()
            ),
        }
    }
}
