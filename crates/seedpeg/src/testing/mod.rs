//! # Testing Utilities
//!
//! Reference grammars and snapshot helpers shared by the unit tests, the
//! integration tests, the benchmarks and the CLI.

pub mod fixtures;
pub mod snapshot;

pub use fixtures::{ReferenceGrammar, ReferenceGrammarKind};
pub use snapshot::SnapshotTester;
