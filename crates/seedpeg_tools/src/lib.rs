//! Seedpeg Tools - command-line driver for the seedpeg matching engine
//!
//! This crate wires the reference grammars to the matcher and renders match
//! results, event histories and grammar analysis.

pub mod cli;
pub mod report;

pub use report::{grammar_report, match_report};
