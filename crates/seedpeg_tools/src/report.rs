//! Human- and machine-readable reports for match outcomes and grammars.

use crate::cli::OutputFormat;
use seedpeg::result::{RenderMode, render};
use seedpeg::testing::ReferenceGrammar;
use seedpeg::{InputContext, MatchConfig, MatchOutcome};
use std::fmt::Write;

/// Report for one match of `input`.
///
/// The text format prints the result tree followed by a summary line and, when
/// the input was not fully consumed, the input window around the position
/// where matching stopped.
#[must_use]
pub fn match_report(
    input: &str,
    outcome: &MatchOutcome,
    config: &MatchConfig,
    mode: RenderMode,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => text_report(input, outcome, config, mode),
        OutputFormat::Json => json_report(outcome, mode),
    }
}

fn text_report(
    input: &str,
    outcome: &MatchOutcome,
    config: &MatchConfig,
    mode: RenderMode,
) -> String {
    let mut out = String::new();
    if outcome.is_success() {
        out.push_str(&render::tree(&outcome.result, mode));
        let _ = writeln!(
            out,
            "matched {} of {} chars",
            outcome.position, outcome.input_len
        );
    } else {
        let _ = writeln!(out, "{}", outcome.result);
    }

    if !outcome.is_complete() {
        let stop = outcome
            .furthest_failure
            .map_or(outcome.position, |furthest| furthest.max(outcome.position));
        let mut ctx = InputContext::with_config(input, config);
        if ctx.set_position(stop).is_ok() {
            let _ = writeln!(out, "stopped at {stop}:");
            let _ = writeln!(out, "{}", ctx.window());
        }
    }
    out
}

fn json_report(outcome: &MatchOutcome, mode: RenderMode) -> String {
    let report = serde_json::json!({
        "result": render::to_json(&outcome.result, mode),
        "success": outcome.is_success(),
        "complete": outcome.is_complete(),
        "position": outcome.position,
        "furthest_failure": outcome.furthest_failure,
    });
    serde_json::to_string_pretty(&report).unwrap_or_default()
}

/// Rule definitions and analysis of a reference grammar.
#[must_use]
pub fn grammar_report(fixture: &ReferenceGrammar) -> String {
    let grammar = &fixture.grammar;
    let mut out = String::new();

    for (id, _) in grammar.rules() {
        let _ = write!(out, "{}", grammar.describe(id));
        let mut flags = Vec::new();
        if id == fixture.start {
            flags.push("start");
        }
        if grammar.is_nullable(id) {
            flags.push("nullable");
        }
        if grammar.is_left_recursive(id) {
            flags.push("left-recursive");
        }
        if !flags.is_empty() {
            let _ = write!(out, "    [{}]", flags.join(", "));
        }
        out.push('\n');
    }

    let metrics = grammar.metrics();
    let _ = writeln!(
        out,
        "\n{} nodes, {} rules, {} nullable, {} left-recursive",
        metrics.node_count, metrics.rule_count, metrics.nullable_count, metrics.left_recursive_count
    );
    for id in metrics.indirect_left_recursive {
        let _ = writeln!(
            out,
            "warning: {} is only indirectly left-recursive",
            grammar.node(id).label()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedpeg::Parser;
    use seedpeg::testing::ReferenceGrammarKind;

    fn run(kind: ReferenceGrammarKind, input: &str) -> (MatchOutcome, MatchConfig) {
        let fixture = kind.build().unwrap();
        let config = MatchConfig::default();
        let outcome = Parser::with_config(&fixture.grammar, config)
            .parse(input, fixture.start)
            .unwrap();
        (outcome, config)
    }

    #[test]
    fn test_complete_text_report() {
        let (outcome, config) = run(ReferenceGrammarKind::Expression, "1+2");
        let report = match_report(
            "1+2",
            &outcome,
            &config,
            RenderMode::Visible,
            OutputFormat::Text,
        );
        assert_eq!(
            report,
            "Expression \"1+2\" DETECTED 0..3\n\
             \x20 Expression \"1\" DETECTED 0..1\n\
             \x20   Number \"1\" IMPOSSIBLE 0..1\n\
             \x20 Number \"2\" IMPOSSIBLE 2..3\n\
             matched 3 of 3 chars\n"
        );
    }

    #[test]
    fn test_partial_text_report_shows_window() {
        let (outcome, config) = run(ReferenceGrammarKind::Expression, "1+a");
        let report = match_report(
            "1+a",
            &outcome,
            &config,
            RenderMode::Visible,
            OutputFormat::Text,
        );
        assert!(report.contains("matched 1 of 3 chars\n"));
        assert!(report.ends_with("stopped at 2:\n[1+a]\n   ^\n"));
    }

    #[test]
    fn test_failed_text_report() {
        let (outcome, config) = run(ReferenceGrammarKind::Number, "x");
        let report = match_report("x", &outcome, &config, RenderMode::Full, OutputFormat::Text);
        assert!(report.starts_with("Number failed at 0 IMPOSSIBLE\n"));
    }

    #[test]
    fn test_json_report() {
        let (outcome, config) = run(ReferenceGrammarKind::Number, "42");
        let report = match_report("42", &outcome, &config, RenderMode::Visible, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["complete"], true);
        assert_eq!(value["result"]["type"], "Number");
        assert_eq!(value["result"]["e"], 2);
        assert_eq!(value["furthest_failure"], 2);
    }

    #[test]
    fn test_grammar_report() {
        let fixture = ReferenceGrammarKind::Expression.build().unwrap();
        let report = grammar_report(&fixture);
        assert!(report.starts_with("Number <- ([0-9])+\n"));
        assert!(report.contains(
            "Expression <- (Expression \"+\" Number) / (Number)    [start, left-recursive]\n"
        ));
        assert!(report.contains("2 rules, 0 nullable, 1 left-recursive"));
    }
}
