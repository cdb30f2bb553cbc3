//! Tests for the structural combinators: literals, character classes,
//! sequences, choices, repetitions and predicates

#![cfg(test)]

use seedpeg::event::EventKind;
use seedpeg::{CharClass, GrammarBuilder, MatchConfig, NodeId, Parser, PatternKind};

fn parse(builder: GrammarBuilder, start: NodeId, input: &str) -> seedpeg::MatchOutcome {
    let grammar = builder.build().unwrap();
    Parser::new(&grammar).parse(input, start).unwrap()
}

#[test]
fn test_literal() {
    let mut builder = GrammarBuilder::new();
    let abc = builder.literal("abc");
    let outcome = parse(builder, abc, "abcd");
    assert!(outcome.is_success());
    assert_eq!(outcome.result.text(), "abc");
    assert_eq!(outcome.position, 3);
    assert_eq!(outcome.result.kind(), Some(PatternKind::Literal));
}

#[test]
fn test_literal_failure_records_mismatch_position() {
    let mut builder = GrammarBuilder::new();
    let abc = builder.literal("abc");
    let outcome = parse(builder, abc, "abx");
    assert!(!outcome.is_success());
    assert_eq!(outcome.position, 0);
    assert_eq!(outcome.furthest_failure, Some(2));
}

#[test]
fn test_literal_counts_chars() {
    let mut builder = GrammarBuilder::new();
    let word = builder.literal("héllo");
    let outcome = parse(builder, word, "héllo!");
    assert_eq!(outcome.position, 5);
    assert_eq!(outcome.result.span(), 0..5);
    assert_eq!(outcome.input_len, 6);
}

#[test]
fn test_char_classes() {
    let cases = [
        (CharClass::Digit, "7", true),
        (CharClass::Digit, "x", false),
        (CharClass::Letter, "é", true),
        (CharClass::Whitespace, "\t", true),
        (CharClass::Alphanumeric, "_", false),
        (CharClass::Any, "\u{1F600}", true),
        (CharClass::Any, "", false),
        (CharClass::Range('a', 'f'), "c", true),
        (CharClass::Range('a', 'f'), "g", false),
        (
            CharClass::Custom {
                name: "vowel",
                predicate: |c| "aeiou".contains(c),
            },
            "e",
            true,
        ),
    ];

    for (class, input, expected) in cases {
        let mut builder = GrammarBuilder::new();
        let node = builder.char_class(class);
        let outcome = parse(builder, node, input);
        assert_eq!(outcome.is_success(), expected, "{class} on {input:?}");
        assert_eq!(outcome.position, usize::from(expected));
    }
}

#[test]
fn test_sequence_is_contiguous() {
    let mut builder = GrammarBuilder::new();
    let a = builder.literal("a");
    let digit = builder.digit();
    let b = builder.literal("b");
    let seq = builder.sequence([a, digit, b]);
    let outcome = parse(builder, seq, "a1b");

    assert!(outcome.is_complete());
    let children = outcome.result.children();
    assert_eq!(children.len(), 3);
    for pair in children.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start());
    }
    assert_eq!(children[0].start(), outcome.result.start());
    assert_eq!(children[2].end(), outcome.result.end());
}

#[test]
fn test_sequence_failure_restores_cursor() {
    let mut builder = GrammarBuilder::new();
    let a = builder.literal("a");
    let b = builder.literal("b");
    let seq = builder.sequence([a, b]);
    let outcome = parse(builder, seq, "ac");

    assert!(!outcome.is_success());
    assert_eq!(outcome.position, 0);
    assert_eq!(outcome.result.span(), 0..0);
    assert_eq!(outcome.furthest_failure, Some(1));
}

#[test]
fn test_empty_sequence_matches_empty() {
    let mut builder = GrammarBuilder::new();
    let seq = builder.sequence([]);
    let outcome = parse(builder, seq, "abc");
    assert!(outcome.is_success());
    assert_eq!(outcome.result.span(), 0..0);
    assert_eq!(outcome.position, 0);
}

#[test]
fn test_choice_is_left_biased() {
    let mut builder = GrammarBuilder::new();
    let a = builder.literal("a");
    let ab = builder.literal("ab");
    let choice = builder.choice([a, ab]);
    let outcome = parse(builder, choice, "ab");

    assert!(outcome.is_success());
    assert_eq!(outcome.result.text(), "a");
    assert_eq!(outcome.position, 1);
}

#[test]
fn test_choice_falls_through() {
    let mut builder = GrammarBuilder::new();
    let ab = builder.literal("ab");
    let ac = builder.literal("ac");
    let choice = builder.choice([ab, ac]);
    let outcome = parse(builder, choice, "ac");

    assert!(outcome.is_complete());
    assert_eq!(outcome.result.children().len(), 1);
    assert_eq!(outcome.result.text(), "ac");
}

#[test]
fn test_empty_choice_fails() {
    let mut builder = GrammarBuilder::new();
    let choice = builder.choice([]);
    let outcome = parse(builder, choice, "a");
    assert!(!outcome.is_success());
}

#[test]
fn test_repetition_respects_maximum() {
    let mut builder = GrammarBuilder::new();
    let digit = builder.digit();
    let rep = builder.repetition(digit, 1, Some(3));
    let outcome = parse(builder, rep, "1234");

    assert!(outcome.is_success());
    assert_eq!(outcome.result.text(), "123");
    assert_eq!(outcome.position, 3);
    assert_eq!(outcome.result.children().len(), 3);
}

#[test]
fn test_repetition_below_minimum_fails() {
    let mut builder = GrammarBuilder::new();
    let digit = builder.digit();
    let rep = builder.repetition(digit, 3, None);
    let outcome = parse(builder, rep, "12x");

    assert!(!outcome.is_success());
    assert_eq!(outcome.position, 0);
    assert_eq!(outcome.furthest_failure, Some(2));
}

#[test]
fn test_optional_and_zero_or_more_accept_empty() {
    let mut builder = GrammarBuilder::new();
    let a = builder.literal("a");
    let optional = builder.optional(a);
    let many = builder.zero_or_more(a);
    let grammar = builder.build().unwrap();
    let parser = Parser::new(&grammar);

    for start in [optional, many] {
        let outcome = parser.parse("b", start).unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.result.span(), 0..0);
        assert_eq!(outcome.position, 0);
    }
    assert_eq!(parser.parse("aaab", many).unwrap().position, 3);
    assert_eq!(parser.parse("aaab", optional).unwrap().position, 1);
}

#[test]
fn test_repetition_of_nullable_terminates() {
    let mut builder = GrammarBuilder::new();
    let a = builder.literal("a");
    let optional = builder.optional(a);
    let rep = builder.repetition(optional, 5, None);
    let outcome = parse(builder, rep, "aab");

    // The zero-width match at 2 stops the loop and satisfies the minimum.
    assert!(outcome.is_success());
    assert_eq!(outcome.result.text(), "aa");
    assert_eq!(outcome.position, 2);
    assert_eq!(outcome.result.children().len(), 3);
}

#[test]
fn test_and_predicate() {
    let mut builder = GrammarBuilder::new();
    let digit = builder.digit();
    let ahead = builder.and_predicate(digit);
    let any = builder.any_char();
    let seq = builder.sequence([ahead, any]);
    let grammar = builder.build().unwrap();
    let parser = Parser::new(&grammar);

    let outcome = parser.parse("5", ahead).unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.result.span(), 0..0);
    assert!(outcome.result.children().is_empty());
    assert_eq!(outcome.position, 0);

    assert_eq!(parser.parse("5", seq).unwrap().result.text(), "5");
    assert!(!parser.parse("x", seq).unwrap().is_success());
}

#[test]
fn test_not_predicate() {
    let mut builder = GrammarBuilder::new();
    let quote = builder.literal("\"");
    let not_quote = builder.not_predicate(quote);
    let any = builder.any_char();
    let unquoted = builder.sequence([not_quote, any]);
    let body = builder.zero_or_more(unquoted);
    let grammar = builder.build().unwrap();

    let outcome = Parser::new(&grammar).parse("abc\"def", body).unwrap();
    assert_eq!(outcome.result.text(), "abc");
    assert_eq!(outcome.position, 3);
}

#[test]
fn test_predicate_failures_do_not_move_furthest_failure() {
    let mut builder = GrammarBuilder::new();
    let keyword = builder.literal("xyz");
    let not_keyword = builder.not_predicate(keyword);
    let a = builder.literal("a");
    let seq = builder.sequence([not_keyword, a]);
    let outcome = parse(builder, seq, "a");

    assert!(outcome.is_complete());
    assert_eq!(outcome.furthest_failure, None);
}

#[test]
fn test_furthest_failure_can_be_disabled() {
    let mut builder = GrammarBuilder::new();
    let abc = builder.literal("abc");
    let grammar = builder.build().unwrap();
    let config = MatchConfig::default().with_track_furthest_failure(false);
    let outcome = Parser::with_config(&grammar, config).parse("abx", abc).unwrap();
    assert_eq!(outcome.furthest_failure, None);
}

#[test]
fn test_named_body_keeps_its_node() {
    let mut builder = GrammarBuilder::new();
    let digit = builder.digit();
    let digits = builder.one_or_more(digit);
    let number = builder.rule("Number", digits).unwrap();
    let value = builder.rule("Value", number).unwrap();
    let outcome = parse(builder, value, "42");

    assert_eq!(outcome.result.type_name(), Some("Value"));
    let children = outcome.result.visible_children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].type_name(), Some("Number"));
    assert_eq!(children[0].text(), "42");
}

#[test]
fn test_alias_is_spliced_out() {
    let mut builder = GrammarBuilder::new();
    let digit = builder.digit();
    let digits = builder.one_or_more(digit);
    let number = builder.rule("Number", digits).unwrap();
    let comma = builder.literal(",");
    let pair = builder.sequence([number, comma, number]);
    let pair = builder.alias_rule("Pair", pair).unwrap();
    let list = builder.rule("List", pair).unwrap();
    let outcome = parse(builder, list, "1,2");

    let labels: Vec<&str> = outcome
        .result
        .visible_children()
        .into_iter()
        .map(|child| child.label())
        .collect();
    assert_eq!(labels, ["Number", "Number"]);
}

#[test]
fn test_named_rule_is_evaluated_once_per_position() {
    // Statement <- Number "x" / Number "y"
    let mut builder = GrammarBuilder::new();
    let digit = builder.digit();
    let digits = builder.one_or_more(digit);
    let number = builder.rule("Number", digits).unwrap();
    let x = builder.literal("x");
    let y = builder.literal("y");
    let with_x = builder.sequence([number, x]);
    let with_y = builder.sequence([number, y]);
    let body = builder.choice([with_x, with_y]);
    let statement = builder.rule("Statement", body).unwrap();
    let grammar = builder.build().unwrap();

    let config = MatchConfig::default().with_record_history(true);
    let outcome = Parser::with_config(&grammar, config)
        .parse("12y", statement)
        .unwrap();
    assert!(outcome.is_complete());

    let history = outcome.history.unwrap();
    let number_events = |kind: fn(&EventKind) -> bool| {
        history
            .iter()
            .filter(|event| event.label.as_str() == "Number" && kind(&event.kind))
            .count()
    };
    assert_eq!(number_events(|k| matches!(k, EventKind::MemoCheck)), 2);
    assert_eq!(number_events(|k| matches!(k, EventKind::Attempt)), 1);
    assert_eq!(number_events(|k| matches!(k, EventKind::AssumeResult { .. })), 1);
}
