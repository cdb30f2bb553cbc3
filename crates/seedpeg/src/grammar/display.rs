//! PEG-notation rendering of grammar nodes.

use crate::grammar::{Grammar, NodeId, NodeKind};

/// The PEG definition of `id`. Rules appearing as components are rendered by
/// name, so recursive rules print finitely.
#[must_use]
pub fn definition(grammar: &Grammar, id: NodeId) -> String {
    let Some(node) = grammar.get(id) else {
        return format!("<{id}>");
    };
    match &node.kind {
        NodeKind::Literal(text) => format!("\"{}\"", text.escape_default()),
        NodeKind::CharClass(class) => class.definition(),
        NodeKind::Sequence(items) => items
            .iter()
            .map(|&item| component(grammar, item))
            .collect::<Vec<_>>()
            .join(" "),
        NodeKind::Choice(alternatives) => alternatives
            .iter()
            .map(|&alternative| format!("({})", component(grammar, alternative)))
            .collect::<Vec<_>>()
            .join(" / "),
        NodeKind::Repetition { node, min, max } => {
            let inner = component(grammar, *node);
            let suffix = match (*min, *max) {
                (0, Some(1)) => "?".to_string(),
                (0, None) => "*".to_string(),
                (1, None) => "+".to_string(),
                (min, Some(max)) if min == max => format!("{{{min}}}"),
                (0, Some(max)) => format!("{{,{max}}}"),
                (min, None) => format!("{{{min},}}"),
                (min, Some(max)) => format!("{{{min},{max}}}"),
            };
            format!("({inner}){suffix}")
        }
        NodeKind::Predicate {
            node,
            expect_success,
        } => {
            let operator = if *expect_success { '&' } else { '!' };
            format!("{operator}{}", atom(grammar, *node))
        }
        NodeKind::Rule { body } => component(grammar, *body),
    }
}

/// `Name <- definition` for rules, the plain definition otherwise.
#[must_use]
pub fn describe(grammar: &Grammar, id: NodeId) -> String {
    match grammar.get(id) {
        Some(node) if matches!(node.kind, NodeKind::Rule { .. }) => {
            format!("{} <- {}", node.label(), definition(grammar, id))
        }
        _ => definition(grammar, id),
    }
}

fn component(grammar: &Grammar, id: NodeId) -> String {
    match grammar.get(id) {
        Some(node) if node.name.is_some() => node.label().to_string(),
        _ => definition(grammar, id),
    }
}

fn atom(grammar: &Grammar, id: NodeId) -> String {
    let rendered = component(grammar, id);
    match grammar.get(id).map(|node| &node.kind) {
        Some(NodeKind::Sequence(items) | NodeKind::Choice(items)) if items.len() > 1 => {
            format!("({rendered})")
        }
        _ => rendered,
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::GrammarBuilder;

    #[test]
    fn test_left_recursive_rule_description() {
        let mut builder = GrammarBuilder::new();
        let digit = builder.digit();
        let digits = builder.one_or_more(digit);
        let number = builder.rule("Number", digits).unwrap();
        let expr = builder.reserve_rule("Expression").unwrap();
        let plus = builder.literal("+");
        let sum = builder.sequence([expr, plus, number]);
        let body = builder.choice([sum, number]);
        builder.define_rule(expr, body).unwrap();
        let grammar = builder.build().unwrap();

        assert_eq!(
            grammar.describe(expr),
            "Expression <- (Expression \"+\" Number) / (Number)"
        );
        assert_eq!(grammar.describe(number), "Number <- ([0-9])+");
        assert_eq!(grammar.definition(sum), "Expression \"+\" Number");
    }

    #[test]
    fn test_repetition_and_predicate_forms() {
        let mut builder = GrammarBuilder::new();
        let a = builder.literal("a");
        let b = builder.literal("b");
        let ab = builder.sequence([a, b]);
        let cases = [
            (builder.optional(a), "(\"a\")?"),
            (builder.zero_or_more(a), "(\"a\")*"),
            (builder.one_or_more(a), "(\"a\")+"),
            (builder.repetition(a, 2, Some(2)), "(\"a\"){2}"),
            (builder.repetition(a, 0, Some(3)), "(\"a\"){,3}"),
            (builder.repetition(a, 2, None), "(\"a\"){2,}"),
            (builder.repetition(a, 2, Some(4)), "(\"a\"){2,4}"),
            (builder.and_predicate(a), "&\"a\""),
            (builder.not_predicate(ab), "!(\"a\" \"b\")"),
        ];
        let grammar = builder.build().unwrap();

        for (id, expected) in cases {
            assert_eq!(grammar.definition(id), expected);
        }
    }

    #[test]
    fn test_literal_escaping() {
        let mut builder = GrammarBuilder::new();
        let quote = builder.literal("\"\n");
        let grammar = builder.build().unwrap();
        assert_eq!(grammar.definition(quote), "\"\\\"\\n\"");
    }

    #[test]
    fn test_named_body_prints_by_name() {
        let mut builder = GrammarBuilder::new();
        let digit = builder.digit();
        let digits = builder.one_or_more(digit);
        let number = builder.rule("Number", digits).unwrap();
        let value = builder.rule("Value", number).unwrap();
        let grammar = builder.build().unwrap();

        assert_eq!(grammar.describe(value), "Value <- Number");
        assert_eq!(grammar.definition(value), "Number");
    }

    #[test]
    fn test_rule_cycles_terminate() {
        let mut builder = GrammarBuilder::new();
        let a = builder.reserve_rule("A").unwrap();
        builder.define_rule(a, a).unwrap();
        let p = builder.reserve_rule("P").unwrap();
        let q = builder.reserve_rule("Q").unwrap();
        builder.define_rule(p, q).unwrap();
        builder.define_rule(q, p).unwrap();
        let grammar = builder.build().unwrap();

        assert_eq!(grammar.describe(a), "A <- A");
        assert_eq!(grammar.describe(p), "P <- Q");
        assert_eq!(grammar.describe(q), "Q <- P");
    }
}
