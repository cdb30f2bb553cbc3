use crate::error::GrammarError;
use crate::grammar::{CharClass, Grammar, Node, NodeId, NodeKind};
use compact_str::CompactString;
use hashbrown::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Slot {
    Defined(Node),
    Reserved { name: Arc<str>, alias: bool },
}

/// Builder for constructing grammars.
///
/// Node constructors append to the arena and return the new node's handle.
/// Rules are declared in two steps when they refer to themselves: reserve the
/// handle with [`reserve_rule`](Self::reserve_rule), build the body using that
/// handle, then attach the body with [`define_rule`](Self::define_rule).
///
/// Structural problems (dangling handles, bad repetition bounds, rules that
/// were reserved but never defined) are reported by [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    slots: Vec<Slot>,
    rules_by_name: HashMap<Arc<str>, NodeId, ahash::RandomState>,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, slot: Slot) -> NodeId {
        let id = NodeId::from_index(self.slots.len());
        self.slots.push(slot);
        id
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        self.push(Slot::Defined(Node::anonymous(kind)))
    }

    pub fn literal(&mut self, text: impl Into<CompactString>) -> NodeId {
        self.push_node(NodeKind::Literal(text.into()))
    }

    pub fn char_class(&mut self, class: CharClass) -> NodeId {
        self.push_node(NodeKind::CharClass(class))
    }

    pub fn digit(&mut self) -> NodeId {
        self.char_class(CharClass::Digit)
    }

    pub fn letter(&mut self) -> NodeId {
        self.char_class(CharClass::Letter)
    }

    pub fn whitespace(&mut self) -> NodeId {
        self.char_class(CharClass::Whitespace)
    }

    pub fn any_char(&mut self) -> NodeId {
        self.char_class(CharClass::Any)
    }

    pub fn sequence(&mut self, items: impl IntoIterator<Item = NodeId>) -> NodeId {
        let items = items.into_iter().collect();
        self.push_node(NodeKind::Sequence(items))
    }

    pub fn choice(&mut self, alternatives: impl IntoIterator<Item = NodeId>) -> NodeId {
        let alternatives = alternatives.into_iter().collect();
        self.push_node(NodeKind::Choice(alternatives))
    }

    /// Greedy repetition of `node`, at least `min` and at most `max` times.
    /// `max == None` is unbounded.
    pub fn repetition(&mut self, node: NodeId, min: usize, max: Option<usize>) -> NodeId {
        self.push_node(NodeKind::Repetition { node, min, max })
    }

    pub fn optional(&mut self, node: NodeId) -> NodeId {
        self.repetition(node, 0, Some(1))
    }

    pub fn zero_or_more(&mut self, node: NodeId) -> NodeId {
        self.repetition(node, 0, None)
    }

    pub fn one_or_more(&mut self, node: NodeId) -> NodeId {
        self.repetition(node, 1, None)
    }

    pub fn predicate(&mut self, node: NodeId, expect_success: bool) -> NodeId {
        self.push_node(NodeKind::Predicate {
            node,
            expect_success,
        })
    }

    /// `&p`
    pub fn and_predicate(&mut self, node: NodeId) -> NodeId {
        self.predicate(node, true)
    }

    /// `!p`
    pub fn not_predicate(&mut self, node: NodeId) -> NodeId {
        self.predicate(node, false)
    }

    /// Reserve the handle of a named rule whose body is defined later.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or already declared.
    pub fn reserve_rule(&mut self, name: &str) -> Result<NodeId, GrammarError> {
        self.reserve(name, false)
    }

    /// Reserve a named rule that is excluded from memoization and from the
    /// visible parse tree.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or already declared.
    pub fn reserve_alias(&mut self, name: &str) -> Result<NodeId, GrammarError> {
        self.reserve(name, true)
    }

    fn reserve(&mut self, name: &str, alias: bool) -> Result<NodeId, GrammarError> {
        if name.is_empty() {
            return Err(GrammarError::EmptyRuleName);
        }
        if self.rules_by_name.contains_key(name) {
            return Err(GrammarError::DuplicateRule {
                name: name.to_string(),
            });
        }
        let name: Arc<str> = Arc::from(name);
        let id = self.push(Slot::Reserved {
            name: Arc::clone(&name),
            alias,
        });
        self.rules_by_name.insert(name, id);
        Ok(id)
    }

    /// Attach `body` to a reserved rule.
    ///
    /// # Errors
    ///
    /// Returns an error if `rule` is not a handle from this builder, is not a
    /// rule, or already has a body.
    pub fn define_rule(&mut self, rule: NodeId, body: NodeId) -> Result<(), GrammarError> {
        let slot = self
            .slots
            .get_mut(rule.index())
            .ok_or(GrammarError::UnknownNode(rule))?;
        match slot {
            Slot::Reserved { name, alias } => {
                let node = Node {
                    kind: NodeKind::Rule { body },
                    name: Some(Arc::clone(name)),
                    alias: *alias,
                };
                *slot = Slot::Defined(node);
                Ok(())
            }
            Slot::Defined(node) => match (&node.kind, node.name()) {
                (NodeKind::Rule { .. }, Some(name)) => Err(GrammarError::RuleAlreadyDefined {
                    name: name.to_string(),
                }),
                _ => Err(GrammarError::NotARule(rule)),
            },
        }
    }

    /// Declare and define a rule in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or already declared.
    pub fn rule(&mut self, name: &str, body: NodeId) -> Result<NodeId, GrammarError> {
        let id = self.reserve_rule(name)?;
        self.define_rule(id, body)?;
        Ok(id)
    }

    /// Declare and define an alias rule in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or already declared.
    pub fn alias_rule(&mut self, name: &str, body: NodeId) -> Result<NodeId, GrammarError> {
        let id = self.reserve_alias(name)?;
        self.define_rule(id, body)?;
        Ok(id)
    }

    /// Validate the arena and freeze it into a [`Grammar`].
    ///
    /// # Errors
    ///
    /// Returns an error if a node references a handle outside the arena, a
    /// repetition has `max < min`, or a reserved rule was never defined.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let len = self.slots.len();
        let mut nodes = Vec::with_capacity(len);

        for slot in self.slots {
            let node = match slot {
                Slot::Defined(node) => node,
                Slot::Reserved { name, .. } => {
                    return Err(GrammarError::UndefinedRule {
                        name: name.to_string(),
                    });
                }
            };

            if let Some(missing) = node
                .kind
                .components()
                .into_iter()
                .find(|component| component.index() >= len)
            {
                return Err(GrammarError::UnknownNode(missing));
            }

            if let NodeKind::Repetition {
                min,
                max: Some(max),
                ..
            } = node.kind
                && max < min
            {
                return Err(GrammarError::InvalidRepetitionBounds { min, max });
            }

            nodes.push(node);
        }

        let grammar = Grammar {
            nodes,
            rules_by_name: self.rules_by_name,
        };

        let metrics = grammar.metrics();
        tracing::debug!(
            nodes = metrics.node_count,
            rules = metrics.rule_count,
            nullable = metrics.nullable_count,
            left_recursive = metrics.left_recursive_count,
            "built grammar"
        );
        for &id in &metrics.indirect_left_recursive {
            tracing::warn!(
                rule = grammar.node(id).label(),
                "rule is only indirectly left-recursive and will not be grown"
            );
        }

        Ok(grammar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_self_referential_rule() {
        let mut builder = GrammarBuilder::new();
        let expr = builder.reserve_rule("Expr").unwrap();
        let plus = builder.literal("+");
        let digit = builder.digit();
        let sum = builder.sequence([expr, plus, digit]);
        let body = builder.choice([sum, digit]);
        builder.define_rule(expr, body).unwrap();

        let grammar = builder.build().unwrap();
        assert_eq!(grammar.rule("Expr"), Some(expr));
        assert_eq!(grammar.node(expr).kind(), &NodeKind::Rule { body });
        assert_eq!(grammar.rules().count(), 1);
    }

    #[test]
    fn test_duplicate_and_empty_names() {
        let mut builder = GrammarBuilder::new();
        builder.reserve_rule("A").unwrap();
        assert_eq!(
            builder.reserve_alias("A"),
            Err(GrammarError::DuplicateRule { name: "A".into() })
        );
        assert_eq!(builder.reserve_rule(""), Err(GrammarError::EmptyRuleName));
    }

    #[test]
    fn test_undefined_rule() {
        let mut builder = GrammarBuilder::new();
        builder.reserve_rule("Pending").unwrap();
        assert_eq!(
            builder.build().unwrap_err(),
            GrammarError::UndefinedRule {
                name: "Pending".into()
            }
        );
    }

    #[test]
    fn test_define_rule_misuse() {
        let mut builder = GrammarBuilder::new();
        let lit = builder.literal("x");
        assert_eq!(builder.define_rule(lit, lit), Err(GrammarError::NotARule(lit)));

        let rule = builder.rule("X", lit).unwrap();
        assert_eq!(
            builder.define_rule(rule, lit),
            Err(GrammarError::RuleAlreadyDefined { name: "X".into() })
        );

        let dangling = NodeId::from_index(99);
        assert_eq!(
            builder.define_rule(dangling, lit),
            Err(GrammarError::UnknownNode(dangling))
        );
    }

    #[test]
    fn test_dangling_component() {
        let mut builder = GrammarBuilder::new();
        let dangling = NodeId::from_index(42);
        builder.optional(dangling);
        assert_eq!(
            builder.build().unwrap_err(),
            GrammarError::UnknownNode(dangling)
        );
    }

    #[test]
    fn test_invalid_repetition_bounds() {
        let mut builder = GrammarBuilder::new();
        let digit = builder.digit();
        builder.repetition(digit, 3, Some(2));
        assert_eq!(
            builder.build().unwrap_err(),
            GrammarError::InvalidRepetitionBounds { min: 3, max: 2 }
        );
    }

    #[test]
    fn test_alias_rule_is_hidden() {
        let mut builder = GrammarBuilder::new();
        let ws = builder.whitespace();
        let spaces = builder.zero_or_more(ws);
        let skip = builder.alias_rule("Skip", spaces).unwrap();
        let grammar = builder.build().unwrap();
        assert!(grammar.node(skip).is_alias());
        assert!(grammar.node(skip).is_hidden());
        assert_eq!(grammar.node(skip).name(), Some("Skip"));
    }
}
