//! Reference grammars used by the tests, benchmarks and the CLI.

use crate::error::GrammarError;
use crate::grammar::{Grammar, GrammarBuilder, NodeId};
use std::fmt;
use std::str::FromStr;

/// A built grammar together with its interesting entry points.
#[derive(Debug, Clone)]
pub struct ReferenceGrammar {
    pub grammar: Grammar,
    /// The rule a match should start from.
    pub start: NodeId,
    /// The `Number` rule.
    pub number: NodeId,
}

/// The reference grammars available by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceGrammarKind {
    /// `Number <- [0-9]+`
    Number,
    /// `Expression <- Expression "+" Number / Number`
    Expression,
    /// `Expression <- Expression "+" Expression / Number`
    RightExpression,
}

impl ReferenceGrammarKind {
    pub const ALL: [Self; 3] = [Self::Number, Self::Expression, Self::RightExpression];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Expression => "expression",
            Self::RightExpression => "right-expression",
        }
    }

    /// # Errors
    ///
    /// Propagates grammar construction errors.
    pub fn build(self) -> Result<ReferenceGrammar, GrammarError> {
        match self {
            Self::Number => number_grammar(),
            Self::Expression => expression_grammar(),
            Self::RightExpression => right_recursive_expression_grammar(),
        }
    }
}

impl fmt::Display for ReferenceGrammarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReferenceGrammarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown grammar '{s}'"))
    }
}

fn add_number(builder: &mut GrammarBuilder) -> Result<NodeId, GrammarError> {
    let digit = builder.digit();
    let digits = builder.one_or_more(digit);
    builder.rule("Number", digits)
}

/// `Number <- [0-9]+`
///
/// # Errors
///
/// Propagates grammar construction errors.
pub fn number_grammar() -> Result<ReferenceGrammar, GrammarError> {
    let mut builder = GrammarBuilder::new();
    let number = add_number(&mut builder)?;
    Ok(ReferenceGrammar {
        grammar: builder.build()?,
        start: number,
        number,
    })
}

/// `Expression <- Expression "+" Number / Number`
///
/// # Errors
///
/// Propagates grammar construction errors.
pub fn expression_grammar() -> Result<ReferenceGrammar, GrammarError> {
    let mut builder = GrammarBuilder::new();
    let number = add_number(&mut builder)?;
    let expression = builder.reserve_rule("Expression")?;
    let plus = builder.literal("+");
    let sum = builder.sequence([expression, plus, number]);
    let body = builder.choice([sum, number]);
    builder.define_rule(expression, body)?;
    Ok(ReferenceGrammar {
        grammar: builder.build()?,
        start: expression,
        number,
    })
}

/// `Expression <- Expression "+" Expression / Number`
///
/// The second self-reference is not in leftmost position, so it is an
/// ordinary memoized call at a later position. Each grow step therefore
/// nests the remaining sum on the right.
///
/// # Errors
///
/// Propagates grammar construction errors.
pub fn right_recursive_expression_grammar() -> Result<ReferenceGrammar, GrammarError> {
    let mut builder = GrammarBuilder::new();
    let number = add_number(&mut builder)?;
    let expression = builder.reserve_rule("Expression")?;
    let plus = builder.literal("+");
    let sum = builder.sequence([expression, plus, expression]);
    let body = builder.choice([sum, number]);
    builder.define_rule(expression, body)?;
    Ok(ReferenceGrammar {
        grammar: builder.build()?,
        start: expression,
        number,
    })
}
