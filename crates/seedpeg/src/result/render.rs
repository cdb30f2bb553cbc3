//! Text and JSON views of a [`MatchResult`] tree.

use crate::result::MatchResult;
use std::fmt::Write;
use std::sync::Arc;

/// Which results a renderer includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Only named, non-alias results; hidden ones are spliced away.
    #[default]
    Visible,
    /// Every result, including combinator scaffolding.
    Full,
}

fn children_for(result: &MatchResult, mode: RenderMode) -> Vec<&Arc<MatchResult>> {
    match mode {
        RenderMode::Visible => result.visible_children(),
        RenderMode::Full => result.children().iter().collect(),
    }
}

/// Render an indented tree, one result per line:
///
/// ```text
/// Expression "1+2" DETECTED 0..3
///   Expression "1" DETECTED 0..1
///     Number "1" IMPOSSIBLE 0..1
///   Number "2" IMPOSSIBLE 2..3
/// ```
///
/// In [`RenderMode::Visible`] a hidden root is replaced by its visible
/// children.
#[must_use]
pub fn tree(result: &MatchResult, mode: RenderMode) -> String {
    let mut out = String::new();
    if mode == RenderMode::Visible && result.is_hidden() && result.is_success() {
        for child in result.visible_children() {
            write_tree(&mut out, child, 0, mode);
        }
    } else {
        write_tree(&mut out, result, 0, mode);
    }
    out
}

fn write_tree(out: &mut String, result: &MatchResult, depth: usize, mode: RenderMode) {
    let _ = writeln!(
        out,
        "{:indent$}{} {:?} {} {}..{}",
        "",
        result.label(),
        result.text(),
        result.status(),
        result.start(),
        result.end(),
        indent = depth * 2
    );
    for child in children_for(result, mode) {
        write_tree(out, child, depth + 1, mode);
    }
}

/// Render as JSON objects with `type`, `data`, `left_recursion`, `s`, `e` and,
/// when there are children, `subs`. Offsets are 0-based char indices.
///
/// In [`RenderMode::Visible`] a hidden root becomes an array of its visible
/// children.
#[cfg(feature = "serialize")]
#[must_use]
pub fn to_json(result: &MatchResult, mode: RenderMode) -> serde_json::Value {
    if mode == RenderMode::Visible && result.is_hidden() && result.is_success() {
        serde_json::Value::Array(
            result
                .visible_children()
                .into_iter()
                .map(|child| json_node(child, mode))
                .collect(),
        )
    } else {
        json_node(result, mode)
    }
}

#[cfg(feature = "serialize")]
fn json_node(result: &MatchResult, mode: RenderMode) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    object.insert("type".into(), result.label().into());
    object.insert("data".into(), result.text().into());
    object.insert("left_recursion".into(), result.status().as_str().into());
    object.insert("s".into(), result.start().into());
    object.insert("e".into(), result.end().into());

    let children = children_for(result, mode);
    if !children.is_empty() {
        object.insert(
            "subs".into(),
            serde_json::Value::Array(
                children
                    .into_iter()
                    .map(|child| json_node(child, mode))
                    .collect(),
            ),
        );
    }
    serde_json::Value::Object(object)
}
