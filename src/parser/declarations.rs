//! Function declaration extraction for multi-function files.

use crate::model::FunctionDecl;
use crate::syntax::Syntax;
use regex::Regex;
use std::sync::LazyLock;

// Leading identifier of the declaration target, e.g. `foo` or `set.Prop`
static RE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*").unwrap());

/// Collect every function declaration in file order.
///
/// `function [a, b] = Foo(x)` → `(line, "foo")`. Declarations without a
/// recognizable name are ignored.
pub fn extract(lines: &[String], syntax: &Syntax) -> Vec<FunctionDecl> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| syntax.is_declaration(line))
        .filter_map(|(i, line)| {
            declared_name(line, syntax).map(|name| FunctionDecl { line: i, name })
        })
        .collect()
}

/// Name of the function declared on `line`, lowercased.
fn declared_name(line: &str, syntax: &Syntax) -> Option<String> {
    let rest = line
        .trim_start()
        .strip_prefix(syntax.function_keyword.as_str())?;
    let compact: String = rest.chars().filter(|c| !c.is_whitespace()).collect();

    // Name sits between `=` and `(`; without outputs there is no `=`
    let target = match compact.find('=') {
        Some(pos) => &compact[pos + 1..],
        None => compact.as_str(),
    };
    RE_NAME
        .find(target)
        .map(|m| m.as_str().to_lowercase())
}
