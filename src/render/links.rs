//! "See Also" cross-reference resolution.
//!
//! Each entry becomes a markdown list item whose path depends on where the
//! referenced file's page sits relative to the page being written.

use crate::model::{Diagnostic, SourceFile};
use crate::render::RenderContext;
use tracing::warn;

/// Marker of an entry the author already wrote as a markdown list link.
const PREFORMATTED: &str = "* [";

/// A raw "See Also" entry, classified by shape.
#[derive(Debug, PartialEq, Eq)]
pub enum Reference<'a> {
    /// `* [label](target)` written by hand.
    Preformatted(&'a str),
    /// `Class.method`
    ClassMethod { class: &'a str, method: &'a str },
    /// A bare function or script name.
    Function(&'a str),
}

impl<'a> Reference<'a> {
    pub fn parse(text: &'a str) -> Self {
        if text.contains(PREFORMATTED) {
            return Reference::Preformatted(text);
        }
        match text.split_once('.') {
            Some((class, rest)) => Reference::ClassMethod {
                class: class.trim(),
                method: rest.split('.').next().unwrap_or(rest).trim(),
            },
            None => Reference::Function(text.trim()),
        }
    }
}

/// Render one "See Also" entry as an indented list item (with newline).
///
/// Returns the diagnostic instead when a bare name matches no known file.
pub fn render_reference(
    text: &str,
    source: &SourceFile,
    ctx: &RenderContext,
) -> Result<String, Diagnostic> {
    match Reference::parse(text) {
        Reference::Preformatted(line) => Ok(format!("    {}\n", line)),
        Reference::ClassMethod { class, method } => {
            let path = class_page_path(class, source, ctx);
            Ok(format!(
                "    * [{}]({}#{})\n",
                text.trim(),
                path,
                method.to_lowercase()
            ))
        }
        Reference::Function(name) => {
            let path = function_page_path(name, source, ctx).ok_or_else(|| {
                warn!(
                    "malformed See Also entry {:?} in {}, skipping",
                    name, source.identifier
                );
                Diagnostic::UnresolvedReference {
                    identifier: source.identifier.clone(),
                    reference: name.to_string(),
                }
            })?;
            Ok(format!(
                "    * [{}]({}#{})\n",
                name,
                path,
                name.to_lowercase()
            ))
        }
    }
}

/// Class pages live in their own subtree: siblings from another class page,
/// reached through the class directory from anywhere else.
fn class_page_path(class: &str, source: &SourceFile, ctx: &RenderContext) -> String {
    if source.page.is_under(ctx.class_dir) {
        format!("../{}/", class)
    } else {
        format!("../{}/{}/", ctx.class_dir, class)
    }
}

fn function_page_path(name: &str, source: &SourceFile, ctx: &RenderContext) -> Option<String> {
    let entry = ctx.catalog.find(name)?;
    if entry.dir == source.dir() {
        return Some("./".to_string());
    }
    Some(source.page.relative_to(&entry.page))
}
