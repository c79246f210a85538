//! Markdown rendering of one documentation block.

use crate::model::{RenderReport, SourceFile};
use crate::render::links;
use crate::render::RenderContext;

/// Divider written between blocks sharing a destination.
pub const DIVIDER: &str = "-------";

/// Callout opening a "See Also" section.
pub const SEE_ALSO_CALLOUT: &str = "!!! info \"See Also\"";

/// Render lines `start..end` of `source` into markdown.
///
/// Unresolvable "See Also" entries are dropped and recorded in `report`.
pub fn render_block(
    source: &SourceFile,
    start: usize,
    end: usize,
    first: bool,
    ctx: &RenderContext,
    report: &mut RenderReport,
) -> String {
    let mut output = String::from("\n\n");
    if !first {
        output.push_str(DIVIDER);
        output.push_str("\n\n");
    }

    let mut format_links = false;

    for raw in &source.lines[start..end] {
        let line = ctx.syntax.strip_comment(raw);

        if line.trim().is_empty() {
            output.push('\n');
            continue;
        }

        if ctx.syntax.opens_see_also(&line) {
            output.push_str("\n\n");
            output.push_str(SEE_ALSO_CALLOUT);
            output.push('\n');
            format_links = true;
            continue;
        }

        if format_links {
            match links::render_reference(&line, source, ctx) {
                Ok(item) => output.push_str(&item),
                Err(diagnostic) => report.diagnostics.push(diagnostic),
            }
        } else {
            output.push_str(&line);
            output.push('\n');
        }
    }

    output.push_str("\n\n");
    output
}
