//! Documentation block boundary detection.
//!
//! A block starts at the marker line naming the file (or, in multi-function
//! files, one of its functions) and runs through the last contiguous comment
//! line before code, a declaration or the end-of-documentation sentinel.

use crate::model::{Boundary, FunctionDecl, MatchKind};
use crate::syntax::Syntax;

/// Find the next documentation block in `lines`.
///
/// `search_from` is the start of the previously rendered block when resuming a
/// multi-function file; matching then begins on the following line.
pub fn detect(
    lines: &[String],
    identifier: &str,
    kind: MatchKind,
    search_from: Option<usize>,
    decls: &[FunctionDecl],
    syntax: &Syntax,
) -> Boundary {
    let start = match kind {
        MatchKind::ByFilename => find_filename_marker(lines, identifier, syntax),
        MatchKind::ByFunctionName => find_function_marker(lines, search_from, decls, syntax),
    };
    let multi_active = kind == MatchKind::ByFunctionName && start.is_some();
    let end = find_end(lines, start.unwrap_or(0), syntax);

    Boundary {
        start,
        end,
        multi_active,
    }
}

fn find_filename_marker(lines: &[String], identifier: &str, syntax: &Syntax) -> Option<usize> {
    let wanted = identifier.to_lowercase();
    lines
        .iter()
        .position(|line| syntax.marker_free(line).to_lowercase() == wanted)
}

/// First line after `search_from` naming a declared function, skipping any
/// candidate whose previous non-blank line is a comment (a "See Also" entry).
fn find_function_marker(
    lines: &[String],
    search_from: Option<usize>,
    decls: &[FunctionDecl],
    syntax: &Syntax,
) -> Option<usize> {
    let begin = search_from.map_or(0, |a| a + 1);
    let mut prev_is_comment = false;

    for (i, line) in lines.iter().enumerate() {
        if i >= begin && !prev_is_comment {
            let text = syntax.marker_free(line).to_lowercase();
            if !text.is_empty() && decls.iter().any(|d| d.name == text) {
                return Some(i);
            }
        }
        if !line.trim().is_empty() {
            prev_is_comment = syntax.is_comment(line);
        }
    }
    None
}

/// One past the last documentation line at or after `from`, or `None` when the
/// file ends before any terminating line.
fn find_end(lines: &[String], from: usize, syntax: &Syntax) -> Option<usize> {
    let mut last_comment: Option<usize> = None;

    for (i, line) in lines.iter().enumerate().skip(from) {
        let line = line.trim();
        let is_comment = syntax.is_comment(line);
        let sentinel = syntax.has_sentinel(line);

        // Bare markers are not tracked so trailing `%` lines stay out
        if is_comment && !syntax.is_bare_comment(line) && !sentinel {
            last_comment = Some(i);
        }

        if syntax.is_declaration(line) || (!line.is_empty() && !is_comment) || sentinel {
            return Some(last_comment.map_or(0, |c| c + 1));
        }
    }
    None
}
