//! Renderer module — block detection, markdown rendering and the
//! per-function loop for multi-function files.

pub mod links;
pub mod markdown;

use crate::catalog::Catalog;
use crate::model::{Diagnostic, MatchKind, RenderReport, SourceFile};
use crate::parser::{self, boundary, declarations};
use crate::syntax::Syntax;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Everything a render needs besides the file itself.
pub struct RenderContext<'a> {
    pub syntax: &'a Syntax,
    pub catalog: &'a Catalog,
    /// Top-level docs directory holding class pages.
    pub class_dir: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(syntax: &'a Syntax, catalog: &'a Catalog, class_dir: &'a str) -> Self {
        Self {
            syntax,
            catalog,
            class_dir,
        }
    }
}

/// Append the documentation of `source` to `out`.
///
/// `first` tells whether nothing precedes this file on the destination. Missing
/// blocks and unresolved references are logged and reported, never returned as
/// errors; only a failed write is.
pub fn render<W: Write>(
    source: &SourceFile,
    out: &mut W,
    first: bool,
    ctx: &RenderContext,
) -> io::Result<RenderReport> {
    let kind = parser::match_kind(&source.identifier, ctx.syntax);
    let decls = match kind {
        MatchKind::ByFunctionName => declarations::extract(&source.lines, ctx.syntax),
        MatchKind::ByFilename => Vec::new(),
    };

    let mut report = RenderReport::default();
    let mut first = first;
    let mut search_from = None;

    loop {
        let found = boundary::detect(
            &source.lines,
            &source.identifier,
            kind,
            search_from,
            &decls,
            ctx.syntax,
        );

        match found.range() {
            Some((start, end)) => {
                let text = markdown::render_block(source, start, end, first, ctx, &mut report);
                out.write_all(text.as_bytes())?;
                report.blocks += 1;
                first = false;
            }
            // Only the first search reports; later misses end the loop below
            None if !found.multi_active && search_from.is_none() => {
                warn!("no documentation for {}, skipping", source.identifier);
                report.diagnostics.push(Diagnostic::MissingBoundary {
                    identifier: source.identifier.clone(),
                });
                return Ok(report);
            }
            None => {}
        }

        if kind == MatchKind::ByFilename {
            break;
        }

        // Resume after this block while declarations remain below it
        let Some(start) = found.start else {
            debug!("no further documented functions in {}", source.identifier);
            break;
        };
        match decls.last() {
            Some(last) if start < last.line => search_from = Some(start),
            _ => break,
        }
    }

    Ok(report)
}
