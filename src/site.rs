//! Docs tree builder — routes every source file to its page and drives the
//! renderer.
//!
//! Layout below the project root:
//!
//! | Source                          | Page                          | Header                              |
//! |---------------------------------|-------------------------------|-------------------------------------|
//! | `code/<folder>/<name>.m`        | `docs/<folder>.md`            | `docs/<folder>-head.md`             |
//! | `code/<folder>/@<Class>/<m>.m`  | `docs/<class dir>/<Class>.md` | `docs/<class dir>/<Class>-head.md`  |
//!
//! The header is copied over a page the first time the page is routed to in a
//! run; every later file is appended below a divider.

use crate::catalog::Catalog;
use crate::error::BuildError;
use crate::model::{DocPage, RenderReport, SourceFile};
use crate::render::{self, RenderContext};
use crate::syntax::Syntax;
use glob::Pattern;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Source file extension, without the dot.
const SOURCE_EXT: &str = "m";

/// Prefix of a class folder (`@Class`).
const CLASS_PREFIX: char = '@';

/// Where sources, pages and headers live.
#[derive(Debug, Clone)]
pub struct Layout {
    pub code_dir: PathBuf,
    pub docs_dir: PathBuf,
    /// Directory below `docs_dir` holding class pages.
    pub class_dir: String,
    pub header_suffix: String,
}

/// A source file with the page it is documented on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub source: PathBuf,
    pub identifier: String,
    pub page: DocPage,
    pub destination: PathBuf,
    pub header: PathBuf,
}

/// Counts for one build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub files_rendered: usize,
    pub files_skipped: usize,
    pub blocks: usize,
    pub destinations: usize,
    pub diagnostics: usize,
}

impl Layout {
    /// Route a source file by its parent directory: `@Class` folders go to the
    /// class subtree, anything else to its folder page.
    pub fn route(&self, source: &Path) -> Option<Routed> {
        let identifier = source.file_stem()?.to_str()?.to_string();
        let parent = source.parent()?.file_name()?.to_str()?;

        let (page, destination, header) = match parent.strip_prefix(CLASS_PREFIX) {
            Some(class) => {
                let dir = self.docs_dir.join(&self.class_dir);
                (
                    DocPage::new([self.class_dir.as_str(), class]),
                    dir.join(format!("{}.md", class)),
                    dir.join(format!("{}{}", class, self.header_suffix)),
                )
            }
            None => (
                DocPage::new([parent]),
                self.docs_dir.join(format!("{}.md", parent)),
                self.docs_dir.join(format!("{}{}", parent, self.header_suffix)),
            ),
        };

        Some(Routed {
            source: source.to_path_buf(),
            identifier,
            page,
            destination,
            header,
        })
    }

    /// Enumerate and route every source file in build order.
    ///
    /// Folders sorted by name; inside a folder, `.m` files and `@Class` folders
    /// sorted case-insensitively; class members sorted by name.
    pub fn discover(&self) -> Result<Vec<Routed>, BuildError> {
        if !self.code_dir.is_dir() {
            return Err(BuildError::MissingSourceTree {
                path: self.code_dir.clone(),
            });
        }

        let mut routed = Vec::new();
        for folder in matching(&self.code_dir, "*")?.into_iter().filter(|p| p.is_dir()) {
            let mut items = matching(&folder, &format!("*.{}", SOURCE_EXT))?;
            items.extend(
                matching(&folder, &format!("{}*", CLASS_PREFIX))?
                    .into_iter()
                    .filter(|p| p.is_dir()),
            );
            items.sort_by_key(|p| file_name(p).to_lowercase());

            for item in items {
                if item.is_dir() {
                    let mut members = matching(&item, &format!("*.{}", SOURCE_EXT))?;
                    members.sort();
                    routed.extend(members.iter().filter_map(|m| self.route(m)));
                } else if let Some(r) = self.route(&item) {
                    routed.push(r);
                }
            }
        }
        Ok(routed)
    }
}

/// Entries of `dir` matching a glob pattern, sorted.
fn matching(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, BuildError> {
    let full = format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), pattern);
    let mut found: Vec<PathBuf> = glob::glob(&full)?.filter_map(|r| r.ok()).collect();
    found.sort();
    Ok(found)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Catalog of every routed file, for "See Also" resolution.
pub fn catalog(routed: &[Routed]) -> Catalog {
    let mut catalog = Catalog::new();
    for r in routed {
        catalog.insert(&r.source, r.page.clone());
    }
    catalog
}

/// Load a source file; undecodable bytes are replaced rather than rejected.
pub fn load(routed: &Routed) -> Result<SourceFile, BuildError> {
    let bytes = fs::read(&routed.source).map_err(|e| BuildError::io("read", &routed.source, e))?;
    Ok(SourceFile::new(
        routed.identifier.clone(),
        routed.source.clone(),
        routed.page.clone(),
        &String::from_utf8_lossy(&bytes),
    ))
}

/// Writes pages, remembering which destinations already received a header.
pub struct SiteBuilder<'a> {
    layout: &'a Layout,
    syntax: &'a Syntax,
    initialized: HashSet<PathBuf>,
    failed: HashSet<PathBuf>,
}

impl<'a> SiteBuilder<'a> {
    pub fn new(layout: &'a Layout, syntax: &'a Syntax) -> Self {
        Self {
            layout,
            syntax,
            initialized: HashSet::new(),
            failed: HashSet::new(),
        }
    }

    /// Build every page. Only a missing source tree aborts the run.
    pub fn build(&mut self) -> Result<BuildSummary, BuildError> {
        let (layout, syntax) = (self.layout, self.syntax);
        let routed = layout.discover()?;
        let catalog = catalog(&routed);
        debug!("{} source files, {} catalog entries", routed.len(), catalog.len());

        let ctx = RenderContext::new(syntax, &catalog, &layout.class_dir);
        let mut summary = BuildSummary::default();

        for r in &routed {
            match self.write_one(r, &ctx) {
                Ok(report) => {
                    for d in &report.diagnostics {
                        debug!("{}: {}", r.source.display(), d);
                    }
                    summary.files_rendered += 1;
                    summary.blocks += report.blocks;
                    summary.diagnostics += report.diagnostics.len();
                }
                Err(e) => {
                    summary.files_skipped += 1;
                    // One message per destination, not per file
                    if self.failed.insert(r.destination.clone()) {
                        warn!("[ABORT] {}, skipping", e);
                    } else {
                        debug!("skipping {}: {}", r.source.display(), e);
                    }
                }
            }
        }

        summary.destinations = self.initialized.len();
        Ok(summary)
    }

    fn write_one(
        &mut self,
        r: &Routed,
        ctx: &RenderContext,
    ) -> Result<RenderReport, BuildError> {
        if !r.header.is_file() {
            return Err(BuildError::MissingHeader {
                path: r.header.clone(),
            });
        }
        if let Some(dir) = r.destination.parent() {
            if !dir.is_dir() {
                return Err(BuildError::MissingDestinationDir {
                    path: dir.to_path_buf(),
                });
            }
        }

        let first = !self.initialized.contains(&r.destination);
        if first {
            fs::copy(&r.header, &r.destination)
                .map_err(|e| BuildError::io("copy header to", &r.destination, e))?;
            self.initialized.insert(r.destination.clone());
            info!("[OK] generating docs for {}", r.page);
        }

        let source = load(r)?;
        let mut out = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&r.destination)
            .map_err(|e| BuildError::io("open", &r.destination, e))?;

        render::render(&source, &mut out, first, ctx)
            .map_err(|e| BuildError::io("write", &r.destination, e))
    }
}
