//! matdoc — generate cross-linked markdown pages from documentation comments
//! in MATLAB-style source files.
//!
//! Two modes:
//!
//! - **build mode**: `matdoc --root .` walks `code/`, writes pages into `docs/`
//! - **preview mode**: `matdoc code/utils/foo.m` renders the given files to stdout

mod catalog;
mod error;
mod model;
mod parser;
mod render;
mod site;
mod syntax;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(
    name = "matdoc",
    about = "Generate cross-linked markdown pages from documentation comments"
)]
struct Cli {
    /// Source files to preview on stdout. If omitted, builds the whole docs tree.
    files: Vec<PathBuf>,

    /// Project root holding the source and docs trees
    #[arg(short = 'r', long, default_value = ".")]
    root: PathBuf,

    /// Source tree, relative to the root
    #[arg(long, default_value = "code")]
    code_dir: PathBuf,

    /// Docs tree, relative to the root
    #[arg(long, default_value = "docs")]
    docs_dir: PathBuf,

    /// Directory below the docs tree holding class pages
    #[arg(long, default_value = "classes")]
    class_dir: String,

    /// Suffix of header templates, e.g. utils-head.md
    #[arg(long, default_value = "-head.md", allow_hyphen_values = true)]
    header_suffix: String,

    /// Identifier fragment marking files documented per function
    #[arg(long, default_value = "abstract")]
    multi_marker: String,

    /// Characters that open a line comment
    #[arg(long, default_value = "%#")]
    comment_markers: String,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn layout(&self) -> site::Layout {
        site::Layout {
            code_dir: self.root.join(&self.code_dir),
            docs_dir: self.root.join(&self.docs_dir),
            class_dir: self.class_dir.clone(),
            header_suffix: self.header_suffix.clone(),
        }
    }

    fn syntax(&self) -> syntax::Syntax {
        syntax::Syntax {
            comment_markers: self.comment_markers.chars().collect(),
            multi_marker: self.multi_marker.clone(),
            ..syntax::Syntax::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if cli.files.is_empty() {
        return build_mode(&cli);
    }

    preview_mode(&cli)
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// build mode: every source file into its page below the docs tree.
fn build_mode(cli: &Cli) -> Result<()> {
    let layout = cli.layout();
    let syntax = cli.syntax();

    let summary = site::SiteBuilder::new(&layout, &syntax)
        .build()
        .with_context(|| format!("failed to build docs from {}", layout.code_dir.display()))?;

    info!(
        "{} files rendered ({} blocks) into {} pages, {} skipped, {} warnings",
        summary.files_rendered,
        summary.blocks,
        summary.destinations,
        summary.files_skipped,
        summary.diagnostics
    );
    Ok(())
}

/// preview mode: render the given files to stdout, links resolved against the
/// project's source tree when it exists.
fn preview_mode(cli: &Cli) -> Result<()> {
    let mut layout = cli.layout();
    let syntax = cli.syntax();

    // Same-directory links compare paths, so both sides must be canonical
    if let Ok(dir) = layout.code_dir.canonicalize() {
        layout.code_dir = dir;
    }

    let catalog = match layout.discover() {
        Ok(routed) => site::catalog(&routed),
        Err(e) => {
            warn!("{}", e);
            catalog::Catalog::new()
        }
    };
    if catalog.is_empty() {
        warn!("no known source files; See Also entries naming functions will not resolve");
    }
    let ctx = render::RenderContext::new(&syntax, &catalog, &layout.class_dir);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut first = true;

    for path in &cli.files {
        let path = path
            .canonicalize()
            .with_context(|| format!("failed to read {}", path.display()))?;
        let routed = layout
            .route(&path)
            .with_context(|| format!("not a source file path: {}", path.display()))?;
        let source = site::load(&routed)?;
        let report = render::render(&source, &mut out, first, &ctx)
            .context("failed to write to stdout")?;
        if report.blocks > 0 {
            first = false;
        }
    }

    out.flush().context("failed to write to stdout")?;
    Ok(())
}
