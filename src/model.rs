//! Data model for comment extraction — transient, one source file at a time.

use std::fmt;
use std::path::PathBuf;

/// A source file loaded for rendering.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Base name without extension, matched against the start marker.
    pub identifier: String,
    pub path: PathBuf,
    /// Page the file's documentation is appended to.
    pub page: DocPage,
    pub lines: Vec<String>,
}

impl SourceFile {
    pub fn new(identifier: impl Into<String>, path: PathBuf, page: DocPage, content: &str) -> Self {
        Self {
            identifier: identifier.into(),
            path,
            page,
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Directory holding the file (empty path for bare file names).
    pub fn dir(&self) -> PathBuf {
        self.path.parent().map(|p| p.to_path_buf()).unwrap_or_default()
    }
}

/// How the start marker of a block is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The marker line names the file itself.
    ByFilename,
    /// The marker line names one of the functions declared in the file.
    ByFunctionName,
}

/// A `function ... = name(...)` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub line: usize,
    /// Lowercased function name.
    pub name: String,
}

/// Result of one boundary scan. `start..end` is the block when both are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Boundary {
    pub start: Option<usize>,
    pub end: Option<usize>,
    /// A function-name marker matched, so this call runs in multi-function mode.
    pub multi_active: bool,
}

impl Boundary {
    /// The emittable range, if the block is non-empty.
    pub fn range(&self) -> Option<(usize, usize)> {
        match (self.start, self.end) {
            (Some(a), Some(z)) if z > a => Some((a, z)),
            _ => None,
        }
    }
}

/// Route of a generated markdown page below the docs root, e.g. `utils` or
/// `classes/Foo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DocPage {
    segments: Vec<String>,
}

impl DocPage {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the page lives below the given top-level directory.
    pub fn is_under(&self, top: &str) -> bool {
        self.segments.len() > 1 && self.segments[0] == top
    }

    /// Relative URL from this page to `target`, as served by a static site
    /// generator that publishes `a/b.md` at `a/b/`.
    ///
    /// Same page → `./`, sibling → `../b/`, one level up → `../../b/`.
    pub fn relative_to(&self, target: &DocPage) -> String {
        let common = self
            .segments
            .iter()
            .zip(&target.segments)
            .take_while(|(a, b)| a == b)
            .count();

        if common == self.segments.len() && common == target.segments.len() {
            return "./".to_string();
        }

        let mut out = "../".repeat(self.segments.len() - common);
        for seg in &target.segments[common..] {
            out.push_str(seg);
            out.push('/');
        }
        out
    }
}

impl fmt::Display for DocPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// A problem local to one block or one line. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No start or end marker for a file documented by filename.
    MissingBoundary { identifier: String },
    /// A "See Also" entry that matched no known source file.
    UnresolvedReference {
        identifier: String,
        reference: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingBoundary { identifier } => {
                write!(f, "no documentation for {}", identifier)
            }
            Diagnostic::UnresolvedReference {
                identifier,
                reference,
            } => write!(f, "unresolved See Also entry {:?} in {}", reference, identifier),
        }
    }
}

/// What one `render` call did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub blocks: usize,
    pub diagnostics: Vec<Diagnostic>,
}
