//! The narrow set of textual markers the extractor recognizes.
//!
//! Source is never parsed beyond these: a line is a comment, a function
//! declaration, the end-of-documentation sentinel, or something else.

/// Recognized markers. Defaults describe MATLAB-style sources.
#[derive(Debug, Clone)]
pub struct Syntax {
    /// Characters that open a line comment.
    pub comment_markers: Vec<char>,
    /// Keyword that begins a function declaration.
    pub function_keyword: String,
    /// Phrase that forces the end of a documentation block.
    pub sentinel: String,
    /// Token standing for one indentation unit that must survive stripping.
    pub placeholder: String,
    /// Closer of a block comment, removed before stripping.
    pub block_closer: String,
    /// Phrase that opens a "See Also" section.
    pub see_also: String,
    /// Identifier fragment marking a file that declares several functions.
    pub multi_marker: String,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            comment_markers: vec!['%', '#'],
            function_keyword: "function".to_string(),
            sentinel: "end of documentation".to_string(),
            placeholder: "XXXX".to_string(),
            block_closer: "%}".to_string(),
            see_also: "see also".to_string(),
            multi_marker: "abstract".to_string(),
        }
    }
}

impl Syntax {
    fn is_marker(&self, c: char) -> bool {
        self.comment_markers.contains(&c)
    }

    /// Line text with every marker character and every space removed.
    ///
    /// `"%  Foo Bar"` → `"FooBar"`. Used to compare against identifiers.
    pub fn marker_free(&self, line: &str) -> String {
        line.chars()
            .filter(|&c| c != ' ' && !self.is_marker(c))
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Whether the trimmed line opens with a comment marker.
    pub fn is_comment(&self, line: &str) -> bool {
        line.trim_start()
            .chars()
            .next()
            .is_some_and(|c| self.is_marker(c))
    }

    /// A comment line holding a single marker and nothing else, e.g. a lone `%`.
    pub fn is_bare_comment(&self, line: &str) -> bool {
        let mut chars = line.trim().chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if self.is_marker(c))
    }

    /// Whether the line declares a function: the keyword as a whole word.
    pub fn is_declaration(&self, line: &str) -> bool {
        match line.trim_start().strip_prefix(self.function_keyword.as_str()) {
            Some(rest) => !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'),
            None => false,
        }
    }

    pub fn has_sentinel(&self, line: &str) -> bool {
        line.to_lowercase().contains(&self.sentinel.to_lowercase())
    }

    pub fn opens_see_also(&self, line: &str) -> bool {
        line.to_lowercase().contains(&self.see_also.to_lowercase())
    }

    /// Whether an identifier names a multi-function file.
    pub fn is_multi_function(&self, identifier: &str) -> bool {
        !self.multi_marker.is_empty()
            && identifier
                .to_lowercase()
                .contains(&self.multi_marker.to_lowercase())
    }

    /// Remove comment syntax from a documentation line, keeping its text.
    ///
    /// Drops block closers, leading markers and leading whitespace, then
    /// expands the indentation placeholder to four spaces.
    pub fn strip_comment(&self, line: &str) -> String {
        let line = if self.block_closer.is_empty() {
            line.to_string()
        } else {
            line.replace(&self.block_closer, "")
        };
        let line = line.trim_start_matches(|c: char| self.is_marker(c)).trim_start();
        if self.placeholder.is_empty() {
            line.to_string()
        } else {
            line.replace(&self.placeholder, "    ")
        }
    }
}
