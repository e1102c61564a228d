//! Directory exclusion by glob pattern.
//!
//! Patterns are shell globs (`*`, `?`, `[abc]`, `[^abc]`, `\*`) tested against
//! the bare name of a directory, never its full path. `[!abc]` is accepted as
//! a class negation too. A pattern that fails to compile is dropped: it can
//! never match, and it never aborts a scan.

use std::ffi::OsStr;

use glob::Pattern;

/// A compiled, read-only set of directory exclusion patterns.
///
/// Built once from configuration and then shared by every traversal task.
#[derive(Debug, Clone, Default)]
pub struct ExcludePatterns {
    /// Successfully compiled patterns
    compiled: Vec<Pattern>,

    /// Raw pattern strings as given (including ones that failed to compile)
    raw: Vec<String>,
}

impl ExcludePatterns {
    /// Compile a list of glob patterns.
    ///
    /// Malformed patterns are kept in [`Self::raw_patterns`] for display but
    /// excluded from matching.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let compiled = raw
            .iter()
            .map(String::as_str)
            .filter_map(to_glob_syntax)
            .filter_map(|p| Pattern::new(&p).ok())
            .collect();

        Self { compiled, raw }
    }

    /// Whether the set contains no patterns at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The patterns as originally given.
    #[must_use]
    pub fn raw_patterns(&self) -> &[String] {
        &self.raw
    }

    /// Test a directory name against every pattern.
    ///
    /// Names that are not valid UTF-8 are matched lossily.
    #[must_use]
    pub fn matches(&self, name: &OsStr) -> bool {
        if self.compiled.is_empty() {
            return false;
        }

        self.matches_str(&name.to_string_lossy())
    }

    /// Test a directory name given as a string.
    #[must_use]
    pub fn matches_str(&self, name: &str) -> bool {
        self.compiled.iter().any(|pattern| pattern.matches(name))
    }
}

/// Rewrite a pattern into the dialect [`glob::Pattern`] understands.
///
/// `[^...]` becomes `[!...]`. Outside a class, a backslash-escaped
/// metacharacter becomes a one-character class (`\*` to `[*]`); any other
/// escaped character stands for itself. A trailing lone backslash makes the
/// pattern malformed.
fn to_glob_syntax(pattern: &str) -> Option<String> {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next()?;
                if !in_class && matches!(escaped, '*' | '?' | '[' | ']') {
                    out.push('[');
                    out.push(escaped);
                    out.push(']');
                } else {
                    out.push(escaped);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push('[');
                if chars.as_str().starts_with('^') {
                    chars.next();
                    out.push('!');
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            _ => out.push(c),
        }
    }

    Some(out)
}
