//! Suffix replacement for source-to-target path conversion.

use crate::relative::split_fragment;

/// Replace a literal suffix of `path`.
///
/// Returns `path` unchanged when it does not end with `from`.
///
/// # Examples
///
/// ```
/// use quire_paths::replace_suffix;
///
/// assert_eq!(replace_suffix(".md", ".html", "a/b.md"), "a/b.html");
/// assert_eq!(replace_suffix(".md", ".html", "a/b.txt"), "a/b.txt");
/// ```
pub fn replace_suffix(from: &str, to: &str, path: &str) -> String {
    match path.strip_suffix(from) {
        Some(stem) => format!("{stem}{to}"),
        None => path.to_owned(),
    }
}

/// Replace a suffix on the path component of a link, keeping its fragment.
///
/// # Examples
///
/// ```
/// use quire_paths::replace_extension;
///
/// assert_eq!(
///     replace_extension(".md", ".html", "guide.md#setup"),
///     "guide.html#setup"
/// );
/// ```
pub fn replace_extension(from: &str, to: &str, link: &str) -> String {
    let (path, fragment) = split_fragment(link);
    let replaced = replace_suffix(from, to, path);
    match fragment {
        Some(fragment) => format!("{replaced}#{fragment}"),
        None => replaced,
    }
}

/// Source/target suffix pair threaded through every path conversion.
///
/// Defaults to `.md` → `.html`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuffixRule {
    from: String,
    to: String,
}

impl SuffixRule {
    /// Create a rule converting paths ending in `from` to paths ending in `to`.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Suffix of source documents (e.g. `.md`).
    #[must_use]
    pub fn source_suffix(&self) -> &str {
        &self.from
    }

    /// Suffix of output documents (e.g. `.html`).
    #[must_use]
    pub fn target_suffix(&self) -> &str {
        &self.to
    }

    /// Whether `path` names a source document under this rule.
    #[must_use]
    pub fn is_source(&self, path: &str) -> bool {
        path.ends_with(&self.from)
    }

    /// Whether `path` already follows the output convention.
    #[must_use]
    pub fn is_target(&self, path: &str) -> bool {
        path.ends_with(&self.to)
    }

    /// Convert a source path to its default output path.
    #[must_use]
    pub fn apply(&self, path: &str) -> String {
        replace_suffix(&self.from, &self.to, path)
    }

    /// Convert a link, leaving any `#fragment` untouched.
    #[must_use]
    pub fn apply_link(&self, link: &str) -> String {
        replace_extension(&self.from, &self.to, link)
    }
}

impl Default for SuffixRule {
    fn default() -> Self {
        Self::new(".md", ".html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_suffix_mismatch_is_identity() {
        for path in ["", "index", "index.html", "md", "a/b.mdx", "a.md/b"] {
            assert_eq!(replace_suffix(".md", ".html", path), path);
        }
    }

    #[test]
    fn test_replace_suffix_length() {
        for path in [".md", "a.md", "a/b/c.md", "index.md.md"] {
            let replaced = replace_suffix(".md", ".html", path);
            assert!(replaced.ends_with(".html"));
            assert_eq!(replaced.len(), path.len() - ".md".len() + ".html".len());
        }
    }

    #[test]
    fn test_replace_suffix_only_last_occurrence() {
        assert_eq!(
            replace_suffix(".md", ".html", "notes.md/index.md"),
            "notes.md/index.html"
        );
    }

    #[test]
    fn test_replace_suffix_empty_from_appends() {
        assert_eq!(replace_suffix("", ".html", "page"), "page.html");
    }

    #[test]
    fn test_replace_extension_without_fragment() {
        assert_eq!(replace_extension(".md", ".html", "a/b.md"), "a/b.html");
    }

    #[test]
    fn test_replace_extension_keeps_fragment_verbatim() {
        assert_eq!(
            replace_extension(".md", ".html", "a/b.md#Intro.md"),
            "a/b.html#Intro.md"
        );
    }

    #[test]
    fn test_replace_extension_empty_fragment() {
        assert_eq!(replace_extension(".md", ".html", "b.md#"), "b.html#");
    }

    #[test]
    fn test_replace_extension_mismatch() {
        assert_eq!(replace_extension(".md", ".html", "b.txt#top"), "b.txt#top");
    }

    #[test]
    fn test_suffix_rule_default() {
        let rule = SuffixRule::default();

        assert_eq!(rule.source_suffix(), ".md");
        assert_eq!(rule.target_suffix(), ".html");
        assert_eq!(rule.apply("index.md"), "index.html");
        assert!(rule.is_source("guide.md"));
        assert!(rule.is_target("guide.html"));
        assert!(!rule.is_target("guide.htm"));
    }

    #[test]
    fn test_suffix_rule_custom() {
        let rule = SuffixRule::new(".markdown", "/index.html");

        assert_eq!(rule.apply("guide.markdown"), "guide/index.html");
        assert_eq!(rule.apply_link("guide.markdown#a"), "guide/index.html#a");
    }
}
