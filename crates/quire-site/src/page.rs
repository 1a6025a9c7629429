//! Finalized pages.
//!
//! [`convert_page`] turns an [`IndexNode`] into a [`Page`]: the output path is
//! resolved from properties, the first top-level heading becomes the page
//! title, and every header is rebased onto the output path.

use std::path::{Path, PathBuf};

use quire_paths::{SuffixRule, base_path};

use crate::header::{Header, HeaderNode, Linkable};
use crate::index::IndexNode;
use crate::markdown::Node;
use crate::properties::{Properties, convert_to_target};

/// Document page data.
///
/// Built once by [`convert_page`] and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    source: PathBuf,
    source_path: String,
    path: String,
    label: Node,
    h1: Header,
    headers: Vec<HeaderNode>,
    markdown: Node,
    properties: Properties,
}

impl Page {
    /// Originating source of the page.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Root-relative source path (e.g. `guide/setup.md`).
    #[must_use]
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// The page's own title header.
    #[must_use]
    pub fn h1(&self) -> &Header {
        &self.h1
    }

    /// Heading outline below the title.
    #[must_use]
    pub fn headers(&self) -> &[HeaderNode] {
        &self.headers
    }

    /// Parsed markdown, untouched by finalization.
    #[must_use]
    pub fn markdown(&self) -> &Node {
        &self.markdown
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Title as plain text.
    #[must_use]
    pub fn title(&self) -> String {
        self.label.plain_text()
    }

    /// Relative path from this page back to the site root.
    ///
    /// Counts `/` separators in the output path, so it assumes the path holds
    /// no `.` or `..` segments.
    #[must_use]
    pub fn base(&self) -> String {
        base_path(&self.path)
    }
}

impl Linkable for Page {
    fn path(&self) -> &str {
        &self.path
    }

    fn label(&self) -> &Node {
        &self.label
    }
}

/// Finalize an indexed document into a page.
///
/// Without any heading, a title header is synthesized from the output path.
pub fn convert_page(node: IndexNode, convert: &SuffixRule) -> Page {
    let target = convert_to_target(&node.properties, convert, &node.path);

    let mut roots = node.headers.into_iter();
    let (h1, headers) = match roots.next() {
        Some(first) => {
            let h1 = first.header.rebased(&target);
            let headers = first
                .children
                .into_iter()
                .chain(roots)
                .map(|header| header.rebased(&target))
                .collect();
            (h1, headers)
        }
        None => (Header::new(target.clone(), Node::text(target.clone())), Vec::new()),
    };

    Page {
        source: node.source,
        source_path: node.path,
        path: target,
        label: h1.label().clone(),
        h1,
        headers,
        markdown: node.markdown,
        properties: node.properties,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::index::RawDocument;

    fn page(path: &str, text: &str) -> Page {
        let node = IndexNode::new(RawDocument::parse(path, path, text).unwrap());
        convert_page(node, &SuffixRule::default())
    }

    fn header_paths(nodes: &[HeaderNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.header.path()).collect()
    }

    #[test]
    fn test_convert_page_promotes_first_heading() {
        let page = page("guide/setup.md", "# Setup\n\nIntro\n\n## Install\n## Configure\n");

        assert_eq!(page.path(), "guide/setup.html");
        assert_eq!(page.title(), "Setup");
        assert_eq!(page.h1().path(), "guide/setup.html#setup");
        assert_eq!(
            header_paths(page.headers()),
            vec!["guide/setup.html#install", "guide/setup.html#configure"]
        );
    }

    #[test]
    fn test_convert_page_lifts_children_and_following_siblings() {
        let page = page("p.md", "# A\n## A1\n### A1x\n# B\n## B1\n");

        assert_eq!(header_paths(page.headers()), vec!["p.html#a1", "p.html#b"]);
        assert_eq!(
            header_paths(&page.headers()[0].children),
            vec!["p.html#a1x"]
        );
        assert_eq!(header_paths(&page.headers()[1].children), vec!["p.html#b1"]);
    }

    #[test]
    fn test_convert_page_without_heading_synthesizes_h1() {
        let page = page("notes/todo.md", "Just text.\n");

        assert_eq!(page.h1().path(), page.path());
        assert!(!page.h1().path().contains('#'));
        assert_eq!(page.h1().label(), &Node::text("notes/todo.html"));
        assert_eq!(page.title(), "notes/todo.html");
        assert!(page.headers().is_empty());
    }

    #[test]
    fn test_convert_page_uses_out_override() {
        let page = page("index.md", "---\nout: home/start.html\n---\n# Welcome\n## News\n");

        assert_eq!(page.path(), "home/start.html");
        assert_eq!(page.h1().path(), "home/start.html#welcome");
        assert_eq!(header_paths(page.headers()), vec!["home/start.html#news"]);
        assert_eq!(page.base(), "../");
    }

    #[test]
    fn test_convert_page_keeps_source_and_markdown() {
        let text = "# Title\n\nBody\n";
        let page = page("a/b.md", text);

        assert_eq!(page.source(), Path::new("a/b.md"));
        assert_eq!(page.source_path(), "a/b.md");
        assert_eq!(page.markdown(), &crate::markdown::parse(text).ast);
    }

    #[test]
    fn test_label_matches_h1_label() {
        let page = page("p.md", "# Hello *there*\n");

        assert_eq!(page.label(), page.h1().label());
        assert_eq!(page.title(), "Hello there");
    }

    #[test]
    fn test_base_counts_directory_levels() {
        assert_eq!(page("a/b/c.md", "# C").base(), "../../");
        assert_eq!(page("c.md", "# C").base(), "");
    }
}
