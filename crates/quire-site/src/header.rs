//! Linkable headers and the heading outline of a document.

use std::collections::{HashMap, HashSet};
use std::iter::Peekable;

use quire_paths::split_fragment;

use crate::markdown::{Node, NodeKind, slugify};

/// Anything that can be the target of a hyperlink.
pub trait Linkable {
    /// Site-root-relative path, `/`-separated, optionally with a `#fragment`.
    fn path(&self) -> &str;

    /// Inline node used as the visible link text.
    fn label(&self) -> &Node;
}

/// One heading inside a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    path: String,
    label: Node,
}

impl Header {
    #[must_use]
    pub fn new(path: impl Into<String>, label: Node) -> Self {
        Self {
            path: path.into(),
            label,
        }
    }

    /// Anchor of this header, if its path has one.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        split_fragment(&self.path).1
    }

    /// Same header, attached to the page at `page_path`.
    #[must_use]
    pub fn rebased(&self, page_path: &str) -> Self {
        let path = match self.fragment() {
            Some(fragment) => format!("{page_path}#{fragment}"),
            None => page_path.to_owned(),
        };
        Self {
            path,
            label: self.label.clone(),
        }
    }
}

impl Linkable for Header {
    fn path(&self) -> &str {
        &self.path
    }

    fn label(&self) -> &Node {
        &self.label
    }
}

/// Header together with the headings nested under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderNode {
    pub header: Header,
    pub children: Vec<HeaderNode>,
}

impl HeaderNode {
    #[must_use]
    pub fn leaf(header: Header) -> Self {
        Self {
            header,
            children: Vec::new(),
        }
    }

    /// Copy of this subtree with every header attached to `page_path`.
    #[must_use]
    pub fn rebased(&self, page_path: &str) -> Self {
        Self {
            header: self.header.rebased(page_path),
            children: self
                .children
                .iter()
                .map(|child| child.rebased(page_path))
                .collect(),
        }
    }

    /// Number of headers in this subtree, including its root.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(HeaderNode::count).sum::<usize>()
    }
}

/// Unique anchor generation for the headings of one document.
#[derive(Default)]
struct Anchors {
    issued: HashSet<String>,
    id_counts: HashMap<String, usize>,
}

impl Anchors {
    /// Explicit `{#id}` attributes are preferred; otherwise the slug of the
    /// heading text. A base already issued in this document is suffixed
    /// `-1`, `-2`... until the result is unused.
    fn anchor(&mut self, heading: &Node) -> String {
        let explicit = match &heading.kind {
            NodeKind::Heading { id: Some(id), .. } => Some(id.clone()),
            _ => None,
        };
        let base_id = explicit.clone().unwrap_or_else(|| {
            let slug = slugify(&heading.plain_text());
            if slug.is_empty() {
                "section".to_owned()
            } else {
                slug
            }
        });

        let count = self.id_counts.entry(base_id.clone()).or_default();
        let mut id = match *count {
            0 => base_id.clone(),
            n => format!("{base_id}-{n}"),
        };
        while self.issued.contains(&id) {
            *count += 1;
            id = format!("{base_id}-{count}");
        }
        *count += 1;

        if explicit.is_some() && id != base_id {
            tracing::warn!(
                id = %base_id,
                anchor = %id,
                "Duplicate heading id, suffixing anchor"
            );
        }
        self.issued.insert(id.clone());
        id
    }
}

/// Build the heading outline of `ast`, anchored on `page_path`.
///
/// Heading levels imply nesting: a heading becomes a child of the nearest
/// preceding heading with a lower level, and a sibling of preceding headings
/// at the same level.
pub(crate) fn outline(ast: &Node, page_path: &str) -> Vec<HeaderNode> {
    let mut anchors = Anchors::default();
    let mut headings = ast
        .headings()
        .into_iter()
        .filter_map(|heading| {
            let level = heading.heading_level()?;
            let anchor = anchors.anchor(heading);
            let header = Header::new(
                format!("{page_path}#{anchor}"),
                Node::span(heading.children.clone()),
            );
            Some((level, header))
        })
        .peekable();

    nest(&mut headings, 0)
}

fn nest<I>(headings: &mut Peekable<I>, parent_level: u8) -> Vec<HeaderNode>
where
    I: Iterator<Item = (u8, Header)>,
{
    let mut nodes = Vec::new();
    while let Some((level, header)) = headings.next_if(|(level, _)| *level > parent_level) {
        let children = nest(headings, level);
        nodes.push(HeaderNode { header, children });
    }
    nodes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::markdown::parse;

    fn titles(nodes: &[HeaderNode]) -> Vec<(String, usize)> {
        nodes
            .iter()
            .map(|n| (n.header.label().plain_text(), n.children.len()))
            .collect()
    }

    fn anchor_paths(markdown: &str) -> Vec<String> {
        outline(&parse(markdown).ast, "p.md")
            .iter()
            .map(|n| n.header.path().to_owned())
            .collect()
    }

    #[test]
    fn test_outline_nests_by_level() {
        let ast = parse("# A\n## B\n### C\n## D\n# E\n").ast;

        let outline = outline(&ast, "page.md");

        assert_eq!(
            titles(&outline),
            vec![("A".to_owned(), 2), ("E".to_owned(), 0)]
        );
        assert_eq!(
            titles(&outline[0].children),
            vec![("B".to_owned(), 1), ("D".to_owned(), 0)]
        );
        assert_eq!(
            outline[0].children[0].children[0].header.path(),
            "page.md#c"
        );
    }

    #[test]
    fn test_outline_skipped_level_nests_under_nearest() {
        let ast = parse("# A\n### Deep\n## B\n").ast;

        let outline = outline(&ast, "p.md");

        assert_eq!(
            titles(&outline[0].children),
            vec![("Deep".to_owned(), 0), ("B".to_owned(), 0)]
        );
    }

    #[test]
    fn test_outline_starting_below_h1() {
        let ast = parse("## A\n## B\n").ast;

        let outline = outline(&ast, "p.md");

        assert_eq!(
            titles(&outline),
            vec![("A".to_owned(), 0), ("B".to_owned(), 0)]
        );
    }

    #[test]
    fn test_outline_deduplicates_anchors() {
        let paths = anchor_paths("## Usage\n## Usage\n## Usage {#custom}\n");

        assert_eq!(paths, vec!["p.md#usage", "p.md#usage-1", "p.md#custom"]);
    }

    #[test]
    fn test_outline_slug_after_explicit_id_does_not_collide() {
        let paths = anchor_paths("## Setup {#install}\n## Install\n");

        assert_eq!(paths, vec!["p.md#install", "p.md#install-1"]);
    }

    #[test]
    fn test_outline_suffix_does_not_collide_with_later_slug() {
        let paths = anchor_paths("## Usage\n## Usage\n## Usage 1\n");

        assert_eq!(paths, vec!["p.md#usage", "p.md#usage-1", "p.md#usage-1-1"]);
    }

    #[test]
    fn test_outline_suffix_skips_slug_issued_earlier() {
        let paths = anchor_paths("## Usage 1\n## Usage\n## Usage\n");

        assert_eq!(paths, vec!["p.md#usage-1", "p.md#usage", "p.md#usage-2"]);
    }

    #[test]
    fn test_outline_repeated_explicit_id_is_suffixed() {
        let paths = anchor_paths("## A {#x}\n## B {#x}\n");

        assert_eq!(paths, vec!["p.md#x", "p.md#x-1"]);
    }

    #[test]
    fn test_outline_empty_slug_falls_back() {
        let ast = parse("## ???\n").ast;

        let outline = outline(&ast, "p.md");

        assert_eq!(outline[0].header.path(), "p.md#section");
    }

    #[test]
    fn test_outline_empty_document() {
        assert!(outline(&parse("text only").ast, "p.md").is_empty());
    }

    #[test]
    fn test_header_rebased_keeps_fragment() {
        let header = Header::new("guide.md#install", Node::text("Install"));

        let rebased = header.rebased("guide/index.html");

        assert_eq!(rebased.path(), "guide/index.html#install");
        assert_eq!(rebased.fragment(), Some("install"));
        assert_eq!(rebased.label(), header.label());
    }

    #[test]
    fn test_header_node_count() {
        let ast = parse("# A\n## B\n## C\n### D\n").ast;

        assert_eq!(outline(&ast, "p.md")[0].count(), 4);
    }
}
