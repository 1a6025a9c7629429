//! Owned markdown syntax tree built from `pulldown-cmark` events.
//!
//! The tree keeps just enough structure for indexing: block and inline
//! containers, heading levels with their explicit `{#id}` attributes, and
//! text leaves. A YAML front matter block is split off and returned raw.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Kind of a markdown node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a parsed document.
    Document,
    /// Heading with level (1-6) and explicit anchor, if any.
    Heading { level: u8, id: Option<String> },
    Paragraph,
    BlockQuote,
    CodeBlock { language: Option<String> },
    List { ordered: bool },
    Item,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link { dest: String },
    Image { dest: String },
    Text(String),
    Code(String),
    Html(String),
    SoftBreak,
    HardBreak,
    Rule,
    /// Inline container used for labels lifted out of a heading.
    Span,
    /// Any construct the index does not distinguish.
    Other,
}

/// Markdown syntax tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Plain text leaf.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(text.into()))
    }

    /// Inline container holding `children`.
    #[must_use]
    pub fn span(children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Span,
            children,
        }
    }

    /// Heading level if this node is a heading.
    #[must_use]
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Heading { level, .. } => Some(level),
            _ => None,
        }
    }

    /// Concatenated text content of this node and its descendants.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::Code(text) => out.push_str(text),
            NodeKind::SoftBreak | NodeKind::HardBreak => out.push(' '),
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Heading nodes in document order.
    ///
    /// Headings nested inside other blocks (quotes, list items) are included;
    /// the contents of a heading are not searched.
    #[must_use]
    pub fn headings(&self) -> Vec<&Node> {
        fn walk<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
            for child in &node.children {
                if child.heading_level().is_some() {
                    out.push(child);
                } else {
                    walk(child, out);
                }
            }
        }

        let mut headings = Vec::new();
        walk(self, &mut headings);
        headings
    }
}

/// Result of parsing one markdown source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMarkdown {
    /// Syntax tree rooted at a [`NodeKind::Document`] node.
    pub ast: Node,
    /// Raw YAML front matter, without its `---` fences.
    pub front_matter: Option<String>,
}

/// Parser options: GFM extensions plus heading attributes and YAML metadata.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Parse markdown text into a syntax tree.
///
/// # Example
///
/// ```
/// use quire_site::markdown::parse;
///
/// let parsed = parse("---\nout: home.html\n---\n# Welcome\n");
/// assert_eq!(parsed.front_matter.as_deref().map(str::trim), Some("out: home.html"));
/// assert_eq!(parsed.ast.headings()[0].plain_text(), "Welcome");
/// ```
pub fn parse(markdown: &str) -> ParsedMarkdown {
    let mut root = Node::new(NodeKind::Document);
    let mut stack: Vec<Node> = Vec::new();
    let mut front_matter: Option<String> = None;
    let mut in_metadata = false;

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Start(Tag::MetadataBlock(_)) => {
                in_metadata = true;
                front_matter.get_or_insert_with(String::new);
            }
            Event::End(TagEnd::MetadataBlock(_)) => in_metadata = false,
            Event::Text(text) if in_metadata => {
                if let Some(yaml) = front_matter.as_mut() {
                    yaml.push_str(&text);
                }
            }
            Event::Start(tag) => stack.push(Node::new(kind_of(tag))),
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    append(&mut stack, &mut root, node);
                }
            }
            Event::Text(text) => append(&mut stack, &mut root, Node::text(text.into_string())),
            Event::Code(code) => append(
                &mut stack,
                &mut root,
                Node::new(NodeKind::Code(code.into_string())),
            ),
            Event::Html(html) | Event::InlineHtml(html) => append(
                &mut stack,
                &mut root,
                Node::new(NodeKind::Html(html.into_string())),
            ),
            Event::SoftBreak => append(&mut stack, &mut root, Node::new(NodeKind::SoftBreak)),
            Event::HardBreak => append(&mut stack, &mut root, Node::new(NodeKind::HardBreak)),
            Event::Rule => append(&mut stack, &mut root, Node::new(NodeKind::Rule)),
            Event::TaskListMarker(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {}
        }
    }

    // Unbalanced events cannot come out of pulldown-cmark, but fold leftovers anyway.
    while let Some(node) = stack.pop() {
        append(&mut stack, &mut root, node);
    }

    ParsedMarkdown {
        ast: root,
        front_matter,
    }
}

fn append(stack: &mut [Node], root: &mut Node, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => root.children.push(node),
    }
}

fn kind_of(tag: Tag<'_>) -> NodeKind {
    match tag {
        Tag::Heading { level, id, .. } => NodeKind::Heading {
            level: heading_level_to_num(level),
            id: id.map(pulldown_cmark::CowStr::into_string),
        },
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(kind) => NodeKind::CodeBlock {
            language: match kind {
                CodeBlockKind::Fenced(info) if !info.is_empty() => info
                    .split_whitespace()
                    .next()
                    .map(ToOwned::to_owned),
                _ => None,
            },
        },
        Tag::List(start) => NodeKind::List {
            ordered: start.is_some(),
        },
        Tag::Item => NodeKind::Item,
        Tag::Table(_) => NodeKind::Table,
        Tag::TableHead => NodeKind::TableHead,
        Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link { dest_url, .. } => NodeKind::Link {
            dest: dest_url.into_string(),
        },
        Tag::Image { dest_url, .. } => NodeKind::Image {
            dest: dest_url.into_string(),
        },
        Tag::HtmlBlock
        | Tag::FootnoteDefinition(_)
        | Tag::DefinitionList
        | Tag::DefinitionListTitle
        | Tag::DefinitionListDefinition
        | Tag::MetadataBlock(_)
        | Tag::Superscript
        | Tag::Subscript => NodeKind::Other,
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_heading_levels_in_order() {
        let parsed = parse("# One\n\ntext\n\n## Two\n\n### Three\n");

        let levels: Vec<_> = parsed
            .ast
            .headings()
            .iter()
            .filter_map(|h| h.heading_level())
            .collect();
        assert_eq!(levels, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_heading_keeps_inline_structure() {
        let parsed = parse("# Hello *world*\n");

        let heading = parsed.ast.headings()[0];
        assert_eq!(heading.plain_text(), "Hello world");
        assert_eq!(heading.children[1].kind, NodeKind::Emphasis);
    }

    #[test]
    fn test_parse_heading_explicit_id() {
        let parsed = parse("## Install {#setup}\n");

        let heading = parsed.ast.headings()[0];
        assert_eq!(
            heading.kind,
            NodeKind::Heading {
                level: 2,
                id: Some("setup".to_owned())
            }
        );
        assert_eq!(heading.plain_text(), "Install");
    }

    #[test]
    fn test_parse_nested_heading_in_blockquote() {
        let parsed = parse("> ## Quoted\n\n## Plain\n");

        let titles: Vec<_> = parsed.ast.headings().iter().map(|h| h.plain_text()).collect();
        assert_eq!(titles, vec!["Quoted", "Plain"]);
    }

    #[test]
    fn test_parse_front_matter_is_not_in_ast() {
        let parsed = parse("---\nout: a.html\ntitle: A\n---\n\nBody\n");

        assert_eq!(
            parsed.front_matter.as_deref().map(str::trim),
            Some("out: a.html\ntitle: A")
        );
        assert_eq!(parsed.ast.plain_text(), "Body");
    }

    #[test]
    fn test_parse_without_front_matter() {
        let parsed = parse("# Title\n");

        assert!(parsed.front_matter.is_none());
    }

    #[test]
    fn test_parse_code_block_language() {
        let parsed = parse("```rust ignore\nfn main() {}\n```\n");

        assert_eq!(
            parsed.ast.children[0].kind,
            NodeKind::CodeBlock {
                language: Some("rust".to_owned())
            }
        );
    }

    #[test]
    fn test_plain_text_soft_break() {
        let parsed = parse("one\ntwo\n");

        assert_eq!(parsed.ast.plain_text(), "one two");
    }

    #[test]
    fn test_parse_empty_document() {
        let parsed = parse("");

        assert_eq!(parsed.ast, Node::new(NodeKind::Document));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("snake_case"), "snake-case");
    }
}
