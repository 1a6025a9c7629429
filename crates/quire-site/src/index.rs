//! Document index: parsed documents arranged in their authored hierarchy.
//!
//! The index does not know about output paths. Header anchors are attached to
//! the raw source path and are rebased when pages are finalized.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use quire_paths::{directories, leaf};

use crate::forest::{Forest, ForestBuilder, NodeId};
use crate::header::{HeaderNode, outline};
use crate::markdown::{self, Node};
use crate::properties::{Properties, PropertiesError};

/// A parsed source document, before indexing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument {
    /// Originating source (e.g. file on disk).
    pub source: PathBuf,
    /// Root-relative source path, `/`-separated (e.g. `guide/setup.md`).
    pub path: String,
    /// Parsed markdown.
    pub markdown: Node,
    /// Front matter properties.
    pub properties: Properties,
}

impl RawDocument {
    /// Parse markdown text and its front matter into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the front matter is not a valid YAML mapping.
    pub fn parse(
        source: impl Into<PathBuf>,
        path: impl Into<String>,
        text: &str,
    ) -> Result<Self, PropertiesError> {
        let parsed = markdown::parse(text);
        let properties = match parsed.front_matter {
            Some(yaml) => Properties::from_yaml(&yaml)?,
            None => Properties::default(),
        };
        Ok(Self {
            source: source.into(),
            path: path.into(),
            markdown: parsed.ast,
            properties,
        })
    }
}

/// Indexed document: a [`RawDocument`] plus its heading outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexNode {
    pub(crate) source: PathBuf,
    pub(crate) path: String,
    pub(crate) markdown: Node,
    pub(crate) properties: Properties,
    pub(crate) headers: Vec<HeaderNode>,
}

impl IndexNode {
    /// Index one document, extracting its heading outline.
    #[must_use]
    pub fn new(document: RawDocument) -> Self {
        let headers = outline(&document.markdown, &document.path);
        Self {
            source: document.source,
            path: document.path,
            markdown: document.markdown,
            properties: document.properties,
            headers,
        }
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Root-relative source path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn markdown(&self) -> &Node {
        &self.markdown
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Heading outline, anchored on the source path.
    #[must_use]
    pub fn headers(&self) -> &[HeaderNode] {
        &self.headers
    }
}

/// Builder for the document index forest.
///
/// Documents are kept in the order they are added; a document added with a
/// parent becomes that parent's last child.
#[derive(Default)]
pub struct DocumentIndex {
    nodes: ForestBuilder<IndexNode>,
}

impl DocumentIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document under `parent` (or as a new root).
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not returned by this index.
    pub fn add(&mut self, document: RawDocument, parent: Option<NodeId>) -> NodeId {
        self.nodes.push(IndexNode::new(document), parent)
    }

    /// Index documents, deriving nesting from their directory layout.
    ///
    /// An index document (`index` stem, any suffix) is the parent of every
    /// other document in its directory and of index documents in direct or
    /// deeper subdirectories. Documents without an index above them become
    /// roots. Siblings keep their input order.
    #[must_use]
    pub fn from_directory_layout(documents: impl IntoIterator<Item = RawDocument>) -> Self {
        let documents: Vec<RawDocument> = documents.into_iter().collect();

        // Directory → position of the first index document found there.
        let mut dir_index: HashMap<String, usize> = HashMap::new();
        for (pos, doc) in documents.iter().enumerate() {
            if is_index(&doc.path) {
                dir_index.entry(directories(&doc.path).join("/")).or_insert(pos);
            }
        }

        let parents: Vec<Option<usize>> = documents
            .iter()
            .enumerate()
            .map(|(pos, doc)| {
                let dirs = directories(&doc.path);
                let own_dir_counts = !is_index(&doc.path)
                    || dir_index.get(&dirs.join("/")).is_some_and(|&p| p != pos);
                let skip = usize::from(!own_dir_counts);
                (0..=dirs.len())
                    .rev()
                    .skip(skip)
                    .find_map(|depth| dir_index.get(&dirs[..depth].join("/")).copied())
                    .filter(|&parent| parent != pos)
            })
            .collect();

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); documents.len()];
        let mut roots = Vec::new();
        for (pos, parent) in parents.iter().enumerate() {
            match parent {
                Some(parent) => children[*parent].push(pos),
                None => roots.push(pos),
            }
        }

        let mut slots: Vec<Option<RawDocument>> = documents.into_iter().map(Some).collect();
        let mut index = Self::new();
        let mut pending: Vec<(usize, Option<NodeId>)> =
            roots.into_iter().rev().map(|pos| (pos, None)).collect();
        while let Some((pos, parent)) = pending.pop() {
            let Some(document) = slots[pos].take() else {
                continue;
            };
            let id = index.add(document, parent);
            pending.extend(children[pos].iter().rev().map(|&child| (child, Some(id))));
        }

        index
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn build(self) -> Forest<IndexNode> {
        self.nodes.build()
    }
}

fn is_index(path: &str) -> bool {
    leaf(path)
        .strip_prefix("index")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}
