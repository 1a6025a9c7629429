//! Page forest and site-wide lookups.
//!
//! [`build_pages`] maps every index node to a finalized [`Page`] without
//! changing the shape of the forest. [`Site`] wraps the resulting forest with
//! O(1) lookups by output path and source path, and the relative link helpers
//! renderers need.

use std::collections::{BTreeMap, HashMap};

use quire_paths::{SuffixRule, relative_link, relative_mapping};

use crate::forest::{Forest, Location, NodeId};
use crate::header::Linkable;
use crate::index::IndexNode;
use crate::page::{Page, convert_page};

/// Finalize every node of the index, preserving shape and node ids.
pub fn build_pages(index: Forest<IndexNode>, convert: &SuffixRule) -> Forest<Page> {
    index.map(|node| convert_page(node, convert))
}

/// Output paths of every page in pre-order, across all trees.
///
/// Walks a fresh cursor on each call.
pub fn all_paths(forest: &Forest<Page>) -> Vec<&str> {
    std::iter::successors(forest.first(), |loc| loc.next())
        .map(|loc| loc.value().path())
        .collect()
}

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// Link to the ancestor, relative to the current page.
    pub href: String,
}

/// Finalized site: the page forest plus lookup indexes.
pub struct Site {
    pages: Forest<Page>,
    path_index: HashMap<String, NodeId>,
    source_index: HashMap<String, NodeId>,
}

impl Site {
    /// Finalize an index into a site.
    #[must_use]
    pub fn build(index: Forest<IndexNode>, convert: &SuffixRule) -> Self {
        Self::new(build_pages(index, convert))
    }

    /// Wrap a page forest, indexing it by output and source path.
    ///
    /// Output paths are expected to be unique; when two pages share one, the
    /// first in traversal order wins the lookup.
    #[must_use]
    pub fn new(pages: Forest<Page>) -> Self {
        let mut path_index = HashMap::with_capacity(pages.len());
        let mut source_index = HashMap::with_capacity(pages.len());

        for loc in &pages {
            let page = loc.value();
            if path_index.contains_key(page.path()) {
                tracing::warn!(
                    path = %page.path(),
                    source = %page.source_path(),
                    "Duplicate output path, keeping first page"
                );
            } else {
                path_index.insert(page.path().to_owned(), loc.id());
            }
            if source_index.contains_key(page.source_path()) {
                tracing::warn!(
                    source = %page.source_path(),
                    path = %page.path(),
                    "Duplicate source path, keeping first page"
                );
            } else {
                source_index.insert(page.source_path().to_owned(), loc.id());
            }
        }

        tracing::debug!(pages = pages.len(), "Built site");

        Self {
            pages,
            path_index,
            source_index,
        }
    }

    /// The page forest.
    #[must_use]
    pub fn pages(&self) -> &Forest<Page> {
        &self.pages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Output paths in traversal order.
    #[must_use]
    pub fn all_paths(&self) -> Vec<&str> {
        all_paths(&self.pages)
    }

    /// Get page by output path (e.g. `guide/setup.html`).
    #[must_use]
    pub fn get_page(&self, path: &str) -> Option<&Page> {
        self.location(path).map(Location::value)
    }

    /// Cursor on the page with the given output path.
    #[must_use]
    pub fn location(&self, path: &str) -> Option<Location<'_, Page>> {
        self.path_index
            .get(path)
            .and_then(|&id| self.pages.location(id))
    }

    /// Cursor on the page built from the given source path.
    #[must_use]
    pub fn location_by_source(&self, source_path: &str) -> Option<Location<'_, Page>> {
        self.source_index
            .get(source_path)
            .and_then(|&id| self.pages.location(id))
    }

    /// Site-wide mapping from source path to output path.
    ///
    /// A source path shared by several pages maps to the first in traversal
    /// order, matching [`Site::location_by_source`].
    #[must_use]
    pub fn page_mappings(&self) -> BTreeMap<String, String> {
        let mut mappings = BTreeMap::new();
        for loc in &self.pages {
            let page = loc.value();
            mappings
                .entry(page.source_path().to_owned())
                .or_insert_with(|| page.path().to_owned());
        }
        mappings
    }

    /// Source→output mapping rewritten relative to one source document.
    ///
    /// Lets a renderer turn a relative markdown link written in `source_path`
    /// into a relative link between output files.
    #[must_use]
    pub fn relative_mapping(&self, source_path: &str) -> BTreeMap<String, String> {
        relative_mapping(source_path, &self.page_mappings())
    }

    /// Relative link from one page to any linkable target.
    #[must_use]
    pub fn link(from: &Page, to: &impl Linkable) -> String {
        relative_link(from.path(), to.path())
    }

    /// Ancestors of the page at `path`, root first, linked relative to it.
    ///
    /// Empty for unknown paths and root pages.
    #[must_use]
    pub fn breadcrumbs(&self, path: &str) -> Vec<BreadcrumbItem> {
        let Some(loc) = self.location(path) else {
            return Vec::new();
        };
        let page = loc.value();

        let mut items: Vec<_> = loc
            .ancestors()
            .map(|ancestor| BreadcrumbItem {
                title: ancestor.value().title(),
                href: Self::link(page, ancestor.value()),
            })
            .collect();
        items.reverse();
        items
    }
}
