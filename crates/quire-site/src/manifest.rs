//! Serializable description of a built site.
//!
//! The manifest flattens the page forest into per-page entries carrying
//! everything a renderer needs for navigation: relative links to parent and
//! neighbours, the header outline and the page's link mapping.

use std::collections::BTreeMap;

use quire_paths::relative_mapping;
use serde::Serialize;

use crate::forest::Location;
use crate::header::{HeaderNode, Linkable};
use crate::page::Page;
use crate::site::Site;

/// Link to another page, relative to the current one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: String,
    pub href: String,
}

/// Header outline entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderEntry {
    pub title: String,
    /// Link relative to the page holding the header.
    pub href: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HeaderEntry>,
}

/// One page of the manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    /// Output path, root-relative.
    pub path: String,
    /// Source path, root-relative.
    pub source: String,
    pub title: String,
    /// Relative path back to the site root.
    pub base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NavLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<NavLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HeaderEntry>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    /// Source links relative to this page mapped to output links relative to it.
    pub links: BTreeMap<String, String>,
}

/// Whole-site manifest in traversal order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub pages: Vec<PageEntry>,
}

impl Manifest {
    /// Describe every page of `site`.
    #[must_use]
    pub fn from_site(site: &Site) -> Self {
        let mappings = site.page_mappings();
        let pages = site
            .pages()
            .iter()
            .map(|loc| page_entry(loc, &mappings))
            .collect();
        Self { pages }
    }
}

fn page_entry(loc: Location<'_, Page>, mappings: &BTreeMap<String, String>) -> PageEntry {
    let page = loc.value();
    let nav = |other: Option<Location<'_, Page>>| {
        other.map(|other| NavLink {
            title: other.value().title(),
            href: Site::link(page, other.value()),
        })
    };

    PageEntry {
        path: page.path().to_owned(),
        source: page.source_path().to_owned(),
        title: page.title(),
        base: page.base(),
        parent: nav(loc.parent()),
        prev: nav(loc.prev()),
        next: nav(loc.next()),
        headers: header_entries(page, page.headers()),
        properties: page
            .properties()
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect(),
        links: relative_mapping(page.source_path(), mappings),
    }
}

fn header_entries(page: &Page, nodes: &[HeaderNode]) -> Vec<HeaderEntry> {
    nodes
        .iter()
        .map(|node| HeaderEntry {
            title: node.header.label().plain_text(),
            href: Site::link(page, &node.header),
            children: header_entries(page, &node.children),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quire_paths::SuffixRule;

    use super::*;
    use crate::index::{DocumentIndex, RawDocument};

    fn manifest() -> Manifest {
        let docs = [
            ("index.md", "# Home\n"),
            ("guide/index.md", "---\ntitle: Guide\n---\n# Guide\n## Overview\n### Goals\n"),
            ("guide/setup.md", "# Setup\n"),
        ]
        .map(|(path, text)| RawDocument::parse(path, path, text).unwrap());
        let site = Site::build(
            DocumentIndex::from_directory_layout(docs).build(),
            &SuffixRule::default(),
        );
        Manifest::from_site(&site)
    }

    #[test]
    fn test_manifest_lists_pages_in_order() {
        let manifest = manifest();

        let paths: Vec<_> = manifest.pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["index.html", "guide/index.html", "guide/setup.html"]
        );
    }

    #[test]
    fn test_manifest_navigation_links_are_relative() {
        let manifest = manifest();
        let guide = &manifest.pages[1];

        assert_eq!(guide.base, "../");
        assert_eq!(
            guide.parent,
            Some(NavLink {
                title: "Home".to_owned(),
                href: "../index.html".to_owned()
            })
        );
        assert_eq!(
            guide.prev.as_ref().map(|l| l.href.as_str()),
            Some("../index.html")
        );
        assert_eq!(
            guide.next.as_ref().map(|l| l.href.as_str()),
            Some("setup.html")
        );
        assert!(manifest.pages[0].prev.is_none());
        assert!(manifest.pages[2].next.is_none());
    }

    #[test]
    fn test_manifest_headers_and_properties() {
        let manifest = manifest();
        let guide = &manifest.pages[1];

        assert_eq!(
            guide.headers,
            vec![HeaderEntry {
                title: "Overview".to_owned(),
                href: "index.html#overview".to_owned(),
                children: vec![HeaderEntry {
                    title: "Goals".to_owned(),
                    href: "index.html#goals".to_owned(),
                    children: Vec::new(),
                }],
            }]
        );
        assert_eq!(
            guide.properties.get("title").map(String::as_str),
            Some("Guide")
        );
    }

    #[test]
    fn test_manifest_links_relative_to_page() {
        let manifest = manifest();
        let setup = &manifest.pages[2];

        assert_eq!(
            setup.links.get("index.md").map(String::as_str),
            Some("index.html")
        );
        assert_eq!(
            setup.links.get("../index.md").map(String::as_str),
            Some("../index.html")
        );
    }

    #[test]
    fn test_manifest_serializes_without_empty_fields() {
        let manifest = manifest();

        let json = serde_json::to_value(&manifest.pages[2]).unwrap();

        assert_eq!(json["path"], "guide/setup.html");
        assert!(json.get("headers").is_none());
        assert!(json.get("properties").is_none());
        assert!(json.get("next").is_none());
    }
}
