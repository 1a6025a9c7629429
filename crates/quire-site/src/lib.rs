//! Document tree construction for Quire.
//!
//! This crate provides:
//! - [`markdown`]: a lightweight markdown AST built on `pulldown-cmark`
//! - [`Properties`]: front matter key/value pairs and output path resolution
//! - [`DocumentIndex`]: parsed documents arranged in their authored hierarchy
//! - [`Page`] and [`build_pages`]: finalized pages with rebased header anchors
//! - [`Forest`] and [`Location`]: read-only page forest with a pre-order cursor
//! - [`Site`], [`Manifest`], [`SiteLoader`]: lookups, link helpers and loading
//!
//! # Quick Start
//!
//! ```
//! use quire_paths::SuffixRule;
//! use quire_site::{DocumentIndex, RawDocument, Site};
//!
//! let mut index = DocumentIndex::new();
//! let home = index.add(RawDocument::parse("index.md", "index.md", "# Home\n").unwrap(), None);
//! index.add(
//!     RawDocument::parse("guide.md", "guide.md", "# Guide\n## Setup\n").unwrap(),
//!     Some(home),
//! );
//!
//! let site = Site::build(index.build(), &SuffixRule::default());
//! assert_eq!(site.all_paths(), vec!["index.html", "guide.html"]);
//!
//! let guide = site.get_page("guide.html").unwrap();
//! assert_eq!(guide.title(), "Guide");
//! assert_eq!(
//!     site.relative_mapping("guide.md").get("index.md").map(String::as_str),
//!     Some("index.html")
//! );
//! ```

mod forest;
mod header;
mod index;
mod loader;
mod manifest;
pub mod markdown;
mod page;
mod properties;
mod site;

pub use forest::{Forest, ForestBuilder, Location, NodeId, Preorder, Siblings};
pub use header::{Header, HeaderNode, Linkable};
pub use index::{DocumentIndex, IndexNode, RawDocument};
pub use loader::{LoadError, SiteLoader, SiteLoaderConfig};
pub use manifest::{HeaderEntry, Manifest, NavLink, PageEntry};
pub use page::{Page, convert_page};
pub use properties::{OUT_KEY, Properties, PropertiesError, convert_to_target};
pub use site::{BreadcrumbItem, Site, all_paths, build_pages};
