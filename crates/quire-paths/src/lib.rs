//! Path algebra for Quire.
//!
//! Pure functions over `/`-separated, site-root-relative path strings. Nothing
//! in this crate touches the filesystem or the host path separator.
//!
//! - [`SuffixRule`], [`replace_suffix`], [`replace_extension`]: source-to-target
//!   path conversion
//! - [`ref_relative_path`], [`relative_link`], [`relative_mapping`]: shortest
//!   relative paths between two documents of the site
//!
//! # Example
//!
//! ```
//! use quire_paths::{SuffixRule, relative_link};
//!
//! let rule = SuffixRule::default();
//! assert_eq!(rule.apply("guide/setup.md"), "guide/setup.html");
//! assert_eq!(
//!     relative_link("guide/setup.html", "api/index.html#errors"),
//!     "../api/index.html#errors"
//! );
//! ```

mod relative;
mod suffix;

pub use relative::{
    base_path, directories, leaf, ref_relative_path, relative_link, relative_local_path,
    relative_mapping, relative_root_path, split_fragment,
};
pub use suffix::{SuffixRule, replace_extension, replace_suffix};
