//! Site loading from a directory of markdown sources.
//!
//! Loading runs in two phases. The scan walks the source directory and
//! collects lightweight references to source files without reading them.
//! The load phase reads and parses each file, arranges documents by their
//! directory layout and finalizes the [`Site`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use quire_paths::SuffixRule;
//! use quire_site::{SiteLoader, SiteLoaderConfig};
//!
//! let loader = SiteLoader::new(SiteLoaderConfig {
//!     source_dir: PathBuf::from("docs"),
//!     suffix: SuffixRule::default(),
//! });
//! let site = loader.load()?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use quire_paths::SuffixRule;

use crate::index::{DocumentIndex, RawDocument};
use crate::markdown;
use crate::properties::Properties;
use crate::site::Site;

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Error reading site sources.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration for [`SiteLoader`].
#[derive(Clone, Debug)]
pub struct SiteLoaderConfig {
    /// Root directory containing markdown sources.
    pub source_dir: PathBuf,
    /// Source to output suffix rule. Only files with the source suffix load.
    pub suffix: SuffixRule,
}

/// Reference to one source file found by the scan.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SourceRef {
    /// Root-relative `/`-separated path (e.g. `guide/setup.md`).
    path: String,
    /// Location on disk.
    file: PathBuf,
}

/// Loads a [`Site`] from the filesystem.
pub struct SiteLoader {
    config: SiteLoaderConfig,
}

impl SiteLoader {
    #[must_use]
    pub fn new(config: SiteLoaderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.config.source_dir
    }

    /// Scan, parse and finalize every source document.
    ///
    /// A missing source directory yields an empty site. Documents whose front
    /// matter does not parse are kept with empty properties.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered source file cannot be read.
    pub fn load(&self) -> Result<Site, LoadError> {
        let start = Instant::now();

        let refs = self.scan();
        tracing::debug!(document_count = refs.len(), "Site scan completed");

        let documents = refs
            .iter()
            .map(|r| self.read_document(r))
            .collect::<Result<Vec<_>, _>>()?;

        let index = DocumentIndex::from_directory_layout(documents);
        let site = Site::build(index.build(), &self.config.suffix);

        tracing::info!(
            pages = site.len(),
            elapsed_ms = elapsed_ms(start),
            "Site loaded"
        );
        Ok(site)
    }

    /// Collect source files, depth first.
    ///
    /// Within a directory the index document comes first, then the remaining
    /// entries by name. Hidden files and directories are skipped.
    fn scan(&self) -> Vec<SourceRef> {
        let mut refs = Vec::new();
        if self.config.source_dir.is_dir() {
            self.scan_directory(&self.config.source_dir, "", &mut refs);
        } else {
            tracing::warn!(
                path = %self.config.source_dir.display(),
                "Source directory not found"
            );
        }
        refs
    }

    fn scan_directory(&self, dir_path: &Path, prefix: &str, refs: &mut Vec<SourceRef>) {
        let entries = match fs::read_dir(dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, path = %dir_path.display(), "Failed to list directory");
                return;
            }
        };

        let index_name = format!("index{}", self.config.suffix.source_suffix());
        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name = e.file_name().to_string_lossy().into_owned();
                (e.path(), is_dir, name)
            })
            .filter(|(_, _, name)| !name.starts_with('.'))
            .collect();
        entries.sort_by(|(_, _, a), (_, _, b)| {
            (*a != index_name).cmp(&(*b != index_name)).then_with(|| a.cmp(b))
        });

        for (path, is_dir, name) in entries {
            let rel = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };

            if is_dir {
                self.scan_directory(&path, &rel, refs);
            } else if self.config.suffix.is_source(&rel) {
                refs.push(SourceRef { path: rel, file: path });
            }
        }
    }

    fn read_document(&self, source: &SourceRef) -> Result<RawDocument, LoadError> {
        let text = fs::read_to_string(&source.file).map_err(|e| LoadError::Read {
            path: source.file.clone(),
            source: e,
        })?;

        let parsed = markdown::parse(&text);
        let properties = match parsed.front_matter.as_deref().map(Properties::from_yaml) {
            Some(Ok(properties)) => properties,
            Some(Err(e)) => {
                tracing::warn!(
                    error = %e,
                    path = %source.path,
                    "Invalid front matter, ignoring properties"
                );
                Properties::default()
            }
            None => Properties::default(),
        };

        Ok(RawDocument {
            source: source.file.clone(),
            path: source.path.clone(),
            markdown: parsed.ast,
            properties,
        })
    }
}
