//! `quire links` command implementation.

use clap::Args;
use quire_site::{Linkable, Site};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Source path (e.g. `guide/setup.md`) or output path of the page.
    page: String,
}

impl LinksArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.site.load_site(&output)?;

        for line in link_lines(&site, &self.page)? {
            output.data(&line)?;
        }

        Ok(())
    }
}

/// `source -> output` lines for every page, relative to `page`.
fn link_lines(site: &Site, page: &str) -> Result<Vec<String>, CliError> {
    let loc = site
        .location_by_source(page)
        .or_else(|| site.location(page))
        .ok_or_else(|| CliError::Validation(format!("Page not found: {page}")))?;

    tracing::debug!(page = %loc.value().path(), "Computing relative links");

    Ok(site
        .relative_mapping(loc.value().source_path())
        .into_iter()
        .map(|(source, target)| format!("{source} -> {target}"))
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quire_paths::SuffixRule;
    use quire_site::{DocumentIndex, RawDocument};

    use super::*;

    fn site() -> Site {
        let docs = [
            ("index.md", "# Home"),
            ("guide/index.md", "# Guide"),
            ("guide/setup.md", "# Setup"),
        ]
        .map(|(path, text)| RawDocument::parse(path, path, text).unwrap());
        Site::build(
            DocumentIndex::from_directory_layout(docs).build(),
            &SuffixRule::default(),
        )
    }

    #[test]
    fn test_link_lines_by_source_path() {
        let lines = link_lines(&site(), "guide/setup.md").unwrap();

        assert_eq!(
            lines,
            vec![
                "../index.md -> ../index.html",
                "index.md -> index.html",
                "setup.md -> setup.html",
            ]
        );
    }

    #[test]
    fn test_link_lines_by_output_path() {
        let by_output = link_lines(&site(), "guide/setup.html").unwrap();
        let by_source = link_lines(&site(), "guide/setup.md").unwrap();

        assert_eq!(by_output, by_source);
    }

    #[test]
    fn test_link_lines_unknown_page() {
        let err = link_lines(&site(), "missing.md").unwrap_err();

        assert_eq!(err.to_string(), "Page not found: missing.md");
    }
}
