//! `quire tree` command implementation.

use clap::Args;
use quire_site::{HeaderNode, Linkable, Site};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

const INDENT: &str = "  ";

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Hide header outlines.
    #[arg(long)]
    no_headers: bool,
}

impl TreeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.site.load_site(&output)?;

        for line in render_tree(&site, !self.no_headers) {
            output.data(&line)?;
        }
        output.highlight(&format!("{} pages", site.len()));

        Ok(())
    }
}

/// One line per page, indented by depth, optionally followed by its headers.
fn render_tree(site: &Site, with_headers: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for loc in site.pages() {
        let depth = loc.depth();
        let page = loc.value();
        lines.push(format!(
            "{}{} ({})",
            INDENT.repeat(depth),
            page.title(),
            page.path()
        ));
        if with_headers {
            render_headers(page.headers(), depth + 1, &mut lines);
        }
    }
    lines
}

fn render_headers(nodes: &[HeaderNode], depth: usize, lines: &mut Vec<String>) {
    for node in nodes {
        let fragment = node.header.fragment().unwrap_or_default();
        lines.push(format!(
            "{}- {} #{fragment}",
            INDENT.repeat(depth),
            node.header.label().plain_text()
        ));
        render_headers(&node.children, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quire_paths::SuffixRule;
    use quire_site::{DocumentIndex, RawDocument};

    use super::*;

    fn site() -> Site {
        let docs = [
            ("index.md", "# Home\n## Welcome\n"),
            ("guide/index.md", "# Guide\n## Overview\n### Goals\n"),
            ("guide/setup.md", "# Setup\n"),
        ]
        .map(|(path, text)| RawDocument::parse(path, path, text).unwrap());
        Site::build(
            DocumentIndex::from_directory_layout(docs).build(),
            &SuffixRule::default(),
        )
    }

    #[test]
    fn test_render_tree_with_headers() {
        let lines = render_tree(&site(), true);

        assert_eq!(
            lines,
            vec![
                "Home (index.html)",
                "  - Welcome #welcome",
                "  Guide (guide/index.html)",
                "    - Overview #overview",
                "      - Goals #goals",
                "    Setup (guide/setup.html)",
            ]
        );
    }

    #[test]
    fn test_render_tree_without_headers() {
        let lines = render_tree(&site(), false);

        assert_eq!(
            lines,
            vec![
                "Home (index.html)",
                "  Guide (guide/index.html)",
                "    Setup (guide/setup.html)",
            ]
        );
    }

    #[test]
    fn test_render_tree_empty_site() {
        let site = Site::build(DocumentIndex::new().build(), &SuffixRule::default());

        assert!(render_tree(&site, true).is_empty());
    }
}
