//! CLI command implementations.

mod links;
mod manifest;
mod paths;
mod tree;

use std::path::PathBuf;

use clap::Args;
use quire_config::{CliSettings, Config};
use quire_site::{Site, SiteLoader, SiteLoaderConfig};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use links::LinksArgs;
pub(crate) use manifest::ManifestArgs;
pub(crate) use paths::PathsArgs;
pub(crate) use tree::TreeArgs;

/// Arguments shared by every command that loads the site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long, env = "QUIRE_CONFIG")]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output (show loading logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration and build the site it points at.
    fn load_site(&self, output: &Output) -> Result<Site, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if self.verbose {
            if let Some(path) = &config.config_path {
                output.info(&format!("Config: {}", path.display()));
            }
            output.info(&format!(
                "Source: {}",
                config.docs_resolved.source_dir.display()
            ));
        }

        let loader = SiteLoader::new(SiteLoaderConfig {
            source_dir: config.docs_resolved.source_dir.clone(),
            suffix: config.suffix_rule(),
        });
        let site = loader.load()?;

        if site.is_empty() {
            output.warning(&format!(
                "No documents found in {}",
                config.docs_resolved.source_dir.display()
            ));
        }

        Ok(site)
    }
}
