//! `quire manifest` command implementation.

use clap::Args;
use quire_site::Manifest;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the manifest command.
#[derive(Args)]
pub(crate) struct ManifestArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Print compact single-line JSON.
    #[arg(long)]
    compact: bool,
}

impl ManifestArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.site.load_site(&output)?;

        let manifest = Manifest::from_site(&site);
        let json = if self.compact {
            serde_json::to_string(&manifest)?
        } else {
            serde_json::to_string_pretty(&manifest)?
        };
        output.data(&json)?;

        Ok(())
    }
}
