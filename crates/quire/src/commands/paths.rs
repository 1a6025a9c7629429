//! `quire paths` command implementation.

use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the paths command.
#[derive(Args)]
pub(crate) struct PathsArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

impl PathsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.site.load_site(&output)?;

        for path in site.all_paths() {
            output.data(path)?;
        }

        Ok(())
    }
}
