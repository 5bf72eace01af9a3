use std::path;

use anyhow::Context as _;

use crate::error::Result;

/// Create a starter site
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct InitArgs {
    /// Target directory
    #[arg(default_value = "./")]
    pub(crate) directory: path::PathBuf,
}

impl InitArgs {
    pub(crate) fn run(&self) -> Result<()> {
        sportsculture::new::create_new_project(&self.directory)
            .context("Could not create a new site")?;
        log::info!("Created new site at {}", self.directory.display());

        Ok(())
    }
}
