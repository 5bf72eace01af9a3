use std::env;
use std::fs;
use std::path;

use anyhow::Context as _;

use crate::args;
use crate::error::Result;

/// Build the site at the source dir
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct BuildArgs {
    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl BuildArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        let config = sportsculture::Config::from_config(config)?;

        build(config)?;

        Ok(())
    }
}

pub(crate) fn build(config: sportsculture::Config) -> Result<()> {
    log::info!(
        "Building from `{}` into `{}`",
        config.source.display(),
        config.destination.display()
    );
    let report = sportsculture::build(config)?;
    log::debug!(
        "Wrote {} pages ({} posts) and {} assets",
        report.pages.len(),
        report.posts,
        report.assets
    );

    Ok(())
}

/// Remove the `destination` directory
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CleanArgs {
    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl CleanArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        let config = sportsculture::Config::from_config(config)?;

        clean(&config)
    }
}

pub(crate) fn clean(config: &sportsculture::Config) -> Result<()> {
    let cwd = env::current_dir().unwrap_or_else(|_| path::PathBuf::new());
    let destdir = dunce::canonicalize(&config.destination);
    let destdir = match destdir {
        Ok(destdir) => destdir,
        Err(e) => {
            log::debug!("No `{}` to clean", config.destination.display());
            log::debug!("{e}");
            return Ok(());
        }
    };
    if cwd.starts_with(&destdir) {
        anyhow::bail!(
            "Attempting to delete current directory ({}), Cancelling the operation",
            destdir.display()
        );
    }

    fs::remove_dir_all(&destdir)
        .with_context(|| format!("Failed to remove {}", destdir.display()))?;

    log::info!("directory `{}` removed", destdir.display());

    Ok(())
}
