use std::path;
use std::sync::mpsc;
use std::thread;
use std::time;

use anyhow::Context as _;
use notify::Watcher as _;

use crate::args;
use crate::build;
use crate::error::Result;

/// Preview the site, rebuilding it as posts and assets change
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ServeArgs {
    /// Open a browser
    #[arg(long)]
    pub(crate) open: bool,

    /// Host to serve from
    #[arg(long, value_name = "HOSTNAME_OR_IP", default_value = "localhost")]
    pub(crate) host: String,

    /// Port to serve from
    #[arg(short = 'P', long, value_name = "NUM")]
    pub(crate) port: Option<u16>,

    /// Disable rebuilding on change
    #[arg(long)]
    pub(crate) no_watch: bool,

    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl ServeArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let staging = tempfile::tempdir().context("Failed to create a staging directory")?;

        let mut builder = sportsculture_serve::ServerBuilder::new(staging.path());
        builder.hostname(&self.host);
        if let Some(port) = self.port {
            builder.port(port);
        }
        let server = builder.build();
        let url = format!("http://{}", server.addr());

        let mut raw = self.config.load_config()?;
        // Feeds and canonical links point at the preview
        raw.site.base_url = Some(url.clone());
        let mut config = sportsculture::Config::from_config(raw)?;
        config.destination = staging.path().to_owned();
        log::debug!("Staging the site in `{}`", staging.path().display());
        build::build(config.clone())?;

        log::info!("Previewing `{}` at {url}", config.source.display());
        if self.open {
            match open::that(&url) {
                Ok(()) => log::info!("Opened {url} in a browser"),
                Err(err) => log::warn!("Failed to open a browser: {err}"),
            }
        }

        if self.no_watch {
            log::info!("Ctrl-c to stop");
            server.serve()?;
            staging
                .close()
                .context("Failed to remove the staging directory")?;
            return Ok(());
        }

        let serving = thread::spawn(move || server.serve());
        watch(&config, &serving)?;
        match serving.join() {
            Ok(result) => result?,
            Err(_) => anyhow::bail!("Preview server panicked"),
        }
        Ok(())
    }
}

/// Rebuild whenever something under the source changes, until the server stops.
fn watch(
    config: &sportsculture::Config,
    serving: &thread::JoinHandle<std::result::Result<(), sportsculture_serve::Error>>,
) -> Result<()> {
    // notify reports canonical paths
    let source = dunce::canonicalize(&config.source)
        .with_context(|| format!("Failed to resolve source `{}`", config.source.display()))?;
    let staging = dunce::canonicalize(&config.destination).with_context(|| {
        format!(
            "Failed to resolve staging directory `{}`",
            config.destination.display()
        )
    })?;

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to start watching")?;
    watcher
        .watch(&source, notify::RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch `{}`", source.display()))?;
    log::info!("Watching `{}` for changes, ctrl-c to stop", source.display());

    while !serving.is_finished() {
        let event = match rx.recv_timeout(time::Duration::from_millis(500)) {
            Ok(event) => event.context("Failed to watch for changes")?,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };
        if !is_site_change(&event, &staging) {
            continue;
        }
        log::debug!("Changed: {:?}", event.paths);
        // An editor save is often several events
        thread::sleep(time::Duration::from_millis(100));
        let skipped = rx.try_iter().count();
        log::trace!("Coalesced {skipped} more events");

        let started = time::Instant::now();
        match build::build(config.clone()) {
            Ok(()) => log::info!("Rebuilt in {}ms", started.elapsed().as_millis()),
            Err(err) => log::error!("Rebuild failed: {err:#}"),
        }
    }

    Ok(())
}

fn is_site_change(event: &notify::Event, staging: &path::Path) -> bool {
    let relevant = matches!(
        event.kind,
        notify::EventKind::Create(_) | notify::EventKind::Modify(_) | notify::EventKind::Remove(_)
    );
    relevant && event.paths.iter().any(|p| !p.starts_with(staging))
}
