use std::env;
use std::io::Write as _;
use std::path;

use anyhow::Context as _;

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Config file to use [default: _site.yml]
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<path::PathBuf>,

    /// Site destination folder [default: ./_site]
    #[arg(short, long, value_name = "DIR")]
    pub(crate) destination: Option<path::PathBuf>,

    /// Include drafts.
    #[arg(long, overrides_with("no_drafts"))]
    pub(crate) drafts: bool,

    /// Ignore drafts.
    #[arg(long, overrides_with("drafts"), hide = true)]
    no_drafts: bool,
}

impl ConfigArgs {
    pub(crate) fn load_config(&self) -> Result<sportsculture_config::Config> {
        let config_path = self.config.as_deref();

        // Fetch config information if available
        let mut config = if let Some(config_path) = config_path {
            sportsculture_config::Config::from_file(config_path).with_context(|| {
                format!("Error reading config file {}", config_path.display())
            })?
        } else {
            let cwd = env::current_dir().context("Failed to read the current directory")?;
            sportsculture_config::Config::from_cwd(cwd)?
        };

        config.abs_dest = self
            .destination
            .as_deref()
            .map(|d| {
                std::fs::create_dir_all(d)
                    .with_context(|| format!("Failed to create {}", d.display()))?;
                dunce::canonicalize(d)
                    .with_context(|| format!("Failed to resolve {}", d.display()))
            })
            .transpose()?;

        if let Some(drafts) = self.drafts() {
            config.include_drafts = drafts;
        }

        Ok(config)
    }

    fn drafts(&self) -> Option<bool> {
        resolve_bool_arg(self.drafts, self.no_drafts)
    }
}

fn resolve_bool_arg(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
        (_, _) => unreachable!("clap should make this impossible"),
    }
}

pub(crate) fn init_logging(level: Option<log::Level>, colored: bool) {
    let Some(level) = level else {
        return;
    };

    let palette = if colored {
        Palette::colored()
    } else {
        Palette::plain()
    };
    let mut builder = env_logger::Builder::new();
    builder.write_style(if colored {
        env_logger::WriteStyle::Always
    } else {
        env_logger::WriteStyle::Never
    });
    builder.filter(None, level.to_level_filter());

    if level == log::Level::Trace || level == log::Level::Debug {
        builder.format_timestamp_secs();
    } else {
        builder.format(move |f, record| {
            let style = match record.level() {
                log::Level::Error => palette.error,
                log::Level::Warn => palette.warn,
                log::Level::Info => palette.info,
                log::Level::Debug => palette.debug,
                log::Level::Trace => palette.trace,
            };
            let level = record.level().to_string().to_lowercase();
            writeln!(f, "{style}{level:>5}{style:#}: {}", record.args())
        });
    }

    builder.init();
}

#[derive(Copy, Clone, Default, Debug)]
struct Palette {
    error: anstyle::Style,
    warn: anstyle::Style,
    info: anstyle::Style,
    debug: anstyle::Style,
    trace: anstyle::Style,
}

impl Palette {
    fn colored() -> Self {
        Self {
            error: anstyle::AnsiColor::Red.on_default() | anstyle::Effects::BOLD,
            warn: anstyle::AnsiColor::Yellow.on_default(),
            info: anstyle::AnsiColor::Green.on_default(),
            debug: anstyle::AnsiColor::Blue.on_default(),
            trace: anstyle::AnsiColor::Cyan.on_default(),
        }
    }

    fn plain() -> Self {
        Self::default()
    }
}
