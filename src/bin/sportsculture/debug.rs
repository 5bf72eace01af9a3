use anyhow::Context as _;

use crate::args;
use crate::error::Result;

/// Print site debug information
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints post-processed config
    Config {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Prints the site-wide strings resolved from the environment
    Site {
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },

    /// Prints the posts that would be rendered
    Posts {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Format {
    Yaml,
    Json,
}

impl DebugCommands {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config { config } => {
                let config = config.load_config()?;
                let config = sportsculture::Config::from_config(config)?;
                print!("{config}");
            }
            Self::Site { format } => {
                let site = sportsculture::SiteConfig::from_env(&sportsculture::ProcessEnv)?;
                let rendered = match format {
                    Format::Yaml => serde_yaml::to_string(&site)?,
                    Format::Json => {
                        let mut json = serde_json::to_string_pretty(&site)?;
                        json.push('\n');
                        json
                    }
                };
                print!("{rendered}");
            }
            Self::Posts { config } => {
                let config = config.load_config()?;
                let config = sportsculture::Config::from_config(config)?;
                let markdown = sportsculture::markdown::Markdown::new();
                let posts = sportsculture::post::load_posts(&config, &markdown)
                    .context("Failed to load posts")?;
                for post in posts {
                    let date = post.date.as_deref().unwrap_or("----------");
                    println!("{date} {} {}", post.permalink, post.file_path.display());
                }
            }
        }

        Ok(())
    }
}
