use std::fmt;
use std::path;

use anyhow::Context as _;

use crate::error::*;

/// Project configuration with every path resolved against the project root.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Config {
    pub source: path::PathBuf,
    pub destination: path::PathBuf,
    pub include_drafts: bool,
    pub posts_dir: path::PathBuf,
    pub post_extensions: Vec<String>,
    pub rss: Option<String>,
    pub base_url: Option<String>,
    pub sitemap: Option<String>,
    pub careers: sportsculture_config::Careers,
    pub assets_dir: path::PathBuf,
    pub includes_dir: path::PathBuf,
    pub ignore: Vec<String>,
    pub minify_html: bool,
}

impl Config {
    pub fn from_config(source: sportsculture_config::Config) -> Result<Self> {
        let sportsculture_config::Config {
            root,
            source,
            destination,
            abs_dest,
            include_drafts,
            posts,
            site,
            careers,
            assets_dir,
            includes_dir,
            ignore,
            minify,
        } = source;

        let source = root.join(source);
        let destination = abs_dest.unwrap_or_else(|| root.join(destination));

        if careers.email.trim().is_empty() {
            anyhow::bail!("`careers.email` must not be empty");
        }

        let base_url = site
            .base_url
            .map(|base_url| normalize_base_url(&base_url))
            .transpose()?;

        if minify.html && !cfg!(feature = "html-minifier") {
            log::warn!("`minify.html` is set but this build lacks the `html-minifier` feature");
        }

        let config = Self {
            posts_dir: source.join(posts.dir),
            post_extensions: posts.extensions,
            rss: posts.rss,
            base_url,
            sitemap: site.sitemap,
            careers,
            assets_dir: source.join(assets_dir),
            includes_dir: source.join(includes_dir),
            ignore,
            minify_html: minify.html,
            include_drafts,
            source,
            destination,
        };
        Ok(config)
    }

    /// Absolute URL for a site-relative `permalink`, when `base_url` is configured
    pub fn absolute_url(&self, permalink: &str) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|base| format!("{base}/{}", permalink.trim_start_matches('/')))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let has_scheme = trimmed
        .split_once("://")
        .map(|(scheme, rest)| matches!(scheme, "http" | "https") && !rest.is_empty())
        .unwrap_or(false);
    if !has_scheme {
        return Err(anyhow::format_err!("expected an http(s) URL"))
            .with_context(|| format!("Invalid `site.base_url` `{base_url}`"));
    }
    Ok(trimmed.to_owned())
}
