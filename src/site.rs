use std::path;

use anyhow::Context as _;
use sportsculture_config::Environment;
use sportsculture_config::ProcessEnv;
use sportsculture_config::SiteConfig;

use crate::config::Config;
use crate::error::*;
use crate::feed;
use crate::files;
use crate::markdown::Markdown;
use crate::pages::Composer;
use crate::pages::Page;
use crate::post;
use crate::template::LiquidBuilder;

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub pages: Vec<path::PathBuf>,
    pub posts: usize,
    pub assets: usize,
}

/// Build the site, reading the site-wide strings from the process environment.
pub fn build(config: Config) -> Result<Report> {
    build_with_env(config, &ProcessEnv)
}

/// Build the site against an explicit environment.
pub fn build_with_env(config: Config, env: &impl Environment) -> Result<Report> {
    log::debug!("Source directory: {}", config.source.display());
    log::debug!("Destination directory: {}", config.destination.display());
    log::debug!("Draft mode enabled: {}", config.include_drafts);

    let markdown = Markdown::new();
    let posts = post::load_posts(&config, &markdown)?;

    let liquid = LiquidBuilder {
        includes_dir: Some(config.includes_dir.clone()),
    }
    .build()?;
    let composer = Composer::new(&liquid, &config, &posts);

    let routes = composer.routes();
    let mut rendered = Vec::with_capacity(routes.len());
    for route in &routes {
        let page = composer.render(*route, env)?;
        rendered.push(page);
    }

    let mut pages = Vec::with_capacity(rendered.len());
    for page in rendered {
        let Page {
            permalink,
            rel_output,
            html,
        } = page;
        let html = minify_if_enabled(html, &config)
            .with_context(|| format!("Failed to minify `{permalink}`"))?;
        files::write_document_file(html, config.destination.join(&rel_output))?;
        pages.push(rel_output);
    }

    let assets = if config.assets_dir.is_dir() {
        log::info!("Copying assets");
        let source = files::Source::new(
            &config.assets_dir,
            config.ignore.iter().map(|s| s.as_str()),
        )?;
        let rel_assets = config
            .assets_dir
            .strip_prefix(&config.source)
            .unwrap_or_else(|_| path::Path::new("assets"));
        files::copy_tree(&source, &config.destination.join(rel_assets))?
    } else {
        log::debug!("No assets at {}", config.assets_dir.display());
        0
    };

    if let Some(base_url) = config.base_url.as_deref() {
        if let Some(sitemap) = config.sitemap.as_deref() {
            let urls: Vec<_> = routes
                .iter()
                .filter(|r| r.is_listed())
                .filter_map(|r| config.absolute_url(&r.permalink()))
                .collect();
            let xml = feed::sitemap(urls.iter().map(|u| u.as_str()))?;
            let sitemap_path = config.destination.join(sitemap);
            files::write_document_file(xml, &sitemap_path)?;
            log::info!("Created sitemap at {}", sitemap_path.display());
        }
        if let Some(rss) = config.rss.as_deref() {
            let site = SiteConfig::from_env(env)
                .with_context(|| format!("Failed to resolve site config for `{rss}`"))?;
            let xml = feed::rss(base_url, &site, &posts);
            let rss_path = config.destination.join(rss);
            files::write_document_file(xml, &rss_path)?;
            log::info!("Created RSS file at {}", rss_path.display());
        }
    } else {
        log::debug!("No `site.base_url`, skipping sitemap and RSS");
    }

    log::info!("Build successful");
    Ok(Report {
        pages,
        posts: posts.len(),
        assets,
    })
}

#[cfg(feature = "html-minifier")]
fn minify_if_enabled(html: String, config: &Config) -> Result<String> {
    if config.minify_html {
        Ok(html_minifier::minify(html)?)
    } else {
        Ok(html)
    }
}

#[cfg(not(feature = "html-minifier"))]
fn minify_if_enabled(html: String, _config: &Config) -> Result<String> {
    Ok(html)
}

#[cfg(test)]
mod test {
    use std::fs;

    use sportsculture_config::MapEnv;

    use super::*;

    fn site() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("posts")).unwrap();
        fs::create_dir_all(root.join("assets/images")).unwrap();
        fs::write(
            root.join("posts/2023-06-01-kickoff.md"),
            "---\ntitle: Season Kickoff\n---\nHello",
        )
        .unwrap();
        fs::write(root.join("assets/images/logo.png"), "png").unwrap();
        let raw = sportsculture_config::Config {
            root: root.to_owned(),
            ..Default::default()
        };
        let config = Config::from_config(raw).unwrap();
        (dir, config)
    }

    #[test]
    fn build_writes_every_route() {
        let (dir, config) = site();
        let report = build_with_env(config, &MapEnv::new()).unwrap();
        assert_eq!(report.posts, 1);
        assert_eq!(report.assets, 1);

        let dest = dir.path().join("_site");
        for page in [
            "index.html",
            "posts/kickoff/index.html",
            "careers/index.html",
            "404.html",
        ] {
            assert!(dest.join(page).is_file(), "missing {page}");
        }
        assert!(dest.join("assets/images/logo.png").is_file());
        assert!(!dest.join("sitemap.xml").exists());
        assert!(!dest.join("rss.xml").exists());
    }

    #[test]
    fn build_writes_feeds_with_base_url() {
        let (dir, mut config) = site();
        config.base_url = Some("https://sportsculture.io".to_owned());
        build_with_env(config, &MapEnv::new().with("BLOG_NAME", "Pitch")).unwrap();

        let dest = dir.path().join("_site");
        let sitemap = fs::read_to_string(dest.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("https://sportsculture.io/posts/kickoff"), "{sitemap}");
        assert!(!sitemap.contains("404"), "{sitemap}");
        let rss = fs::read_to_string(dest.join("rss.xml")).unwrap();
        assert!(rss.contains("<title>Pitch</title>"), "{rss}");
    }

    #[test]
    fn malformed_environment_fails_build() {
        let (dir, config) = site();
        let env = MapEnv::new().with("BLOG_NAME", "%E0%A4%A");
        let err = build_with_env(config, &env).unwrap_err();
        assert!(format!("{err:#}").contains("BLOG_NAME"), "{err:#}");
        assert!(!dir.path().join("_site/index.html").exists());
    }

    #[cfg(feature = "html-minifier")]
    #[test]
    fn minify_shrinks_pages() {
        let (dir, config) = site();
        build_with_env(config.clone(), &MapEnv::new()).unwrap();
        let careers = dir.path().join("_site/careers/index.html");
        let plain = fs::read_to_string(&careers).unwrap();

        let mut config = config;
        config.minify_html = true;
        build_with_env(config, &MapEnv::new()).unwrap();
        let minified = fs::read_to_string(&careers).unwrap();
        assert!(minified.contains("Join Our Team"));
        assert!(minified.len() < plain.len());
    }
}
