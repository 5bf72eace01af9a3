use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path;

use anyhow::Context as _;
use sportsculture_config::path as site_path;

use crate::Config;
use crate::error::*;
use crate::files;
use crate::frontmatter;
use crate::markdown::Markdown;

/// A rendered blog post.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// Human readable `date`
    pub display_date: Option<String>,
    pub permalink: String,
    /// Rendered HTML body
    pub content: String,
    pub draft: bool,
    #[serde(skip)]
    pub published: Option<chrono::NaiveDate>,
    #[serde(skip)]
    pub file_path: path::PathBuf,
}

impl Post {
    pub fn parse(file_path: &path::Path, content: &str, markdown: &Markdown) -> Result<Self> {
        let (front, body) = frontmatter::parse_document(content)?;
        let frontmatter::Frontmatter {
            title,
            description,
            date,
            slug,
            draft,
        } = front;

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::format_err!("File name is not valid UTF-8"))?;
        let (stem, _ext) = site_path::split_ext(file_name);
        let (file_date, file_stem) = site_path::parse_file_stem(stem);

        let slug = site_path::slugify(slug.as_deref().unwrap_or(&file_stem));
        if slug.is_empty() {
            anyhow::bail!("Post has an empty slug");
        }
        let title = title.unwrap_or_else(|| site_path::titleize_slug(&slug));

        let date = date.or(file_date);
        let published = date
            .as_deref()
            .map(|d| {
                chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date `{d}`, expected YYYY-MM-DD"))
            })
            .transpose()?;
        let date = published.map(|d| d.format("%Y-%m-%d").to_string());
        let display_date = published.map(|d| d.format("%B %-d, %Y").to_string());

        Ok(Self {
            permalink: format!("/posts/{slug}"),
            slug,
            title,
            description,
            date,
            display_date,
            content: markdown.parse(body),
            draft,
            published,
            file_path: file_path.to_owned(),
        })
    }

    /// Path of the rendered page relative to the destination
    pub fn rel_output(&self) -> path::PathBuf {
        path::Path::new("posts").join(&self.slug).join("index.html")
    }
}

/// Newest first; undated posts last, ordered by slug.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| match (a.published, b.published) {
        (Some(a_date), Some(b_date)) => b_date.cmp(&a_date).then_with(|| a.slug.cmp(&b.slug)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.slug.cmp(&b.slug),
    });
}

/// Read, render and order every post under `config.posts_dir`.
pub fn load_posts(config: &Config, markdown: &Markdown) -> Result<Vec<Post>> {
    if !config.posts_dir.is_dir() {
        log::warn!(
            "No posts directory at {}, the listing will be empty",
            config.posts_dir.display()
        );
        return Ok(Vec::new());
    }

    let source = files::Source::new(&config.posts_dir, config.ignore.iter().map(|s| s.as_str()))?;
    let mut posts = Vec::new();
    let mut seen: BTreeMap<String, path::PathBuf> = BTreeMap::new();
    for file_path in source.iter() {
        let is_post = file_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| config.post_extensions.iter().any(|x| x == e))
            .unwrap_or(false);
        if !is_post {
            log::trace!("Skipping non-post {}", file_path.display());
            continue;
        }

        let content = files::read_file(&file_path)?;
        let post = Post::parse(&file_path, &content, markdown)
            .with_context(|| format!("Failed to load post {}", file_path.display()))?;
        if post.draft && !config.include_drafts {
            log::debug!("Skipping draft {}", file_path.display());
            continue;
        }
        if let Some(existing) = seen.insert(post.slug.clone(), file_path.clone()) {
            anyhow::bail!(
                "Posts {} and {} both use the slug `{}`",
                existing.display(),
                file_path.display(),
                post.slug
            );
        }
        posts.push(post);
    }

    sort_posts(&mut posts);
    log::debug!("Loaded {} posts", posts.len());
    Ok(posts)
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(name: &str, content: &str) -> Post {
        Post::parse(path::Path::new(name), content, &Markdown::new()).unwrap()
    }

    #[test]
    fn slug_and_title_from_file_name() {
        let post = parse("posts/season-kickoff.md", "Body");
        assert_eq!(post.slug, "season-kickoff");
        assert_eq!(post.title, "Season Kickoff");
        assert_eq!(post.permalink, "/posts/season-kickoff");
        assert_eq!(post.date, None);
        assert_eq!(post.content, "<p>Body</p>\n");
    }

    #[test]
    fn date_prefix_is_stripped_from_slug() {
        let post = parse("posts/2023-06-01-kickoff.md", "Body");
        assert_eq!(post.slug, "kickoff");
        assert_eq!(post.date.as_deref(), Some("2023-06-01"));
        assert_eq!(post.display_date.as_deref(), Some("June 1, 2023"));
    }

    #[test]
    fn frontmatter_wins_over_file_name() {
        let post = parse(
            "posts/2023-06-01-kickoff.md",
            "---\ntitle: Opening Day\nslug: Opening Day\ndate: 2023-07-04\ndescription: Hello\n---\nBody",
        );
        assert_eq!(post.slug, "opening-day");
        assert_eq!(post.title, "Opening Day");
        assert_eq!(post.date.as_deref(), Some("2023-07-04"));
        assert_eq!(post.description.as_deref(), Some("Hello"));
    }

    #[test]
    fn dots_in_stem_are_kept() {
        let post = parse("posts/release-1.5.md", "Body");
        assert_eq!(post.slug, "release-1-5");
        assert_eq!(post.permalink, "/posts/release-1-5");
    }

    #[test]
    fn invalid_date_is_an_error() {
        let result = Post::parse(
            path::Path::new("posts/a.md"),
            "---\ndate: June 1st\n---\n",
            &Markdown::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn rel_output_is_pretty_url() {
        let post = parse("posts/kickoff.md", "");
        assert_eq!(
            post.rel_output(),
            path::Path::new("posts").join("kickoff").join("index.html")
        );
    }

    #[test]
    fn sort_newest_first_undated_last() {
        let mut posts = vec![
            parse("posts/undated-b.md", ""),
            parse("posts/2021-01-01-old.md", ""),
            parse("posts/undated-a.md", ""),
            parse("posts/2023-01-01-new.md", ""),
        ];
        sort_posts(&mut posts);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["new", "old", "undated-a", "undated-b"]);
    }

    fn site_with(posts: &[(&str, &str)]) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let posts_dir = dir.path().join("posts");
        std::fs::create_dir_all(&posts_dir).unwrap();
        for (name, content) in posts {
            std::fs::write(posts_dir.join(name), content).unwrap();
        }
        let raw = sportsculture_config::Config {
            root: dir.path().to_owned(),
            ..Default::default()
        };
        let config = Config::from_config(raw).unwrap();
        (dir, config)
    }

    #[test]
    fn load_posts_skips_drafts_and_other_files() {
        let (_dir, config) = site_with(&[
            ("kickoff.md", "Body"),
            ("wip.md", "---\ndraft: true\n---\nBody"),
            ("notes.txt", "not a post"),
        ]);
        let posts = load_posts(&config, &Markdown::new()).unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["kickoff"]);
    }

    #[test]
    fn load_posts_includes_drafts_on_request() {
        let (_dir, mut config) = site_with(&[("wip.md", "---\ndraft: true\n---\nBody")]);
        config.include_drafts = true;
        let posts = load_posts(&config, &Markdown::new()).unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].draft);
    }

    #[test]
    fn load_posts_rejects_duplicate_slugs() {
        let (_dir, config) = site_with(&[
            ("2023-01-01-kickoff.md", "Body"),
            ("kickoff.md", "Body"),
        ]);
        let err = load_posts(&config, &Markdown::new()).unwrap_err();
        assert!(err.to_string().contains("`kickoff`"), "{err}");
    }

    #[test]
    fn load_posts_with_versioned_names() {
        let (_dir, config) = site_with(&[("release-1.5.md", "Body"), ("release-1.6.md", "Body")]);
        let posts = load_posts(&config, &Markdown::new()).unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["release-1-5", "release-1-6"]);
    }

    #[test]
    fn load_posts_with_horizontal_rule() {
        let (_dir, config) = site_with(&[(
            "kickoff.md",
            "---\ntitle: Kickoff\n---\nIntro\n\n---\n\nMore\n",
        )]);
        let posts = load_posts(&config, &Markdown::new()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Kickoff");
        assert!(posts[0].content.contains("<hr />"), "{}", posts[0].content);
        assert!(posts[0].content.contains("<p>More</p>"), "{}", posts[0].content);
    }

    #[test]
    fn load_posts_without_directory() {
        let dir = tempfile::tempdir().unwrap();
        let raw = sportsculture_config::Config {
            root: dir.path().to_owned(),
            ..Default::default()
        };
        let config = Config::from_config(raw).unwrap();
        assert!(load_posts(&config, &Markdown::new()).unwrap().is_empty());
    }
}
