use std::fmt;
use std::path;

use super::*;

pub const PROJECT_FILE: &str = "_site.yml";

/// Contents of `_site.yml`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(skip)]
    pub root: path::PathBuf,
    pub source: path::PathBuf,
    pub destination: path::PathBuf,
    #[serde(skip)]
    pub abs_dest: Option<path::PathBuf>,
    pub include_drafts: bool,
    pub posts: Posts,
    pub site: Site,
    pub careers: Careers,
    pub assets_dir: path::PathBuf,
    pub includes_dir: path::PathBuf,
    pub ignore: Vec<String>,
    pub minify: Minify,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            root: Default::default(),
            source: "./".into(),
            destination: "./_site".into(),
            abs_dest: Default::default(),
            include_drafts: false,
            posts: Default::default(),
            site: Default::default(),
            careers: Default::default(),
            assets_dir: "assets".into(),
            includes_dir: "_includes".into(),
            ignore: Default::default(),
            minify: Default::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Config> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Config> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Status::new("Failed to read config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                Status::new("Failed to parse config")
                    .with_source(e)
                    .context_with(|c| c.insert("Path", path.display().to_string()))
            })?
        };

        let mut root = path;
        root.pop(); // Remove filename
        if root == path::Path::new("") {
            root = path::Path::new(".").to_owned();
        }
        config.root = root;

        Ok(config)
    }

    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<Config> {
        Self::from_cwd_internal(cwd.into())
    }

    fn from_cwd_internal(cwd: path::PathBuf) -> Result<Config> {
        let file_path = find_project_file(&cwd, PROJECT_FILE);
        let config = file_path
            .map(|p| {
                log::debug!("Using config file `{}`", p.display());
                Self::from_file(&p)
            })
            .unwrap_or_else(|| {
                log::warn!("No {PROJECT_FILE} file found in current directory, using default config.");
                let config = Config {
                    root: cwd,
                    ..Default::default()
                };
                Ok(config)
            })?;
        Ok(config)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Posts {
    pub dir: path::PathBuf,
    pub extensions: Vec<String>,
    /// Feed file name, written when `site.base_url` is set
    pub rss: Option<String>,
}

impl Default for Posts {
    fn default() -> Self {
        Self {
            dir: "posts".into(),
            extensions: vec!["md".to_owned(), "markdown".to_owned()],
            rss: Some("rss.xml".to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Site {
    pub base_url: Option<String>,
    pub sitemap: Option<String>,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            base_url: None,
            sitemap: Some("sitemap.xml".to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Careers {
    pub email: String,
    pub subject: String,
}

impl Default for Careers {
    fn default() -> Self {
        Self {
            email: "careers@sportsculture.io".to_owned(),
            subject: "Job Application".to_owned(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Minify {
    pub html: bool,
}

fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.exists() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    Some(file_path)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_file_ok() {
        let result = Config::from_file("tests/fixtures/config/_site.yml").unwrap();
        assert_eq!(
            result.root,
            path::Path::new("tests/fixtures/config").to_path_buf()
        );
        assert_eq!(result.careers.email, "jobs@example.com");
        assert_eq!(
            result.site.base_url.as_deref(),
            Some("https://sportsculture.io")
        );
        assert_eq!(result.posts.dir, path::Path::new("articles"));
        // Unspecified keys keep their defaults
        assert_eq!(result.careers.subject, "Job Application");
        assert_eq!(result.destination, path::Path::new("./_site"));
    }

    #[test]
    fn test_from_file_empty() {
        let result = Config::from_file("tests/fixtures/config/empty.yml").unwrap();
        assert_eq!(
            result.root,
            path::Path::new("tests/fixtures/config").to_path_buf()
        );
        assert_eq!(result.posts, Posts::default());
    }

    #[test]
    fn test_from_file_unknown_field() {
        let result = Config::from_file("tests/fixtures/config/unknown_field.yml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_syntax() {
        let result = Config::from_file("tests/fixtures/config/invalid_syntax.yml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_not_found() {
        let result = Config::from_file("tests/fixtures/config/config_does_not_exist.yml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_cwd_ok() {
        let result = Config::from_cwd("tests/fixtures/config/child").unwrap();
        assert_eq!(
            result.root,
            path::Path::new("tests/fixtures/config").to_path_buf()
        );
    }

    #[test]
    fn test_from_cwd_not_found() {
        let result = Config::from_cwd("tests/fixtures").unwrap();
        assert_eq!(result.root, path::Path::new("tests/fixtures").to_path_buf());
        assert_eq!(result.careers, Careers::default());
    }

    #[test]
    fn find_project_file_same_dir() {
        let actual = find_project_file("tests/fixtures/config", PROJECT_FILE).unwrap();
        let expected = path::Path::new("tests/fixtures/config/_site.yml");
        assert_eq!(actual, expected);
    }

    #[test]
    fn find_project_file_parent_dir() {
        let actual = find_project_file("tests/fixtures/config/child", PROJECT_FILE).unwrap();
        let expected = path::Path::new("tests/fixtures/config/_site.yml");
        assert_eq!(actual, expected);
    }

    #[test]
    fn find_project_file_doesnt_exist() {
        let expected = path::Path::new("<NOT FOUND>");
        let actual =
            find_project_file("tests/fixtures/", PROJECT_FILE).unwrap_or_else(|| expected.into());
        assert_eq!(actual, expected);
    }

    #[test]
    fn display_round_trips() {
        let config = Config::default();
        let text = config.to_string();
        let parsed: Config = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
