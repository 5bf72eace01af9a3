use super::*;

pub const BLOG_NAME: &str = "BLOG_NAME";
pub const BLOG_TITLE: &str = "BLOG_TITLE";
pub const BLOG_FOOTER_TEXT: &str = "BLOG_FOOTER_TEXT";

pub const DEFAULT_NAME: &str = "Sports Culture";
pub const DEFAULT_BLOG_TITLE: &str = "Making the world a better place through sports.";
pub const DEFAULT_FOOTER_TEXT: &str = "All rights reserved. Sports Culture Inc. 2023";

/// Site-wide display strings shared by every page.
///
/// Built fresh for each render by [`SiteConfig::from_env`]; every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SiteConfig {
    pub name: String,
    pub blog_title: String,
    pub footer_text: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            blog_title: DEFAULT_BLOG_TITLE.to_owned(),
            footer_text: DEFAULT_FOOTER_TEXT.to_owned(),
        }
    }
}

impl SiteConfig {
    /// Variables consulted, in resolution order, with the value used when each is unset.
    pub const VARIABLES: [(&'static str, &'static str); 3] = [
        (BLOG_NAME, DEFAULT_NAME),
        (BLOG_TITLE, DEFAULT_BLOG_TITLE),
        (BLOG_FOOTER_TEXT, DEFAULT_FOOTER_TEXT),
    ];

    /// Resolve each field from `env`.
    ///
    /// Set, non-empty variables are URI-decoded; anything else falls back to the default.
    /// Malformed encodings are returned as errors rather than replaced with the default.
    pub fn from_env(env: &impl Environment) -> Result<Self, EnvError> {
        let [name, blog_title, footer_text] =
            Self::VARIABLES.map(|(key, default)| lookup(env, key, default));
        let config = Self {
            name: name?,
            blog_title: blog_title?,
            footer_text: footer_text?,
        };
        log::trace!("Resolved site config {config:?}");
        Ok(config)
    }
}

fn lookup(env: &impl Environment, key: &'static str, default: &str) -> Result<String, EnvError> {
    let Some(raw) = env.var_os(key) else {
        return Ok(default.to_owned());
    };
    if raw.is_empty() {
        return Ok(default.to_owned());
    }
    let raw = raw.into_string().map_err(|raw| EnvError {
        variable: key,
        value: raw.to_string_lossy().into_owned(),
        source: None,
    })?;
    decode_uri(&raw).map_err(|e| EnvError {
        variable: key,
        value: raw.clone(),
        source: Some(e),
    })
}

/// A site variable could not be turned into text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvError {
    variable: &'static str,
    value: String,
    source: Option<DecodeError>,
}

impl EnvError {
    pub fn variable(&self) -> &'static str {
        self.variable
    }
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(e) => write!(f, "`{}={}`: {e}", self.variable, self.value),
            None => write!(f, "`{}={}`: not valid unicode", self.variable, self.value),
        }
    }
}

impl std::error::Error for EnvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
