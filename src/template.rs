use std::collections::HashMap;
use std::fmt;
use std::path;

use anyhow::Context as _;

use crate::error::*;
use crate::files;

pub const LAYOUT: &str = "layout";
pub const HOME: &str = "home";
pub const POST: &str = "post";
pub const CAREERS: &str = "careers";
pub const NOT_FOUND: &str = "not_found";

const PAGES: [&str; 5] = [LAYOUT, HOME, POST, CAREERS, NOT_FOUND];

/// Templates shipped with the binary; any of them can be replaced by
/// `<includes_dir>/<name>.liquid`.
const BUILTIN: [(&str, &str); 9] = [
    (LAYOUT, include_str!("templates/layout.liquid")),
    (HOME, include_str!("templates/home.liquid")),
    (POST, include_str!("templates/post.liquid")),
    (CAREERS, include_str!("templates/careers.liquid")),
    (NOT_FOUND, include_str!("templates/not_found.liquid")),
    ("header", include_str!("templates/header.liquid")),
    ("footer", include_str!("templates/footer.liquid")),
    ("seo", include_str!("templates/seo.liquid")),
    (
        "gradient_background",
        include_str!("templates/gradient_background.liquid"),
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidBuilder {
    pub includes_dir: Option<path::PathBuf>,
}

impl LiquidBuilder {
    pub fn build(self) -> Result<Liquid> {
        let mut sources = HashMap::new();
        for (name, builtin) in BUILTIN {
            let text = match self.override_path(name) {
                Some(path) => {
                    log::debug!("Using `{}` for `{name}`", path.display());
                    files::read_file(&path)?
                }
                None => builtin.to_owned(),
            };
            sources.insert(name, text);
        }

        let mut partials = liquid::partials::InMemorySource::new();
        for (name, text) in &sources {
            partials.add(name.to_string(), text.clone());
        }
        let parser = liquid::ParserBuilder::with_stdlib()
            .partials(liquid::partials::EagerCompiler::new(partials))
            .build()?;

        let mut templates = HashMap::new();
        for name in PAGES {
            let template = parser
                .parse(&sources[name])
                .with_context(|| format!("Failed to parse template `{name}`"))?;
            templates.insert(name, template);
        }

        Ok(Liquid { templates })
    }

    fn override_path(&self, name: &str) -> Option<path::PathBuf> {
        let path = self.includes_dir.as_ref()?.join(format!("{name}.liquid"));
        path.is_file().then_some(path)
    }
}

pub struct Liquid {
    templates: HashMap<&'static str, liquid::Template>,
}

impl Liquid {
    /// Templates shipped with the binary.
    pub fn builtin() -> Result<Self> {
        LiquidBuilder { includes_dir: None }.build()
    }

    pub fn render(&self, name: &str, globals: &liquid::Object) -> Result<String> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| anyhow::format_err!("Unknown template `{name}`"))?;
        let html = template
            .render(globals)
            .with_context(|| format!("Failed to render `{name}`"))?;
        Ok(html)
    }
}

impl fmt::Debug for Liquid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Liquid{{}}")
    }
}
