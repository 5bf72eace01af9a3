//! Page composition: one route in, one HTML document out.
//!
//! Every render resolves its own [`SiteConfig`] and hands the fields to the fragments
//! (`header`, `footer`, `seo`, `gradient_background`) through the `global` variable.

use std::path;

use anyhow::Context as _;
use sportsculture_config::Environment;
use sportsculture_config::SiteConfig;

use crate::Config;
use crate::careers;
use crate::error::*;
use crate::post::Post;
use crate::template;
use crate::template::Liquid;

/// A page of the site.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Route<'p> {
    Home,
    Post(&'p Post),
    Careers,
    NotFound,
}

impl Route<'_> {
    pub fn permalink(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Post(post) => post.permalink.clone(),
            Self::Careers => "/careers".to_owned(),
            Self::NotFound => "/404.html".to_owned(),
        }
    }

    /// Path of the rendered page relative to the destination
    pub fn rel_output(&self) -> path::PathBuf {
        match self {
            Self::Home => path::PathBuf::from("index.html"),
            Self::Post(post) => post.rel_output(),
            Self::Careers => path::Path::new("careers").join("index.html"),
            Self::NotFound => path::PathBuf::from("404.html"),
        }
    }

    /// Whether search engines should see the page
    pub fn is_listed(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// A rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub permalink: String,
    pub rel_output: path::PathBuf,
    pub html: String,
}

#[derive(Debug, serde::Serialize)]
struct Seo {
    title: String,
    description: String,
    url: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct JobView {
    title: &'static str,
    summary: &'static str,
    requirements: &'static [&'static str],
    tags: Vec<&'static str>,
}

#[derive(Debug, serde::Serialize)]
struct CareersView {
    heading: &'static str,
    intro: &'static str,
    about_heading: &'static str,
    about: &'static [&'static str],
    jobs: Vec<JobView>,
    perks_heading: &'static str,
    perks: &'static [careers::Perk],
    email: String,
    apply_href: String,
}

/// Renders routes against the loaded posts.
#[derive(Debug)]
pub struct Composer<'a> {
    liquid: &'a Liquid,
    config: &'a Config,
    posts: &'a [Post],
}

impl<'a> Composer<'a> {
    pub fn new(liquid: &'a Liquid, config: &'a Config, posts: &'a [Post]) -> Self {
        Self {
            liquid,
            config,
            posts,
        }
    }

    /// Every route of the site, home first.
    pub fn routes(&self) -> Vec<Route<'a>> {
        let mut routes = vec![Route::Home];
        routes.extend(self.posts.iter().map(Route::Post));
        routes.push(Route::Careers);
        routes.push(Route::NotFound);
        routes
    }

    pub fn render(&self, route: Route<'_>, env: &impl Environment) -> Result<Page> {
        let permalink = route.permalink();
        let global = SiteConfig::from_env(env)
            .with_context(|| format!("Failed to resolve site config for `{permalink}`"))?;

        let url = route
            .is_listed()
            .then(|| self.config.absolute_url(&permalink))
            .flatten();
        let mut globals = liquid::Object::new();
        let name = match route {
            Route::Home => {
                let seo = Seo {
                    title: global.name.clone(),
                    description: global.blog_title.clone(),
                    url,
                };
                insert(&mut globals, "seo", &seo)?;
                insert(&mut globals, "posts", self.posts)?;
                insert(&mut globals, "has_posts", &!self.posts.is_empty())?;
                template::HOME
            }
            Route::Post(post) => {
                let seo = Seo {
                    title: format!("{} - {}", post.title, global.name),
                    description: post
                        .description
                        .clone()
                        .unwrap_or_else(|| global.blog_title.clone()),
                    url,
                };
                // Posts are newest first: `previous` is the older neighbour
                let index = self.posts.iter().position(|p| p.slug == post.slug);
                let previous = index.and_then(|i| self.posts.get(i + 1));
                let next = index
                    .and_then(|i| i.checked_sub(1))
                    .and_then(|i| self.posts.get(i));
                insert(&mut globals, "seo", &seo)?;
                insert(&mut globals, "post", post)?;
                insert(&mut globals, "previous", &previous)?;
                insert(&mut globals, "next", &next)?;
                template::POST
            }
            Route::Careers => {
                let seo = Seo {
                    title: format!("Careers - {}", global.name),
                    description: careers::DESCRIPTION.to_owned(),
                    url,
                };
                insert(&mut globals, "seo", &seo)?;
                insert(&mut globals, "careers", &self.careers_view())?;
                template::CAREERS
            }
            Route::NotFound => {
                let seo = Seo {
                    title: format!("Page not found - {}", global.name),
                    description: global.blog_title.clone(),
                    url,
                };
                insert(&mut globals, "seo", &seo)?;
                template::NOT_FOUND
            }
        };
        insert(&mut globals, "global", &global)?;

        let content = self.liquid.render(name, &globals)?;
        globals.insert("content".into(), liquid::model::Value::scalar(content));
        let html = self
            .liquid
            .render(template::LAYOUT, &globals)
            .with_context(|| format!("Failed to render `{permalink}`"))?;

        Ok(Page {
            permalink,
            rel_output: route.rel_output(),
            html,
        })
    }

    fn careers_view(&self) -> CareersView {
        let jobs = careers::JOBS
            .iter()
            .map(|job| JobView {
                title: job.title,
                summary: job.summary,
                requirements: job.requirements,
                tags: job.tags.iter().map(|t| t.label()).collect(),
            })
            .collect();
        CareersView {
            heading: careers::HEADING,
            intro: careers::INTRO,
            about_heading: careers::ABOUT_HEADING,
            about: &careers::ABOUT,
            jobs,
            perks_heading: careers::PERKS_HEADING,
            perks: &careers::PERKS,
            email: self.config.careers.email.trim().to_owned(),
            apply_href: careers::apply_href(&self.config.careers),
        }
    }
}

fn insert<T: serde::Serialize + ?Sized>(
    globals: &mut liquid::Object,
    key: &'static str,
    value: &T,
) -> Result<()> {
    let value = liquid::model::to_value(&value)
        .with_context(|| format!("Failed to convert `{key}` for rendering"))?;
    globals.insert(key.into(), value);
    Ok(())
}
