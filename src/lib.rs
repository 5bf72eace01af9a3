//! Static site generator for the Sports Culture company website.
//!
//! [`build`] turns a source directory of markdown posts and assets into the rendered site:
//! the home page with the post listing, one page per post, the careers page and a 404 page.
//! Site-wide strings are resolved from the environment for every page, see
//! [`sportsculture_config::SiteConfig`].

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use crate::config::Config;
pub use crate::site::build;
pub use crate::site::build_with_env;
pub use sportsculture_config::{Environment, MapEnv, ProcessEnv, SiteConfig};

pub mod careers;
pub mod config;
pub mod error;
pub mod feed;
pub mod files;
pub mod frontmatter;
pub mod markdown;
pub mod new;
pub mod pages;
pub mod post;
pub mod site;
pub mod template;
