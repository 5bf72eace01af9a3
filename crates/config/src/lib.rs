//! Configuration for the Sports Culture site generator.
//!
//! Two layers live here:
//! - [`SiteConfig`]: the site-wide display strings, resolved from the environment on every
//!   page render.
//! - [`Config`]: the optional `_site.yml` project file describing where content lives.

mod config;
mod env;
mod site;
mod uri;

pub mod path;

pub use self::config::*;
pub use self::env::*;
pub use self::site::*;
pub use self::uri::*;

type Status = status::Status;
type Result<T, E = Status> = std::result::Result<T, E>;
