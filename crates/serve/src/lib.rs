//! > Preview server for a built site
//!
//! Serves the destination directory of a site build with the same URL shape the site links
//! with: `/careers` is answered from `careers/index.html`, `/about` from `about.html` when that
//! exists, and unknown paths from the site's own `404.html`.
//!
//! It is meant for local previews only; it prioritizes small size over speed or scalability.
//!
//! # Example
//!
//! ```rust,no_run
//! let server = sportsculture_serve::ServerBuilder::new("_site")
//!     .port(3000)
//!     .build();
//!
//! println!("See http://{}", server.addr());
//! server.serve().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

use std::{
    path::{Path, PathBuf},
    str::FromStr,
    sync::{RwLock, TryLockError},
};

const FALLBACK_NOT_FOUND: &str = "<h1> <center> 404: Page not found </center> </h1>";

/// Custom server settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerBuilder {
    source: PathBuf,
    hostname: Option<String>,
    port: Option<u16>,
    not_found: PathBuf,
}

impl ServerBuilder {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            hostname: None,
            port: None,
            not_found: PathBuf::from("404.html"),
        }
    }

    /// Override the hostname
    pub fn hostname(&mut self, hostname: impl Into<String>) -> &mut Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Override the port
    ///
    /// By default, the first available port is selected.
    pub fn port(&mut self, port: u16) -> &mut Self {
        self.port = Some(port);
        self
    }

    /// Page, relative to the source, returned for unknown paths
    pub fn not_found_page(&mut self, page: impl Into<PathBuf>) -> &mut Self {
        self.not_found = page.into();
        self
    }

    /// Create a server
    ///
    /// This is needed for accessing the dynamically assigned port
    pub fn build(&self) -> Server {
        let hostname = self.hostname.as_deref().unwrap_or("localhost");
        let port = self
            .port
            .or_else(|| get_available_port(hostname))
            // Just have `serve` error out
            .unwrap_or(3000);

        Server {
            source: self.source.clone(),
            not_found: self.source.join(&self.not_found),
            addr: format!("{hostname}:{port}"),
            server: RwLock::new(None),
        }
    }

    /// Start the webserver
    pub fn serve(&self) -> Result<(), Error> {
        self.build().serve()
    }
}

pub struct Server {
    source: PathBuf,
    not_found: PathBuf,
    addr: String,
    server: RwLock<Option<tiny_http::Server>>,
}

impl Server {
    /// Serve on first available port on localhost
    pub fn new(source: impl Into<PathBuf>) -> Self {
        ServerBuilder::new(source).build()
    }

    /// The location being served
    pub fn source(&self) -> &Path {
        self.source.as_path()
    }

    /// The address the server is available at
    ///
    /// This is useful for telling users how to access the site since the port is dynamically
    /// assigned by default.
    pub fn addr(&self) -> &str {
        self.addr.as_str()
    }

    /// Whether the server was running at the instant the call happened
    pub fn is_running(&self) -> bool {
        matches!(self.server.read().as_deref(), Ok(Some(_)))
    }

    /// Start the webserver
    pub fn serve(&self) -> Result<(), Error> {
        match self.server.try_write().as_deref_mut() {
            Ok(server @ None) => {
                *server = Some(tiny_http::Server::http(self.addr()).map_err(Error::new)?);
            }
            Ok(Some(_)) | Err(TryLockError::WouldBlock) => {
                return Err(Error::new("the server is running"));
            }
            Err(error @ TryLockError::Poisoned(_)) => return Err(Error::new(error)),
        }

        {
            let server = self.server.read().map_err(Error::new)?;
            if let Some(server) = server.as_ref() {
                for request in server.incoming_requests() {
                    if let Err(e) = self.handle(request) {
                        log::error!("{e}");
                    }
                }
            }
        }

        *self.server.write().map_err(Error::new)? = None;

        Ok(())
    }

    /// Closes the server gracefully
    pub fn close(&self) {
        if let Ok(Some(server)) = self.server.read().as_deref() {
            server.unblock();
        }
    }

    fn handle(&self, req: tiny_http::Request) -> Result<(), Error> {
        let resolved = resolve(self.source(), req.url());
        log::debug!("{} {} -> {:?}", req.method(), req.url(), resolved);
        match resolved {
            Resolved::File(path) => {
                let file = std::fs::File::open(&path).map_err(Error::new)?;
                let response =
                    tiny_http::Response::from_file(file).with_header(content_type(&path));
                req.respond(response).map_err(Error::new)?;
            }
            Resolved::Forbidden => {
                let response = tiny_http::Response::from_string("403: Forbidden")
                    .with_status_code(403)
                    .with_header(plain_text());
                req.respond(response).map_err(Error::new)?;
            }
            Resolved::NotFound => {
                if self.not_found.is_file() {
                    let file = std::fs::File::open(&self.not_found).map_err(Error::new)?;
                    let response = tiny_http::Response::from_file(file)
                        .with_status_code(404)
                        .with_header(content_type(&self.not_found));
                    req.respond(response).map_err(Error::new)?;
                } else {
                    let response = tiny_http::Response::from_string(FALLBACK_NOT_FOUND)
                        .with_status_code(404)
                        .with_header(html());
                    req.respond(response).map_err(Error::new)?;
                }
            }
        }
        Ok(())
    }
}

/// Outcome of mapping a request URL onto the served directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    File(PathBuf),
    NotFound,
    Forbidden,
}

/// Map a request URL to a file under `root`.
///
/// Candidates, in order: the path itself, the path with `.html` appended, and `index.html`
/// inside the path.
pub fn resolve(root: &Path, url: &str) -> Resolved {
    // querystrings are often used for cachebusting
    let url = url.split(['?', '#']).next().unwrap_or_default();
    // `%2F` stays encoded so it can't introduce a separator
    let Ok(decoded) = sportsculture_config::decode_uri(url) else {
        return Resolved::NotFound;
    };

    let mut path = root.to_path_buf();
    for segment in decoded.split('/').filter(|s| !s.is_empty() && *s != ".") {
        if segment == ".." || segment.contains('\\') {
            return Resolved::Forbidden;
        }
        path.push(segment);
    }

    if path.is_file() {
        return Resolved::File(path);
    }
    if !decoded.ends_with('/') {
        let mut html = path.clone().into_os_string();
        html.push(".html");
        let html = PathBuf::from(html);
        if html.is_file() {
            return Resolved::File(html);
        }
    }
    let index = path.join("index.html");
    if index.is_file() {
        return Resolved::File(index);
    }
    Resolved::NotFound
}

fn content_type(path: &Path) -> tiny_http::Header {
    let mime = mime_guess::MimeGuess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");
    header(&format!("Content-Type: {mime}"))
}

fn html() -> tiny_http::Header {
    header("Content-Type: text/html; charset=utf-8")
}

fn plain_text() -> tiny_http::Header {
    header("Content-Type: text/plain; charset=utf-8")
}

fn header(raw: &str) -> tiny_http::Header {
    tiny_http::Header::from_str(raw).expect("formatted correctly")
}

/// Serve Error
#[derive(Debug)]
pub struct Error {
    message: String,
}

impl Error {
    fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.message.fmt(fmt)
    }
}

impl std::error::Error for Error {}

fn get_available_port(host: &str) -> Option<u16> {
    // Start after "well-known" ports (0-1023) as they require superuser
    // privileges on UNIX-like operating systems.
    (1024..9000).find(|port| port_is_available(host, *port))
}

fn port_is_available(host: &str, port: u16) -> bool {
    std::net::TcpListener::bind((host, port)).is_ok()
}
