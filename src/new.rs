use std::fs;
use std::io::Write as _;
use std::path;

use anyhow::Context as _;

use crate::error::*;

const SITE_YML: &str = "\
# Site-wide strings come from BLOG_NAME, BLOG_TITLE and BLOG_FOOTER_TEXT.
site:
  base_url: https://sportsculture.io
careers:
  email: careers@sportsculture.io
  subject: Job Application
";

const POST_MD: &str = "\
---
title: Welcome to Sports Culture
description: The first post on our new blog.
draft: true
---

# Welcome!

This is the first post on the Sports Culture blog.
Remove `draft: true` above to publish it.
";

const GITIGNORE: &str = "/_site\n";

/// Lay out a starter project in `dest`, refusing to overwrite anything that already exists.
pub fn create_new_project<P: AsRef<path::Path>>(dest: P) -> Result<()> {
    create_new_project_for_path(dest.as_ref())
}

fn create_new_project_for_path(dest: &path::Path) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;

    create_file(dest.join(sportsculture_config::PROJECT_FILE), SITE_YML)?;
    create_file(dest.join(".gitignore"), GITIGNORE)?;

    let posts = dest.join("posts");
    fs::create_dir_all(&posts).with_context(|| format!("Failed to create {}", posts.display()))?;
    create_file(posts.join("welcome.md"), POST_MD)?;

    let images = dest.join("assets").join("images");
    fs::create_dir_all(&images)
        .with_context(|| format!("Failed to create {}", images.display()))?;

    Ok(())
}

fn create_file<P: AsRef<path::Path>>(path: P, content: &str) -> Result<()> {
    create_file_for_path(path.as_ref(), content)
}

fn create_file_for_path(path: &path::Path, content: &str) -> Result<()> {
    log::trace!("Creating file {}", path.display());

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Failed to create file {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
