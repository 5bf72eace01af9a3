use std::fs;
use std::path;

use anyhow::Context as _;

use crate::error::*;

/// Files under a directory, minus gitignore-style exclusions.
#[derive(Debug, Clone)]
pub struct Source {
    root: path::PathBuf,
    ignore: ignore::gitignore::Gitignore,
}

impl Source {
    pub fn new<'i>(root: &path::Path, ignores: impl IntoIterator<Item = &'i str>) -> Result<Self> {
        let mut ignore = ignore::gitignore::GitignoreBuilder::new(root);
        // Editor swap files and dotfiles never belong in the output
        for line in [".*", "*~"].into_iter().chain(ignores) {
            ignore
                .add_line(None, line)
                .with_context(|| format!("Invalid ignore entry `{line}`"))?;
        }
        let ignore = ignore.build().context("Invalid ignore entry")?;

        Ok(Self {
            root: root.to_owned(),
            ignore,
        })
    }

    pub fn root(&self) -> &path::Path {
        &self.root
    }

    pub fn includes_file(&self, file: &path::Path) -> bool {
        self.includes_path(file, false)
    }

    /// Included files, sorted by name within each directory
    pub fn iter(&self) -> impl Iterator<Item = path::PathBuf> + '_ {
        walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| self.includes_entry(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(move |e| e.path().to_path_buf())
    }

    fn includes_path(&self, path: &path::Path, is_dir: bool) -> bool {
        if path == self.root {
            return true;
        }

        if let Some(parent) = path.parent() {
            if parent.starts_with(&self.root) && !self.includes_path(parent, true) {
                return false;
            }
        }

        self.includes_path_leaf(path, is_dir)
    }

    fn includes_path_leaf(&self, path: &path::Path, is_dir: bool) -> bool {
        match self.ignore.matched(path, is_dir) {
            ignore::Match::None => true,
            ignore::Match::Ignore(glob) => {
                log::trace!("{:?}: ignored {:?}", path, glob.original());
                false
            }
            ignore::Match::Whitelist(glob) => {
                log::trace!("{:?}: allowed {:?}", path, glob.original());
                true
            }
        }
    }

    fn includes_entry(&self, entry: &walkdir::DirEntry) -> bool {
        // Parents were checked on the way down
        let is_dir = entry.file_type().is_dir();
        self.includes_path_leaf(entry.path(), is_dir)
    }
}

pub fn read_file<P: AsRef<path::Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let text: String = normalize_line_endings::normalized(text.chars()).collect();
    Ok(text)
}

pub fn write_document_file<S: AsRef<str>, P: AsRef<path::Path>>(
    content: S,
    dest_file: P,
) -> Result<()> {
    write_document_file_internal(content.as_ref(), dest_file.as_ref())
}

fn write_document_file_internal(content: &str, dest_file: &path::Path) -> Result<()> {
    // create target directories if any exist
    if let Some(parent) = dest_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }

    fs::write(dest_file, content)
        .with_context(|| format!("Could not write {}", dest_file.display()))?;
    log::debug!("Wrote {}", dest_file.display());
    Ok(())
}

pub fn copy_file(src_file: &path::Path, dest_file: &path::Path) -> Result<()> {
    if let Some(parent) = dest_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }

    log::debug!(
        "Copying `{}` to `{}`",
        src_file.display(),
        dest_file.display()
    );
    fs::copy(src_file, dest_file).with_context(|| {
        format!(
            "Could not copy {} into {}",
            src_file.display(),
            dest_file.display()
        )
    })?;
    Ok(())
}

/// Copy every included file of `source` into `dest`, keeping relative paths.
pub fn copy_tree(source: &Source, dest: &path::Path) -> Result<usize> {
    let mut count = 0;
    for src_file in source.iter() {
        let rel_path = src_file
            .strip_prefix(source.root())
            .with_context(|| {
                format!(
                    "{} is outside {}",
                    src_file.display(),
                    source.root().display()
                )
            })?;
        copy_file(&src_file, &dest.join(rel_path))?;
        count += 1;
    }
    Ok(count)
}
