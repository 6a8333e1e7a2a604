//! Template tree traversal.
//! Walks a root directory depth-first, pruning hidden and ignored
//! directories, and returns entries sorted by absolute path so generation
//! order is reproducible across runs and platforms.

use crate::constants::IGNORE_FILE;
use crate::error::{must_not_blank, Error, Result};
use crate::ignore::{extension_of, IgnoreClassifier};
use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A file or directory found under the scanned root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Entry {
    /// Forward-slash form of the absolute path.
    pub fn absolute_path(&self) -> String {
        crate::paths::to_slash(&self.path.to_string_lossy())
    }

    /// Final path component, empty for a root.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Recursive walker over a template root. Symbolic links are followed;
/// a link cycle is reported as an error.
pub struct Scanner<'a> {
    root: PathBuf,
    classifier: &'a IgnoreClassifier,
    allowed_extensions: Option<HashSet<String>>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner for `root`.
    ///
    /// # Errors
    /// * `Error::InvalidArgument` if `root` is blank
    /// * `Error::NotFound` if `root` does not exist or is not a directory
    pub fn new<P: AsRef<Path>>(root: P, classifier: &'a IgnoreClassifier) -> Result<Self> {
        let root = root.as_ref();
        must_not_blank(&root.to_string_lossy(), "root")?;
        if !root.is_dir() {
            return Err(Error::NotFound {
                resource: format!("template directory '{}'", root.display()),
            });
        }
        let root = root.canonicalize().map_err(Error::io(root))?;
        Ok(Self { root, classifier, allowed_extensions: None })
    }

    /// Restricts [`Scanner::scan`] to files with one of `extensions`.
    /// Extensions are compared case-insensitively, with or without the dot.
    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        self.allowed_extensions = Some(allowed);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every entry reached by the walk, directories included, in path order.
    /// The root itself is not reported.
    pub fn walk(&self) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for dir_entry in walker {
            let dir_entry = dir_entry?;
            entries.push(Entry {
                path: dir_entry.path().to_path_buf(),
                is_dir: dir_entry.file_type().is_dir(),
            });
        }

        sort_entries(&mut entries);
        Ok(entries)
    }

    /// Files under the root, filtered by the allowed extensions when set,
    /// sorted ascending by absolute path.
    pub fn scan(&self) -> Result<Vec<Entry>> {
        let mut files = self.walk()?;
        files.retain(|entry| !entry.is_dir && self.is_allowed(&entry.file_name()));
        debug!("Scanned {} file(s) under '{}'", files.len(), self.root.display());
        Ok(files)
    }

    fn is_allowed(&self, name: &str) -> bool {
        match &self.allowed_extensions {
            Some(allowed) => {
                extension_of(name).is_some_and(|ext| allowed.contains(&ext.to_lowercase()))
            }
            None => true,
        }
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        if entry.depth() == 1 && name == IGNORE_FILE {
            return true;
        }
        if self.classifier.is_ignored_name(&name) {
            debug!("Skipping ignored name '{}'", entry.path().display());
            return true;
        }
        if entry.file_type().is_dir() && is_hidden(entry) {
            debug!("Skipping hidden directory '{}'", entry.path().display());
            return true;
        }
        if let Ok(relative) = entry.path().strip_prefix(&self.root) {
            if self.classifier.is_ignored_path(relative) {
                debug!("Skipping '{}' from ignore file", relative.display());
                return true;
            }
        }
        false
    }
}

/// Orders entries by the bytes of their absolute path.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_cached_key(Entry::absolute_path);
}

#[cfg(unix)]
fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(windows)]
fn is_hidden(entry: &DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    entry
        .metadata()
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(any(unix, windows)))]
fn is_hidden(_entry: &DirEntry) -> bool {
    false
}
