//! Entry classification for template trees.
//! Decides which names are never traversed and which extensions denote
//! binary content. Both sets default to the generator's built-in lists and
//! can be replaced by the caller. A `.progenignore` file in the template
//! root adds glob patterns on top of the name set, similar to `.gitignore`.

use crate::constants::{DEFAULT_BINARY_EXTENSIONS, DEFAULT_IGNORE_NAMES, IGNORE_FILE};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

/// Classifies filesystem entries by name and extension.
#[derive(Debug, Clone)]
pub struct IgnoreClassifier {
    ignore_names: HashSet<String>,
    binary_extensions: HashSet<String>,
    patterns: GlobSet,
}

impl Default for IgnoreClassifier {
    fn default() -> Self {
        Self {
            ignore_names: DEFAULT_IGNORE_NAMES.iter().map(|s| s.to_string()).collect(),
            binary_extensions: DEFAULT_BINARY_EXTENSIONS
                .iter()
                .map(|s| normalize_extension(s))
                .collect(),
            patterns: GlobSet::empty(),
        }
    }
}

impl IgnoreClassifier {
    /// Creates a classifier with the built-in name and extension sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the ignore-name set. Names are matched exactly.
    pub fn with_ignore_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the binary-extension set. Entries are lowercased and given a
    /// leading dot when they lack one.
    pub fn with_binary_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.binary_extensions =
            extensions.into_iter().map(|e| normalize_extension(e.as_ref())).collect();
        self
    }

    /// Adds glob patterns matched against template-relative paths.
    pub fn with_patterns(mut self, patterns: GlobSet) -> Self {
        self.patterns = patterns;
        self
    }

    /// Returns true when `name` is a VCS, IDE or OS artifact name.
    /// The comparison is case-sensitive.
    pub fn is_ignored_name(&self, name: &str) -> bool {
        self.ignore_names.contains(name)
    }

    /// Returns true when a template-relative path matches an ignore pattern.
    pub fn is_ignored_path<P: AsRef<Path>>(&self, relative: P) -> bool {
        !self.patterns.is_empty() && self.patterns.is_match(relative.as_ref())
    }

    /// Returns true iff the lowercased `ext` (with its leading dot) is a
    /// binary extension.
    pub fn is_binary_extension(&self, ext: &str) -> bool {
        if ext.is_empty() {
            return false;
        }
        self.binary_extensions.contains(&ext.to_lowercase())
    }

    /// Classifies a file name. Names without an extension are text.
    pub fn is_binary_file(&self, name: &str) -> bool {
        extension_of(name).is_some_and(|ext| self.is_binary_extension(ext))
    }
}

/// Returns the extension of the last path segment of `name`, including the
/// dot. A name without a dot, or whose only dot is the first character,
/// has no extension.
pub fn extension_of(name: &str) -> Option<&str> {
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match file_name.rfind('.') {
        Some(index) if index > 0 => Some(&file_name[index..]),
        _ => None,
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// Reads the ignore file from the template root and compiles its patterns.
///
/// # Arguments
/// * `template_root` - Directory that may contain a `.progenignore` file
///
/// # Returns
/// * `Result<GlobSet>` - Compiled patterns, empty when the file is absent
///
/// # Notes
/// - Blank lines and lines starting with `#` are skipped
/// - Invalid patterns result in an `IgnoreError`
pub fn parse_ignore_file<P: AsRef<Path>>(template_root: P) -> Result<GlobSet> {
    let ignore_path = template_root.as_ref().join(IGNORE_FILE);
    let mut builder = GlobSetBuilder::new();
    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(Glob::new(line).map_err(|e| {
                Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}"))
            })?);
        }
    } else {
        debug!("{} does not exist in '{}'", IGNORE_FILE, template_root.as_ref().display());
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("{IGNORE_FILE} loading failed: {e}")))
}
