//! "Generate once" protection for target paths.
//!
//! A template author marks a target as never-overwrite by placing an `@`
//! segment in its path, e.g. `src/@/config.properties`. The marker is
//! stripped before the path reaches the filesystem. If the de-marked file
//! already exists it is left untouched, otherwise it is created.

use log::debug;
use std::path::{Path, PathBuf};

/// The reserved marker segment in its forward-slash form.
pub const MARKER: &str = "@/";

/// The reserved marker segment in its backslash form.
pub const MARKER_BACK: &str = "@\\";

/// Outcome for a single target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteDecision {
    /// Generate into the path, creating or overwriting it.
    Write(PathBuf),
    /// Keep the existing file at the path.
    Skip(PathBuf),
}

impl WriteDecision {
    pub fn path(&self) -> &Path {
        match self {
            WriteDecision::Write(path) | WriteDecision::Skip(path) => path,
        }
    }
}

fn is_separator(byte: u8) -> bool {
    byte == b'/' || byte == b'\\'
}

/// `@` counts only as a whole segment: at the start of the path or after a
/// separator, and followed by one.
fn is_marker_at(bytes: &[u8], index: usize) -> bool {
    bytes[index] == b'@'
        && (index == 0 || is_separator(bytes[index - 1]))
        && bytes.get(index + 1).is_some_and(|b| is_separator(*b))
}

/// Returns true when `path` carries the no-overwrite marker anywhere,
/// including at its very start.
pub fn has_no_overwrite_marker(path: &str) -> bool {
    let bytes = path.as_bytes();
    (0..bytes.len()).any(|i| is_marker_at(bytes, i))
}

/// Removes every marker segment from `path`.
pub fn strip_marker(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut stripped = String::with_capacity(path.len());
    let mut last = 0;
    for index in 0..bytes.len() {
        if index >= last && is_marker_at(bytes, index) {
            stripped.push_str(&path[last..index]);
            last = index + MARKER.len();
        }
    }
    stripped.push_str(&path[last..]);
    stripped
}

/// Decides what to do with `target` given whether its de-marked path
/// already holds a file. Unmarked targets are always written.
pub fn decide(target: &str, exists: bool) -> WriteDecision {
    if !has_no_overwrite_marker(target) {
        return WriteDecision::Write(PathBuf::from(target));
    }
    let path = PathBuf::from(strip_marker(target));
    if exists {
        debug!("Keeping existing '{}'", path.display());
        WriteDecision::Skip(path)
    } else {
        WriteDecision::Write(path)
    }
}

/// Like [`decide`], checking the de-marked path on disk.
pub fn decide_on_disk(target: &str) -> WriteDecision {
    let exists = has_no_overwrite_marker(target) && Path::new(&strip_marker(target)).is_file();
    decide(target, exists)
}
