//! Path string arithmetic.
//!
//! Every function here works on path *strings* and never touches the
//! filesystem, so output paths can be computed and tested without fixtures.
//! Backslashes are normalized to `/` before any comparison. Both relative-path
//! entry points, [`relative_from_base`] and [`relative_between`], share one
//! segment diff so they cannot drift apart.

use crate::error::{must_not_blank, Result};

/// Returns true when `path` ends with a forward or backward slash.
pub fn is_folder_end(path: &str) -> bool {
    path.ends_with('/') || path.ends_with('\\')
}

/// Replaces every backslash with a forward slash.
pub fn to_slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// Returns true for `/...` and drive-prefixed `C:/...` paths.
pub fn is_absolute(path: &str) -> bool {
    let path = to_slash(path);
    let bytes = path.as_bytes();
    path.starts_with('/')
        || (bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/')
}

/// Path split into an optional root (`/` or `C:/`) and resolved segments.
#[derive(Debug, PartialEq, Eq)]
struct Segments {
    root: Option<String>,
    parts: Vec<String>,
}

impl Segments {
    fn parse(path: &str) -> Self {
        let path = to_slash(path);
        let (root, rest) = if path.starts_with('/') {
            (Some("/".to_string()), &path[1..])
        } else if is_absolute(&path) {
            (Some(path[..3].to_string()), &path[3..])
        } else {
            (None, path.as_str())
        };

        let mut parts: Vec<String> = Vec::new();
        for segment in rest.split('/') {
            match segment {
                "" | "." => {}
                // `..` above an absolute root is dropped
                ".." => {
                    if parts.last().is_some_and(|last| last != "..") {
                        parts.pop();
                    } else if root.is_none() {
                        parts.push(segment.to_string());
                    }
                }
                _ => parts.push(segment.to_string()),
            }
        }
        Self { root, parts }
    }

    fn render(&self, trailing_slash: bool) -> String {
        let mut out = self.root.clone().unwrap_or_default();
        out.push_str(&self.parts.join("/"));
        if trailing_slash && !self.parts.is_empty() {
            out.push('/');
        }
        out
    }
}

/// How to walk from one path to another: `ups` levels up, then down `rest`.
#[derive(Debug, PartialEq, Eq)]
struct PathDiff {
    ups: usize,
    rest: Vec<String>,
}

/// Diffs two paths segment by segment. `None` when one path is absolute and
/// the other is not, or when they sit under different roots.
fn diff(source: &str, target: &str) -> Option<PathDiff> {
    let source = Segments::parse(source);
    let target = Segments::parse(target);
    if source.root != target.root {
        return None;
    }

    let common = source
        .parts
        .iter()
        .zip(&target.parts)
        .take_while(|(s, t)| s == t)
        .count();

    Some(PathDiff {
        ups: source.parts.len() - common,
        rest: target.parts[common..].to_vec(),
    })
}

/// Lexically normalizes `path`: backslashes become `/`, repeated separators
/// collapse, `.` segments drop and `..` segments consume their parent.
/// A trailing separator is kept.
pub fn normalize(path: &str) -> String {
    Segments::parse(path).render(is_folder_end(path))
}

/// Resolves `path` against `cwd` when relative and normalizes the result.
/// A path ending with a separator denotes a directory and keeps one.
pub fn canonicalize_with(cwd: &str, path: &str) -> Result<String> {
    must_not_blank(path, "path")?;
    let joined = if is_absolute(path) {
        to_slash(path)
    } else {
        format!("{}/{}", to_slash(cwd), to_slash(path))
    };
    let mut canonical = Segments::parse(&joined).render(false);
    if is_folder_end(path) && !canonical.ends_with('/') {
        canonical.push('/');
    }
    Ok(canonical)
}

/// Absolute, normalized, forward-slash form of `path`, resolved against the
/// current working directory.
pub fn canonicalize(path: &str) -> Result<String> {
    must_not_blank(path, "path")?;
    let cwd = std::env::current_dir()?;
    canonicalize_with(&cwd.to_string_lossy(), path)
}

/// Canonical form of `name` resolved under the directory `base`.
pub fn canonicalize_in(base: &str, name: &str) -> Result<String> {
    must_not_blank(base, "base")?;
    must_not_blank(name, "name")?;
    let base = canonicalize(base)?;
    canonicalize_with(&base, name)
}

/// Returns `file` relative to `base_dir`.
///
/// The base prefix and exactly one separator are removed. Without a base,
/// when `file` equals the base, or when `file` does not live under it,
/// `file` comes back in the form it was given, with `\` turned into `/`.
/// No resolution against the working directory happens here, so callers
/// wanting an absolute fallback pass `file` through [`canonicalize`] or
/// [`canonicalize_with`] first.
pub fn relative_from_base(base_dir: Option<&str>, file: &str) -> String {
    let file = to_slash(file);
    let Some(base_dir) = base_dir else {
        return file;
    };

    match diff(base_dir, &file) {
        Some(PathDiff { ups: 0, rest }) if !rest.is_empty() => {
            let mut relative = rest.join("/");
            if is_folder_end(&file) {
                relative.push('/');
            }
            relative
        }
        _ => file,
    }
}

/// Computes the path that leads from `source_path` to `target_path`.
///
/// Segments are compared from the start. One `../` is emitted for each
/// source segment past the common prefix, followed by the remaining target
/// segments. A trailing separator is kept only when `target_path` ends with
/// one. Identical paths yield the empty string.
pub fn relative_between(source_path: &str, target_path: &str) -> String {
    let Some(PathDiff { ups, rest }) = diff(source_path, target_path) else {
        return normalize(target_path);
    };

    let mut result = "../".repeat(ups);
    for segment in rest {
        result.push_str(&segment);
        result.push('/');
    }
    if !is_folder_end(target_path) && result.ends_with('/') {
        result.pop();
    }
    result
}
