//! Generation pipeline.
//! Scans the template root, maps every template file onto the output root,
//! applies the no-overwrite guard and renders or copies the survivors.

use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::guard::{self, WriteDecision};
use crate::paths;
use crate::renderer::TemplateRenderer;
use crate::scanner::{Entry, Scanner};
use log::{debug, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to a single template file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Rendered into a new file.
    Created,
    /// Rendered over an existing file.
    Overwritten,
    /// Rendered content matched the existing file, nothing written.
    Unchanged,
    /// Guarded target already existed, nothing written.
    Skipped,
    /// Binary file copied byte for byte.
    Copied,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            FileAction::Created => "Created",
            FileAction::Overwritten => "Overwritten",
            FileAction::Unchanged => "Unchanged",
            FileAction::Skipped => "Skipped (exists)",
            FileAction::Copied => "Copied",
        };
        write!(f, "{action}")
    }
}

/// Outcome of processing one template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,
    pub target: PathBuf,
    pub action: FileAction,
}

/// Returns false for rendered paths that would leave the output root:
/// absolute paths and paths climbing above it.
pub fn is_rendered_path_valid(rendered: &str) -> bool {
    let normalized = paths::normalize(rendered);
    !paths::is_absolute(rendered) && normalized != ".." && !normalized.starts_with("../")
}

/// Runs generation for one [`RunContext`].
pub struct Processor<'a> {
    context: &'a RunContext,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> Processor<'a> {
    pub fn new(context: &'a RunContext, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { context, renderer }
    }

    /// Processes every template file in path order.
    ///
    /// Files that fail to render are reported as warnings and skipped; any
    /// I/O error aborts the run.
    pub fn run(&self) -> Result<Vec<FileReport>> {
        let mut scanner = Scanner::new(self.context.template_root(), self.context.classifier())?;
        if !self.context.extensions().is_empty() {
            scanner = scanner.with_allowed_extensions(self.context.extensions());
        }

        let template_root = paths::to_slash(&scanner.root().to_string_lossy());
        let output_root = paths::canonicalize(&self.context.output_root().to_string_lossy())?;
        let render_context = self.context.config().to_context();

        let mut reports = Vec::new();
        for entry in scanner.scan()? {
            match self.process(&entry, &template_root, &output_root, &render_context) {
                Ok(Some(report)) => reports.push(report),
                Ok(None) => {}
                Err(e @ Error::ProcessError { .. }) => warn!("{e}"),
                Err(e) => return Err(e),
            }
        }
        Ok(reports)
    }

    fn process(
        &self,
        entry: &Entry,
        template_root: &str,
        output_root: &str,
        render_context: &serde_json::Value,
    ) -> Result<Option<FileReport>> {
        let relative = paths::relative_from_base(Some(template_root), &entry.absolute_path());
        debug!("Processing source file: {relative}");

        let rendered = self
            .renderer
            .render(&relative, render_context)
            .map_err(|e| process_error(&entry.path, e))?;
        if rendered.trim().is_empty() {
            debug!("Skipping '{relative}' as its rendered path is empty");
            return Ok(None);
        }
        if !is_rendered_path_valid(&rendered) {
            return Err(process_error(
                &entry.path,
                format!("rendered path '{rendered}' leaves the output directory"),
            ));
        }

        let target = paths::canonicalize_with(output_root, &rendered)?;
        let target = match guard::decide_on_disk(&target) {
            WriteDecision::Skip(path) => {
                return Ok(Some(report(entry, path, FileAction::Skipped)));
            }
            WriteDecision::Write(path) => path,
        };

        let action = if self.context.classifier().is_binary_file(&entry.file_name()) {
            copy_file(&entry.path, &target)?;
            FileAction::Copied
        } else {
            self.write_text(entry, &target, render_context)?
        };
        Ok(Some(report(entry, target, action)))
    }

    fn write_text(
        &self,
        entry: &Entry,
        target: &Path,
        render_context: &serde_json::Value,
    ) -> Result<FileAction> {
        let bytes = fs::read(&entry.path).map_err(Error::io(&entry.path))?;
        let Ok(template) = String::from_utf8(bytes) else {
            debug!("'{}' is not UTF-8, copying as is", entry.path.display());
            copy_file(&entry.path, target)?;
            return Ok(FileAction::Copied);
        };

        let content = self
            .renderer
            .render(&template, render_context)
            .map_err(|e| process_error(&entry.path, e))?;

        let existing = target.is_file();
        if existing && is_same_text(target, &content)? {
            return Ok(FileAction::Unchanged);
        }
        write_file(target, &content)?;
        Ok(if existing { FileAction::Overwritten } else { FileAction::Created })
    }
}

fn report(entry: &Entry, target: PathBuf, action: FileAction) -> FileReport {
    FileReport { source: entry.path.clone(), target, action }
}

fn process_error<E: ToString>(source: &Path, e: E) -> Error {
    Error::ProcessError { source_path: source.display().to_string(), e: e.to_string() }
}

fn is_same_text(path: &Path, content: &str) -> Result<bool> {
    let existing = fs::read(path).map_err(Error::io(path))?;
    Ok(existing == content.as_bytes())
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    create_parent_dirs(path)?;
    fs::write(path, content).map_err(Error::io(path))
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    create_parent_dirs(dest)?;
    fs::copy(source, dest).map(|_| ()).map_err(Error::io(dest))
}
