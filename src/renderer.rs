//! Rendering of template paths and template file contents.
//!
//! The processor renders twice per template file: first the file's path
//! relative to the template root, so directory and file names can carry
//! variables (`src/{{ packageName }}/App.java`) or render to nothing and
//! drop the file, then the text of files that passed the no-overwrite
//! guard. Both use the merged configuration as context.
use crate::error::{Error, Result};
use minijinja::Environment;

/// Renders a template string against the run's configuration.
pub trait TemplateRenderer {
    /// Renders `template` with `context`. Called with a relative template
    /// path or with a file's text; an empty result for a path means the file
    /// is not generated.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// [`TemplateRenderer`] backed by MiniJinja.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Keeps trailing newlines so files without template syntax pass through
    /// byte for byte.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_str(template, context).map_err(Error::MinijinjaError)
    }
}
