//! Immutable per-run state.
//! Everything a generation run needs is resolved once from the merged
//! configuration and the command line, then passed by reference.

use crate::config::MergedConfig;
use crate::constants::{BINARY_EXTENSIONS_KEY, IGNORE_NAMES_KEY, PROJECT_PATH_KEY, TEMPLATES_ROOT_KEY};
use crate::error::{Error, Result};
use crate::ignore::{parse_ignore_file, IgnoreClassifier};
use log::debug;
use std::path::{Path, PathBuf};

/// Caller choices that take precedence over configuration.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Template root; `dir_templates_root` when unset.
    pub template_root: Option<PathBuf>,
    /// Output root; `projectPath` when unset.
    pub output_root: Option<PathBuf>,
    /// Allowed template extensions; every file when empty.
    pub extensions: Vec<String>,
}

/// Resolved configuration of one generation run.
#[derive(Debug)]
pub struct RunContext {
    template_root: PathBuf,
    output_root: PathBuf,
    classifier: IgnoreClassifier,
    extensions: Vec<String>,
    config: MergedConfig,
}

impl RunContext {
    /// Builds the context for a run.
    ///
    /// # Errors
    /// * `Error::ConfigurationMissing` if a root is neither given nor configured
    /// * `Error::NotFound` if the template root is not a directory
    /// * `Error::IgnoreError` if the template's ignore file is invalid
    pub fn new(config: MergedConfig, options: RunOptions) -> Result<Self> {
        let template_root = match options.template_root {
            Some(root) => root,
            None => PathBuf::from(config.require(TEMPLATES_ROOT_KEY)?),
        };
        let output_root = match options.output_root {
            Some(root) => root,
            None => PathBuf::from(config.require(PROJECT_PATH_KEY)?),
        };

        if !template_root.is_dir() {
            return Err(Error::NotFound {
                resource: format!("template directory '{}'", template_root.display()),
            });
        }

        let mut classifier =
            IgnoreClassifier::new().with_patterns(parse_ignore_file(&template_root)?);
        if let Some(names) = config.get(IGNORE_NAMES_KEY) {
            classifier = classifier.with_ignore_names(split_list(names));
        }
        if let Some(extensions) = config.get(BINARY_EXTENSIONS_KEY) {
            classifier = classifier.with_binary_extensions(split_list(extensions));
        }

        debug!(
            "Run context: templates '{}', output '{}'",
            template_root.display(),
            output_root.display()
        );

        Ok(Self {
            template_root,
            output_root,
            classifier,
            extensions: options.extensions,
            config,
        })
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn classifier(&self) -> &IgnoreClassifier {
        &self.classifier
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn config(&self) -> &MergedConfig {
        &self.config
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
