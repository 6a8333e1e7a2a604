//! Error handling for progen.
//! Defines the error taxonomy and the result alias used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving configuration, scanning templates
/// or writing generated output.
#[derive(Error, Debug)]
pub enum Error {
    /// A required string argument was blank.
    #[error("Invalid argument: '{name}' must not be blank.")]
    InvalidArgument { name: String },

    /// A required file or directory does not exist.
    #[error("Not found: {resource}.")]
    NotFound { resource: String },

    /// A mandatory configuration key resolved to a blank value.
    #[error("Configuration missing: '{key}' is not set or blank.")]
    ConfigurationMissing { key: String },

    /// A configuration file could not be parsed.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// An invalid pattern in the ignore file.
    #[error("Ignore file error: {0}.")]
    IgnoreError(String),

    /// Filesystem error with the offending path attached.
    #[error("IO error at '{}': {source}.", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// A single template file could not be processed; the run continues.
    #[error("Failed to process '{source_path}': {e}.")]
    ProcessError { source_path: String, e: String },
}

impl Error {
    /// Attaches `path` to an I/O error.
    pub fn io<P: Into<PathBuf>>(path: P) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf());
        match path {
            Some(path) => Error::Io { path, source: err.into() },
            None => Error::IoError(err.into()),
        }
    }
}

/// Convenience type alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Fails with [`Error::InvalidArgument`] when `value` is blank.
pub fn must_not_blank<'a>(value: &'a str, name: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument { name: name.to_string() });
    }
    Ok(value)
}

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
