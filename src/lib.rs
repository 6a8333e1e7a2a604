//! progen is the file-tree and configuration engine of a template-driven
//! source generator. It selects template files, maps them onto an output
//! tree, protects generate-once files and merges layered configuration.

/// Command-line interface module for the progen binary
pub mod cli;

/// Layered configuration: defaults, environment, properties and config files
pub mod config;

/// Reserved names, keys and built-in lists
pub mod constants;

/// Immutable per-run state built from the merged configuration
pub mod context;

/// Error types and handling
pub mod error;

/// No-overwrite marker detection and write decisions
pub mod guard;

/// Ignore-name and binary-extension classification
/// Also reads .progenignore files from template roots
pub mod ignore;

/// Pure path string arithmetic
pub mod paths;

/// Core generation orchestration
pub mod processor;

/// Template rendering engine
pub mod renderer;

/// Sorted, pruned template tree traversal
pub mod scanner;
