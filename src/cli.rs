//! Command-line interface implementation for progen.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for progen.
#[derive(Parser, Debug)]
#[command(author, version, about = "progen: template-driven source generator", long_about = None)]
pub struct Args {
    /// Template directory; defaults to `dir_templates_root` from configuration
    #[arg(value_name = "TEMPLATE_DIR")]
    pub template: Option<PathBuf>,

    /// Directory generated files are written to; defaults to the project directory
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Project directory; defaults to the current directory
    #[arg(short, long, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Set a configuration property, overriding environment variables
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_define)]
    pub defines: Vec<(String, String)>,

    /// Only process template files with this extension (repeatable)
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses a `KEY=VALUE` pair. The value may be empty and may contain `=`.
pub fn parse_define(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("invalid property '{s}', expected KEY=VALUE")),
    }
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
