//! progen's main application entry point.
//! Resolves configuration, builds the run context and drives generation.

use progen::{
    cli::{get_args, Args},
    config::{properties_layer, resolve, ConfigLayer},
    context::{RunContext, RunOptions},
    error::{default_error_handler, Result},
    processor::Processor,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Merges defaults, environment, `-D` properties and config files
/// 2. Builds the run context from the merged configuration
/// 3. Processes template files into the output directory
fn run(args: Args) -> Result<()> {
    let project = match args.project {
        Some(project) => project,
        None => std::env::current_dir()?,
    };

    let properties = properties_layer(&project, args.defines)?;
    let config = resolve(ConfigLayer::from_env(), properties)?;
    for (key, value) in config.iter() {
        log::trace!("{key}={value} ({})", config.source_of(key).unwrap_or("unknown"));
    }

    let context = RunContext::new(
        config,
        RunOptions {
            template_root: args.template,
            output_root: args.output_dir,
            extensions: args.extensions,
        },
    )?;

    let renderer = MiniJinjaRenderer::new();
    let reports = Processor::new(&context, &renderer).run()?;
    for report in &reports {
        println!("{}: '{}'", report.action, report.target.display());
    }

    log::info!(
        "Generated {} file(s) into {}.",
        reports.len(),
        context.output_root().display()
    );
    Ok(())
}
