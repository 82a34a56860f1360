//! cli
//!
//! Command-line interface layer for tfguard.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and flags
//! - Load configuration and merge CLI overrides into [`Settings`]
//! - Hand the request to the [`crate::engine`] pipeline
//! - Report errors with a hint and the right exit code
//!
//! # Architecture
//!
//! The CLI layer is thin. It never reads the marker, touches the plan file
//! or launches the tool itself; all of that flows through the engine.

pub mod args;

pub use args::Cli;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::core::config::{Config, ConfigError, Overrides, Settings, CONFIG_ENV};
use crate::engine::{Context, EngineError, Outcome, Pipeline, ProcessTool, Request};
use crate::logging;
use crate::ui::output;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.debug);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        assume_yes: cli.yes,
    };

    execute(&cli.action, &cli.overrides(), &ctx)
}

/// Load settings and run one action in the context's working directory.
pub fn execute(action: &str, overrides: &Overrides, ctx: &Context) -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    if let Some(path) = config.loaded_from() {
        debug!(path = %path.display(), "using config file");
    }
    let settings = Settings::resolve(&config, overrides).context("invalid settings")?;

    let dir = working_dir(ctx)?;
    let tool = ProcessTool::new(settings.tool_path());
    let pipeline = Pipeline::new(&settings, &tool, &dir, ctx.verbosity());

    let mut input = io::stdin().lock();
    let mut stdout = io::stdout();
    let outcome = pipeline.execute(&Request::new(action, ctx.assume_yes), &mut input, &mut stdout)?;

    if let Outcome::Aborted { env, action } = outcome {
        debug!(%env, action, "nothing dispatched");
    }
    Ok(())
}

/// Directory the invocation operates in.
///
/// An explicit `--cwd` is canonicalized so its base name is meaningful even
/// when given as `.` or with a trailing `..`.
fn working_dir(ctx: &Context) -> Result<PathBuf> {
    match &ctx.cwd {
        Some(dir) => std::fs::canonicalize(dir)
            .with_context(|| format!("cannot use working directory '{}'", dir.display())),
        None => std::env::current_dir().context("cannot determine the current directory"),
    }
}

/// Print `err` for the operator and choose the process exit code.
pub fn report(err: &anyhow::Error) -> ExitCode {
    output::error(format!("{err:#}"));

    if let Some(engine_err) = err.downcast_ref::<EngineError>() {
        output::hint(engine_err.hint());
        return ExitCode::from(engine_err.exit_code());
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        output::hint(format!("fix the configuration file, or point {CONFIG_ENV} at another one"));
    }
    ExitCode::FAILURE
}
