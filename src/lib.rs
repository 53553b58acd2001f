//! jardupe - Duplicate class detector for resolved dependency graphs
//!
//! Scans the compile and runtime jars of a project's resolved dependencies
//! and reports every class shipped by more than one artifact, so a build can
//! fail before classpath shadowing ("jar hell") shows up at runtime.
//!
//! The pipeline is: resolve ([`dependency`]) -> filter ([`filter`]) -> scan
//! each jar once ([`scanner`]) -> aggregate and detect ([`duplicates`]) ->
//! report and decide ([`output`]).

pub mod cli;
pub mod config;
pub mod dependency;
pub mod duplicates;
pub mod error;
pub mod filter;
pub mod gate;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
mod suggest;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Context;

use crate::cli::{CheckArgs, Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::dependency::ManifestResolver;
use crate::duplicates::DuplicateFinder;
use crate::error::ExitCode;
use crate::gate::{AlwaysRun, ChangeGate, DigestStampGate};
use crate::output::{format_report, CsvOutput, JsonOutput, TextOutput};
use crate::progress::Progress;

/// Run the application for parsed command-line arguments.
///
/// A run that finds duplicate classes returns the
/// [`output::DuplicatesDetected`] error; [`ExitCode::for_error`] maps it to
/// [`ExitCode::DuplicatesFound`].
///
/// # Errors
///
/// Returns an error if configuration, resolution or scanning fails, or if
/// duplicate classes were found.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    if cli.no_color {
        yansi::disable();
    }

    match cli.command {
        Commands::Check(ref args) => run_check(args, cli.quiet, !cli.no_color),
    }
}

fn run_check(args: &CheckArgs, quiet: bool, color: bool) -> anyhow::Result<ExitCode> {
    let mut config =
        Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    config.apply_args(args);
    log::debug!("Effective configuration: {:?}", config);

    if config.skip {
        log::info!("Duplicate class check skipped");
        return Ok(ExitCode::Success);
    }

    let gate: Box<dyn ChangeGate> = match &args.stamp {
        Some(stamp) => Box::new(
            DigestStampGate::new(&args.manifest, stamp).with_settings(config.fingerprint()),
        ),
        None => Box::new(AlwaysRun),
    };
    if !gate.should_run()? {
        log::info!(
            "{} unchanged since the last successful check, nothing to do",
            args.manifest.display()
        );
        return Ok(ExitCode::Success);
    }

    let mut finder_config = config.finder_config();
    if !quiet && args.output == OutputFormat::Text {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }
    let finder = DuplicateFinder::new(finder_config)?;

    log::info!("Checking dependencies of {}", args.manifest.display());
    let resolver = ManifestResolver::new(&args.manifest);
    let (report, summary) = finder.find_duplicates(&resolver)?;

    let verdict = format_report(&report);
    let exit_code = if verdict.success {
        ExitCode::Success
    } else {
        ExitCode::DuplicatesFound
    };

    match args.output {
        OutputFormat::Text => {
            verdict.log_messages();
            if !quiet {
                let mut stderr = io::stderr().lock();
                TextOutput::new(&report, &summary)
                    .with_color(color)
                    .write_to(&mut stderr)?;
                stderr.flush()?;
            }
        }
        OutputFormat::Json => {
            let mut stdout = io::stdout().lock();
            JsonOutput::new(&report, &summary, exit_code).write_to(&mut stdout, true)?;
        }
        OutputFormat::Csv => {
            CsvOutput::new(&report).write_to(io::stdout().lock())?;
        }
    }

    verdict.into_result()?;

    if summary.skipped_artifacts.is_empty() {
        gate.commit()?;
    } else {
        log::warn!(
            "{} jars could not be read; not recording this check as complete",
            summary.skipped_artifacts.len()
        );
    }

    Ok(exit_code)
}
