use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use cryptr::cli::{handle_command, usage, Cli, Outcome};
use cryptr::config::{CryptrPaths, Settings};
use cryptr::logging;

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, &args),
    };

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return finish(Outcome::Failed, &Settings::default());
        }
    };

    logging::init(&settings.log_filter, cli.verbose);

    let Some(command) = cli.command else {
        usage::print_invalid_arguments(None);
        return finish(Outcome::UsageError, &settings);
    };

    match handle_command(command, &settings) {
        Ok(()) => finish(Outcome::Success, &settings),
        Err(e) => {
            eprintln!("Error: {}", e);
            finish(Outcome::Failed, &settings)
        }
    }
}

fn report_parse_error(error: clap::Error, args: &[OsString]) -> ExitCode {
    if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        let _ = error.print();
        return ExitCode::SUCCESS;
    }

    usage::print_invalid_arguments(usage::attempted_subcommand(args));

    // A broken settings file falls back to defaults
    let settings = load_settings(usage::config_override(args).as_deref()).unwrap_or_default();
    finish(Outcome::UsageError, &settings)
}

fn load_settings(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => {
            let paths = CryptrPaths::new().context("Failed to resolve configuration directory")?;
            Settings::load_or_default(&paths).context("Failed to load settings")
        }
    }
}

fn finish(outcome: Outcome, settings: &Settings) -> ExitCode {
    ExitCode::from(outcome.exit_status(settings.strict_exit_codes))
}
