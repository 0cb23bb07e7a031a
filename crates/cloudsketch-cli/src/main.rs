//! cloudsketch CLI entry point.

use std::{fmt::Write as _, process::ExitCode, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use cloudsketch::CloudsketchError;
use cloudsketch_cli::{Args, error_adapter::to_reportable};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = init_logging(&args.log_level);
    info!(log_level:?; "Starting cloudsketch");
    debug!(args:?; "Parsed arguments");

    match cloudsketch_cli::run(&args) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", render_report(&err));
            ExitCode::FAILURE
        }
    }
}

/// Installs the logger; an unknown level name falls back to `warn`.
fn init_logging(level: &str) -> LevelFilter {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
    filter
}

fn render_report(err: &CloudsketchError) -> String {
    let mut out = String::new();
    if miette::GraphicalReportHandler::new()
        .render_report(&mut out, &to_reportable(err))
        .is_err()
    {
        let _ = write!(out, "{err}");
    }
    out
}
