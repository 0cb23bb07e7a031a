//! CLI logic for the cloudsketch diagram tool.
//!
//! This module reads a plan, runs it through [`DiagramBuilder`] and writes
//! the selected diagrams to stdout or to an output directory.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat, TargetArg};

use std::{
    collections::BTreeMap,
    fs,
    io::{self, Read, Write},
    path::Path,
};

use log::{info, warn};
use serde::Serialize;

use cloudsketch::{CloudsketchError, DiagramBuilder, DiagramResult, Outcome, RenderTarget};

/// File written next to the diagrams with the plain-text summary.
const SUMMARY_FILE: &str = "summary.txt";
/// Stem of every diagram file written to the output directory.
const FILE_STEM: &str = "architecture";

/// Run the cloudsketch CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CloudsketchError` for:
/// - File I/O errors
/// - Configuration loading errors
///
/// A plan that cannot be diagrammed is not an error: the generic fallback
/// diagram is written instead.
pub fn run(args: &Args) -> Result<(), CloudsketchError> {
    info!(
        input_path = args.input.as_deref().unwrap_or("-"),
        output_dir = args.output.as_deref().unwrap_or("-");
        "Processing plan"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let plan = read_plan(args.input.as_deref())?;

    let builder = DiagramBuilder::new(app_config);
    let result = builder.generate(&plan, args.title.as_deref().unwrap_or_default());
    match result.outcome() {
        Outcome::Recognized => {}
        Outcome::Empty => warn!("No services recognized in the plan; wrote the generic diagram"),
        Outcome::Degraded => warn!("Diagram generation degraded; wrote the generic diagram"),
    }

    let targets = args.target.targets();
    match &args.output {
        Some(dir) => write_files(Path::new(dir), &result, &targets, args.format)?,
        None => {
            let text = format_result(&result, &targets, args.format)?;
            io::stdout().lock().write_all(text.as_bytes())?;
        }
    }

    info!(outcome:? = result.outcome(); "Diagrams written");
    Ok(())
}

/// Formats `result` for stdout.
///
/// # Errors
///
/// Returns `CloudsketchError::Io` if JSON serialization fails.
pub fn format_result(
    result: &DiagramResult,
    targets: &[RenderTarget],
    format: OutputFormat,
) -> Result<String, CloudsketchError> {
    match format {
        OutputFormat::Raw => {
            let mut out = String::new();
            for target in targets {
                if let Some(text) = result.get(*target) {
                    out.push_str(text.trim_end_matches('\n'));
                    out.push_str("\n\n");
                }
            }
            out.push_str(result.text_summary());
            Ok(out)
        }
        OutputFormat::Markdown => Ok(result.to_markdown_for(targets)),
        OutputFormat::Json => {
            let report = JsonReport::new(result, targets);
            let mut json = serde_json::to_string_pretty(&report).map_err(io::Error::from)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// JSON view of a result restricted to the selected targets.
#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    outcome: Outcome,
    diagrams: BTreeMap<RenderTarget, &'a str>,
    summary: &'a str,
}

impl<'a> JsonReport<'a> {
    fn new(result: &'a DiagramResult, targets: &[RenderTarget]) -> Self {
        Self {
            title: result.title(),
            outcome: result.outcome(),
            diagrams: result
                .renderings()
                .filter(|(target, _)| targets.contains(target))
                .collect(),
            summary: result.text_summary(),
        }
    }
}

fn read_plan(input: Option<&str>) -> Result<String, CloudsketchError> {
    match input {
        None | Some("-") => {
            info!("Reading plan from stdin");
            let mut plan = String::new();
            io::stdin().read_to_string(&mut plan)?;
            Ok(plan)
        }
        Some(path) => Ok(fs::read_to_string(path)?),
    }
}

fn write_files(
    dir: &Path,
    result: &DiagramResult,
    targets: &[RenderTarget],
    format: OutputFormat,
) -> Result<(), CloudsketchError> {
    fs::create_dir_all(dir)?;

    for target in targets {
        if let Some(text) = result.get(*target) {
            let path = dir.join(format!("{FILE_STEM}.{}", target.file_extension()));
            fs::write(&path, text)?;
            info!(render_target = target.name(), path = path.display().to_string(); "Diagram written");
        }
    }
    fs::write(dir.join(SUMMARY_FILE), result.text_summary())?;

    let document = match format {
        OutputFormat::Raw => None,
        OutputFormat::Markdown => Some(("md", format_result(result, targets, format)?)),
        OutputFormat::Json => Some(("json", format_result(result, targets, format)?)),
    };
    if let Some((extension, text)) = document {
        fs::write(dir.join(format!("{FILE_STEM}.{extension}")), text)?;
    }

    Ok(())
}
