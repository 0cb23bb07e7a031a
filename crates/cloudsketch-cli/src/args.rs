//! Command-line argument definitions for the cloudsketch CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the plan source, which diagrams are
//! produced and in what form, configuration file selection, and logging
//! verbosity.

use clap::{Parser, ValueEnum};

use cloudsketch::RenderTarget;

/// Command-line arguments for the cloudsketch diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the plan-text file; omitted or `-` reads stdin
    #[arg(help = "Path to the input plan (default: stdin)")]
    pub input: Option<String>,

    /// Diagram title (defaults to the configured title)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Diagrams to produce
    #[arg(long, value_enum, default_value_t = TargetArg::All)]
    pub target: TargetArg,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Raw)]
    pub format: OutputFormat,

    /// Directory to write diagram files into instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Diagram selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    All,
    TextBox,
    Flowchart,
    ComponentMarkup,
}

impl TargetArg {
    /// Returns the selected render targets.
    pub fn targets(self) -> Vec<RenderTarget> {
        match self {
            Self::All => RenderTarget::ALL.to_vec(),
            Self::TextBox => vec![RenderTarget::TextBox],
            Self::Flowchart => vec![RenderTarget::FlowchartMarkup],
            Self::ComponentMarkup => vec![RenderTarget::ComponentMarkup],
        }
    }
}

/// How results are printed or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Renderings as-is, followed by the summary
    Raw,
    /// A Markdown document with fenced code blocks
    Markdown,
    /// A JSON object
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["cloudsketch"]);
        assert_eq!(args.input, None);
        assert_eq!(args.target, TargetArg::All);
        assert_eq!(args.format, OutputFormat::Raw);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_target_values() {
        let args = Args::parse_from(["cloudsketch", "plan.txt", "--target", "component-markup"]);
        assert_eq!(args.input.as_deref(), Some("plan.txt"));
        assert_eq!(args.target.targets(), [RenderTarget::ComponentMarkup]);

        let args = Args::parse_from(["cloudsketch", "--target", "flowchart", "-f", "json"]);
        assert_eq!(args.target.targets(), [RenderTarget::FlowchartMarkup]);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        assert!(Args::try_parse_from(["cloudsketch", "--target", "svg"]).is_err());
    }
}
