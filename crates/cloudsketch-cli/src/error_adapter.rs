//! Error adapter for converting CloudsketchError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use cloudsketch::CloudsketchError;

/// Adapter rendering a [`CloudsketchError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a CloudsketchError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CloudsketchError::Io(_) => "cloudsketch::io".to_string(),
            CloudsketchError::Config(_) => "cloudsketch::config".to_string(),
            CloudsketchError::Recognize(err) => format!("cloudsketch::{}", err.code()),
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.0 {
            CloudsketchError::Io(_) => None,
            CloudsketchError::Config(_) => Some(Box::new(
                "check the TOML syntax and the fields of each [[services]] entry",
            )),
            CloudsketchError::Recognize(err) => Some(Box::new(err.code().description())),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wraps `err` for rendering with a miette report handler.
pub fn to_reportable(err: &CloudsketchError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
