//! Error codes for plan-text analysis.
//!
//! - `P0xx` - Service table errors

use std::fmt;

/// Error codes for categorizing analysis errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Invalid detection pattern.
    ///
    /// A service's detection pattern is not a valid regular expression.
    P001,

    /// Invalid service key.
    ///
    /// Service keys double as diagram identifiers and must consist of
    /// lowercase ascii letters, digits and underscores.
    P002,

    /// Duplicate service.
    ///
    /// Two services in the same registry share a key.
    P003,

    /// Instance id collision.
    ///
    /// A key of the form `{key}_{n}` would clash with the id of the `n`-th
    /// instance of another service.
    P004,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "P001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::P001 => "P001",
            ErrorCode::P002 => "P002",
            ErrorCode::P003 => "P003",
            ErrorCode::P004 => "P004",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::P001 => "invalid detection pattern",
            ErrorCode::P002 => "invalid service key",
            ErrorCode::P003 => "duplicate service",
            ErrorCode::P004 => "instance id collision",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_as_str() {
        for code in [
            ErrorCode::P001,
            ErrorCode::P002,
            ErrorCode::P003,
            ErrorCode::P004,
        ] {
            assert_eq!(code.to_string(), code.as_str());
            assert!(!code.description().is_empty());
        }
    }
}
