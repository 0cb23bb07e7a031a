//! Errors raised while preparing plan-text analysis.
//!
//! Recognition itself never fails on input text: an unrecognized plan simply
//! yields no components. Errors arise only from the service table, when a
//! detection pattern does not compile or a service key is unusable as a
//! diagram identifier.
//!
//! # Example
//!
//! ```
//! # use cloudsketch_core::registry::{Category, ServiceDescriptor, ServiceRegistry};
//! # use cloudsketch_parser::{Recognizer, error::{Error, ErrorCode}};
//! let broken = ServiceDescriptor::new(
//!     "queue",
//!     Category::Management,
//!     "Queue",
//!     "📬",
//!     vec!["(unclosed".to_string()],
//! );
//! let registry = ServiceRegistry::builtin().with_services([broken]);
//!
//! let err = Recognizer::new(&registry).unwrap_err();
//! assert_eq!(err.code(), ErrorCode::P001);
//! ```

mod error_code;

pub use error_code::ErrorCode;

use thiserror::Error;

/// A type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for building recognizers and inferencers.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("invalid detection pattern `{pattern}` for service `{service}`")]
    InvalidPattern {
        service: String,
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error(
        "invalid service key `{0}`: expected lowercase ascii letters, digits or underscores"
    )]
    InvalidServiceKey(String),

    #[error("service `{0}` is declared more than once")]
    DuplicateService(String),

    #[error("service key `{key}` collides with the instance ids of service `{service}`")]
    InstanceIdCollision { key: String, service: String },
}

impl Error {
    /// Returns the [`ErrorCode`] categorizing this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPattern { .. } => ErrorCode::P001,
            Self::InvalidServiceKey(_) => ErrorCode::P002,
            Self::DuplicateService(_) => ErrorCode::P003,
            Self::InstanceIdCollision { .. } => ErrorCode::P004,
        }
    }

    pub(crate) fn invalid_pattern(
        service: impl Into<String>,
        pattern: impl Into<String>,
        source: regex::Error,
    ) -> Self {
        Self::InvalidPattern {
            service: service.into(),
            pattern: pattern.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_invalid_pattern_keeps_regex_source() {
        let regex_err = regex::Regex::new("(").unwrap_err();
        let err = Error::invalid_pattern("queue", "(", regex_err);

        assert_eq!(err.code(), ErrorCode::P001);
        assert_eq!(
            err.to_string(),
            "invalid detection pattern `(` for service `queue`"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            Error::InvalidServiceKey("Bad Key".to_string()).code(),
            ErrorCode::P002
        );
        assert_eq!(
            Error::DuplicateService("s3".to_string()).code(),
            ErrorCode::P003
        );
        assert_eq!(
            Error::InstanceIdCollision {
                key: "ec2_2".to_string(),
                service: "ec2".to_string(),
            }
            .code(),
            ErrorCode::P004
        );
    }
}
