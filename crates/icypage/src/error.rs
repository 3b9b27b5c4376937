//! Module: error
//! Responsibility: request-level failure type and its stable classification.
//! Does not own: argument validation rules or source failure causes.

use crate::{arguments::PagingValidationError, options::OptionsError, source::SourceError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// PagingError
///
/// Outcome of a failed pagination request. Every variant is reported as the
/// field's error; none of them abort the surrounding process.
///

#[derive(Debug, ThisError)]
pub enum PagingError {
    /// Request arguments violate the connection contract.
    #[error(transparent)]
    Validation(#[from] PagingValidationError),

    /// Options failed validation when binding a paginator.
    #[error("invalid paging options: {0}")]
    InvalidOptions(#[from] OptionsError),

    /// The backing source failed while executing its query.
    #[error("paging source failed: {0}")]
    Source(#[source] SourceError),

    /// The request was cancelled before a page was produced.
    #[error("pagination was cancelled")]
    Cancelled,
}

impl PagingError {
    pub(crate) fn from_source(err: SourceError) -> Self {
        Self::Source(err)
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::Validation,
            Self::InvalidOptions(_) => ErrorClass::Configuration,
            Self::Source(_) => ErrorClass::Source,
            Self::Cancelled => ErrorClass::Cancelled,
        }
    }

    /// Borrow the validation error, if this is a contract violation.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&PagingValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
/// Stable classification for field-level error reporting.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Validation,
    Configuration,
    Source,
    Cancelled,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Source => "source",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
