//! Module: arguments
//! Responsibility: raw connection arguments and their validated form.
//! Does not own: window resolution or source access.

use crate::{
    cursor::{CursorDecodeError, decode_cursor},
    options::PagingOptions,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// RawPagingArguments
///
/// The four optional connection arguments exactly as the caller received
/// them. Counts are signed so negative input can be reported instead of
/// failing deserialization.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct RawPagingArguments {
    pub first: Option<i64>,
    pub after: Option<String>,
    pub last: Option<i64>,
    pub before: Option<String>,
}

impl RawPagingArguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn first(mut self, first: i64) -> Self {
        self.first = Some(first);
        self
    }

    #[must_use]
    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    #[must_use]
    pub const fn last(mut self, last: i64) -> Self {
        self.last = Some(last);
        self
    }

    #[must_use]
    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    const fn has_backward(&self) -> bool {
        self.last.is_some() || self.before.is_some()
    }
}

///
/// PagingArguments
///
/// Validated paging request. Cursors are already decoded into absolute
/// positions and counts are defaulted and bounded by the bound options.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PagingArguments {
    first: Option<u32>,
    after: Option<usize>,
    last: Option<u32>,
    before: Option<usize>,
}

impl PagingArguments {
    /// Validate raw arguments against `options`.
    ///
    /// Checks run in a fixed order: backward permission, sign, defaulting,
    /// max page size, then cursor decoding. No source is touched.
    pub fn parse(
        raw: &RawPagingArguments,
        options: &PagingOptions,
    ) -> Result<Self, PagingValidationError> {
        if raw.has_backward() && !options.allow_backward_pagination {
            return Err(PagingValidationError::BackwardPaginationDisabled);
        }

        let mut first = non_negative_count(PagingArgument::First, raw.first)?;
        let mut last = non_negative_count(PagingArgument::Last, raw.last)?;

        // A backward-only request pages from the end, everything else from
        // the start.
        if first.is_none() && last.is_none() {
            let default = options.effective_default_page_size();
            if raw.before.is_some() && raw.after.is_none() {
                last = default;
            } else {
                first = default;
            }
        }

        if let Some(max) = options.max_page_size {
            check_page_size(PagingArgument::First, first, max)?;
            check_page_size(PagingArgument::Last, last, max)?;
        }

        let after = decode_argument(PagingArgument::After, raw.after.as_deref())?;
        let before = decode_argument(PagingArgument::Before, raw.before.as_deref())?;

        Ok(Self {
            first,
            after,
            last,
            before,
        })
    }

    /// Arguments with already decoded positions, bypassing option checks.
    #[must_use]
    pub const fn new(
        first: Option<u32>,
        after: Option<usize>,
        last: Option<u32>,
        before: Option<usize>,
    ) -> Self {
        Self {
            first,
            after,
            last,
            before,
        }
    }

    /// Forward-only arguments with already decoded positions.
    #[must_use]
    pub const fn forward(first: Option<u32>, after: Option<usize>) -> Self {
        Self {
            first,
            after,
            last: None,
            before: None,
        }
    }

    /// Backward-only arguments with already decoded positions.
    #[must_use]
    pub const fn backward(last: Option<u32>, before: Option<usize>) -> Self {
        Self {
            first: None,
            after: None,
            last,
            before,
        }
    }

    #[must_use]
    pub const fn first(&self) -> Option<u32> {
        self.first
    }

    #[must_use]
    pub const fn after(&self) -> Option<usize> {
        self.after
    }

    #[must_use]
    pub const fn last(&self) -> Option<u32> {
        self.last
    }

    #[must_use]
    pub const fn before(&self) -> Option<usize> {
        self.before
    }
}

fn non_negative_count(
    argument: PagingArgument,
    value: Option<i64>,
) -> Result<Option<u32>, PagingValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };

    if value < 0 {
        return Err(PagingValidationError::NegativeCount { argument, value });
    }

    // Anything above u32::MAX is over every representable max page size.
    Ok(Some(u32::try_from(value).unwrap_or(u32::MAX)))
}

const fn check_page_size(
    argument: PagingArgument,
    requested: Option<u32>,
    max: u32,
) -> Result<(), PagingValidationError> {
    match requested {
        Some(requested) if requested > max => Err(PagingValidationError::PageSizeExceeded {
            argument,
            requested,
            max,
        }),
        _ => Ok(()),
    }
}

fn decode_argument(
    argument: PagingArgument,
    token: Option<&str>,
) -> Result<Option<usize>, PagingValidationError> {
    token
        .map(|token| {
            decode_cursor(token)
                .map_err(|reason| PagingValidationError::InvalidCursor { argument, reason })
        })
        .transpose()
}

///
/// PagingArgument
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PagingArgument {
    First,
    After,
    Last,
    Before,
}

impl PagingArgument {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::After => "after",
            Self::Last => "last",
            Self::Before => "before",
        }
    }
}

impl std::fmt::Display for PagingArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

///
/// PagingValidationError
///
/// Contract violations in the request arguments. Reported to the caller as
/// the outcome of the field; never a fault.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PagingValidationError {
    #[error("invalid cursor for '{argument}': {reason}")]
    InvalidCursor {
        argument: PagingArgument,
        reason: CursorDecodeError,
    },

    #[error("'{argument}' must not be negative, found {value}")]
    NegativeCount { argument: PagingArgument, value: i64 },

    #[error("requested '{argument}' of {requested} exceeds max page size {max}")]
    PageSizeExceeded {
        argument: PagingArgument,
        requested: u32,
        max: u32,
    },

    #[error("backward pagination ('last'/'before') is not enabled for this connection")]
    BackwardPaginationDisabled,
}

impl PagingValidationError {
    /// Stable kind label for metrics and field error extensions.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCursor { .. } => "invalid_cursor",
            Self::NegativeCount { .. } => "negative_count",
            Self::PageSizeExceeded { .. } => "page_size_exceeded",
            Self::BackwardPaginationDisabled => "backward_pagination_disabled",
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests;
