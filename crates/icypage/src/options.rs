//! Module: options
//! Responsibility: static paging configuration and its validation/loading.
//! Does not own: per-request argument parsing.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// PagingOptions
///
/// Static paging configuration shared read-only across requests.
///
/// `None` page sizes mean "unbounded". When only `max_page_size` is set it
/// also acts as the default so an argument-less request never bypasses it.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PagingOptions {
    pub default_page_size: Option<u32>,
    pub max_page_size: Option<u32>,
    pub include_total_count: bool,
    pub allow_backward_pagination: bool,
}

impl Default for PagingOptions {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl PagingOptions {
    /// No page-size limits, no total count, backward pagination allowed.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            default_page_size: None,
            max_page_size: None,
            include_total_count: false,
            allow_backward_pagination: true,
        }
    }

    #[must_use]
    pub const fn builder() -> PagingOptionsBuilder {
        PagingOptionsBuilder::new()
    }

    /// Page size applied when the request supplies neither `first` nor `last`.
    #[must_use]
    pub const fn effective_default_page_size(&self) -> Option<u32> {
        match self.default_page_size {
            Some(size) => Some(size),
            None => self.max_page_size,
        }
    }

    /// Check size invariants: non-zero sizes and `default <= max`.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if matches!(self.default_page_size, Some(0)) {
            return Err(OptionsError::ZeroPageSize {
                field: "default-page-size",
            });
        }
        if matches!(self.max_page_size, Some(0)) {
            return Err(OptionsError::ZeroPageSize {
                field: "max-page-size",
            });
        }
        if let (Some(default), Some(max)) = (self.default_page_size, self.max_page_size)
            && default > max
        {
            return Err(OptionsError::DefaultExceedsMax { default, max });
        }

        Ok(())
    }

    /// Parse and validate options from a TOML document.
    ///
    /// Keys are kebab-case; missing keys take the [`PagingOptions::unbounded`]
    /// values.
    pub fn from_toml_str(source: &str) -> Result<Self, OptionsError> {
        let options: Self =
            toml::from_str(source).map_err(|err| OptionsError::Parse(err.to_string()))?;
        options.validate()?;

        Ok(options)
    }
}

///
/// PagingOptionsBuilder
///

#[derive(Clone, Debug, Default)]
pub struct PagingOptionsBuilder {
    options: PagingOptions,
}

impl PagingOptionsBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            options: PagingOptions::unbounded(),
        }
    }

    #[must_use]
    pub const fn default_page_size(mut self, size: u32) -> Self {
        self.options.default_page_size = Some(size);
        self
    }

    #[must_use]
    pub const fn max_page_size(mut self, size: u32) -> Self {
        self.options.max_page_size = Some(size);
        self
    }

    #[must_use]
    pub const fn include_total_count(mut self, include: bool) -> Self {
        self.options.include_total_count = include;
        self
    }

    #[must_use]
    pub const fn allow_backward_pagination(mut self, allow: bool) -> Self {
        self.options.allow_backward_pagination = allow;
        self
    }

    pub fn build(self) -> Result<PagingOptions, OptionsError> {
        self.options.validate()?;

        Ok(self.options)
    }
}

///
/// OptionsError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum OptionsError {
    #[error("paging option '{field}' must be greater than zero")]
    ZeroPageSize { field: &'static str },

    #[error("default page size {default} exceeds max page size {max}")]
    DefaultExceedsMax { default: u32, max: u32 },

    #[error("failed to parse paging options: {0}")]
    Parse(String),
}

///
/// TESTS
///
