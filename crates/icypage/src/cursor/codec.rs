//! Cursor codec helpers.
//!
//! This module owns the opaque wire format used for connection cursors.
//! It contains only position encoding/decoding and no windowing semantics.
//!
//! Wire format: the decimal text of the absolute position, standard base64
//! with padding. Position `0` encodes as `MA==`.

use crate::cursor::Cursor;
use base64::{Engine as _, engine::general_purpose::STANDARD};

// Decode bound for untrusted cursor input. `usize::MAX` is 20 decimal digits,
// which base64-encodes to 28 characters.
pub(crate) const MAX_CURSOR_TOKEN_LEN: usize = 64;

///
/// CursorDecodeError
///

#[derive(Clone, Debug, Eq, thiserror::Error, PartialEq)]
pub enum CursorDecodeError {
    #[error("cursor is empty")]
    Empty,

    #[error("cursor exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor is not valid base64: {reason}")]
    InvalidBase64 { reason: String },

    #[error("cursor payload is not valid utf-8")]
    InvalidUtf8,

    #[error("cursor payload is not a canonical position: {payload:?}")]
    InvalidPosition { payload: String },
}

impl CursorDecodeError {
    fn invalid_position(payload: &str) -> Self {
        Self::InvalidPosition {
            payload: payload.to_string(),
        }
    }
}

/// Encode one absolute sequence position as an opaque cursor.
#[must_use]
pub fn encode_cursor(position: usize) -> Cursor {
    Cursor::from_token(STANDARD.encode(position.to_string()))
}

/// Decode an opaque cursor token into the absolute position it addresses.
///
/// Only tokens produced by [`encode_cursor`] are accepted. Signs, whitespace,
/// and leading zeros inside the payload are rejected so that every position
/// has exactly one valid cursor.
pub fn decode_cursor(token: &str) -> Result<usize, CursorDecodeError> {
    if token.is_empty() {
        return Err(CursorDecodeError::Empty);
    }

    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(CursorDecodeError::TooLong {
            len: token.len(),
            max: MAX_CURSOR_TOKEN_LEN,
        });
    }

    let bytes = STANDARD
        .decode(token)
        .map_err(|err| CursorDecodeError::InvalidBase64 {
            reason: err.to_string(),
        })?;
    let payload = std::str::from_utf8(&bytes).map_err(|_| CursorDecodeError::InvalidUtf8)?;

    parse_canonical_position(payload)
}

// `str::parse::<usize>` accepts a leading '+', so the digit check runs first.
fn parse_canonical_position(payload: &str) -> Result<usize, CursorDecodeError> {
    if payload.is_empty() || !payload.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CursorDecodeError::invalid_position(payload));
    }

    if payload.len() > 1 && payload.starts_with('0') {
        return Err(CursorDecodeError::invalid_position(payload));
    }

    payload
        .parse::<usize>()
        .map_err(|_| CursorDecodeError::invalid_position(payload))
}

///
/// TESTS
///
