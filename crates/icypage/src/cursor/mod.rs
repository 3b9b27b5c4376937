//! Module: cursor
//! Responsibility: opaque connection cursors and their position codec.
//! Does not own: window resolution or argument validation.

mod codec;

pub use codec::{CursorDecodeError, decode_cursor, encode_cursor};

use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};

///
/// Cursor
///
/// Opaque token addressing one absolute position in an ordered sequence.
/// Callers must treat the text as opaque; only the codec constructs or
/// inspects it.
///

#[derive(Clone, Debug, Deref, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub(crate) const fn from_token(token: String) -> Self {
        Self(token)
    }

    /// Cursor for one absolute position.
    #[must_use]
    pub fn for_position(position: usize) -> Self {
        encode_cursor(position)
    }

    /// Borrow the opaque token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode this cursor back into the position it addresses.
    pub fn position(&self) -> Result<usize, CursorDecodeError> {
        decode_cursor(&self.0)
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Cursor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Cursor> for String {
    fn from(value: Cursor) -> Self {
        value.into_string()
    }
}

///
/// TESTS
///
