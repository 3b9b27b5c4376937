//! Cursor pagination for ordered sequences: opaque position cursors,
//! forward/backward page arguments, push-down slicing, and the connection
//! payload exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod arguments;
pub mod connection;
pub mod cursor;
pub mod error;
pub mod obs;
pub mod options;
pub mod paginator;
pub mod source;
pub mod window;

mod slice;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Request, response, and source vocabulary.
/// No metrics plumbing or codec internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        arguments::{PagingArguments, RawPagingArguments},
        connection::{Connection, Edge, PageInfo},
        cursor::Cursor,
        error::PagingError,
        options::PagingOptions,
        paginator::Paginator,
        source::{ExecutableSource, PagingSource, PushDown, SliceResult},
    };
}
