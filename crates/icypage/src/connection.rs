//! Module: connection
//! Responsibility: connection response payload and its assembly.
//! Does not own: window resolution, source access, or cursor wire format.

use crate::{
    cursor::{Cursor, encode_cursor},
    source::SliceResult,
};
use serde::{Serialize, Serializer, ser::SerializeStruct};

///
/// Edge
///
/// One node plus the cursor of its absolute position in the full sequence.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Edge<T> {
    pub cursor: Cursor,
    pub node: T,
}

///
/// PageInfo
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<Cursor>,
    pub end_cursor: Option<Cursor>,
}

///
/// Connection
///
/// Paginated result envelope. `nodes` is the edge node projection and is
/// derived on access rather than stored twice.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Connection<T> {
    edges: Vec<Edge<T>>,
    page_info: PageInfo,
    total_count: Option<usize>,
}

impl<T> Connection<T> {
    /// An empty page with no neighbours.
    #[must_use]
    pub fn empty(total_count: Option<usize>) -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
            total_count,
        }
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    /// Nodes in edge order.
    #[must_use]
    pub fn nodes(&self) -> Vec<&T> {
        self.edges.iter().map(|edge| &edge.node).collect()
    }

    #[must_use]
    pub const fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    /// Present iff the binding requested a total count.
    #[must_use]
    pub const fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Consume the connection and return its nodes in edge order.
    #[must_use]
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }

    /// Consume this connection and return `(edges, page_info, total_count)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Edge<T>>, PageInfo, Option<usize>) {
        (self.edges, self.page_info, self.total_count)
    }

    /// Map every node, keeping cursors and page info.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Connection<U> {
        Connection {
            edges: self
                .edges
                .into_iter()
                .map(|edge| Edge {
                    cursor: edge.cursor,
                    node: f(edge.node),
                })
                .collect(),
            page_info: self.page_info,
            total_count: self.total_count,
        }
    }
}

impl<T: Serialize> Serialize for Connection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.total_count.is_some() { 4 } else { 3 };
        let mut state = serializer.serialize_struct("Connection", len)?;
        state.serialize_field("edges", &self.edges)?;
        state.serialize_field("nodes", &self.nodes())?;
        state.serialize_field("pageInfo", &self.page_info)?;
        if let Some(total_count) = self.total_count {
            state.serialize_field("totalCount", &total_count)?;
        } else {
            state.skip_field("totalCount")?;
        }

        state.end()
    }
}

///
/// ConnectionBuilder
///
/// Pure assembly step from a slice result to a connection. Deterministic in
/// its inputs.
///

#[derive(Debug)]
pub struct ConnectionBuilder<T> {
    slice: SliceResult<T>,
    total_count: Option<usize>,
}

impl<T> ConnectionBuilder<T> {
    #[must_use]
    pub const fn new(slice: SliceResult<T>) -> Self {
        Self {
            slice,
            total_count: None,
        }
    }

    #[must_use]
    pub const fn total_count(mut self, total_count: Option<usize>) -> Self {
        self.total_count = total_count;
        self
    }

    #[must_use]
    pub fn build(self) -> Connection<T> {
        let SliceResult {
            items,
            start,
            has_previous_page,
            has_next_page,
        } = self.slice;

        let edges: Vec<Edge<T>> = items
            .into_iter()
            .enumerate()
            .map(|(offset, node)| Edge {
                cursor: encode_cursor(start.saturating_add(offset)),
                node,
            })
            .collect();

        let page_info = PageInfo {
            has_next_page,
            has_previous_page,
            start_cursor: edges.first().map(|edge| edge.cursor.clone()),
            end_cursor: edges.last().map(|edge| edge.cursor.clone()),
        };

        Connection {
            edges,
            page_info,
            total_count: self.total_count,
        }
    }
}

///
/// TESTS
///
