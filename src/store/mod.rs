//! Data sources paginators read from.
//!
//! A store knows how to apply limit/offset or limit/cursor windows to a
//! backing data set. Timeouts and retries are its own business: failures
//! come back as `anyhow::Error` and are wrapped untouched by the
//! paginators.

use anyhow::Result;
use async_trait::async_trait;

use crate::pagination::Cursor;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{quote_ident, PostgresStore};

/// One offset window and the total number of items in the data set.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetWindow<T> {
    pub items: Vec<T>,
    pub total_count: i64,
}

/// One cursor window, `has_more` telling whether rows exist past its end.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorWindow<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

#[async_trait]
pub trait Store: Send + Sync {
    type Item: Send + Sync;

    /// Returns at most `limit` items starting at `offset`, in the store's
    /// order, along with the total count.
    async fn paginate_offset(&self, limit: i64, offset: i64) -> Result<OffsetWindow<Self::Item>>;

    /// Returns at most `limit` items whose `field` is strictly greater
    /// than `cursor` (strictly lower when `reverse`), in the store's order.
    ///
    /// Rows sharing the exact boundary value are only handled correctly
    /// when the store orders by the cursor field plus a unique tiebreaker.
    async fn paginate_cursor(
        &self,
        limit: i64,
        cursor: &Cursor,
        field: &str,
        reverse: bool,
    ) -> Result<CursorWindow<Self::Item>>;
}
