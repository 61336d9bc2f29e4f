//! Pagination strategies
//!
//! Two strategies share the [`Store`](crate::store::Store) abstraction:
//!
//! - offset pagination ([`OffsetPaginator`] → [`OffsetPage`]), random access
//!   by skip count with previous and next links,
//! - cursor pagination ([`CursorPaginator`] → [`CursorPage`]), forward only,
//!   keyed on an integer ID or a timestamp.
//!
//! A paginator is the unfetched state built from request parameters;
//! `page()` fetches and returns a page. Pages are immutable: navigating
//! from one re-fetches and returns a new page, leaving the origin untouched.

use async_trait::async_trait;

mod cursor;
mod error;
mod offset;
mod options;
mod request;
mod uri;

pub use cursor::{last_cursor_value, Cursor, CursorItem, CursorPage, CursorPaginator};
pub use error::{PaginationError, Result};
pub use offset::{OffsetPage, OffsetPaginator};
pub use options::{
    CursorMode, CursorOptions, Options, OptionsBuilder, DEFAULT_CURSOR_DB_FIELD,
    DEFAULT_CURSOR_KEY, DEFAULT_CURSOR_STRUCT_FIELD, DEFAULT_LIMIT, DEFAULT_LIMIT_KEY,
    DEFAULT_OFFSET_KEY,
};
pub use request::{
    cursor_from_request, limit_from_request, offset_from_request, pagination_kind, parse_query,
    validate_limit_offset, PaginationKind, QueryParams,
};
pub use uri::{generate_cursor_uri, generate_offset_uri};

/// A fetched page and the navigation it allows.
#[async_trait]
pub trait Pager: Sized + Send + Sync {
    type Item;

    fn items(&self) -> &[Self::Item];

    fn into_items(self) -> Vec<Self::Item>;

    fn limit(&self) -> i64;

    fn has_previous(&self) -> bool;

    fn has_next(&self) -> bool;

    fn previous_uri(&self) -> Option<&str>;

    fn next_uri(&self) -> Option<&str>;

    /// Fetches the previous page as a new value.
    async fn previous(&self) -> Result<Self>;

    /// Fetches the next page as a new value.
    async fn next(&self) -> Result<Self>;
}
