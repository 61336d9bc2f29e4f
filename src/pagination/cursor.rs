use std::{cmp::Ordering, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use log::debug;
use serde_json::Value;

use super::{
    error::{PaginationError, Result},
    options::{CursorMode, Options},
    request::{cursor_from_request, limit_from_request, validate_limit_offset, QueryParams},
    uri::generate_cursor_uri,
    Pager,
};
use crate::store::{CursorWindow, Store};

/// Boundary value of a cursor window.
///
/// Date cursors keep full precision; they are truncated to Unix seconds
/// only when written into a URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Id(i64),
    Date(DateTime<Utc>),
}

impl Cursor {
    /// Builds a cursor from its query string value. In date mode the value
    /// is a Unix timestamp in seconds; out of range timestamps fall back to
    /// the epoch.
    pub fn from_query_value(value: i64, mode: CursorMode) -> Self {
        match mode {
            CursorMode::Id => Self::Id(value),
            CursorMode::Date => Self::Date(
                Utc.timestamp_opt(value, 0)
                    .single()
                    .unwrap_or_default(),
            ),
        }
    }

    pub fn query_value(&self) -> i64 {
        match self {
            Self::Id(id) => *id,
            Self::Date(date) => date.timestamp(),
        }
    }

    pub fn mode(&self) -> CursorMode {
        match self {
            Self::Id(_) => CursorMode::Id,
            Self::Date(_) => CursorMode::Date,
        }
    }
}

/// Cursors of different modes are not comparable.
impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Id(a), Self::Id(b)) => a.partial_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Typed access to the field a cursor is read from.
pub trait CursorItem {
    /// Returns the value of `field` as a cursor of the given mode, `None`
    /// when the item has no such field or it cannot be read in that mode.
    fn cursor_value(&self, field: &str, mode: CursorMode) -> Option<Cursor>;
}

/// An integer is its own cursor, the field name is ignored.
impl CursorItem for i64 {
    fn cursor_value(&self, _field: &str, mode: CursorMode) -> Option<Cursor> {
        match mode {
            CursorMode::Id => Some(Cursor::Id(*self)),
            CursorMode::Date => Utc.timestamp_opt(*self, 0).single().map(Cursor::Date),
        }
    }
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    // timestamp without time zone, as rendered by row_to_json
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date))
}

/// JSON objects expose their keys. Date fields may be RFC 3339 strings or
/// Unix seconds.
impl CursorItem for Value {
    fn cursor_value(&self, field: &str, mode: CursorMode) -> Option<Cursor> {
        let value = self.get(field)?;
        match mode {
            CursorMode::Id => match value {
                Value::Number(number) => number.as_i64(),
                Value::String(string) => string.parse().ok(),
                _ => None,
            }
            .map(Cursor::Id),
            CursorMode::Date => match value {
                Value::String(string) => parse_date(string),
                Value::Number(number) => number
                    .as_i64()
                    .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single()),
                _ => None,
            }
            .map(Cursor::Date),
        }
    }
}

/// Cursor value of the last item, the one the next window starts after.
pub fn last_cursor_value<T: CursorItem>(
    items: &[T],
    field: &str,
    mode: CursorMode,
) -> Option<Cursor> {
    items.last()?.cursor_value(field, mode)
}

/// Cursor paginator, not fetched yet.
pub struct CursorPaginator<S> {
    store: Arc<S>,
    options: Arc<Options>,
    limit: i64,
    cursor: Cursor,
}

impl<S> Clone for CursorPaginator<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            options: self.options.clone(),
            limit: self.limit,
            cursor: self.cursor,
        }
    }
}

impl<S> CursorPaginator<S>
where
    S: Store,
    S::Item: CursorItem,
{
    pub fn new(store: Arc<S>, params: &QueryParams, options: Arc<Options>) -> Self {
        let limit = limit_from_request(params, &options);
        let cursor = Cursor::from_query_value(
            cursor_from_request(params, &options),
            options.cursor.mode,
        );
        Self::with_cursor(store, options, limit, cursor)
    }

    /// Builds a paginator from explicit values, validated by [`Self::page`].
    pub fn with_cursor(store: Arc<S>, options: Arc<Options>, limit: i64, cursor: Cursor) -> Self {
        Self {
            store,
            options,
            limit,
            cursor,
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn moved_to(&self, cursor: Cursor) -> Self {
        Self {
            cursor,
            ..self.clone()
        }
    }

    pub async fn page(&self) -> Result<CursorPage<S>> {
        if !validate_limit_offset(self.limit, self.cursor.query_value()) {
            return Err(PaginationError::InvalidParameters {
                limit: self.limit,
                offset: self.cursor.query_value(),
            });
        }

        let cursor_options = &self.options.cursor;
        debug!(
            "Fetching cursor page (limit: {}, cursor: {:?}, field: {}, reverse: {})",
            self.limit, self.cursor, cursor_options.db_field, cursor_options.reverse
        );
        let window = self
            .store
            .paginate_cursor(
                self.limit,
                &self.cursor,
                &cursor_options.db_field,
                cursor_options.reverse,
            )
            .await?;

        Ok(CursorPage::new(self.clone(), window))
    }
}

/// A fetched cursor page. Cursor pages only navigate forward.
pub struct CursorPage<S: Store> {
    paginator: CursorPaginator<S>,
    items: Vec<S::Item>,
    has_next: bool,
    next_cursor: Option<Cursor>,
    next_uri: Option<String>,
}

impl<S> CursorPage<S>
where
    S: Store,
    S::Item: CursorItem,
{
    fn new(paginator: CursorPaginator<S>, window: CursorWindow<S::Item>) -> Self {
        let options = &paginator.options;
        let next_cursor = last_cursor_value(
            &window.items,
            &options.cursor.struct_field,
            options.cursor.mode,
        );
        let next_uri = next_cursor
            .filter(|_| window.has_more)
            .map(|cursor| generate_cursor_uri(paginator.limit, &cursor, options));

        Self {
            paginator,
            items: window.items,
            has_next: window.has_more,
            next_cursor,
            next_uri,
        }
    }

    /// The cursor this page was fetched with.
    pub fn cursor(&self) -> Cursor {
        self.paginator.cursor
    }

    /// The cursor the next page would be fetched with.
    pub fn next_cursor(&self) -> Option<Cursor> {
        self.next_cursor
    }

    pub fn paginator(&self) -> &CursorPaginator<S> {
        &self.paginator
    }
}

#[async_trait]
impl<S> Pager for CursorPage<S>
where
    S: Store + 'static,
    S::Item: CursorItem,
{
    type Item = S::Item;

    fn items(&self) -> &[S::Item] {
        &self.items
    }

    fn into_items(self) -> Vec<S::Item> {
        self.items
    }

    fn limit(&self) -> i64 {
        self.paginator.limit
    }

    fn has_previous(&self) -> bool {
        false
    }

    fn has_next(&self) -> bool {
        self.has_next
    }

    fn previous_uri(&self) -> Option<&str> {
        None
    }

    fn next_uri(&self) -> Option<&str> {
        self.next_uri.as_deref()
    }

    async fn previous(&self) -> Result<Self> {
        Err(PaginationError::NoPreviousPageCursorMode)
    }

    async fn next(&self) -> Result<Self> {
        if self.items.is_empty() {
            return Err(PaginationError::CursorUnavailable);
        }
        if !self.has_next {
            return Err(PaginationError::NoNextPage);
        }
        let cursor = self.next_cursor.ok_or(PaginationError::CursorUnavailable)?;
        self.paginator.moved_to(cursor).page().await
    }
}
