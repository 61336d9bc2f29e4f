use serde::{Deserialize, Serialize};

use crate::{
    pagination::{CursorItem, CursorPage, OffsetPage, Pager},
    store::Store,
};

/// JSON body of a paginated response.
///
/// `previous` and `next` are always present, `null` when there is no such
/// page. Offset pages carry `offset` and `total_count`, cursor pages carry
/// `cursor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub limit: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<i64>,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub data: Vec<T>,
}

impl<S: Store + 'static> From<OffsetPage<S>> for PageResponse<S::Item> {
    fn from(page: OffsetPage<S>) -> Self {
        Self {
            limit: page.limit(),
            offset: Some(page.offset()),
            total_count: Some(page.total_count()),
            cursor: None,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            previous: page.previous_uri().map(str::to_string),
            next: page.next_uri().map(str::to_string),
            data: page.into_items(),
        }
    }
}

impl<S> From<CursorPage<S>> for PageResponse<S::Item>
where
    S: Store + 'static,
    S::Item: CursorItem,
{
    fn from(page: CursorPage<S>) -> Self {
        Self {
            limit: page.limit(),
            offset: None,
            total_count: None,
            cursor: Some(page.cursor().query_value()),
            has_previous: false,
            has_next: page.has_next(),
            previous: None,
            next: page.next_uri().map(str::to_string),
            data: page.into_items(),
        }
    }
}
