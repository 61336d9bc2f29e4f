use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::{
    error::{PaginationError, Result},
    options::Options,
    request::{limit_from_request, offset_from_request, validate_limit_offset, QueryParams},
    uri::generate_offset_uri,
    Pager,
};
use crate::store::{OffsetWindow, Store};

/// Offset paginator, not fetched yet.
pub struct OffsetPaginator<S> {
    store: Arc<S>,
    options: Arc<Options>,
    limit: i64,
    offset: i64,
}

impl<S> Clone for OffsetPaginator<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            options: self.options.clone(),
            limit: self.limit,
            offset: self.offset,
        }
    }
}

impl<S: Store> OffsetPaginator<S> {
    pub fn new(store: Arc<S>, params: &QueryParams, options: Arc<Options>) -> Self {
        let limit = limit_from_request(params, &options);
        let offset = offset_from_request(params, &options);
        Self::with_offset(store, options, limit, offset)
    }

    /// Builds a paginator from explicit values, validated by [`Self::page`].
    pub fn with_offset(store: Arc<S>, options: Arc<Options>, limit: i64, offset: i64) -> Self {
        Self {
            store,
            options,
            limit,
            offset,
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn moved_to(&self, offset: i64) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    pub async fn page(&self) -> Result<OffsetPage<S>> {
        if !validate_limit_offset(self.limit, self.offset) {
            return Err(PaginationError::InvalidParameters {
                limit: self.limit,
                offset: self.offset,
            });
        }

        debug!(
            "Fetching offset page (limit: {}, offset: {})",
            self.limit, self.offset
        );
        let window = self
            .store
            .paginate_offset(self.limit, self.offset)
            .await?;

        Ok(OffsetPage::new(self.clone(), window))
    }
}

/// A fetched offset page.
pub struct OffsetPage<S: Store> {
    paginator: OffsetPaginator<S>,
    items: Vec<S::Item>,
    total_count: i64,
    previous_uri: Option<String>,
    next_uri: Option<String>,
}

fn previous_offset(limit: i64, offset: i64) -> Option<i64> {
    let offset = offset - limit;
    (offset >= 0).then_some(offset)
}

fn next_offset(limit: i64, offset: i64, total_count: i64) -> Option<i64> {
    let offset = offset.saturating_add(limit);
    (offset < total_count).then_some(offset)
}

impl<S: Store> OffsetPage<S> {
    fn new(paginator: OffsetPaginator<S>, window: OffsetWindow<S::Item>) -> Self {
        let OffsetPaginator {
            ref options,
            limit,
            offset,
            ..
        } = paginator;
        let previous_uri = previous_offset(limit, offset)
            .map(|offset| generate_offset_uri(limit, offset, options));
        let next_uri = next_offset(limit, offset, window.total_count)
            .map(|offset| generate_offset_uri(limit, offset, options));

        Self {
            paginator,
            items: window.items,
            total_count: window.total_count,
            previous_uri,
            next_uri,
        }
    }

    pub fn offset(&self) -> i64 {
        self.paginator.offset
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    /// The paginator this page was fetched with.
    pub fn paginator(&self) -> &OffsetPaginator<S> {
        &self.paginator
    }

    fn previous_offset(&self) -> Option<i64> {
        previous_offset(self.paginator.limit, self.paginator.offset)
    }

    fn next_offset(&self) -> Option<i64> {
        next_offset(self.paginator.limit, self.paginator.offset, self.total_count)
    }
}

#[async_trait]
impl<S: Store + 'static> Pager for OffsetPage<S> {
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
        self.previous_offset().is_some()
    }

    fn has_next(&self) -> bool {
        self.next_offset().is_some()
    }

    fn previous_uri(&self) -> Option<&str> {
        self.previous_uri.as_deref()
    }

    fn next_uri(&self) -> Option<&str> {
        self.next_uri.as_deref()
    }

    async fn previous(&self) -> Result<Self> {
        let offset = self
            .previous_offset()
            .ok_or(PaginationError::NoPreviousPage)?;
        self.paginator.moved_to(offset).page().await
    }

    async fn next(&self) -> Result<Self> {
        let offset = self.next_offset().ok_or(PaginationError::NoNextPage)?;
        self.paginator.moved_to(offset).page().await
    }
}
