//! Pagination parameters extracted from a request's query string.
//!
//! Extraction never fails: missing or malformed values fall back to
//! defaults, so negative values only reach a paginator when they are
//! set programmatically.

use std::collections::HashMap;

use url::form_urlencoded;

use super::options::Options;

/// Decoded query string parameters.
pub type QueryParams = HashMap<String, String>;

/// Pagination strategy selected for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationKind {
    Offset,
    Cursor,
}

/// Decodes a query string (`?limit=20&offset=40`, with or without the
/// leading `?`, or a full relative URI) into parameters.
///
/// When a key is repeated the first value wins.
pub fn parse_query(uri: &str) -> QueryParams {
    let query = match uri.split_once('?') {
        Some((_, query)) => query,
        None => uri,
    };
    let mut params = QueryParams::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

fn non_negative(params: &QueryParams, key: &str) -> Option<i64> {
    params
        .get(key)
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value >= 0)
}

/// Returns the requested limit, clamped to `max_limit` when it is set.
///
/// A missing or empty key yields `default_limit` as is; a malformed or
/// negative value yields `default_limit` clamped like a requested one.
pub fn limit_from_request(params: &QueryParams, options: &Options) -> i64 {
    if params.get(&options.limit_key).map_or(true, String::is_empty) {
        return options.default_limit;
    }
    let limit = non_negative(params, &options.limit_key).unwrap_or(options.default_limit);
    if options.max_limit > 0 && limit > options.max_limit {
        return options.max_limit;
    }
    limit
}

pub fn offset_from_request(params: &QueryParams, options: &Options) -> i64 {
    non_negative(params, &options.offset_key).unwrap_or(0)
}

/// Returns the raw cursor value. In date mode this is a Unix timestamp in
/// seconds.
pub fn cursor_from_request(params: &QueryParams, options: &Options) -> i64 {
    non_negative(params, &options.cursor.key).unwrap_or(0)
}

pub fn validate_limit_offset(limit: i64, offset: i64) -> bool {
    limit >= 0 && offset >= 0
}

/// Cursor pagination is used when the request carries a positive cursor,
/// offset pagination otherwise.
pub fn pagination_kind(params: &QueryParams, options: &Options) -> PaginationKind {
    if cursor_from_request(params, options) > 0 {
        PaginationKind::Cursor
    } else {
        PaginationKind::Offset
    }
}
