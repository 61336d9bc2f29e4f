//! End-to-end pagination over an in-memory store, following links the way
//! a client would.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use paging_api::{
    pagination::{
        parse_query, Cursor, CursorItem, CursorMode, CursorPaginator, OffsetPaginator, Options,
        Pager, PaginationError,
    },
    store::MemoryStore,
};
use pretty_assertions::assert_eq;

const REF_DATE: i64 = 1484652856;

#[derive(Debug, Clone, PartialEq)]
struct User {
    id: i64,
    number: i64,
    name: String,
    date_creation: DateTime<Utc>,
}

impl CursorItem for User {
    fn cursor_value(&self, field: &str, mode: CursorMode) -> Option<Cursor> {
        match (field, mode) {
            ("id", CursorMode::Id) => Some(Cursor::Id(self.id)),
            ("number", CursorMode::Id) => Some(Cursor::Id(self.number)),
            ("date_creation", CursorMode::Date) => Some(Cursor::Date(self.date_creation)),
            _ => None,
        }
    }
}

/// 100 users, user `i` created `101 - i` minutes before the reference
/// date, listed by number descending.
fn users() -> Arc<MemoryStore<User>> {
    let reference = Utc.timestamp_opt(REF_DATE, 0).unwrap();
    let mut users = (1..=100)
        .map(|i| User {
            id: i,
            number: i,
            name: format!("user-{}", i),
            date_creation: reference - Duration::minutes(101 - i),
        })
        .collect::<Vec<_>>();
    users.reverse();
    Arc::new(MemoryStore::new(users))
}

fn numbers(users: &[User]) -> Vec<i64> {
    users.iter().map(|user| user.number).collect()
}

#[tokio::test]
async fn test_offset_pagination_follows_links() {
    let store = users();
    let options = Arc::new(Options::default());

    let page = OffsetPaginator::new(store.clone(), &parse_query(""), options.clone())
        .page()
        .await
        .unwrap();
    assert_eq!(page.limit(), 20);
    assert_eq!(page.offset(), 0);
    assert_eq!(page.total_count(), 100);
    assert_eq!(page.items().len(), 20);
    assert_eq!(page.items()[0].number, 100);
    assert_eq!(page.previous_uri(), None);
    assert_eq!(page.next_uri(), Some("?limit=20&offset=20"));

    let next = page.next_uri().unwrap().to_string();
    let page = OffsetPaginator::new(store.clone(), &parse_query(&next), options.clone())
        .page()
        .await
        .unwrap();
    assert_eq!(page.offset(), 20);
    assert_eq!(page.items()[0].number, 80);
    assert_eq!(page.previous_uri(), Some("?limit=20&offset=0"));
    assert_eq!(page.next_uri(), Some("?limit=20&offset=40"));

    let previous = page.previous_uri().unwrap().to_string();
    let page = OffsetPaginator::new(store, &parse_query(&previous), options)
        .page()
        .await
        .unwrap();
    assert_eq!(page.offset(), 0);
    assert_eq!(page.items()[0].number, 100);
}

#[tokio::test]
async fn test_offset_pagination_with_custom_keys() {
    let options = Arc::new(
        Options::builder()
            .limit_key("per_page")
            .offset_key("skip")
            .max_limit(30)
            .build()
            .unwrap(),
    );
    let page = OffsetPaginator::new(users(), &parse_query("?per_page=500&skip=90"), options)
        .page()
        .await
        .unwrap();

    assert_eq!(page.limit(), 30);
    assert_eq!(numbers(page.items()), (1..=10).rev().collect::<Vec<_>>());
    assert_eq!(page.previous_uri(), Some("?per_page=30&skip=60"));
    assert_eq!(page.next_uri(), None);
}

#[tokio::test]
async fn test_offset_past_the_end_is_an_empty_page() {
    let page = OffsetPaginator::new(
        users(),
        &parse_query("?limit=20&offset=100"),
        Arc::new(Options::default()),
    )
    .page()
    .await
    .unwrap();

    assert!(page.items().is_empty());
    assert!(!page.has_next());
    assert_eq!(page.next_uri(), None);
}

#[tokio::test]
async fn test_offset_walk_covers_every_item_once() {
    let mut page = OffsetPaginator::new(
        users(),
        &parse_query("?limit=7"),
        Arc::new(Options::default()),
    )
    .page()
    .await
    .unwrap();

    let mut seen = numbers(page.items());
    while page.has_next() {
        page = page.next().await.unwrap();
        seen.extend(numbers(page.items()));
    }
    assert_eq!(seen, (1..=100).rev().collect::<Vec<_>>());
}

#[tokio::test]
async fn test_reverse_date_cursor_pagination() {
    let options = Arc::new(
        Options::builder()
            .limit_key("limit")
            .cursor_mode(CursorMode::Date)
            .cursor_db_field("date_creation")
            .cursor_struct_field("date_creation")
            .cursor_reverse(true)
            .build()
            .unwrap(),
    );

    // Users created strictly before the reference date minus 50 minutes.
    let since = REF_DATE - 50 * 60;
    let page = CursorPaginator::new(
        users(),
        &parse_query(&format!("?limit=10&since={}", since)),
        options.clone(),
    )
    .page()
    .await
    .unwrap();

    assert_eq!(numbers(page.items()), (41..=50).rev().collect::<Vec<_>>());
    let last = page.items().last().unwrap().date_creation.timestamp();
    assert_eq!(page.next_uri(), Some(format!("?limit=10&since={}", last).as_str()));
    assert!(!page.has_previous());

    let next = page.next().await.unwrap();
    assert_eq!(numbers(next.items()), (31..=40).rev().collect::<Vec<_>>());
    assert_eq!(next.cursor(), Cursor::Date(page.items().last().unwrap().date_creation));
}

#[tokio::test]
async fn test_id_cursor_walk_until_the_end() {
    let options = Arc::new(
        Options::builder()
            .cursor_db_field("number")
            .cursor_struct_field("number")
            .cursor_reverse(true)
            .build()
            .unwrap(),
    );
    let mut page = CursorPaginator::new(users(), &parse_query("?limit=30&since=95"), options)
        .page()
        .await
        .unwrap();

    let mut seen = numbers(page.items());
    while page.has_next() {
        page = page.next().await.unwrap();
        seen.extend(numbers(page.items()));
    }
    assert_eq!(seen, (1..=94).rev().collect::<Vec<_>>());
    assert_eq!(page.next_uri(), None);
    assert!(matches!(page.next().await, Err(PaginationError::NoNextPage)));
}

#[tokio::test]
async fn test_cursor_on_unknown_field_cannot_continue() {
    let options = Arc::new(
        Options::builder()
            .cursor_db_field("id")
            .cursor_struct_field("name")
            .build()
            .unwrap(),
    );
    let page = CursorPaginator::new(users(), &parse_query("?limit=5&since=10"), options)
        .page()
        .await
        .unwrap();

    // The window is fetched on `id`, but `name` is no cursor field.
    assert_eq!(page.items().len(), 5);
    assert!(page.has_next());
    assert_eq!(page.next_uri(), None);
    assert!(matches!(
        page.next().await,
        Err(PaginationError::CursorUnavailable)
    ));
}
