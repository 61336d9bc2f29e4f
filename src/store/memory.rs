use std::cmp::Ordering;

use anyhow::Result;
use async_trait::async_trait;

use super::{CursorWindow, OffsetWindow, Store};
use crate::pagination::{Cursor, CursorItem};

/// Store over an in-memory list, kept in the order it was given.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore<T> {
    items: Vec<T>,
}

impl<T> MemoryStore<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn to_usize(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl<T> Store for MemoryStore<T>
where
    T: CursorItem + Clone + Send + Sync,
{
    type Item = T;

    async fn paginate_offset(&self, limit: i64, offset: i64) -> Result<OffsetWindow<T>> {
        let items = self
            .items
            .iter()
            .skip(to_usize(offset))
            .take(to_usize(limit))
            .cloned()
            .collect();
        Ok(OffsetWindow {
            items,
            total_count: self.items.len() as i64,
        })
    }

    async fn paginate_cursor(
        &self,
        limit: i64,
        cursor: &Cursor,
        field: &str,
        reverse: bool,
    ) -> Result<CursorWindow<T>> {
        let wanted = if reverse {
            Ordering::Less
        } else {
            Ordering::Greater
        };
        let limit = to_usize(limit);
        // one extra item tells whether another window follows
        let mut items = self
            .items
            .iter()
            .filter(|item| {
                item.cursor_value(field, cursor.mode())
                    .and_then(|value| value.partial_cmp(cursor))
                    == Some(wanted)
            })
            .take(limit.saturating_add(1))
            .cloned()
            .collect::<Vec<_>>();
        let has_more = items.len() > limit;
        items.truncate(limit);
        Ok(CursorWindow { items, has_more })
    }
}
