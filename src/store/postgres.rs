use anyhow::Result;
use async_trait::async_trait;
use deadpool_postgres::Pool;
use serde_json::Value;
use tokio::try_join;
use tokio_postgres::{types::ToSql, Row};

use super::{CursorWindow, OffsetWindow, Store};
use crate::pagination::Cursor;

/// Quotes an identifier, each part of a `schema.table` name separately.
pub fn quote_ident(ident: &str) -> String {
    ident
        .split('.')
        .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

fn order_clause(order: Option<&str>) -> String {
    match order {
        Some(order) if !order.trim().is_empty() => format!(" ORDER BY {}", order),
        _ => String::new(),
    }
}

fn offset_sql(table: &str, order: Option<&str>) -> String {
    format!(
        "SELECT row_to_json(t.*) AS data FROM {} t{} LIMIT $1 OFFSET $2",
        quote_ident(table),
        order_clause(order)
    )
}

fn count_sql(table: &str) -> String {
    format!("SELECT COUNT(*) AS count FROM {}", quote_ident(table))
}

fn cursor_sql(
    table: &str,
    order: Option<&str>,
    field: &str,
    cursor: &Cursor,
    reverse: bool,
) -> String {
    let field = format!("t.{}", quote_ident(field));
    let (operator, direction) = match reverse {
        true => ("<", "DESC"),
        false => (">", "ASC"),
    };
    let cast = match cursor {
        Cursor::Id(_) => "bigint",
        Cursor::Date(_) => "timestamptz",
    };
    let order = match order {
        Some(order) if !order.trim().is_empty() => order.to_string(),
        _ => format!("{} {}", field, direction),
    };
    format!(
        "SELECT row_to_json(t.*) AS data FROM {} t WHERE {} {} $1::{}{} LIMIT $2",
        quote_ident(table),
        field,
        operator,
        cast,
        order_clause(Some(&order))
    )
}

fn rows_to_json(rows: &[Row]) -> Result<Vec<Value>> {
    rows.iter()
        .map(|row| Ok(row.try_get::<_, Value>("data")?))
        .collect::<Result<Vec<_>>>()
}

/// Store over one PostgreSQL table, rows returned as JSON objects keyed by
/// column name.
///
/// `order` is an SQL `ORDER BY` expression taken from configuration, never
/// from requests. Cursor windows default to ordering on the cursor field;
/// when that field is not unique, configure an order that adds a unique
/// tiebreaker, otherwise rows sharing a boundary value may be skipped.
#[derive(Clone)]
pub struct PostgresStore {
    pool: Pool,
    table: String,
    order: Option<String>,
}

impl PostgresStore {
    pub fn new(pool: Pool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
            order: None,
        }
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }
}

#[async_trait]
impl Store for PostgresStore {
    type Item = Value;

    async fn paginate_offset(&self, limit: i64, offset: i64) -> Result<OffsetWindow<Value>> {
        let postgres = self.pool.get().await?;
        let items_sql = offset_sql(&self.table, self.order.as_deref());
        let total_sql = count_sql(&self.table);
        let params: [&(dyn ToSql + Sync); 2] = [&limit, &offset];

        let (rows, count) = try_join!(
            postgres.query(items_sql.as_str(), &params),
            postgres.query_one(total_sql.as_str(), &[]),
        )?;

        Ok(OffsetWindow {
            items: rows_to_json(&rows)?,
            total_count: count.try_get::<_, i64>("count")?,
        })
    }

    async fn paginate_cursor(
        &self,
        limit: i64,
        cursor: &Cursor,
        field: &str,
        reverse: bool,
    ) -> Result<CursorWindow<Value>> {
        let postgres = self.pool.get().await?;
        let sql = cursor_sql(&self.table, self.order.as_deref(), field, cursor, reverse);
        let lookahead = limit.saturating_add(1);

        let params: [&(dyn ToSql + Sync); 2] = match cursor {
            Cursor::Id(id) => [id, &lookahead],
            Cursor::Date(date) => [date, &lookahead],
        };
        let rows = postgres.query(sql.as_str(), &params).await?;
        let mut items = rows_to_json(&rows)?;
        let has_more = (items.len() as i64) > limit;
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(CursorWindow { items, has_more })
    }
}
