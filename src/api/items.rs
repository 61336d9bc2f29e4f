use axum::{
    extract::{RawQuery, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::{
    error::AppError,
    pagination::{pagination_kind, parse_query, CursorPaginator, OffsetPaginator, PaginationKind},
    state::AppState,
    store::Store,
    types::PageResponse,
};

pub fn routes<S>() -> Router<AppState<S>>
where
    S: Store<Item = Value> + 'static,
{
    Router::new().route("/", get(items::<S>))
}

/// Lists items, by cursor when the request carries one and by offset
/// otherwise.
pub async fn items<S>(
    RawQuery(query): RawQuery,
    State(state): State<AppState<S>>,
) -> Result<Json<PageResponse<Value>>, AppError>
where
    S: Store<Item = Value> + 'static,
{
    let params = parse_query(&format!("?{}", query.unwrap_or_default()));
    let body: PageResponse<Value> = match pagination_kind(&params, &state.options) {
        PaginationKind::Offset => {
            OffsetPaginator::new(state.store, &params, state.options)
                .page()
                .await?
                .into()
        }
        PaginationKind::Cursor => {
            CursorPaginator::new(state.store, &params, state.options)
                .page()
                .await?
                .into()
        }
    };

    Ok(Json(body))
}
