use axum::Router;
use serde_json::Value;

use crate::{state::AppState, store::Store};

pub mod items;

pub fn routes<S>() -> Router<AppState<S>>
where
    S: Store<Item = Value> + 'static,
{
    Router::new().nest("/items", items::routes())
}
