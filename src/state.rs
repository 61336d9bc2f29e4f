use std::sync::Arc;

use anyhow::Result;
use deadpool_postgres::{Pool as PostgresPool, Runtime};
use once_cell::sync::Lazy;
use tokio_postgres::NoTls;

use crate::{config::CONFIG, pagination::Options, store::PostgresStore};

pub static STATE: Lazy<State> = Lazy::new(|| State::new().expect("Failed to create state"));

#[derive(Clone)]
pub struct State {
    pub postgres_pool: PostgresPool,
}

impl State {
    pub fn new() -> Result<Self> {
        Ok(Self {
            postgres_pool: CONFIG
                .postgres_config()
                .create_pool(Some(Runtime::Tokio1), NoTls)?,
        })
    }

    /// Store over the configured table.
    pub fn items_store(&self) -> PostgresStore {
        let store = PostgresStore::new(self.postgres_pool.clone(), CONFIG.paging.table.as_str());
        match &CONFIG.paging.order {
            Some(order) => store.with_order(order.as_str()),
            None => store,
        }
    }
}

/// State shared by the paginated routes: one store and the options every
/// paginator built from a request reads.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub options: Arc<Options>,
}

impl<S> AppState<S> {
    pub fn new(store: S, options: Options) -> Self {
        Self {
            store: Arc::new(store),
            options: Arc::new(options),
        }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            options: self.options.clone(),
        }
    }
}
