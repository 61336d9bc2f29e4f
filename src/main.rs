use std::{
    net::Ipv4Addr,
    panic::{set_hook, take_hook},
    process::exit,
};

use anyhow::{anyhow, Error};
use axum::{serve, Router};
use log::{error, info};
use paging_api::{
    api,
    config::CONFIG,
    state::{AppState, STATE},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    let default_panic = take_hook();
    set_hook(Box::new(move |info| {
        error!("Panic: {}", info);
        default_panic(info);
        exit(1);
    }));

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env()?
        .add_directive("tokio_postgres=info".parse()?)
        .add_directive("h2=info".parse()?)
        .add_directive("hyper=info".parse()?);

    info!("Setting up tracing with filter: {}", filter);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();

    let options = CONFIG.paging_options()?;
    info!(
        "Paginating table {} (default limit: {}, max limit: {}, cursor: {:?} on {})",
        CONFIG.paging.table,
        options.default_limit,
        options.max_limit,
        options.cursor.mode,
        options.cursor.db_field
    );

    let app = Router::new()
        .nest("/api/v1", api::routes())
        .with_state(AppState::new(STATE.items_store(), options))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );
    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, CONFIG.port)).await?;
    info!("Server is listening on http://0.0.0.0:{}", CONFIG.port,);
    serve(listener, app)
        .await
        .map_err(|e| anyhow!("Server error: {}", e))?;

    Ok(())
}
