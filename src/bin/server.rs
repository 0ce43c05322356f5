use std::fs::OpenOptions;

use anyhow::{Context, Result};
use cut_list::api;
use cut_list::config::ServerConfig;
use tracing::Level;

fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    // Sentry has to be up before the runtime starts its threads.
    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?
        .block_on(serve(config))
}

async fn serve(config: ServerConfig) -> Result<()> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    eprintln!("Listening on {addr}");
    tracing::info!(%addr, "server started");

    axum::serve(listener, api::router()).await?;
    Ok(())
}
