use crate::config::Config;
use crate::routes;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use styla_store::ThemeStore;
use tokio::sync::watch;

/// Run the theme-library server until ctrl-c.
pub fn run(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(ThemeStore::open(&config.theme_dir)?);
    log::info!("Serving theme directory {}", store.root().display());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("styla-server")
        .build()?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    runtime.block_on(async move {
        let addr = SocketAddr::from((config.host, config.port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("Listening on http://{}", listener.local_addr()?);

        let app = routes::build_router(store, Instant::now(), config.max_body_bytes);

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = shutdown_tx.send(true);
            }
        });

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown_rx))
            .await?;

        log::info!("Server shut down");
        Ok(())
    })
}

/// Wait until the shutdown signal is received.
async fn shutdown_signal(mut rx: watch::Receiver<bool>) {
    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            break;
        }
    }
}
