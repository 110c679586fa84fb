use std::{future::Future, sync::Arc, time::Duration};

use axum::Router;
use configs::AppConfig;
use service::config::{ConfigRepository, InMemoryConfigRepository};
use tokio::{net::TcpListener, sync::Notify};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over the given repository.
pub fn build_app(repo: Arc<dyn ConfigRepository>) -> Router {
    routes::build_router(ServerState::new(repo), build_cors())
}

/// Public entry: create the store, bind, and serve until SIGINT/SIGTERM.
pub async fn run(mut cfg: AppConfig) -> Result<(), StartupError> {
    cfg.normalize_and_validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    // the only store instance for the lifetime of the process
    let repo: Arc<dyn ConfigRepository> = Arc::new(InMemoryConfigRepository::new());
    let app = build_app(repo);

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    info!(%addr, "config service listening");

    let grace = Duration::from_secs(cfg.server.shutdown_timeout_secs);
    serve(listener, app, shutdown_signal(), grace).await?;
    Ok(())
}

/// Serve `app` until `shutdown` resolves, then drain in-flight requests for at most `grace`.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F, grace: Duration) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let stop = Arc::new(Notify::new());
    let server = axum::serve(listener, app).with_graceful_shutdown({
        let stop = Arc::clone(&stop);
        async move { stop.notified().await }
    });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        res = &mut server => {
            // stopped on its own, before any shutdown request
            res??;
            return Ok(());
        }
        _ = shutdown => {}
    }

    info!(grace_secs = grace.as_secs(), "shutdown requested, draining connections");
    stop.notify_one();
    match tokio::time::timeout(grace, &mut server).await {
        Ok(res) => {
            res??;
            info!("server stopped gracefully");
        }
        Err(_) => {
            warn!("graceful shutdown timed out, aborting open connections");
            server.abort();
        }
    }
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(signal = "SIGINT", "received shutdown signal"),
        _ = terminate => info!(signal = "SIGTERM", "received shutdown signal"),
    }
}
