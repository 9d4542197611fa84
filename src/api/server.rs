//! HTTP server lifecycle.
//!
//! `Server` owns its listener. `start` binds and spawns the serving task,
//! `stop` triggers graceful shutdown and waits for the task to finish.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::{create_router, AppState};
use crate::config::Config;
use crate::errors::ServerError;
use crate::infra::BackendClient;

/// Handle of a started server.
struct Running {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

/// The gateway's HTTP server.
pub struct Server {
    config: Config,
    state: AppState,
    running: Option<Running>,
}

impl Server {
    pub fn new(config: Config, backend: Arc<dyn BackendClient>) -> Self {
        Self {
            config,
            state: AppState::new(backend),
            running: None,
        }
    }

    /// Bind the configured address and start serving.
    ///
    /// Returns the bound address, which differs from the configured one
    /// when port 0 was requested.
    pub async fn start(&mut self) -> Result<SocketAddr, ServerError> {
        if let Some(running) = &self.running {
            return Err(ServerError::AlreadyRunning(running.addr));
        }

        let addr = self.config.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        let app = create_router(self.state.clone(), &self.config.static_dir);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tracing::info!("Server running on http://{}", local_addr);
        self.running = Some(Running {
            addr: local_addr,
            shutdown: shutdown_tx,
            task,
        });

        Ok(local_addr)
    }

    /// Stop serving. A no-op when the server is not running.
    pub async fn stop(&mut self) -> Result<(), ServerError> {
        let Some(running) = self.running.take() else {
            return Ok(());
        };

        tracing::info!("Stopping server on {}", running.addr);
        let _ = running.shutdown.send(());
        running.task.await??;

        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Bound address while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|running| running.addr)
    }

    /// Serve until Ctrl+C or SIGTERM, then shut down gracefully.
    pub async fn run_until_shutdown(mut self) -> Result<(), ServerError> {
        self.start().await?;
        shutdown_signal().await;
        self.stop().await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
