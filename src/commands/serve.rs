//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::Server;
use crate::cli::ServeArgs;
use crate::config::Config;
use crate::errors::ServerError;
use crate::infra::CouchClient;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> Result<(), ServerError> {
    tracing::info!("Starting server...");

    let config = apply_overrides(args, config);

    let backend = CouchClient::new(&config)?;
    tracing::info!(backend = %backend.base_url(), "Backend client ready");

    Server::new(config, Arc::new(backend))
        .run_until_shutdown()
        .await
}

fn apply_overrides(args: ServeArgs, mut config: Config) -> Config {
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(static_dir) = args.static_dir {
        config.static_dir = static_dir;
    }
    config
}
