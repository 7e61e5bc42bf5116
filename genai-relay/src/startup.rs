//! Application startup and lifecycle management.

use crate::config::RelayConfig;
use crate::credentials::{CredentialSource, EnvCredential};
use crate::handlers::{health::health_check, relay::relay};
use crate::providers::ProviderTable;
use crate::services::Relay;
use axum::{
    middleware::from_fn,
    routing::{any, get},
    Router,
};
use relay_core::error::AppError;
use relay_core::middleware::{request_id_middleware, trace_layer};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

/// Router with the relay mounted at `route` plus `/health`.
pub fn build_router(state: AppState, route: &str) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(route, any(relay))
        .layer(trace_layer())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application, reading the credential from the configured
    /// environment variable on each request.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let credentials = Arc::new(EnvCredential::new(config.credential_env()));
        Self::build_with_credentials(config, credentials).await
    }

    pub async fn build_with_credentials(
        config: RelayConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, AppError> {
        if !config.route.starts_with('/') {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "relay route must start with '/', got '{}'",
                config.route
            )));
        }

        let table = ProviderTable::new(config.provider, config.upstream.base_url.as_deref());

        tracing::info!(
            provider = config.provider.as_str(),
            base_url = %table.base_url(),
            endpoints = ?table.endpoints().collect::<Vec<_>>(),
            credential_env = %config.credential_env(),
            route = %config.route,
            "Initialized provider table"
        );

        let state = AppState {
            relay: Arc::new(Relay::new(table, credentials)),
        };
        let router = build_router(state, &config.route);

        // Port 0 binds a random port (tests).
        let host = config.server.host.as_str();
        let port = config.server.port;
        let listener = TcpListener::bind((host, port)).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}:{}: {}", host, port, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("genai-relay listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
