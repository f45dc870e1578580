//! Application startup and lifecycle management.

use crate::config::PersonaConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::providers::openrouter::{OpenRouterConfig, OpenRouterProvider};
use crate::services::providers::ChatProvider;
use crate::services::{Assistant, MemoryStore};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: PersonaConfig,
    pub memory: MemoryStore,
    pub assistant: Arc<Assistant>,
}

/// Build the API router. Cross-origin requests are permitted from any
/// origin; the backend serves a browser UI hosted elsewhere.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ask", post(handlers::ask))
        .route("/api/tasks", post(handlers::create_tasks))
        .route("/api/draft-email", post(handlers::draft_email))
        .route("/api/xp", post(handlers::xp_update))
        .route("/api/health", get(handlers::health))
        .route("/api/history", get(handlers::get_history))
        .route("/api/history/clear", post(handlers::clear_history))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the OpenRouter provider.
    pub async fn build(config: PersonaConfig) -> Result<Self, AppError> {
        if config.upstream.api_key.is_empty() {
            tracing::warn!("OPENROUTER_KEY is not set; upstream calls will fail");
        }

        let provider: Arc<dyn ChatProvider> = Arc::new(OpenRouterProvider::new(OpenRouterConfig {
            api_key: config.upstream.api_key.clone(),
            referer: config.upstream.referer.clone(),
        }));

        tracing::info!(
            model = %config.models.default_model,
            fallbacks = config.models.fallback_models.len(),
            "Initialized OpenRouter chat provider"
        );

        Self::with_provider(config, provider).await
    }

    /// Build the application against an arbitrary provider. This is the
    /// substitution seam tests use.
    pub async fn with_provider(
        config: PersonaConfig,
        provider: Arc<dyn ChatProvider>,
    ) -> Result<Self, AppError> {
        let assistant = Arc::new(Assistant::new(provider, config.models.clone()));
        let state = AppState {
            config: config.clone(),
            memory: MemoryStore::new(),
            assistant,
        };

        // Port 0 = random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
