//! Contact relay for the portfolio site: validates contact form submissions,
//! sends the owner notification and visitor confirmation emails, and serves
//! the single-page application's built assets.

pub mod client;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mail;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

pub use client::{
    ContactApi, ContactForm, HttpContactApi, SubmitError, SubmitErrorKind, SubmitStatus,
};
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use mail::{mailer_from_config, MailError, Mailer, MemoryMailer, OutboundEmail, SmtpMailer};
pub use models::{ContactResponse, ContactSubmission};
pub use services::{ContactRelay, RelayError, RelaySettings, RelayStep};
pub use validation::{Validatable, ValidationResult};

use axum::{extract::DefaultBodyLimit, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub relay: ContactRelay,
}

impl AppState {
    pub fn new(mailer: Arc<dyn Mailer>, settings: RelaySettings) -> Self {
        Self {
            app_name: "Portfolio Contact Relay".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            relay: ContactRelay::new(mailer, settings),
        }
    }

    pub fn from_config(config: &AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self::new(mailer, RelaySettings::from(&config.mail))
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new().merge(create_routes());

    if config.static_files.enabled {
        if !config.static_files.index_path().exists() {
            warn!(
                "SPA entry document {} not found; unknown routes will return 404",
                config.static_files.index_path().display()
            );
        }
        router = router.fallback_service(handlers::routes::spa_service(&config.static_files));
    }

    router
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .layer(middleware::cors::cors_layer_from_config(&config.cors))
        .layer(middleware::logging::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
