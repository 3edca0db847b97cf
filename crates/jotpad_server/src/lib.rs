//! HTTP surface for Jotpad notes.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `/` | 200 text | none |
//! | GET | `/api/notes?userId=` | 200 `Note[]` | none |
//! | POST | `/api/notes` | 201 `Note` | 400 missing title / bad JSON |
//! | PUT | `/api/notes/{id}` | 200 `Note` | 404 unknown id |
//! | DELETE | `/api/notes/{id}` | 200 `{"ok":true}` | 404 unknown id |
//!
//! `userId` is a client-supplied filter and is not authenticated here.
//! Identity belongs to the external provider in front of the client.
//!
//! # Run
//! ```sh
//! PORT=5000 ALLOWED_ORIGIN=http://localhost:5173 cargo run -p jotpad_server
//! ```
use std::{future::Future, io, sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, put},
    Router,
};
use log::{error, info};
use thiserror::Error;
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use config::ServerConfig;
use error::ApiError;
use routes::{create_note, delete_note, health_handler, list_notes, log_requests, update_note};
use state::AppState;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid allowed origin `{0}`")]
    InvalidOrigin(String),

    #[error("store bootstrap failed: {0}")]
    Store(#[from] ApiError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Builds the router with CORS and the access log applied.
pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/{id}", put(update_note).delete(delete_note))
        .layer(cors)
        .layer(from_fn(log_requests))
        .with_state(state)
}

/// CORS for the browser client. `None` allows any origin.
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer, ServerError> {
    let origin = match allowed_origin {
        Some(origin) => AllowOrigin::exact(
            HeaderValue::from_str(origin.trim())
                .map_err(|_| ServerError::InvalidOrigin(origin.to_string()))?,
        ),
        None => AllowOrigin::any(),
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60)))
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub async fn run(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("event=server_init module=server status=start");
    let state = AppState::new(&config.db_path)?;
    let cors = cors_layer(config.allowed_origin.as_deref())?;
    let app = build_router(state, cors);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("event=server_start module=server status=ok address={address}");

    run(listener, app, shutdown_signal()).await?;

    info!("event=server_shutdown module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("event=signal module=server status=ok signal=ctrl_c"),
            Err(err) => {
                error!("event=signal module=server status=error error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("event=signal module=server status=ok signal=terminate");
            }
            Err(err) => {
                error!("event=signal module=server status=error error={err}");
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
}
