mod config;
mod routes;
mod state;
mod upstream;

use std::sync::Arc;

use stores::http::HttpBackend;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");

    let backend = HttpBackend::new(&config.backend_url, config.timeouts).expect("backend client init failed");
    tracing::info!(
        backend = backend.base_url(),
        request_timeout_secs = config.timeouts.request_secs,
        cookie_secure = config.cookie.secure,
        "backend client initialized"
    );

    let state = state::AppState::new(Arc::new(backend), config.cookie);
    let app = routes::app(state).expect("router init failed");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "glowmarket listening");
    axum::serve(listener, app).await.expect("server failed");
}
