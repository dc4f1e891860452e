//! Single-document static file server.
//!
//! Serves files from one root directory; any path that does not name a file
//! under the root gets the entry document instead.

use std::io;
use std::path::PathBuf;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};

/// Where and what to serve.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub root: PathBuf,
    /// Document served for every path that is not a file, relative to `root`.
    pub entry: String,
}

/// Every route: files under the root, the entry document for anything else.
pub fn router(config: &ServerConfig) -> Router {
    let entry = ServeFile::new(config.root.join(&config.entry));
    Router::new().fallback_service(ServeDir::new(&config.root).fallback(entry))
}

/// Bind, log readiness, and serve until the process exits.
pub async fn serve(config: ServerConfig) -> io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    log::info!("Animated app running on port {}", config.port);
    log::info!("Open: http://localhost:{}", config.port);
    run(listener, &config).await
}

/// Serve on an already bound listener.
pub async fn run(listener: TcpListener, config: &ServerConfig) -> io::Result<()> {
    log::debug!("serving {} (entry {})", config.root.display(), config.entry);
    axum::serve(listener, router(config)).await
}
