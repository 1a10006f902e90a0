//! Zoo API Server Binary
//!
//! This is the main entry point for the zoo inventory REST API server.
//! It loads the configuration, connects to MongoDB, ensures the collection
//! indexes exist, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! MONGO_URI=mongodb://localhost:27017 MONGO_DATABASE=zoo cargo run --bin zoo-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `MONGO_URI`: MongoDB connection string (default: mongodb://localhost:27017)
//! - `MONGO_DATABASE`: Database name (default: zoo)
//! - `RUST_LOG`: Log level (default: info)
//!
//! A `zoo.toml` file with a `[mongo]` section takes precedence over the
//! Mongo environment variables when present.

use std::env;
use std::net::SocketAddr;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use zoo_api::db;
use zoo_api::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting zoo API server");

    // Connect to MongoDB and make sure the unique and geospatial indexes exist
    let config = db::MongoConfig::load().map_err(|e| anyhow::anyhow!(e))?;
    info!(database = %config.database, "Connecting to MongoDB");
    let database = db::connect(&config).await.map_err(|e| anyhow::anyhow!(e))?;

    if let Err(e) = db::ensure_indexes(&database).await {
        // The server can still answer requests without indexes; uniqueness
        // enforcement and geo query performance degrade until they exist.
        warn!(error = %e, "Failed to create indexes");
    } else {
        info!("Indexes ensured");
    }

    // Create application state and router
    let state = AppState::new(database);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
