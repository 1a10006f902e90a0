//! Application state for the HTTP server.

use mongodb::Database;

/// Shared application state passed to all handlers.
///
/// The database handle is cheaply clonable; the driver manages its own
/// connection pool behind it.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the zoo database
    pub db: Database,
}

impl AppState {
    /// Create a new application state with the given database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
