//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let categories = Router::new()
        .route(
            "/",
            post(handlers::post_category).get(handlers::get_categories),
        )
        .route(
            "/{id}",
            get(handlers::get_category)
                .put(handlers::put_category)
                .delete(handlers::delete_category),
        );

    let species = Router::new()
        .route(
            "/",
            post(handlers::post_species).get(handlers::get_all_species),
        )
        .route("/area", post(handlers::find_species_by_area))
        .route(
            "/{id}",
            get(handlers::get_species)
                .put(handlers::put_species)
                .delete(handlers::delete_species),
        );

    let animals = Router::new()
        .route("/", post(handlers::post_animal).get(handlers::get_animals))
        .route("/location", get(handlers::get_animals_by_location))
        .route(
            "/species/{species_name}",
            get(handlers::get_animals_by_species_name),
        )
        .route(
            "/{id}",
            get(handlers::get_animal)
                .put(handlers::put_animal)
                .delete(handlers::delete_animal),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/categories", categories)
        .nest("/species", species)
        .nest("/animals", animals)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
