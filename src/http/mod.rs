//! HTTP server module for the zoo API.
//!
//! This module provides an axum-based HTTP server exposing the zoo inventory
//! as a REST API. Handlers call the model operations directly; there is no
//! service layer in between.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and validation                         │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Models (models/)                                         │
//! │  - Document types and collection operations               │
//! │  - Geo filter construction                                │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  MongoDB (db/)                                            │
//! │  - Connection bootstrap, indexes, configuration           │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
