//! # Zoo API
//!
//! REST API backend for a zoo inventory system.
//!
//! Three related resources — Category, Species, Animal — are stored in
//! MongoDB and exposed over a CRUD HTTP interface, including geospatial
//! lookups on animal and species locations backed by the database's
//! `$geoWithin` operator.
//!
//! ## Architecture
//!
//! The crate is organized into three logical modules:
//!
//! - [`models`]: document types and the collection operations handlers call
//! - [`db`]: MongoDB connection bootstrap, indexes and configuration
//! - [`http`]: axum-based HTTP server, router and request handlers

pub mod db;
pub mod http;
pub mod models;
