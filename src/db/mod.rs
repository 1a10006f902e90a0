//! MongoDB connection bootstrap and index management.
//!
//! The application talks to a single MongoDB database holding three
//! collections (`categories`, `species`, `animals`). This module owns the
//! connection configuration, client construction and the indexes the
//! collections rely on; the document types and their operations live in
//! [`crate::models`].

pub mod config;
pub mod error;

pub use config::MongoConfig;
pub use error::{DbError, DbResult};

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};

/// Collection name for categories.
pub const CATEGORIES: &str = "categories";
/// Collection name for species.
pub const SPECIES: &str = "species";
/// Collection name for animals.
pub const ANIMALS: &str = "animals";

/// Build a client from the configuration and return a handle to the
/// configured database.
///
/// The driver connects lazily; the first operation performs the actual
/// server handshake.
pub async fn connect(config: &MongoConfig) -> DbResult<Database> {
    let mut options = ClientOptions::parse(&config.uri).await?;
    options.app_name = Some(config.app_name.clone());
    options.server_selection_timeout = Some(Duration::from_secs(config.selection_timeout_sec));

    let client = Client::with_options(options)?;
    Ok(client.database(&config.database))
}

/// Create the indexes the collections depend on: unique name indexes for all
/// three resource types and `2dsphere` indexes on the location fields used by
/// the `$geoWithin` queries.
pub async fn ensure_indexes(db: &Database) -> DbResult<()> {
    let unique = IndexOptions::builder().unique(true).build();

    db.collection::<mongodb::bson::Document>(CATEGORIES)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "category_name": 1 })
                .options(unique.clone())
                .build(),
        )
        .await?;

    let species = db.collection::<mongodb::bson::Document>(SPECIES);
    species
        .create_index(
            IndexModel::builder()
                .keys(doc! { "species_name": 1 })
                .options(unique.clone())
                .build(),
        )
        .await?;
    species
        .create_index(
            IndexModel::builder()
                .keys(doc! { "location": "2dsphere" })
                .build(),
        )
        .await?;

    let animals = db.collection::<mongodb::bson::Document>(ANIMALS);
    animals
        .create_index(
            IndexModel::builder()
                .keys(doc! { "animal_name": 1 })
                .options(unique)
                .build(),
        )
        .await?;
    animals
        .create_index(
            IndexModel::builder()
                .keys(doc! { "location": "2dsphere" })
                .build(),
        )
        .await?;

    Ok(())
}

/// Check that the database answers a `ping` command.
pub async fn health_check(db: &Database) -> DbResult<bool> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(true)
}
