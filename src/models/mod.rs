//! Document types and collection operations.
//!
//! One module per resource, each holding the serde document struct and the
//! operations the HTTP handlers call directly: there is no service or
//! repository layer in between. The [`geo`] module carries the GeoJSON types
//! shared by species and animals.

pub mod animal;
pub mod category;
pub mod geo;
pub mod species;

pub use animal::{Animal, PopulatedAnimal};
pub use category::Category;
pub use geo::{BoundingBox, Point, Polygon};
pub use species::{PopulatedSpecies, Species};

use mongodb::bson::oid::ObjectId;

use crate::db::{DbError, DbResult};

/// Parse a path-parameter id into an ObjectId.
///
/// Malformed ids surface as query errors, which the HTTP layer reports as
/// generic failures rather than bad requests.
pub(crate) fn parse_object_id(id: &str) -> DbResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|e| {
        DbError::query(format!("Cast to ObjectId failed for value \"{}\": {}", id, e))
    })
}

/// Names are required and at least two characters long.
pub(crate) fn validate_name(field: &str, value: &str) -> DbResult<()> {
    if value.chars().count() < 2 {
        return Err(DbError::validation(format!(
            "{} must be at least 2 characters",
            field
        )));
    }
    Ok(())
}
