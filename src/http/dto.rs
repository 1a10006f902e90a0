//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies mirror the wire format (references arrive as hex id
//! strings), response DTOs render ObjectIds as hex strings so nothing
//! BSON-flavored leaks into the JSON surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::geo::Point;
use crate::models::{Animal, Category, PopulatedAnimal, PopulatedSpecies, Species};

/// Response envelope for mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse<T> {
    /// Message about the operation
    pub message: String,
    /// The affected resource
    pub data: T,
}

impl<T> MessageResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Database connection status
    pub database: String,
}

// =============================================================================
// Requests
// =============================================================================

/// Request body for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub category_name: String,
}

/// Request body for updating a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub category_name: Option<String>,
}

/// Request body for creating a species. The category reference is a hex id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpeciesRequest {
    pub species_name: String,
    pub category: String,
    pub location: Point,
    pub image: String,
}

/// Request body for updating a species.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSpeciesRequest {
    #[serde(default)]
    pub species_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<Point>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Request body for creating an animal. The species reference is a hex id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnimalRequest {
    pub animal_name: String,
    pub species: String,
    pub birthdate: DateTime<Utc>,
    pub location: Point,
}

/// Request body for updating an animal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAnimalRequest {
    #[serde(default)]
    pub animal_name: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub birthdate: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: Option<Point>,
}

/// Query parameters for the animal bounding-box endpoint. Both corners are
/// `lat,lon` strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationQuery {
    #[serde(default, rename = "topRight")]
    pub top_right: Option<String>,
    #[serde(default, rename = "bottomLeft")]
    pub bottom_left: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

/// Category as rendered over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: String,
    pub category_name: String,
}

/// Species with its category reference as a hex id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesResponse {
    pub id: String,
    pub species_name: String,
    pub category: String,
    pub location: Point,
    pub image: String,
}

/// Species with its category embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulatedSpeciesResponse {
    pub id: String,
    pub species_name: String,
    pub category: CategoryResponse,
    pub location: Point,
    pub image: String,
}

/// Animal with its species reference as a hex id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalResponse {
    pub id: String,
    pub animal_name: String,
    pub species: String,
    pub birthdate: DateTime<Utc>,
    pub location: Point,
}

/// Animal with its species and category embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulatedAnimalResponse {
    pub id: String,
    pub animal_name: String,
    pub species: PopulatedSpeciesResponse,
    pub birthdate: DateTime<Utc>,
    pub location: Point,
}

impl From<Category> for CategoryResponse {
    fn from(model: Category) -> Self {
        Self {
            id: model.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            category_name: model.category_name,
        }
    }
}

impl From<Species> for SpeciesResponse {
    fn from(model: Species) -> Self {
        Self {
            id: model.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            species_name: model.species_name,
            category: model.category.to_hex(),
            location: model.location,
            image: model.image,
        }
    }
}

impl From<PopulatedSpecies> for PopulatedSpeciesResponse {
    fn from(model: PopulatedSpecies) -> Self {
        Self {
            id: model.id.to_hex(),
            species_name: model.species_name,
            category: model.category.into(),
            location: model.location,
            image: model.image,
        }
    }
}

impl From<Animal> for AnimalResponse {
    fn from(model: Animal) -> Self {
        Self {
            id: model.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            animal_name: model.animal_name,
            species: model.species.to_hex(),
            birthdate: model.birthdate,
            location: model.location,
        }
    }
}

impl From<PopulatedAnimal> for PopulatedAnimalResponse {
    fn from(model: PopulatedAnimal) -> Self {
        Self {
            id: model.id.to_hex(),
            animal_name: model.animal_name,
            species: model.species.into(),
            birthdate: model.birthdate,
            location: model.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_message_response_shape() {
        let response = MessageResponse::new(
            "Category created successfully",
            CategoryResponse {
                id: "0".repeat(24),
                category_name: "Mammals".to_string(),
            },
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["message"], "Category created successfully");
        assert_eq!(value["data"]["category_name"], "Mammals");
    }

    #[test]
    fn test_category_response_renders_hex_id() {
        let oid = ObjectId::new();
        let response: CategoryResponse = Category {
            id: Some(oid),
            category_name: "Birds".to_string(),
            version: Some(0),
        }
        .into();

        assert_eq!(response.id, oid.to_hex());
        assert_eq!(response.id.len(), 24);

        // The internal revision marker never reaches the wire format.
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("__v").is_none());
    }

    #[test]
    fn test_species_response_renders_reference_as_hex() {
        let category = ObjectId::new();
        let response: SpeciesResponse = Species {
            id: Some(ObjectId::new()),
            species_name: "Lion".to_string(),
            category,
            location: Point::new(24.9, 60.1),
            image: "https://example.com/lion.jpg".to_string(),
            version: Some(0),
        }
        .into();

        assert_eq!(response.category, category.to_hex());
    }

    #[test]
    fn test_populated_animal_response_nests_category() {
        let animal = PopulatedAnimal {
            id: ObjectId::new(),
            animal_name: "Leo".to_string(),
            species: PopulatedSpecies {
                id: ObjectId::new(),
                species_name: "Lion".to_string(),
                category: Category {
                    id: Some(ObjectId::new()),
                    category_name: "Mammals".to_string(),
                    version: None,
                },
                location: Point::new(24.9, 60.1),
                image: "https://example.com/lion.jpg".to_string(),
            },
            birthdate: Utc::now(),
            location: Point::new(24.95, 60.17),
        };

        let response: PopulatedAnimalResponse = animal.into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["species"]["category"]["category_name"], "Mammals");
    }

    #[test]
    fn test_location_query_uses_camel_case_parameters() {
        let query: LocationQuery =
            serde_json::from_str(r#"{"topRight": "61,25", "bottomLeft": "60,24"}"#).unwrap();
        assert_eq!(query.top_right.as_deref(), Some("61,25"));
        assert_eq!(query.bottom_left.as_deref(), Some("60,24"));

        let empty: LocationQuery = serde_json::from_str("{}").unwrap();
        assert!(empty.top_right.is_none());
        assert!(empty.bottom_left.is_none());
    }

    #[test]
    fn test_update_requests_default_to_no_fields() {
        let update: UpdateSpeciesRequest = serde_json::from_str("{}").unwrap();
        assert!(update.species_name.is_none());
        assert!(update.category.is_none());
        assert!(update.location.is_none());
        assert!(update.image.is_none());
    }
}
