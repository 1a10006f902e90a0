//! Species documents and their collection operations.
//!
//! A species references its category by ObjectId. List output embeds the
//! referenced category via an aggregation `$lookup` and strips the internal
//! revision field.

use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::db::{self, DbError, DbResult};
use super::category::{self, Category};
use super::geo::{self, Point, Polygon};

/// A species, located where its enclosure sits on the zoo map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub species_name: String,
    pub category: ObjectId,
    pub location: Point,
    pub image: String,
    #[serde(rename = "__v", skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

/// A species with its category embedded, as produced by the populate
/// aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulatedSpecies {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub species_name: String,
    pub category: Category,
    pub location: Point,
    pub image: String,
}

pub fn collection(db: &Database) -> Collection<Species> {
    db.collection(db::SPECIES)
}

/// Insert a new species and return it with its generated id.
///
/// The referenced category must exist.
pub async fn create(
    db: &Database,
    name: &str,
    category_id: &str,
    location: Point,
    image: &str,
) -> DbResult<Species> {
    super::validate_name("species_name", name)?;
    validate_location(&location)?;
    validate_image(image)?;

    let category = super::parse_object_id(category_id)?;
    ensure_category_exists(db, category).await?;

    let mut species = Species {
        id: None,
        species_name: name.to_string(),
        category,
        location,
        image: image.to_string(),
        version: Some(0),
    };
    let result = collection(db).insert_one(&species).await?;
    species.id = result.inserted_id.as_object_id();
    Ok(species)
}

/// Fetch all species without embedding.
pub async fn find_all(db: &Database) -> DbResult<Vec<Species>> {
    let cursor = collection(db).find(doc! {}).await?;
    Ok(cursor.try_collect().await?)
}

/// Fetch all species with their categories embedded and revision fields
/// stripped.
pub async fn find_populated(db: &Database) -> DbResult<Vec<PopulatedSpecies>> {
    let cursor = collection(db)
        .aggregate(populate_pipeline())
        .with_type::<PopulatedSpecies>()
        .await?;
    Ok(cursor.try_collect().await?)
}

/// Fetch one species by id.
pub async fn find_by_id(db: &Database, id: &str) -> DbResult<Option<Species>> {
    let oid = super::parse_object_id(id)?;
    Ok(collection(db).find_one(doc! { "_id": oid }).await?)
}

/// Fetch all species whose location lies within the polygon.
pub async fn find_by_area(db: &Database, polygon: &Polygon) -> DbResult<Vec<Species>> {
    let cursor = collection(db).find(geo::polygon_filter(polygon)).await?;
    Ok(cursor.try_collect().await?)
}

/// Apply the provided fields to a species and return the updated document,
/// or `None` when the id does not exist.
pub async fn update_by_id(
    db: &Database,
    id: &str,
    name: Option<&str>,
    category_id: Option<&str>,
    location: Option<Point>,
    image: Option<&str>,
) -> DbResult<Option<Species>> {
    let oid = super::parse_object_id(id)?;
    let set = build_update(name, category_id, location, image)?;
    if let Ok(category) = set.get_object_id("category") {
        ensure_category_exists(db, category).await?;
    }
    if set.is_empty() {
        return Ok(collection(db).find_one(doc! { "_id": oid }).await?);
    }

    Ok(collection(db)
        .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?)
}

/// Delete a species by id, returning its prior content.
pub async fn delete_by_id(db: &Database, id: &str) -> DbResult<Option<Species>> {
    let oid = super::parse_object_id(id)?;
    Ok(collection(db).find_one_and_delete(doc! { "_id": oid }).await?)
}

/// Check whether a species with the given id exists.
pub async fn exists(db: &Database, id: ObjectId) -> DbResult<bool> {
    Ok(collection(db).find_one(doc! { "_id": id }).await?.is_some())
}

async fn ensure_category_exists(db: &Database, category: ObjectId) -> DbResult<()> {
    if !category::exists(db, category).await? {
        return Err(DbError::validation(format!(
            "Referenced category {} does not exist",
            category.to_hex()
        )));
    }
    Ok(())
}

fn validate_location(location: &Point) -> DbResult<()> {
    if !location.is_valid() {
        return Err(DbError::validation("location must be a GeoJSON Point"));
    }
    Ok(())
}

fn validate_image(image: &str) -> DbResult<()> {
    if image.is_empty() {
        return Err(DbError::validation("image is required"));
    }
    Ok(())
}

fn build_update(
    name: Option<&str>,
    category_id: Option<&str>,
    location: Option<Point>,
    image: Option<&str>,
) -> DbResult<Document> {
    let mut set = Document::new();
    if let Some(name) = name {
        super::validate_name("species_name", name)?;
        set.insert("species_name", name);
    }
    if let Some(category_id) = category_id {
        set.insert("category", super::parse_object_id(category_id)?);
    }
    if let Some(location) = location {
        validate_location(&location)?;
        set.insert(
            "location",
            doc! { "type": "Point", "coordinates": [location.coordinates[0], location.coordinates[1]] },
        );
    }
    if let Some(image) = image {
        validate_image(image)?;
        set.insert("image", image);
    }
    Ok(set)
}

fn populate_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$lookup": {
                "from": db::CATEGORIES,
                "localField": "category",
                "foreignField": "_id",
                "as": "category",
            }
        },
        doc! { "$unwind": "$category" },
        doc! { "$project": { "__v": 0, "category.__v": 0 } },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let species = Species {
            id: Some(ObjectId::new()),
            species_name: "Lion".to_string(),
            category: ObjectId::new(),
            location: Point::new(24.9, 60.1),
            image: "https://example.com/lion.jpg".to_string(),
            version: Some(0),
        };

        let value = serde_json::to_value(&species).unwrap();
        assert_eq!(value["location"]["type"], "Point");
        let back: Species = serde_json::from_value(value).unwrap();
        assert_eq!(back, species);
    }

    #[test]
    fn test_build_update_collects_provided_fields() {
        let category = ObjectId::new();
        let set = build_update(
            Some("Tiger"),
            Some(&category.to_hex()),
            Some(Point::new(25.0, 61.0)),
            None,
        )
        .unwrap();

        assert_eq!(set.get_str("species_name").unwrap(), "Tiger");
        assert_eq!(set.get_object_id("category").unwrap(), category);
        let location = set.get_document("location").unwrap();
        assert_eq!(location.get_str("type").unwrap(), "Point");
        assert!(set.get_str("image").is_err());
    }

    #[test]
    fn test_build_update_rejects_bad_category_id() {
        assert!(build_update(None, Some("garbage"), None, None).is_err());
    }

    #[test]
    fn test_build_update_rejects_empty_image() {
        assert!(build_update(None, None, None, Some("")).is_err());
    }

    #[test]
    fn test_populate_pipeline_embeds_and_strips() {
        let pipeline = populate_pipeline();
        assert_eq!(pipeline.len(), 3);

        let lookup = pipeline[0].get_document("$lookup").unwrap();
        assert_eq!(lookup.get_str("from").unwrap(), "categories");
        assert_eq!(lookup.get_str("localField").unwrap(), "category");
        assert_eq!(lookup.get_str("foreignField").unwrap(), "_id");

        assert_eq!(pipeline[1].get_str("$unwind").unwrap(), "$category");

        let project = pipeline[2].get_document("$project").unwrap();
        assert_eq!(project.get_i32("__v").unwrap(), 0);
        assert_eq!(project.get_i32("category.__v").unwrap(), 0);
    }

    #[test]
    fn test_populated_species_deserializes_aggregation_output() {
        let category = ObjectId::new();
        let id = ObjectId::new();
        let value = serde_json::json!({
            "_id": { "$oid": id.to_hex() },
            "species_name": "Lion",
            "category": {
                "_id": { "$oid": category.to_hex() },
                "category_name": "Mammals",
            },
            "location": { "type": "Point", "coordinates": [24.9, 60.1] },
            "image": "https://example.com/lion.jpg",
        });

        let populated: PopulatedSpecies = serde_json::from_value(value).unwrap();
        assert_eq!(populated.id, id);
        assert_eq!(populated.category.id, Some(category));
        assert_eq!(populated.category.version, None);
    }
}
