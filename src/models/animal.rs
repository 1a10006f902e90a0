//! Animal documents and their collection operations.
//!
//! An animal references its species by ObjectId. List output embeds the
//! species, and through it the category, via a two-stage `$lookup`.

use chrono::{DateTime, SecondsFormat, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::db::{self, DbError, DbResult};
use super::geo::{self, BoundingBox, Point};
use super::species::{self, PopulatedSpecies};

/// An individual animal living in the zoo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub animal_name: String,
    pub species: ObjectId,
    pub birthdate: DateTime<Utc>,
    pub location: Point,
    #[serde(rename = "__v", skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

/// An animal with its species and category embedded, as produced by the
/// populate aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulatedAnimal {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub animal_name: String,
    pub species: PopulatedSpecies,
    pub birthdate: DateTime<Utc>,
    pub location: Point,
}

pub fn collection(db: &Database) -> Collection<Animal> {
    db.collection(db::ANIMALS)
}

/// Insert a new animal and return it with its generated id.
///
/// The referenced species must exist.
pub async fn create(
    db: &Database,
    name: &str,
    species_id: &str,
    birthdate: DateTime<Utc>,
    location: Point,
) -> DbResult<Animal> {
    super::validate_name("animal_name", name)?;
    validate_location(&location)?;

    let species = super::parse_object_id(species_id)?;
    ensure_species_exists(db, species).await?;

    let mut animal = Animal {
        id: None,
        animal_name: name.to_string(),
        species,
        birthdate,
        location,
        version: Some(0),
    };
    let result = collection(db).insert_one(&animal).await?;
    animal.id = result.inserted_id.as_object_id();
    Ok(animal)
}

/// Fetch all animals without embedding.
pub async fn find_all(db: &Database) -> DbResult<Vec<Animal>> {
    let cursor = collection(db).find(doc! {}).await?;
    Ok(cursor.try_collect().await?)
}

/// Fetch all animals with species and category embedded and revision fields
/// stripped.
pub async fn find_populated(db: &Database) -> DbResult<Vec<PopulatedAnimal>> {
    let cursor = collection(db)
        .aggregate(populate_pipeline())
        .with_type::<PopulatedAnimal>()
        .await?;
    Ok(cursor.try_collect().await?)
}

/// Fetch one animal by id.
pub async fn find_by_id(db: &Database, id: &str) -> DbResult<Option<Animal>> {
    let oid = super::parse_object_id(id)?;
    Ok(collection(db).find_one(doc! { "_id": oid }).await?)
}

/// Fetch all animals whose location lies within the bounding box.
pub async fn find_by_location(db: &Database, bounds: &BoundingBox) -> DbResult<Vec<Animal>> {
    let cursor = collection(db).find(geo::box_filter(bounds)).await?;
    Ok(cursor.try_collect().await?)
}

/// Fetch the populated animals whose species has the given name.
pub async fn find_by_species_name(
    db: &Database,
    species_name: &str,
) -> DbResult<Vec<PopulatedAnimal>> {
    let mut pipeline = populate_pipeline();
    pipeline.push(doc! { "$match": { "species.species_name": species_name } });

    let cursor = collection(db)
        .aggregate(pipeline)
        .with_type::<PopulatedAnimal>()
        .await?;
    Ok(cursor.try_collect().await?)
}

/// Apply the provided fields to an animal and return the updated document,
/// or `None` when the id does not exist.
pub async fn update_by_id(
    db: &Database,
    id: &str,
    name: Option<&str>,
    species_id: Option<&str>,
    birthdate: Option<DateTime<Utc>>,
    location: Option<Point>,
) -> DbResult<Option<Animal>> {
    let oid = super::parse_object_id(id)?;
    let set = build_update(name, species_id, birthdate, location)?;
    if let Ok(species) = set.get_object_id("species") {
        ensure_species_exists(db, species).await?;
    }
    if set.is_empty() {
        return Ok(collection(db).find_one(doc! { "_id": oid }).await?);
    }

    Ok(collection(db)
        .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?)
}

/// Delete an animal by id, returning its prior content.
pub async fn delete_by_id(db: &Database, id: &str) -> DbResult<Option<Animal>> {
    let oid = super::parse_object_id(id)?;
    Ok(collection(db).find_one_and_delete(doc! { "_id": oid }).await?)
}

async fn ensure_species_exists(db: &Database, species: ObjectId) -> DbResult<()> {
    if !species::exists(db, species).await? {
        return Err(DbError::validation(format!(
            "Referenced species {} does not exist",
            species.to_hex()
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

fn build_update(
    name: Option<&str>,
    species_id: Option<&str>,
    birthdate: Option<DateTime<Utc>>,
    location: Option<Point>,
) -> DbResult<Document> {
    let mut set = Document::new();
    if let Some(name) = name {
        super::validate_name("animal_name", name)?;
        set.insert("animal_name", name);
    }
    if let Some(species_id) = species_id {
        set.insert("species", super::parse_object_id(species_id)?);
    }
    if let Some(birthdate) = birthdate {
        // Same RFC 3339 rendering serde uses on insert.
        set.insert(
            "birthdate",
            birthdate.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        );
    }
    if let Some(location) = location {
        validate_location(&location)?;
        set.insert(
            "location",
            doc! { "type": "Point", "coordinates": [location.coordinates[0], location.coordinates[1]] },
        );
    }
    Ok(set)
}

/// Embed species, then the species' category, then drop the scratch field
/// and the revision markers.
fn populate_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$lookup": {
                "from": db::SPECIES,
                "localField": "species",
                "foreignField": "_id",
                "as": "species",
            }
        },
        doc! { "$unwind": "$species" },
        doc! {
            "$lookup": {
                "from": db::CATEGORIES,
                "localField": "species.category",
                "foreignField": "_id",
                "as": "species_category",
            }
        },
        doc! { "$unwind": "$species_category" },
        doc! { "$addFields": { "species.category": "$species_category" } },
        doc! {
            "$project": {
                "species_category": 0,
                "__v": 0,
                "species.__v": 0,
                "species.category.__v": 0,
            }
        },
    ]
}

#[cfg(test)]
#[path = "animal_tests.rs"]
mod animal_tests;
