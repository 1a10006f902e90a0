//! Category documents and their collection operations.

use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::db::{self, DbResult};

/// A zoo animal category, e.g. "Mammals".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub category_name: String,
    #[serde(rename = "__v", skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

pub fn collection(db: &Database) -> Collection<Category> {
    db.collection(db::CATEGORIES)
}

/// Insert a new category and return it with its generated id.
pub async fn create(db: &Database, name: &str) -> DbResult<Category> {
    super::validate_name("category_name", name)?;

    let mut category = Category {
        id: None,
        category_name: name.to_string(),
        version: Some(0),
    };
    let result = collection(db).insert_one(&category).await?;
    category.id = result.inserted_id.as_object_id();
    Ok(category)
}

/// Fetch all categories.
pub async fn find_all(db: &Database) -> DbResult<Vec<Category>> {
    let cursor = collection(db).find(doc! {}).await?;
    Ok(cursor.try_collect().await?)
}

/// Fetch one category by id.
pub async fn find_by_id(db: &Database, id: &str) -> DbResult<Option<Category>> {
    let oid = super::parse_object_id(id)?;
    Ok(collection(db).find_one(doc! { "_id": oid }).await?)
}

/// Apply the provided fields to a category and return the updated document,
/// or `None` when the id does not exist.
pub async fn update_by_id(
    db: &Database,
    id: &str,
    name: Option<&str>,
) -> DbResult<Option<Category>> {
    let oid = super::parse_object_id(id)?;
    let set = build_update(name)?;
    if set.is_empty() {
        return Ok(collection(db).find_one(doc! { "_id": oid }).await?);
    }

    Ok(collection(db)
        .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?)
}

/// Delete a category by id, returning its prior content.
pub async fn delete_by_id(db: &Database, id: &str) -> DbResult<Option<Category>> {
    let oid = super::parse_object_id(id)?;
    Ok(collection(db).find_one_and_delete(doc! { "_id": oid }).await?)
}

/// Check whether a category with the given id exists.
pub async fn exists(db: &Database, id: ObjectId) -> DbResult<bool> {
    Ok(collection(db).find_one(doc! { "_id": id }).await?.is_some())
}

fn build_update(name: Option<&str>) -> DbResult<Document> {
    let mut set = Document::new();
    if let Some(name) = name {
        super::validate_name("category_name", name)?;
        set.insert("category_name", name);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_skips_absent_id_and_version() {
        let category = Category {
            id: None,
            category_name: "Mammals".to_string(),
            version: None,
        };
        let value = serde_json::to_value(&category).unwrap();
        assert!(value.get("_id").is_none());
        assert!(value.get("__v").is_none());
        assert_eq!(value["category_name"], "Mammals");
    }

    #[test]
    fn test_serde_renames_id_and_version() {
        let oid = ObjectId::new();
        let category = Category {
            id: Some(oid),
            category_name: "Birds".to_string(),
            version: Some(0),
        };
        let value = serde_json::to_value(&category).unwrap();
        assert!(value.get("_id").is_some());
        assert_eq!(value["__v"], 0);

        let back: Category = serde_json::from_value(value).unwrap();
        assert_eq!(back, category);
    }

    #[test]
    fn test_build_update_with_name() {
        let set = build_update(Some("Reptiles")).unwrap();
        assert_eq!(set.get_str("category_name").unwrap(), "Reptiles");
    }

    #[test]
    fn test_build_update_empty_when_no_fields() {
        let set = build_update(None).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_build_update_rejects_short_name() {
        assert!(build_update(Some("x")).is_err());
    }
}
