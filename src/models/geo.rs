//! GeoJSON types and `$geoWithin` filter construction.
//!
//! Locations are stored as GeoJSON points in `[longitude, latitude]` order.
//! The public API accepts bounding-box corners as `lat,lon` text, so corner
//! parsing swaps the axes before anything reaches the database.

use mongodb::bson::{doc, Bson, Document};
use serde::{Deserialize, Serialize};

/// A GeoJSON point. Coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(rename = "type")]
    pub point_type: String,
    pub coordinates: [f64; 2],
}

impl Point {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            point_type: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }

    /// A point is valid when its `type` tag is `"Point"`.
    pub fn is_valid(&self) -> bool {
        self.point_type == "Point"
    }
}

/// A GeoJSON polygon: an array of linear rings, each ring an array of
/// `[longitude, latitude]` positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(rename = "type")]
    pub polygon_type: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    /// Validate a loosely-typed request body as a GeoJSON polygon.
    ///
    /// The body must carry `type: "Polygon"` and a non-empty `coordinates`
    /// array of rings; anything else is rejected with a message suitable for
    /// a 400 response.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, String> {
        let polygon_type = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| "Missing polygon type".to_string())?;
        if polygon_type != "Polygon" {
            return Err(format!("Expected type 'Polygon', got '{}'", polygon_type));
        }

        if value.get("coordinates").is_none() {
            return Err("Missing polygon coordinates".to_string());
        }

        let polygon: Polygon = serde_json::from_value(value.clone())
            .map_err(|e| format!("Invalid polygon coordinates: {}", e))?;
        if polygon.coordinates.is_empty() || polygon.coordinates.iter().any(|r| r.is_empty()) {
            return Err("Polygon coordinates must not be empty".to_string());
        }

        Ok(polygon)
    }
}

/// A rectangular query region with corners in `[longitude, latitude]` order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub bottom_left: [f64; 2],
    pub top_right: [f64; 2],
}

/// Parse a `lat,lon` corner into database order `[lon, lat]`.
pub fn parse_corner(text: &str) -> Result<[f64; 2], String> {
    const FORMAT_ERROR: &str = "Invalid coordinate format, use lat,lon format";

    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 2 {
        return Err(FORMAT_ERROR.to_string());
    }

    let lat: f64 = parts[0].trim().parse().map_err(|_| FORMAT_ERROR.to_string())?;
    let lon: f64 = parts[1].trim().parse().map_err(|_| FORMAT_ERROR.to_string())?;
    if lat.is_nan() || lon.is_nan() {
        return Err(FORMAT_ERROR.to_string());
    }

    Ok([lon, lat])
}

/// Filter matching documents whose `location` falls inside the box.
pub fn box_filter(bounds: &BoundingBox) -> Document {
    doc! {
        "location": {
            "$geoWithin": {
                "$box": [
                    [bounds.bottom_left[0], bounds.bottom_left[1]],
                    [bounds.top_right[0], bounds.top_right[1]],
                ],
            },
        },
    }
}

/// Filter matching documents whose `location` falls inside the polygon.
pub fn polygon_filter(polygon: &Polygon) -> Document {
    let rings: Vec<Bson> = polygon
        .coordinates
        .iter()
        .map(|ring| {
            Bson::Array(
                ring.iter()
                    .map(|position| {
                        Bson::Array(vec![Bson::Double(position[0]), Bson::Double(position[1])])
                    })
                    .collect(),
            )
        })
        .collect();

    doc! {
        "location": {
            "$geoWithin": {
                "$geometry": {
                    "type": "Polygon",
                    "coordinates": rings,
                },
            },
        },
    }
}

#[cfg(test)]
#[path = "geo_tests.rs"]
mod geo_tests;
