//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to a single
//! model operation; errors funnel through [`AppError`] for uniform
//! serialization.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use super::dto::{
    AnimalResponse, CategoryResponse, CreateAnimalRequest, CreateCategoryRequest,
    CreateSpeciesRequest, HealthResponse, LocationQuery, MessageResponse, PopulatedAnimalResponse,
    PopulatedSpeciesResponse, SpeciesResponse, UpdateAnimalRequest, UpdateCategoryRequest,
    UpdateSpeciesRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::db;
use crate::models::geo::{self, BoundingBox, Polygon};
use crate::models::{animal, category, species};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for create handlers, which also carry a status code.
pub type CreatedResult<T> = Result<(StatusCode, Json<MessageResponse<T>>), AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the database
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = match db::health_check(&state.db).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database,
    }))
}

// =============================================================================
// Category CRUD
// =============================================================================

/// POST /categories
pub async fn post_category(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> CreatedResult<CategoryResponse> {
    let saved = category::create(&state.db, &body.category_name).await?;
    info!(category = %saved.category_name, "created category");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Category created successfully",
            saved.into(),
        )),
    ))
}

/// GET /categories
pub async fn get_categories(
    State(state): State<AppState>,
) -> HandlerResult<Vec<CategoryResponse>> {
    let categories = category::find_all(&state.db).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<CategoryResponse> {
    let found = category::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
    Ok(Json(found.into()))
}

/// PUT /categories/{id}
pub async fn put_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCategoryRequest>,
) -> HandlerResult<MessageResponse<CategoryResponse>> {
    let updated = category::update_by_id(&state.db, &id, body.category_name.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
    Ok(Json(MessageResponse::new("Category updated", updated.into())))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<MessageResponse<CategoryResponse>> {
    let deleted = category::delete_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
    info!(category = %deleted.category_name, "deleted category");
    Ok(Json(MessageResponse::new("Category deleted", deleted.into())))
}

// =============================================================================
// Species CRUD
// =============================================================================

/// POST /species
pub async fn post_species(
    State(state): State<AppState>,
    Json(body): Json<CreateSpeciesRequest>,
) -> CreatedResult<SpeciesResponse> {
    let saved = species::create(
        &state.db,
        &body.species_name,
        &body.category,
        body.location,
        &body.image,
    )
    .await?;
    info!(species = %saved.species_name, "created species");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Species created successfully",
            saved.into(),
        )),
    ))
}

/// GET /species
///
/// Lists all species with their categories embedded.
pub async fn get_all_species(
    State(state): State<AppState>,
) -> HandlerResult<Vec<PopulatedSpeciesResponse>> {
    let found = species::find_populated(&state.db).await?;
    Ok(Json(found.into_iter().map(Into::into).collect()))
}

/// GET /species/{id}
pub async fn get_species(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<SpeciesResponse> {
    let found = species::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Species not found".to_string()))?;
    Ok(Json(found.into()))
}

/// PUT /species/{id}
pub async fn put_species(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateSpeciesRequest>,
) -> HandlerResult<MessageResponse<SpeciesResponse>> {
    let updated = species::update_by_id(
        &state.db,
        &id,
        body.species_name.as_deref(),
        body.category.as_deref(),
        body.location,
        body.image.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Species not found".to_string()))?;
    Ok(Json(MessageResponse::new("Species updated", updated.into())))
}

/// DELETE /species/{id}
pub async fn delete_species(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<MessageResponse<SpeciesResponse>> {
    let deleted = species::delete_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Species not found".to_string()))?;
    info!(species = %deleted.species_name, "deleted species");
    Ok(Json(MessageResponse::new("Species deleted", deleted.into())))
}

// =============================================================================
// Geo Queries
// =============================================================================

/// POST /species/area
///
/// Finds all species within the area described by the GeoJSON polygon body.
pub async fn find_species_by_area(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> HandlerResult<Vec<SpeciesResponse>> {
    let polygon = Polygon::from_value(&body).map_err(AppError::BadRequest)?;
    debug!(rings = polygon.coordinates.len(), "species area query");

    let found = species::find_by_area(&state.db, &polygon).await?;
    Ok(Json(found.into_iter().map(Into::into).collect()))
}

/// GET /animals/location?topRight=lat,lon&bottomLeft=lat,lon
///
/// Finds all animals within the bounding box. Corners arrive in `lat,lon`
/// order and are swapped to the database's `[lon, lat]` order.
pub async fn get_animals_by_location(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> HandlerResult<Vec<AnimalResponse>> {
    let (Some(top_right), Some(bottom_left)) = (query.top_right, query.bottom_left) else {
        return Err(AppError::BadRequest("Missing query parameters".to_string()));
    };

    let bounds = BoundingBox {
        bottom_left: geo::parse_corner(&bottom_left).map_err(AppError::BadRequest)?,
        top_right: geo::parse_corner(&top_right).map_err(AppError::BadRequest)?,
    };
    debug!(?bounds, "animal box query");

    let found = animal::find_by_location(&state.db, &bounds).await?;
    Ok(Json(found.into_iter().map(Into::into).collect()))
}

// =============================================================================
// Animal CRUD
// =============================================================================

/// POST /animals
pub async fn post_animal(
    State(state): State<AppState>,
    Json(body): Json<CreateAnimalRequest>,
) -> CreatedResult<AnimalResponse> {
    let saved = animal::create(
        &state.db,
        &body.animal_name,
        &body.species,
        body.birthdate,
        body.location,
    )
    .await?;
    info!(animal = %saved.animal_name, "created animal");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Animal created successfully",
            saved.into(),
        )),
    ))
}

/// GET /animals
///
/// Lists all animals with species and category embedded.
pub async fn get_animals(
    State(state): State<AppState>,
) -> HandlerResult<Vec<PopulatedAnimalResponse>> {
    let found = animal::find_populated(&state.db).await?;
    Ok(Json(found.into_iter().map(Into::into).collect()))
}

/// GET /animals/{id}
pub async fn get_animal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<AnimalResponse> {
    let found = animal::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Animal not found".to_string()))?;
    Ok(Json(found.into()))
}

/// GET /animals/species/{species_name}
///
/// Lists the populated animals whose species has the given name.
pub async fn get_animals_by_species_name(
    State(state): State<AppState>,
    Path(species_name): Path<String>,
) -> HandlerResult<Vec<PopulatedAnimalResponse>> {
    let found = animal::find_by_species_name(&state.db, &species_name).await?;
    Ok(Json(found.into_iter().map(Into::into).collect()))
}

/// PUT /animals/{id}
pub async fn put_animal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateAnimalRequest>,
) -> HandlerResult<MessageResponse<AnimalResponse>> {
    let updated = animal::update_by_id(
        &state.db,
        &id,
        body.animal_name.as_deref(),
        body.species.as_deref(),
        body.birthdate,
        body.location,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Animal not found".to_string()))?;
    Ok(Json(MessageResponse::new("Animal updated", updated.into())))
}

/// DELETE /animals/{id}
pub async fn delete_animal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<MessageResponse<AnimalResponse>> {
    let deleted = animal::delete_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Animal not found".to_string()))?;
    info!(animal = %deleted.animal_name, "deleted animal");
    Ok(Json(MessageResponse::new("Animal deleted", deleted.into())))
}
