use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;

use crate::entities::vehicle::{self, VehicleCategory};
use crate::error::{AppError, AppResult};
use crate::utils::geo::within_radius;
use crate::AppState;

const DEFAULT_VEHICLE_RADIUS_KM: f64 = 5.0;

/// List all vehicles
pub async fn list_vehicles(State(state): State<AppState>) -> AppResult<Json<Vec<vehicle::Model>>> {
    let vehicles = vehicle::Entity::find().all(&state.db).await?;
    Ok(Json(vehicles))
}

/// Get vehicle by ID
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<vehicle::Model>> {
    let vehicle = vehicle::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    Ok(Json(vehicle))
}

/// List vehicles currently flagged as available
pub async fn list_available_vehicles(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<vehicle::Model>>> {
    let vehicles = vehicle::Entity::find()
        .filter(vehicle::Column::Availability.eq(true))
        .all(&state.db)
        .await?;

    Ok(Json(vehicles))
}

#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: Option<f64>,
}

/// Find available vehicles within a radius (km) of a location
pub async fn nearby_vehicles(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> AppResult<Json<Vec<vehicle::Model>>> {
    let radius = match params.radius {
        Some(r) if r > 0.0 => r,
        _ => DEFAULT_VEHICLE_RADIUS_KM,
    };

    let vehicles = vehicle::Entity::find()
        .filter(vehicle::Column::Availability.eq(true))
        .all(&state.db)
        .await?;

    let nearby: Vec<vehicle::Model> = vehicles
        .into_iter()
        .filter(|v| {
            within_radius(params.latitude, params.longitude, v.latitude, v.longitude, radius)
        })
        .collect();

    Ok(Json(nearby))
}

// ============ Admin Vehicle Management ============

#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub model: String,
    pub brand: String,
    pub category: VehicleCategory,
    pub latitude: f64,
    pub longitude: f64,
    pub hourly_price: f64,
    pub image_url: Option<String>,
    pub availability: Option<bool>,
}

/// Add a new vehicle (admin)
pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(payload): Json<CreateVehicleRequest>,
) -> AppResult<(StatusCode, Json<vehicle::Model>)> {
    if payload.hourly_price <= 0.0 {
        return Err(AppError::BadRequest(
            "Hourly price must be positive".to_string(),
        ));
    }

    let new_vehicle = vehicle::ActiveModel {
        model: Set(payload.model),
        brand: Set(payload.brand),
        category: Set(payload.category),
        latitude: Set(payload.latitude),
        longitude: Set(payload.longitude),
        hourly_price: Set(payload.hourly_price),
        image_url: Set(payload.image_url),
        availability: Set(payload.availability.unwrap_or(true)),
        ..Default::default()
    };

    let vehicle = new_vehicle.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Update a vehicle, replacing every field (admin)
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateVehicleRequest>,
) -> AppResult<Json<vehicle::Model>> {
    let vehicle = vehicle::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    if payload.hourly_price <= 0.0 {
        return Err(AppError::BadRequest(
            "Hourly price must be positive".to_string(),
        ));
    }

    let availability = payload.availability.unwrap_or(vehicle.availability);

    let mut active: vehicle::ActiveModel = vehicle.into();
    active.model = Set(payload.model);
    active.brand = Set(payload.brand);
    active.category = Set(payload.category);
    active.latitude = Set(payload.latitude);
    active.longitude = Set(payload.longitude);
    active.hourly_price = Set(payload.hourly_price);
    active.image_url = Set(payload.image_url);
    active.availability = Set(availability);

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub availability: bool,
}

/// Flip the availability flag (admin)
pub async fn update_vehicle_availability(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let vehicle = vehicle::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    let mut active: vehicle::ActiveModel = vehicle.into();
    active.availability = Set(payload.availability);
    active.update(&state.db).await?;

    Ok(Json(serde_json::json!({
        "message": "Vehicle availability updated successfully"
    })))
}

/// Delete a vehicle (admin)
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let result = vehicle::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Vehicle not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Vehicle deleted successfully" })))
}
