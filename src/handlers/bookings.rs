use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::entities::booking::{self, BookingStatus};
use crate::entities::user::{self, UserRole};
use crate::entities::vehicle;
use crate::error::{AppError, AppResult};
use crate::utils::jwt::Claims;
use crate::AppState;

/// Inclusive overlap test between an existing booking's range and a requested
/// range. Touching boundaries count as a conflict.
fn ranges_overlap(
    existing_start: DateTime<Utc>,
    existing_end: DateTime<Utc>,
    requested_start: DateTime<Utc>,
    requested_end: DateTime<Utc>,
) -> bool {
    existing_start <= requested_end && existing_end >= requested_start
}

/// Total price for a rental: whole hours times the hourly rate, with a
/// 1-hour minimum. A zero or negative duration is not rejected; it floors
/// to the minimum.
fn calculate_total_price(hourly_price: f64, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let hours = (end - start).num_hours().max(1);
    hourly_price * hours as f64
}

/// Whether any non-cancelled booking for the vehicle overlaps [start, end]
async fn is_vehicle_booked_in_range(
    db: &DatabaseConnection,
    vehicle_id: i32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<bool> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::VehicleId.eq(vehicle_id))
        .filter(booking::Column::Status.ne(BookingStatus::Cancelled))
        .all(db)
        .await?;

    Ok(bookings.iter().any(|b| {
        ranges_overlap(
            b.start_time.with_timezone(&Utc),
            b.end_time.with_timezone(&Utc),
            start,
            end,
        )
    }))
}

// ============ Booking Lifecycle ============

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub vehicle_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Create a booking for the authenticated user
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<booking::Model>)> {
    // Check the vehicle is free for the requested time period
    let booked = is_vehicle_booked_in_range(
        &state.db,
        payload.vehicle_id,
        payload.start_time,
        payload.end_time,
    )
    .await?;

    if booked {
        return Err(AppError::BadRequest(
            "Vehicle is not available for the requested time period".to_string(),
        ));
    }

    let vehicle = vehicle::Entity::find_by_id(payload.vehicle_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

    if !vehicle.availability {
        return Err(AppError::BadRequest(
            "Vehicle is not available for booking".to_string(),
        ));
    }

    let total_price =
        calculate_total_price(vehicle.hourly_price, payload.start_time, payload.end_time);

    let new_booking = booking::ActiveModel {
        user_id: Set(claims.sub),
        vehicle_id: Set(payload.vehicle_id),
        start_time: Set(payload.start_time.into()),
        end_time: Set(payload.end_time.into()),
        total_price: Set(total_price),
        status: Set(BookingStatus::Pending),
        ..Default::default()
    };

    let booking = new_booking.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List the authenticated user's bookings
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<booking::Model>>> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::UserId.eq(claims.sub))
        .all(&state.db)
        .await?;

    Ok(Json(bookings))
}

/// Get a single booking; owners and admins only
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> AppResult<Json<booking::Model>> {
    let booking = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.user_id != claims.sub && claims.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "You are not authorized to view this booking".to_string(),
        ));
    }

    Ok(Json(booking))
}

/// Cancel a booking; owners and admins only
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> AppResult<Json<booking::Model>> {
    let booking = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.user_id != claims.sub && claims.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "You are not authorized to cancel this booking".to_string(),
        ));
    }

    let mut active: booking::ActiveModel = booking.into();
    active.status = Set(BookingStatus::Cancelled);
    let cancelled = active.update(&state.db).await?;

    Ok(Json(cancelled))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub vehicle_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// Check whether a vehicle is free for a time range
pub async fn check_availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<Json<AvailabilityResponse>> {
    let booked = is_vehicle_booked_in_range(
        &state.db,
        params.vehicle_id,
        params.start_time,
        params.end_time,
    )
    .await?;

    Ok(Json(AvailabilityResponse { available: !booked }))
}

// ============ Admin Booking Management ============

#[derive(Debug, Serialize)]
pub struct BookingInfo {
    pub id: i32,
    pub vehicle_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// List all bookings (admin)
pub async fn list_all_bookings(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookingInfo>>> {
    let bookings = booking::Entity::find().all(&state.db).await?;
    let users = user::Entity::find().all(&state.db).await?;

    let responses: Vec<BookingInfo> = bookings
        .into_iter()
        .map(|b| {
            let user = users.iter().find(|u| u.id == b.user_id);
            BookingInfo {
                id: b.id,
                vehicle_id: b.vehicle_id,
                user_name: user.map(|u| u.name.clone()).unwrap_or_default(),
                user_email: user.map(|u| u.email.clone()).unwrap_or_default(),
                start_time: b.start_time.with_timezone(&Utc),
                end_time: b.end_time.with_timezone(&Utc),
                total_price: b.total_price,
                status: b.status,
                created_at: b.created_at.with_timezone(&Utc),
            }
        })
        .collect();

    Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}

/// Overwrite a booking's status (admin). No transition graph is enforced.
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<booking::Model>> {
    let booking = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let mut active: booking::ActiveModel = booking.into();
    active.status = Set(payload.status);
    let updated = active.update(&state.db).await?;

    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, min, 0).unwrap()
    }

    #[test]
    fn test_half_hour_charges_one_hour_minimum() {
        assert_eq!(calculate_total_price(10.0, at(10, 0), at(10, 30)), 10.0);
    }

    #[test]
    fn test_two_hours_charges_twice_hourly() {
        assert_eq!(calculate_total_price(10.0, at(10, 0), at(12, 0)), 20.0);
    }

    #[test]
    fn test_partial_hours_truncate() {
        // 2h 59m is still charged as 2 hours
        assert_eq!(calculate_total_price(10.0, at(10, 0), at(12, 59)), 20.0);
    }

    #[test]
    fn test_zero_or_negative_duration_floors_to_minimum() {
        assert_eq!(calculate_total_price(10.0, at(10, 0), at(10, 0)), 10.0);
        assert_eq!(calculate_total_price(10.0, at(12, 0), at(10, 0)), 10.0);
    }

    #[test]
    fn test_overlapping_ranges_conflict() {
        assert!(ranges_overlap(at(10, 0), at(12, 0), at(11, 0), at(13, 0)));
        assert!(ranges_overlap(at(11, 0), at(13, 0), at(10, 0), at(12, 0)));
        // A range fully inside another
        assert!(ranges_overlap(at(10, 0), at(14, 0), at(11, 0), at(12, 0)));
    }

    #[test]
    fn test_touching_boundaries_conflict() {
        assert!(ranges_overlap(at(10, 0), at(12, 0), at(12, 0), at(14, 0)));
        assert!(ranges_overlap(at(12, 0), at(14, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn test_disjoint_ranges_do_not_conflict() {
        assert!(!ranges_overlap(at(10, 0), at(11, 0), at(12, 0), at(14, 0)));
        assert!(!ranges_overlap(at(12, 0), at(14, 0), at(10, 0), at(11, 0)));
    }
}
