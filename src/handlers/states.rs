use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::Deserialize;

use crate::entities::{hidden_gem, state};
use crate::error::{AppError, AppResult};
use crate::AppState;

/// List all states ordered by name
pub async fn list_states(State(state): State<AppState>) -> AppResult<Json<Vec<state::Model>>> {
    let states = state::Entity::find()
        .order_by(state::Column::Name, Order::Asc)
        .all(&state.db)
        .await?;

    Ok(Json(states))
}

/// Get state by ID
pub async fn get_state(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<state::Model>> {
    let found = state::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("State not found with id: {}", id)))?;

    Ok(Json(found))
}

#[derive(Debug, Deserialize)]
pub struct StateSearchParams {
    pub name: Option<String>,
}

/// Search states by name, case-insensitive substring match
pub async fn search_states(
    State(state): State<AppState>,
    Query(params): Query<StateSearchParams>,
) -> AppResult<Json<Vec<state::Model>>> {
    let mut query = state::Entity::find();

    if let Some(name) = params.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        let pattern = format!("%{}%", name);
        query = query.filter(Expr::col((state::Entity, state::Column::Name)).ilike(pattern));
    }

    let states = query
        .order_by(state::Column::Name, Order::Asc)
        .all(&state.db)
        .await?;

    Ok(Json(states))
}

// ============ Admin State Management ============

#[derive(Debug, Deserialize)]
pub struct StateRequest {
    pub name: String,
}

async fn find_by_name(
    db: &sea_orm::DatabaseConnection,
    name: &str,
) -> AppResult<Option<state::Model>> {
    let found = state::Entity::find()
        .filter(Expr::col((state::Entity, state::Column::Name)).ilike(name.to_string()))
        .one(db)
        .await?;
    Ok(found)
}

/// Create a state (admin). Names are unique, case-insensitively.
pub async fn create_state(
    State(state): State<AppState>,
    Json(payload): Json<StateRequest>,
) -> AppResult<(StatusCode, Json<state::Model>)> {
    if find_by_name(&state.db, &payload.name).await?.is_some() {
        return Err(AppError::BadRequest(format!(
            "State with name '{}' already exists",
            payload.name
        )));
    }

    let new_state = state::ActiveModel {
        name: Set(payload.name),
        ..Default::default()
    };

    let created = new_state.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a state (admin)
pub async fn update_state(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<StateRequest>,
) -> AppResult<Json<state::Model>> {
    let found = state::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("State not found with id: {}", id)))?;

    // The name must stay unique, but renaming to itself is fine
    if let Some(other) = find_by_name(&state.db, &payload.name).await? {
        if other.id != id {
            return Err(AppError::BadRequest(format!(
                "State with name '{}' already exists",
                payload.name
            )));
        }
    }

    let mut active: state::ActiveModel = found.into();
    active.name = Set(payload.name);

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

/// Delete a state (admin); refused while hidden gems still reference it
pub async fn delete_state(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    state::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("State not found with id: {}", id)))?;

    let gem_count = hidden_gem::Entity::find()
        .filter(hidden_gem::Column::StateId.eq(id))
        .count(&state.db)
        .await?;

    if gem_count > 0 {
        return Err(AppError::BadRequest(
            "Cannot delete state with associated hidden gems. Remove or reassign them first."
                .to_string(),
        ));
    }

    state::Entity::delete_by_id(id).exec(&state.db).await?;
    Ok(Json(serde_json::json!({ "message": "State deleted" })))
}
