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

use crate::entities::{adventure_type, hidden_gem_adventure_type};
use crate::error::{AppError, AppResult};
use crate::AppState;

/// List all adventure types ordered by name
pub async fn list_adventure_types(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<adventure_type::Model>>> {
    let types = adventure_type::Entity::find()
        .order_by(adventure_type::Column::Name, Order::Asc)
        .all(&state.db)
        .await?;

    Ok(Json(types))
}

/// Get adventure type by ID
pub async fn get_adventure_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<adventure_type::Model>> {
    let found = adventure_type::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Adventure type not found with id: {}", id)))?;

    Ok(Json(found))
}

#[derive(Debug, Deserialize)]
pub struct TypeSearchParams {
    pub name: Option<String>,
}

/// Search adventure types by name, case-insensitive substring match
pub async fn search_adventure_types(
    State(state): State<AppState>,
    Query(params): Query<TypeSearchParams>,
) -> AppResult<Json<Vec<adventure_type::Model>>> {
    let mut query = adventure_type::Entity::find();

    if let Some(name) = params.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        let pattern = format!("%{}%", name);
        query = query.filter(
            Expr::col((adventure_type::Entity, adventure_type::Column::Name)).ilike(pattern),
        );
    }

    let types = query
        .order_by(adventure_type::Column::Name, Order::Asc)
        .all(&state.db)
        .await?;

    Ok(Json(types))
}

// ============ Admin Adventure Type Management ============

#[derive(Debug, Deserialize)]
pub struct AdventureTypeRequest {
    pub name: String,
}

async fn find_by_name(
    db: &sea_orm::DatabaseConnection,
    name: &str,
) -> AppResult<Option<adventure_type::Model>> {
    let found = adventure_type::Entity::find()
        .filter(
            Expr::col((adventure_type::Entity, adventure_type::Column::Name))
                .ilike(name.to_string()),
        )
        .one(db)
        .await?;
    Ok(found)
}

/// Create an adventure type (admin). Names are unique, case-insensitively.
pub async fn create_adventure_type(
    State(state): State<AppState>,
    Json(payload): Json<AdventureTypeRequest>,
) -> AppResult<(StatusCode, Json<adventure_type::Model>)> {
    if find_by_name(&state.db, &payload.name).await?.is_some() {
        return Err(AppError::BadRequest(format!(
            "Adventure type with name '{}' already exists",
            payload.name
        )));
    }

    let new_type = adventure_type::ActiveModel {
        name: Set(payload.name),
        ..Default::default()
    };

    let created = new_type.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an adventure type (admin)
pub async fn update_adventure_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AdventureTypeRequest>,
) -> AppResult<Json<adventure_type::Model>> {
    let found = adventure_type::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Adventure type not found with id: {}", id)))?;

    if let Some(other) = find_by_name(&state.db, &payload.name).await? {
        if other.id != id {
            return Err(AppError::BadRequest(format!(
                "Adventure type with name '{}' already exists",
                payload.name
            )));
        }
    }

    let mut active: adventure_type::ActiveModel = found.into();
    active.name = Set(payload.name);

    let updated = active.update(&state.db).await?;
    Ok(Json(updated))
}

/// Delete an adventure type (admin); refused while hidden gems still use it
pub async fn delete_adventure_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    adventure_type::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Adventure type not found with id: {}", id)))?;

    let usage_count = hidden_gem_adventure_type::Entity::find()
        .filter(hidden_gem_adventure_type::Column::AdventureTypeId.eq(id))
        .count(&state.db)
        .await?;

    if usage_count > 0 {
        return Err(AppError::BadRequest(
            "Cannot delete adventure type that is assigned to hidden gems. Unassign it first."
                .to_string(),
        ));
    }

    adventure_type::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    Ok(Json(serde_json::json!({ "message": "Adventure type deleted" })))
}
