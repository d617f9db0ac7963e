use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use serde::{Deserialize, Serialize};

use crate::entities::{hidden_gem, hidden_gem_bookmark};
use crate::error::{AppError, AppResult};
use crate::handlers::gems::{gem_responses, GemResponse};
use crate::utils::jwt::Claims;
use crate::utils::pagination::{Page, DEFAULT_PAGE_SIZE};
use crate::utils::sort::{sort_direction, BookmarkSortField};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BookmarkQueryParams {
    /// `-1` disables pagination and returns the full list
    pub page: Option<i64>,
    pub size: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub hidden_gem: GemResponse,
    pub bookmarked_at: DateTime<Utc>,
}

fn apply_bookmark_sort(
    query: sea_orm::Select<hidden_gem_bookmark::Entity>,
    field: BookmarkSortField,
    order: Order,
) -> sea_orm::Select<hidden_gem_bookmark::Entity> {
    match field {
        BookmarkSortField::BookmarkedAt => {
            query.order_by(hidden_gem_bookmark::Column::BookmarkedAt, order)
        }
        BookmarkSortField::GemName => query
            .join(
                JoinType::InnerJoin,
                hidden_gem_bookmark::Relation::HiddenGem.def(),
            )
            .order_by(hidden_gem::Column::Name, order),
        BookmarkSortField::GemCreatedAt => query
            .join(
                JoinType::InnerJoin,
                hidden_gem_bookmark::Relation::HiddenGem.def(),
            )
            .order_by(hidden_gem::Column::CreatedAt, order),
    }
}

/// Resolve gem details for a batch of bookmarks, preserving their order
async fn bookmark_responses(
    db: &DatabaseConnection,
    bookmarks: Vec<hidden_gem_bookmark::Model>,
) -> AppResult<Vec<BookmarkResponse>> {
    let gem_ids: Vec<i32> = bookmarks.iter().map(|b| b.hidden_gem_id).collect();

    let gems = if gem_ids.is_empty() {
        Vec::new()
    } else {
        hidden_gem::Entity::find()
            .filter(hidden_gem::Column::Id.is_in(gem_ids))
            .all(db)
            .await?
    };
    let gem_details = gem_responses(db, gems).await?;

    let responses = bookmarks
        .into_iter()
        .filter_map(|b| {
            gem_details
                .iter()
                .position(|g| g.id == b.hidden_gem_id)
                .map(|idx| (b, idx))
        })
        .map(|(b, idx)| BookmarkResponse {
            hidden_gem: gem_details[idx].clone(),
            bookmarked_at: b.bookmarked_at.with_timezone(&Utc),
        })
        .collect();

    Ok(responses)
}

/// List the authenticated user's bookmarks. `page=-1` returns everything.
pub async fn list_bookmarks(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<BookmarkQueryParams>,
) -> AppResult<Json<Page<BookmarkResponse>>> {
    let field = BookmarkSortField::from_param(params.sort_by.as_deref());
    let order = sort_direction(params.sort_direction.as_deref());

    let query = apply_bookmark_sort(
        hidden_gem_bookmark::Entity::find()
            .filter(hidden_gem_bookmark::Column::UserId.eq(claims.sub)),
        field,
        order,
    );

    if params.page == Some(-1) {
        let bookmarks = query.all(&state.db).await?;
        let total = bookmarks.len() as u64;
        let items = bookmark_responses(&state.db, bookmarks).await?;

        return Ok(Json(Page {
            items,
            page: 0,
            size: total.max(1),
            total_items: total,
            total_pages: if total == 0 { 0 } else { 1 },
        }));
    }

    let page = params.page.unwrap_or(0).max(0) as u64;
    let size = params.size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    let paginator = query.paginate(&state.db, size);
    let totals = paginator.num_items_and_pages().await?;
    let bookmarks = paginator.fetch_page(page).await?;
    let items = bookmark_responses(&state.db, bookmarks).await?;

    Ok(Json(Page {
        items,
        page,
        size,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    }))
}

/// Number of bookmarks the authenticated user holds
pub async fn bookmark_count(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<serde_json::Value>> {
    let count = hidden_gem_bookmark::Entity::find()
        .filter(hidden_gem_bookmark::Column::UserId.eq(claims.sub))
        .count(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "bookmark_count": count })))
}

async fn find_bookmark(
    db: &DatabaseConnection,
    user_id: i32,
    gem_id: i32,
) -> AppResult<Option<hidden_gem_bookmark::Model>> {
    let found = hidden_gem_bookmark::Entity::find_by_id((user_id, gem_id))
        .one(db)
        .await?;
    Ok(found)
}

async fn require_gem(db: &DatabaseConnection, gem_id: i32) -> AppResult<()> {
    hidden_gem::Entity::find_by_id(gem_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hidden gem not found with id: {}", gem_id)))?;
    Ok(())
}

/// Whether the authenticated user has bookmarked a gem
pub async fn check_bookmark(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(gem_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let bookmarked = find_bookmark(&state.db, claims.sub, gem_id).await?.is_some();
    Ok(Json(serde_json::json!({ "bookmarked": bookmarked })))
}

/// Bookmark a gem for the authenticated user
pub async fn add_bookmark(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(gem_id): Path<i32>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    require_gem(&state.db, gem_id).await?;

    if find_bookmark(&state.db, claims.sub, gem_id).await?.is_some() {
        return Err(AppError::BadRequest(
            "Hidden gem is already bookmarked".to_string(),
        ));
    }

    let bookmark = hidden_gem_bookmark::ActiveModel {
        user_id: Set(claims.sub),
        hidden_gem_id: Set(gem_id),
        bookmarked_at: Set(Utc::now().into()),
    };
    bookmark.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "bookmarked": true })),
    ))
}

/// Remove a bookmark for the authenticated user
pub async fn remove_bookmark(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(gem_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let bookmark = find_bookmark(&state.db, claims.sub, gem_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Bookmark not found".to_string()))?;

    let active: hidden_gem_bookmark::ActiveModel = bookmark.into();
    active.delete(&state.db).await?;

    Ok(Json(serde_json::json!({ "bookmarked": false })))
}

/// Flip a bookmark on or off, returning the resulting state
pub async fn toggle_bookmark(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(gem_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    require_gem(&state.db, gem_id).await?;

    match find_bookmark(&state.db, claims.sub, gem_id).await? {
        Some(existing) => {
            let active: hidden_gem_bookmark::ActiveModel = existing.into();
            active.delete(&state.db).await?;
            Ok(Json(serde_json::json!({ "bookmarked": false })))
        }
        None => {
            let bookmark = hidden_gem_bookmark::ActiveModel {
                user_id: Set(claims.sub),
                hidden_gem_id: Set(gem_id),
                bookmarked_at: Set(Utc::now().into()),
            };
            bookmark.insert(&state.db).await?;
            Ok(Json(serde_json::json!({ "bookmarked": true })))
        }
    }
}

/// Public count of how many users bookmarked a gem
pub async fn gem_bookmark_count(
    State(state): State<AppState>,
    Path(gem_id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    require_gem(&state.db, gem_id).await?;

    let count = hidden_gem_bookmark::Entity::find()
        .filter(hidden_gem_bookmark::Column::HiddenGemId.eq(gem_id))
        .count(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "bookmark_count": count })))
}
