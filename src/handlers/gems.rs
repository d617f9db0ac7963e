use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr, Query as SeaQuery};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use serde::{Deserialize, Serialize};

use crate::entities::hidden_gem::{self, ImageUrls};
use crate::entities::{adventure_type, hidden_gem_adventure_type, state};
use crate::error::{AppError, AppResult};
use crate::utils::geo::within_radius;
use crate::utils::pagination::{Page, DEFAULT_PAGE_SIZE};
use crate::utils::sort::{sort_direction, GemSortField};
use crate::AppState;

const DEFAULT_GEM_RADIUS_KM: f64 = 50.0;

#[derive(Debug, Deserialize)]
pub struct GemQueryParams {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub state_id: Option<i32>,
    /// Comma-separated adventure type ids, e.g. `1,4,7`
    pub adventure_type_ids: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateInfo {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GemResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub state: StateInfo,
    pub adventure_types: Vec<adventure_type::Model>,
    pub latitude: f64,
    pub longitude: f64,
    pub nearest_city: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub difficulty_level: Option<String>,
    pub cost_range: Option<String>,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parse a comma-separated id list; empty or unparseable input counts as
/// "no filter"
fn parse_id_list(raw: Option<&str>) -> Option<Vec<i32>> {
    let ids: Vec<i32> = raw?
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect();

    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

/// An empty or whitespace-only search term counts as "no filter"
fn normalize_term(raw: Option<&str>) -> Option<String> {
    let term = raw?.trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_string())
    }
}

/// Build the combined filter: each absent filter passes through, the text
/// term matches name OR description case-insensitively, and the adventure
/// type filter is membership in the join table.
fn gem_filter(
    state_id: Option<i32>,
    adventure_type_ids: Option<&Vec<i32>>,
    term: Option<&str>,
) -> Condition {
    let mut cond = Condition::all();

    if let Some(sid) = state_id {
        cond = cond.add(hidden_gem::Column::StateId.eq(sid));
    }

    if let Some(ids) = adventure_type_ids {
        let sub = SeaQuery::select()
            .column(hidden_gem_adventure_type::Column::HiddenGemId)
            .from(hidden_gem_adventure_type::Entity)
            .and_where(hidden_gem_adventure_type::Column::AdventureTypeId.is_in(ids.clone()))
            .to_owned();
        cond = cond.add(hidden_gem::Column::Id.in_subquery(sub));
    }

    if let Some(term) = term {
        let pattern = format!("%{}%", term);
        cond = cond.add(
            Condition::any()
                .add(
                    Expr::col((hidden_gem::Entity, hidden_gem::Column::Name))
                        .ilike(pattern.clone()),
                )
                .add(
                    Expr::col((hidden_gem::Entity, hidden_gem::Column::Description))
                        .ilike(pattern),
                ),
        );
    }

    cond
}

fn apply_gem_sort(
    query: sea_orm::Select<hidden_gem::Entity>,
    field: GemSortField,
    order: Order,
) -> sea_orm::Select<hidden_gem::Entity> {
    match field {
        GemSortField::Id => query.order_by(hidden_gem::Column::Id, order),
        GemSortField::Name => query.order_by(hidden_gem::Column::Name, order),
        GemSortField::CreatedAt => query.order_by(hidden_gem::Column::CreatedAt, order),
        GemSortField::UpdatedAt => query.order_by(hidden_gem::Column::UpdatedAt, order),
        GemSortField::StateName => query
            .join(JoinType::InnerJoin, hidden_gem::Relation::State.def())
            .order_by(state::Column::Name, order),
        GemSortField::NearestCity => query.order_by(hidden_gem::Column::NearestCity, order),
        GemSortField::BestTimeToVisit => {
            query.order_by(hidden_gem::Column::BestTimeToVisit, order)
        }
        GemSortField::DifficultyLevel => {
            query.order_by(hidden_gem::Column::DifficultyLevel, order)
        }
    }
}

/// Run the paginated gem query and assemble response pages
async fn fetch_gem_page(
    db: &DatabaseConnection,
    query: sea_orm::Select<hidden_gem::Entity>,
    page: u64,
    size: u64,
) -> AppResult<Page<GemResponse>> {
    let size = size.max(1);
    let paginator = query.paginate(db, size);
    let totals = paginator.num_items_and_pages().await?;
    let gems = paginator.fetch_page(page).await?;
    let items = gem_responses(db, gems).await?;

    Ok(Page {
        items,
        page,
        size,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

/// Resolve state and adventure type details for a batch of gems
pub async fn gem_responses(
    db: &DatabaseConnection,
    gems: Vec<hidden_gem::Model>,
) -> AppResult<Vec<GemResponse>> {
    let gem_ids: Vec<i32> = gems.iter().map(|g| g.id).collect();

    let states = state::Entity::find().all(db).await?;
    let types = adventure_type::Entity::find().all(db).await?;
    let links = if gem_ids.is_empty() {
        Vec::new()
    } else {
        hidden_gem_adventure_type::Entity::find()
            .filter(hidden_gem_adventure_type::Column::HiddenGemId.is_in(gem_ids))
            .all(db)
            .await?
    };

    let responses = gems
        .into_iter()
        .map(|g| {
            let gem_state = states.iter().find(|s| s.id == g.state_id);
            let adventure_types: Vec<adventure_type::Model> = links
                .iter()
                .filter(|l| l.hidden_gem_id == g.id)
                .filter_map(|l| types.iter().find(|t| t.id == l.adventure_type_id).cloned())
                .collect();

            GemResponse {
                id: g.id,
                name: g.name,
                description: g.description,
                state: StateInfo {
                    id: g.state_id,
                    name: gem_state.map(|s| s.name.clone()).unwrap_or_default(),
                },
                adventure_types,
                latitude: g.latitude,
                longitude: g.longitude,
                nearest_city: g.nearest_city,
                best_time_to_visit: g.best_time_to_visit,
                difficulty_level: g.difficulty_level,
                cost_range: g.cost_range,
                image_urls: g.image_urls.0,
                created_at: g.created_at.with_timezone(&Utc),
                updated_at: g.updated_at.with_timezone(&Utc),
            }
        })
        .collect();

    Ok(responses)
}

/// List hidden gems with pagination and sorting
pub async fn list_gems(
    State(state): State<AppState>,
    Query(params): Query<GemQueryParams>,
) -> AppResult<Json<Page<GemResponse>>> {
    let field = GemSortField::from_param(params.sort_by.as_deref());
    let order = sort_direction(params.sort_direction.as_deref());

    let query = apply_gem_sort(hidden_gem::Entity::find(), field, order);

    let page = fetch_gem_page(
        &state.db,
        query,
        params.page.unwrap_or(0),
        params.size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .await?;

    Ok(Json(page))
}

/// Search hidden gems with optional state, adventure type, and text filters.
/// Absent filters pass through; with no filters at all this is a plain
/// paginated fetch.
pub async fn search_gems(
    State(state): State<AppState>,
    Query(params): Query<GemQueryParams>,
) -> AppResult<Json<Page<GemResponse>>> {
    let adventure_type_ids = parse_id_list(params.adventure_type_ids.as_deref());
    let term = normalize_term(params.search.as_deref());

    let field = GemSortField::from_param(params.sort_by.as_deref());
    let order = sort_direction(params.sort_direction.as_deref());

    let mut query = hidden_gem::Entity::find();
    if params.state_id.is_some() || adventure_type_ids.is_some() || term.is_some() {
        query = query.filter(gem_filter(
            params.state_id,
            adventure_type_ids.as_ref(),
            term.as_deref(),
        ));
    }
    let query = apply_gem_sort(query, field, order);

    let page = fetch_gem_page(
        &state.db,
        query,
        params.page.unwrap_or(0),
        params.size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .await?;

    Ok(Json(page))
}

/// Get hidden gem by ID
pub async fn get_gem(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<GemResponse>> {
    let gem = hidden_gem::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hidden gem not found with id: {}", id)))?;

    let mut responses = gem_responses(&state.db, vec![gem]).await?;
    Ok(Json(responses.remove(0)))
}

/// List gems belonging to a state, paginated
pub async fn gems_by_state(
    State(state): State<AppState>,
    Path(state_id): Path<i32>,
    Query(params): Query<GemQueryParams>,
) -> AppResult<Json<Page<GemResponse>>> {
    let field = GemSortField::from_param(params.sort_by.as_deref());
    let order = sort_direction(params.sort_direction.as_deref());

    let query = apply_gem_sort(
        hidden_gem::Entity::find().filter(hidden_gem::Column::StateId.eq(state_id)),
        field,
        order,
    );

    let page = fetch_gem_page(
        &state.db,
        query,
        params.page.unwrap_or(0),
        params.size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .await?;

    Ok(Json(page))
}

/// List gems tagged with any of the given adventure types, paginated
pub async fn gems_by_adventure_types(
    State(state): State<AppState>,
    Query(params): Query<GemQueryParams>,
) -> AppResult<Json<Page<GemResponse>>> {
    let ids = parse_id_list(params.adventure_type_ids.as_deref()).ok_or_else(|| {
        AppError::BadRequest("adventure_type_ids must contain at least one id".to_string())
    })?;

    let field = GemSortField::from_param(params.sort_by.as_deref());
    let order = sort_direction(params.sort_direction.as_deref());

    let query = apply_gem_sort(
        hidden_gem::Entity::find().filter(gem_filter(None, Some(&ids), None)),
        field,
        order,
    );

    let page = fetch_gem_page(
        &state.db,
        query,
        params.page.unwrap_or(0),
        params.size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .await?;

    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub struct NearbyGemParams {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: Option<f64>,
}

/// Find gems within a radius (km) of a location; unpaginated
pub async fn nearby_gems(
    State(state): State<AppState>,
    Query(params): Query<NearbyGemParams>,
) -> AppResult<Json<Vec<GemResponse>>> {
    let radius = match params.radius {
        Some(r) if r > 0.0 => r,
        _ => DEFAULT_GEM_RADIUS_KM,
    };

    let gems = hidden_gem::Entity::find().all(&state.db).await?;
    let nearby: Vec<hidden_gem::Model> = gems
        .into_iter()
        .filter(|g| within_radius(params.latitude, params.longitude, g.latitude, g.longitude, radius))
        .collect();

    let responses = gem_responses(&state.db, nearby).await?;
    Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
pub struct GemStatsParams {
    pub state_id: Option<i32>,
    pub adventure_type_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct GemStatsResponse {
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_state: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_adventure_type: Option<u64>,
}

/// Gem count statistics, optionally narrowed to a state or adventure type
pub async fn gem_stats(
    State(state): State<AppState>,
    Query(params): Query<GemStatsParams>,
) -> AppResult<Json<GemStatsResponse>> {
    let total = hidden_gem::Entity::find().count(&state.db).await?;

    let by_state = match params.state_id {
        Some(sid) => Some(
            hidden_gem::Entity::find()
                .filter(hidden_gem::Column::StateId.eq(sid))
                .count(&state.db)
                .await?,
        ),
        None => None,
    };

    let by_adventure_type = match params.adventure_type_id {
        Some(tid) => Some(
            hidden_gem_adventure_type::Entity::find()
                .filter(hidden_gem_adventure_type::Column::AdventureTypeId.eq(tid))
                .count(&state.db)
                .await?,
        ),
        None => None,
    };

    Ok(Json(GemStatsResponse {
        total,
        by_state,
        by_adventure_type,
    }))
}

// ============ Admin Gem Management ============

#[derive(Debug, Deserialize)]
pub struct CreateGemRequest {
    pub name: String,
    pub description: String,
    pub state_id: i32,
    pub adventure_type_ids: Option<Vec<i32>>,
    pub latitude: f64,
    pub longitude: f64,
    pub nearest_city: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub difficulty_level: Option<String>,
    pub cost_range: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

async fn validate_adventure_types(db: &DatabaseConnection, ids: &[i32]) -> AppResult<()> {
    for id in ids {
        adventure_type::Entity::find_by_id(*id)
            .one(db)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("Adventure type not found with id: {}", id))
            })?;
    }
    Ok(())
}

async fn replace_gem_links(db: &DatabaseConnection, gem_id: i32, type_ids: &[i32]) -> AppResult<()> {
    hidden_gem_adventure_type::Entity::delete_many()
        .filter(hidden_gem_adventure_type::Column::HiddenGemId.eq(gem_id))
        .exec(db)
        .await?;

    if !type_ids.is_empty() {
        let links: Vec<hidden_gem_adventure_type::ActiveModel> = type_ids
            .iter()
            .map(|tid| hidden_gem_adventure_type::ActiveModel {
                hidden_gem_id: Set(gem_id),
                adventure_type_id: Set(*tid),
            })
            .collect();

        hidden_gem_adventure_type::Entity::insert_many(links)
            .exec(db)
            .await?;
    }

    Ok(())
}

/// Create a hidden gem (admin)
pub async fn create_gem(
    State(state): State<AppState>,
    Json(payload): Json<CreateGemRequest>,
) -> AppResult<(StatusCode, Json<GemResponse>)> {
    state::Entity::find_by_id(payload.state_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!("State not found with id: {}", payload.state_id))
        })?;

    let type_ids = payload.adventure_type_ids.unwrap_or_default();
    validate_adventure_types(&state.db, &type_ids).await?;

    let new_gem = hidden_gem::ActiveModel {
        name: Set(payload.name),
        description: Set(payload.description),
        state_id: Set(payload.state_id),
        latitude: Set(payload.latitude),
        longitude: Set(payload.longitude),
        nearest_city: Set(payload.nearest_city),
        best_time_to_visit: Set(payload.best_time_to_visit),
        difficulty_level: Set(payload.difficulty_level),
        cost_range: Set(payload.cost_range),
        image_urls: Set(ImageUrls(payload.image_urls.unwrap_or_default())),
        ..Default::default()
    };

    let gem = new_gem.insert(&state.db).await?;
    replace_gem_links(&state.db, gem.id, &type_ids).await?;

    let mut responses = gem_responses(&state.db, vec![gem]).await?;
    Ok((StatusCode::CREATED, Json(responses.remove(0))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateGemRequest {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub nearest_city: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub difficulty_level: Option<String>,
    pub cost_range: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub state_id: Option<i32>,
    pub adventure_type_ids: Option<Vec<i32>>,
}

/// Update a hidden gem (admin). Basic fields are replaced; state and
/// adventure types only when provided.
pub async fn update_gem(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateGemRequest>,
) -> AppResult<Json<GemResponse>> {
    let gem = hidden_gem::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Hidden gem not found with id: {}", id)))?;

    if let Some(sid) = payload.state_id {
        state::Entity::find_by_id(sid)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::BadRequest(format!("State not found with id: {}", sid)))?;
    }

    if let Some(ref type_ids) = payload.adventure_type_ids {
        if !type_ids.is_empty() {
            validate_adventure_types(&state.db, type_ids).await?;
        }
    }

    let image_urls = payload
        .image_urls
        .map(ImageUrls)
        .unwrap_or_else(|| gem.image_urls.clone());

    let mut active: hidden_gem::ActiveModel = gem.into();
    active.name = Set(payload.name);
    active.description = Set(payload.description);
    active.latitude = Set(payload.latitude);
    active.longitude = Set(payload.longitude);
    active.nearest_city = Set(payload.nearest_city);
    active.best_time_to_visit = Set(payload.best_time_to_visit);
    active.difficulty_level = Set(payload.difficulty_level);
    active.cost_range = Set(payload.cost_range);
    active.image_urls = Set(image_urls);
    if let Some(sid) = payload.state_id {
        active.state_id = Set(sid);
    }
    active.updated_at = Set(Utc::now().into());

    let updated = active.update(&state.db).await?;

    if let Some(type_ids) = payload.adventure_type_ids {
        if !type_ids.is_empty() {
            replace_gem_links(&state.db, updated.id, &type_ids).await?;
        }
    }

    let mut responses = gem_responses(&state.db, vec![updated]).await?;
    Ok(Json(responses.remove(0)))
}

/// Delete a hidden gem (admin)
pub async fn delete_gem(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let result = hidden_gem::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!(
            "Hidden gem not found with id: {}",
            id
        )));
    }

    Ok(Json(serde_json::json!({ "message": "Hidden gem deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_id_list_is_no_filter() {
        assert_eq!(parse_id_list(None), None);
        assert_eq!(parse_id_list(Some("")), None);
        assert_eq!(parse_id_list(Some(" , ")), None);
    }

    #[test]
    fn test_id_list_parses_and_skips_garbage() {
        assert_eq!(parse_id_list(Some("1,4,7")), Some(vec![1, 4, 7]));
        assert_eq!(parse_id_list(Some(" 2 , x, 5")), Some(vec![2, 5]));
    }

    #[test]
    fn test_blank_search_term_is_no_filter() {
        assert_eq!(normalize_term(None), None);
        assert_eq!(normalize_term(Some("")), None);
        assert_eq!(normalize_term(Some("   ")), None);
        assert_eq!(normalize_term(Some(" waterfall ")), Some("waterfall".to_string()));
    }
}
