use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::server::{
    config::AppState,
    models::recipe::{NumericFilter, RecipeFilter, RecipeSummary},
    services::recipe_database::RecipeDatabaseService,
};

/// Page sizes the API accepts; anything else is rejected as invalid.
const ALLOWED_LIMITS: [i64; 3] = [10, 50, 100];

#[derive(Debug, Deserialize)]
pub struct ListRecipesParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRecipesParams {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<String>,
    pub total_time: Option<String>,
    pub calories: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

type ApiError = (StatusCode, Json<Value>);

fn invalid_params() -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Invalid query parameters" })),
    )
}

fn internal_error(err: anyhow::Error) -> ApiError {
    error!("Recipe query failed: {:?}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("Recipe query failed: {}", err) })),
    )
}

/// Query parameters arrive as raw strings so that a non-integer value maps to
/// the API's 400 instead of the extractor's default rejection.
fn parse_param(raw: Option<&String>, default: i64) -> Option<i64> {
    match raw {
        Some(raw) => raw.trim().parse().ok(),
        None => Some(default),
    }
}

/// Handles GET /api/recipes. Paginated listing, top-rated first.
///
/// `limit` must be one of 10, 50, 100 and `page` must fall inside the
/// table's page range; violations return 400.
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> Result<Json<Value>, ApiError> {
    let page = parse_param(params.page.as_ref(), 1).ok_or_else(invalid_params)?;
    let limit = parse_param(params.limit.as_ref(), 10).ok_or_else(invalid_params)?;

    if !ALLOWED_LIMITS.contains(&limit) {
        return Err(invalid_params());
    }

    let db = RecipeDatabaseService::new(state.pool.clone());
    let total = db.count_recipes().await.map_err(internal_error)?;

    let total_pages = (total + limit - 1) / limit;
    if page < 1 || page > total_pages {
        return Err(invalid_params());
    }

    let cache_key = format!("data:{}:{}", limit, page);
    if let Some(cached) = state.cache.get(&cache_key).await {
        info!("Recipe page served from cache");
        return Ok(Json(cached));
    }

    let offset = (page - 1) * limit;
    let recipes = db
        .list_by_rating(limit, offset)
        .await
        .map_err(internal_error)?;
    let data: Vec<RecipeSummary> = recipes.into_iter().map(Into::into).collect();

    let response = json!({
        "page": page,
        "limit": limit,
        "total": total,
        "data": data,
    });
    state.cache.set(cache_key, response.clone()).await;

    Ok(Json(response))
}

/// Handles GET /api/recipes/search. Filtered listing.
///
/// `title` and `cuisine` are substring matches; `rating`, `total_time` and
/// `calories` take comparison conditions like `>=4.5`. A condition that does
/// not parse leaves its filter unapplied.
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchRecipesParams>,
) -> Result<Json<Value>, ApiError> {
    let page = parse_param(params.page.as_ref(), 1).ok_or_else(invalid_params)?;
    let limit = parse_param(params.limit.as_ref(), 10).ok_or_else(invalid_params)?;

    if !ALLOWED_LIMITS.contains(&limit) {
        return Err(invalid_params());
    }

    // A calories condition must carry digits; a digit-less value is a caller
    // error. Digits without an operator fall through with the filter
    // unapplied, like any other unparsable condition.
    let calories = match params.calories.as_deref().filter(|s| !s.is_empty()) {
        Some(condition) => {
            if !condition.contains(|c: char| c.is_ascii_digit()) {
                return Err(invalid_params());
            }
            NumericFilter::parse(condition)
        }
        None => None,
    };

    let filter = RecipeFilter {
        title: params.title.clone().filter(|s| !s.is_empty()),
        cuisine: params.cuisine.clone().filter(|s| !s.is_empty()),
        rating: params.rating.as_deref().and_then(NumericFilter::parse),
        total_time: params.total_time.as_deref().and_then(NumericFilter::parse),
        calories,
    };

    let cache_key = format!(
        "data:{}:{}:{}:{}:{}:{}:{}",
        page,
        limit,
        params.title.as_deref().unwrap_or(""),
        params.cuisine.as_deref().unwrap_or(""),
        params.rating.as_deref().unwrap_or(""),
        params.total_time.as_deref().unwrap_or(""),
        params.calories.as_deref().unwrap_or(""),
    );
    if let Some(cached) = state.cache.get(&cache_key).await {
        info!("Search results served from cache");
        return Ok(Json(cached));
    }

    let db = RecipeDatabaseService::new(state.pool.clone());
    let total = db.count_matching(&filter).await.map_err(internal_error)?;

    let offset = ((page - 1) * limit).max(0);
    let recipes = db
        .search(&filter, limit, offset)
        .await
        .map_err(internal_error)?;
    let data: Vec<RecipeSummary> = recipes.into_iter().map(Into::into).collect();

    let response = json!({
        "data": data,
        "total": total,
    });
    state.cache.set(cache_key, response.clone()).await;

    Ok(Json(response))
}
