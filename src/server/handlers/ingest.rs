use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::server::{config::AppState, services::ingest::RecipeIngestService};

/// Handles GET /load_data. Ingests the configured recipes JSON dump into the
/// database. Safe to call repeatedly; duplicates are skipped.
pub async fn load_data(
    State(state): State<AppState>,
) -> Result<String, (StatusCode, Json<Value>)> {
    let ingest = RecipeIngestService::new(state.pool.clone());

    let report = ingest
        .load_from_file(&state.recipes_file)
        .await
        .map_err(|e| {
            error!("Failed to load recipe data: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Failed to load recipe data: {}", e) })),
            )
        })?;

    info!(
        "Loaded {} of {} recipes from {}",
        report.inserted,
        report.scanned,
        state.recipes_file.display()
    );

    Ok("Data Loaded Successfully".to_string())
}
