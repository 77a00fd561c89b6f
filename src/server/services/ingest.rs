use crate::server::models::recipe::NewRecipe;
use crate::server::services::recipe_database::RecipeDatabaseService;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

const CHUNK_SIZE: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read recipes file: {0}")]
    Read(#[from] std::io::Error),
    #[error("recipes file is not a JSON object of records: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub scanned: u64,
    pub inserted: u64,
    pub skipped: u64,
}

/// Loads a recipes JSON dump (a top-level object whose values are recipe
/// records) into the database, cleaning the numeric fields and skipping
/// `(title, cuisine)` duplicates.
pub struct RecipeIngestService {
    db: RecipeDatabaseService,
    chunk_size: usize,
}

impl RecipeIngestService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            db: RecipeDatabaseService::new(pool),
            chunk_size: CHUNK_SIZE,
        }
    }

    pub async fn load_from_file(&self, path: &Path) -> Result<IngestReport, IngestError> {
        // Reading and parsing a multi-hundred-MB dump must not pin a runtime
        // worker thread.
        let dump = path.to_path_buf();
        let records = tokio::task::spawn_blocking(move || read_records(&dump))
            .await
            .map_err(|e| IngestError::Database(anyhow::Error::new(e)))??;

        let mut report = IngestReport::default();
        let mut seen: HashSet<(Option<String>, Option<String>)> = HashSet::new();
        let mut batch: Vec<NewRecipe> = Vec::with_capacity(self.chunk_size);

        for (_key, record) in &records {
            report.scanned += 1;

            let recipe = clean_record(record);
            if !seen.insert((recipe.title.clone(), recipe.cuisine.clone())) {
                continue;
            }
            batch.push(recipe);

            if batch.len() >= self.chunk_size {
                report.inserted += self.db.insert_batch(&batch).await?;
                batch.clear();
                seen.clear();
            }
        }

        if !batch.is_empty() {
            report.inserted += self.db.insert_batch(&batch).await?;
        }

        report.skipped = report.scanned - report.inserted;
        info!(
            "Recipe ingest complete: {} scanned, {} inserted, {} skipped",
            report.scanned, report.inserted, report.skipped
        );

        Ok(report)
    }
}

fn read_records(path: &Path) -> Result<Map<String, Value>, IngestError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn clean_record(record: &Value) -> NewRecipe {
    NewRecipe {
        cuisine: json_string(record.get("cuisine")),
        title: json_string(record.get("title")),
        rating: json_f64(record.get("rating")),
        prep_time: json_i64(record.get("prep_time")),
        cook_time: json_i64(record.get("cook_time")),
        total_time: json_i64(record.get("total_time")),
        description: json_string(record.get("description")),
        nutrients: clean_nutrients(record.get("nutrients")),
        serves: json_string(record.get("serves")),
    }
}

fn json_string(value: Option<&Value>) -> Option<String> {
    value?.as_str().map(str::to_string)
}

/// Numbers pass through; `null`, non-finite values and anything that does not
/// parse as a number become NULL.
fn json_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn json_i64(value: Option<&Value>) -> Option<i64> {
    json_f64(value).map(|v| v as i64)
}

lazy_static! {
    static ref NUMERIC_RE: Regex = Regex::new(r"\d+").expect("invalid numeric regex");
}

/// Nutrient values arrive as annotated strings ("389 kcal", "48 g"). Reduce
/// each to its first embedded integer.
fn extract_numeric(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()).map(|v| v as i64),
        Value::String(text) => NUMERIC_RE
            .find(text)
            .and_then(|m| m.as_str().parse::<i64>().ok()),
        _ => None,
    }
}

fn clean_nutrients(value: Option<&Value>) -> Value {
    let Some(Value::Object(nutrients)) = value else {
        return Value::Object(Map::new());
    };

    let cleaned = nutrients
        .iter()
        .map(|(key, raw)| {
            let numeric = extract_numeric(raw).map_or(Value::Null, Value::from);
            (key.clone(), numeric)
        })
        .collect();

    Value::Object(cleaned)
}
