use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;

/// A row of the `recipes` table. Every column except the key is nullable
/// because the source dumps are full of holes.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Recipe {
    pub id: i64,
    pub cuisine: Option<String>,
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub total_time: Option<i64>,
    pub description: Option<String>,
    pub nutrients: Option<Json<Value>>,
    pub serves: Option<String>,
}

/// A recipe as produced by ingest, before it has a row id.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub cuisine: Option<String>,
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub total_time: Option<i64>,
    pub description: Option<String>,
    pub nutrients: Value,
    pub serves: Option<String>,
}

/// The API-facing shape of a recipe. Identical to [`Recipe`] except that the
/// description is shortened to a listing-sized teaser.
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<f64>,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub total_time: Option<i64>,
    pub description: String,
    pub nutrients: Option<Value>,
    pub serves: Option<String>,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            cuisine: recipe.cuisine,
            rating: recipe.rating,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            total_time: recipe.total_time,
            description: summary_description(recipe.description),
            nutrients: recipe.nutrients.map(|json| json.0),
            serves: recipe.serves,
        }
    }
}

/// First 80 characters plus an ellipsis; empty string when the column is NULL
/// or empty.
fn summary_description(description: Option<String>) -> String {
    match description {
        Some(text) if !text.is_empty() => {
            let head: String = text.chars().take(80).collect();
            format!("{}...", head)
        }
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Eq => "=",
        }
    }
}

/// A comparison filter of the form `<=NUMBER`, `>=NUMBER`, `<NUMBER`,
/// `>NUMBER` or `=NUMBER`, as accepted by the search endpoint for rating,
/// total_time and calories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericFilter {
    pub op: CompareOp,
    pub value: f64,
}

lazy_static! {
    static ref FILTER_RE: Regex =
        Regex::new(r"^(<=|>=|<|>|=)\s*(\d+(?:\.\d+)?)").expect("invalid filter regex");
}

impl NumericFilter {
    /// Parses a comparison condition. Conditions that do not match the
    /// expected shape yield `None` and the caller leaves the filter
    /// unapplied.
    pub fn parse(condition: &str) -> Option<Self> {
        let captures = FILTER_RE.captures(condition.trim())?;
        let op = match &captures[1] {
            "<" => CompareOp::Lt,
            "<=" => CompareOp::Le,
            ">" => CompareOp::Gt,
            ">=" => CompareOp::Ge,
            "=" => CompareOp::Eq,
            _ => return None,
        };
        let value = captures[2].parse().ok()?;
        Some(Self { op, value })
    }
}

/// Search criteria collected from the query string. Absent fields leave the
/// corresponding filter unapplied.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<NumericFilter>,
    pub total_time: Option<NumericFilter>,
    pub calories: Option<NumericFilter>,
}
