use crate::server::models::recipe::{NewRecipe, Recipe, RecipeFilter};
use anyhow::{Context, Result};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const SELECT_COLUMNS: &str = "SELECT id, cuisine, title, rating, prep_time, cook_time, \
     total_time, description, nutrients, serves FROM recipes";

pub struct RecipeDatabaseService {
    pool: SqlitePool,
}

impl RecipeDatabaseService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count_recipes(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count recipes")?;

        Ok(total)
    }

    /// Top-rated first; NULL ratings sort last under SQLite's DESC ordering.
    pub async fn list_by_rating(&self, limit: i64, offset: i64) -> Result<Vec<Recipe>> {
        let recipes = sqlx::query_as::<_, Recipe>(&format!(
            "{} ORDER BY rating DESC LIMIT ? OFFSET ?",
            SELECT_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch recipes")?;

        Ok(recipes)
    }

    pub async fn count_matching(&self, filter: &RecipeFilter) -> Result<i64> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM recipes WHERE 1=1");
        push_filters(&mut builder, filter);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .context("Failed to count matching recipes")?;

        Ok(total)
    }

    pub async fn search(
        &self,
        filter: &RecipeFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Recipe>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("{} WHERE 1=1", SELECT_COLUMNS));
        push_filters(&mut builder, filter);
        builder.push(" LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let recipes = builder
            .build_query_as::<Recipe>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to search recipes")?;

        Ok(recipes)
    }

    /// Bulk insert; rows colliding with the `(title, cuisine)` uniqueness
    /// constraint are silently skipped. Returns the number of rows actually
    /// inserted.
    pub async fn insert_batch(&self, recipes: &[NewRecipe]) -> Result<u64> {
        if recipes.is_empty() {
            return Ok(0);
        }

        let mut inserted = 0;
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin insert transaction")?;

        for recipe in recipes {
            let nutrients =
                serde_json::to_string(&recipe.nutrients).context("Failed to encode nutrients")?;

            let result = sqlx::query(
                "INSERT OR IGNORE INTO recipes \
                 (cuisine, title, rating, prep_time, cook_time, total_time, description, nutrients, serves) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&recipe.cuisine)
            .bind(&recipe.title)
            .bind(recipe.rating)
            .bind(recipe.prep_time)
            .bind(recipe.cook_time)
            .bind(recipe.total_time)
            .bind(&recipe.description)
            .bind(nutrients)
            .bind(&recipe.serves)
            .execute(&mut *tx)
            .await
            .context("Failed to insert recipe")?;

            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .context("Failed to commit insert transaction")?;

        Ok(inserted)
    }
}

fn push_filters(builder: &mut QueryBuilder<Sqlite>, filter: &RecipeFilter) {
    if let Some(title) = &filter.title {
        builder.push(" AND title LIKE ");
        builder.push_bind(format!("%{}%", title));
    }

    if let Some(cuisine) = &filter.cuisine {
        builder.push(" AND cuisine LIKE ");
        builder.push_bind(format!("%{}%", cuisine));
    }

    if let Some(rating) = &filter.rating {
        builder.push(" AND rating ");
        builder.push(rating.op.as_sql());
        builder.push(" ");
        builder.push_bind(rating.value);
    }

    if let Some(total_time) = &filter.total_time {
        builder.push(" AND total_time ");
        builder.push(total_time.op.as_sql());
        builder.push(" ");
        builder.push_bind(total_time.value);
    }

    // Calories live inside the nutrients JSON blob.
    if let Some(calories) = &filter.calories {
        builder.push(" AND CAST(json_extract(nutrients, '$.calories') AS INTEGER) ");
        builder.push(calories.op.as_sql());
        builder.push(" ");
        builder.push_bind(calories.value as i64);
    }
}
