pub mod cache;
pub mod ingest;
pub mod recipe_database;

pub use cache::ResponseCache;
pub use ingest::{IngestError, IngestReport, RecipeIngestService};
pub use recipe_database::RecipeDatabaseService;
