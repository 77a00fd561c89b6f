pub mod health;
pub mod ingest;
pub mod recipes;
pub mod shell;
