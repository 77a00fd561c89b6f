use config::{Config, ConfigError, Environment as ConfigEnvironment, File};
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub content: ContentSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_path")]
    pub path: String,
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            create_if_missing: true,
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct ContentSettings {
    /// Directory the embedded documents (main.html, contact.html) are served from.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Recipes JSON dump consumed by /load_data.
    #[serde(default = "default_recipes_file")]
    pub recipes_file: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            recipes_file: default_recipes_file(),
        }
    }
}

fn default_database_path() -> String {
    "cookbook.db".to_string()
}

fn default_true() -> bool {
    true
}

fn default_cache_ttl() -> u64 {
    600
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_recipes_file() -> String {
    "US_recipes_null.json".to_string()
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .expect("Failed to determine current directory")
        .join("configuration");

    let environment: AppEnvironment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT");

    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = Config::builder()
        .add_source(File::from(base_path.join("base.yaml")))
        .add_source(File::from(base_path.join(&environment_filename)))
        .add_source(
            ConfigEnvironment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

pub enum AppEnvironment {
    Local,
    Production,
}

impl AppEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnvironment::Local => "local",
            AppEnvironment::Production => "production",
        }
    }
}

impl TryFrom<String> for AppEnvironment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use `local` or `production`.",
                other
            )),
        }
    }
}
