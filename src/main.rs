use cookbook::configuration::get_configuration;
use cookbook::database::{get_connection_pool, migrate_database};
use cookbook::server::config::configure_app;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = get_configuration().expect("Failed to read configuration");

    let pool = get_connection_pool(&settings.database)
        .await
        .expect("Failed to open the recipe database");
    migrate_database(&pool)
        .await
        .expect("Failed to migrate the recipe database");

    let app = configure_app(pool, &settings);

    let addr: SocketAddr = format!("{}:{}", settings.application.host, settings.application.port)
        .parse()
        .expect("Invalid application host/port");
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("✨ Server ready:");
    info!("  🌎 http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
