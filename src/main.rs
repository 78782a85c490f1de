use tokio::net::TcpListener;
use tracing::info;

use vitraya::api::routes::create_routes;
use vitraya::config::{run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;

    // Seed reference data (doctors, articles) when the tables are empty
    DatabaseSeeder::new(pool.clone()).seed_all().await?;

    let app = create_routes(pool, &config)?;

    let addr = config.server_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Vitraya server starting on http://{}", addr);
    info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
