use dojo_admin::api::routes::create_routes;
use dojo_admin::config::{self, AppConfig, DatabaseConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let app_config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let pool = db_config.create_pool().await?;
    config::run_migrations(&pool).await?;
    config::seeding::ensure_default_admin(&pool).await?;

    let app = create_routes(pool, &app_config.jwt_secret);

    let address = app_config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("dojo-admin server starting on http://{address}");
    info!("Health check available at http://{address}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
