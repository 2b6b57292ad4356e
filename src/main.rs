use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::EnvFilter;

use remark::{config::Config, db, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("remark=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    db::prepare_db(&pool).await?;
    if config.seed_demo {
        db::seed_demo_data(&pool).await?;
    }

    let app = routes::generate_routes(pool);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
