use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recipe_server::config::AppConfig;
use recipe_server::state::AppState;
use recipe_server::{bootstrap, build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = database::init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    if config.seed.reference_data {
        seed::seed_reference_data(&db)
            .await
            .context("Failed to seed reference data")?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(db, config);

    if state.config.seed.sample_recipes {
        bootstrap::run(&*state.recipes, &*state.categories, &*state.units)
            .await
            .context("Failed to load sample recipes")?;
    }

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
