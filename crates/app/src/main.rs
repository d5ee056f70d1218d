use migration::{Migrator, MigratorTrait};
use sea_orm::ConnectOptions;

mod settings;

const DB_MAX_CONNECTIONS: u32 = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "beanery={level},server={level},engine={level}",
            level = settings.level
        ))
        .init();

    if settings.production && settings.jwt_secret == settings::DEV_JWT_SECRET {
        tracing::warn!("production mode with the development JWT secret; set BEANERY_JWT_SECRET");
    }

    let mut options = ConnectOptions::new(settings.database.clone());
    options.max_connections(DB_MAX_CONNECTIONS);
    let db = sea_orm::Database::connect(options).await?;

    // Schema bootstrap is best effort: on failure the process keeps
    // serving and individual queries fail instead.
    match Migrator::up(&db, None).await {
        Ok(()) => tracing::info!("database schema is up to date"),
        Err(err) => tracing::error!("failed to run migrations: {err}"),
    }

    let engine = engine::Engine::new(db.clone());

    match engine.seed_default_admin().await {
        Ok(true) => tracing::info!("seeded default admin account"),
        Ok(false) => tracing::debug!("admin account already present"),
        Err(err) => tracing::error!("failed to seed admin account: {err}"),
    }

    let addr = format!("{}:{}", settings.bind, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let config = server::ServerConfig {
        jwt_secret: settings.jwt_secret,
        cors_origin: settings.cors_origin,
    };
    server::run_with_listener(engine, config, listener).await?;

    // The server only returns after a termination signal; drain the pool
    // before exiting.
    db.close().await?;

    Ok(())
}
