//! JEE Contest - Application Entry Point

use std::{net::SocketAddr, sync::Arc};

use redis::Client as RedisClient;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use jee_contest::{
    app,
    config::{BackendMode, CONFIG, Config, LogFormat},
    db,
    services::AuthService,
    state::AppState,
    store::{FsObjectStore, PgDataStore, RedisCacheStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&CONFIG);

    tracing::info!(backend = ?CONFIG.backend, "Starting JEE contest server...");

    let state = match CONFIG.backend {
        BackendMode::Postgres => connect(CONFIG.clone()).await?,
        BackendMode::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on restart");
            AppState::in_memory(CONFIG.clone())
        }
    };

    if let Some(admin) = &CONFIG.bootstrap {
        if let Some(profile) = AuthService::bootstrap_admin(state.data(), admin).await? {
            tracing::info!(admin_id = %profile.id, "Bootstrap administrator created");
        }
    }

    let router = app(state);

    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    match config.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// PostgreSQL records, Redis cache and filesystem objects
async fn connect(config: Config) -> anyhow::Result<AppState> {
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;
    db::verify_schema(&pool).await?;

    tracing::info!("Connecting to Redis...");
    let redis_client = RedisClient::open(config.redis.url.as_str())?;
    let redis_conn = redis::aio::ConnectionManager::new(redis_client).await?;

    let objects = FsObjectStore::new(&config.storage);
    objects.ensure_bucket().await?;
    tracing::info!(root = %config.storage.root.display(), bucket = %config.storage.bucket, "Object store ready");

    Ok(AppState::new(
        Arc::new(PgDataStore::new(pool)),
        Arc::new(objects),
        Arc::new(RedisCacheStore::new(redis_conn)),
        config,
    ))
}
