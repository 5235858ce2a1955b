//! Backend entry-point: loads configuration, builds the pool and camera
//! map, and runs the HTTP server.

mod server;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use guardpost_backend::config::AppSettings;
use guardpost_backend::outbound::persistence::{DbPool, PoolConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("configuration failed to load: {err}")))?;

    let database_url = settings
        .database_url()
        .ok_or_else(|| std::io::Error::other("GUARDPOST_DATABASE_URL must be set"))?
        .to_owned();

    let cameras = settings
        .camera_map()
        .map_err(|err| std::io::Error::other(format!("camera map failed to load: {err}")))?;
    info!(mapped_checkpoints = cameras.len(), "camera map loaded");

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| std::io::Error::other(format!("database pool failed to build: {err}")))?;

    info!(bind_addr = settings.bind_addr(), "starting guardpost backend");
    server::run(settings, pool, cameras).await
}
