//! tabshell API server.
//!
//! Opens the SQLite store, builds the proxy client and serves the HTTP API
//! on the configured bind address.

use tokio::net::TcpListener;

use tabshell::database::Database;
use tabshell::logging;
use tabshell::server::{self, ServerState};
use tabshell::services::proxy_service::ProxyService;
use tabshell::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = SettingsEngine::from_env();
    engine.load()?;
    engine.apply_env_overrides();
    let settings = engine.get_settings().clone();
    logging::init_subscriber(settings.log_level);

    let db_path = engine.database_path();
    tracing::info!(path = %db_path.display(), "opening database");
    let db = Database::open(&db_path)?;
    let proxy = ProxyService::new(settings.proxy.clone())?;

    let listener = TcpListener::bind(&settings.server.bind_address).await?;
    server::serve(listener, ServerState::new(db, proxy)).await?;
    Ok(())
}
