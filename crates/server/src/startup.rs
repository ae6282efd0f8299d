use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, Backend, DatabaseConfig};
use migration::MigratorTrait;
use service::product::repo::{memory::InMemoryProductStore, seaorm::SeaOrmProductRepository};
use service::product::repository::ProductStore;
use service::product::ProductService;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the configured product store. SQL backends are migrated first unless
/// `database.run_migrations` is off.
pub async fn build_store(cfg: &DatabaseConfig) -> anyhow::Result<Arc<dyn ProductStore>> {
    match cfg.backend() {
        Some(Backend::Memory) => {
            info!(backend = "memory", "product store ready");
            Ok(Arc::new(InMemoryProductStore::new()))
        }
        Some(Backend::Postgres | Backend::Sqlite) => {
            let db = models::db::connect_with_config(cfg).await?;
            if cfg.run_migrations {
                migration::Migrator::up(&db, None).await?;
                info!("migrations applied");
            }
            Ok(Arc::new(SeaOrmProductRepository::new(db)))
        }
        None => anyhow::bail!("unsupported database.url: {}", cfg.url),
    }
}

/// Full application router over the given store.
pub fn build_app(store: Arc<dyn ProductStore>) -> Router {
    let state = ServerState::new(ProductService::new(store));
    routes::build_router(state, build_cors())
}

/// Build the app from `cfg` and run the HTTP server until it stops.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let store = build_store(&cfg.database).await?;
    let app = build_app(store);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
