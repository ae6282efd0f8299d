#![cfg(test)]
use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use models::db::connect_sqlite_memory;

use crate::product::repo::{memory::InMemoryProductStore, seaorm::SeaOrmProductRepository};
use crate::product::repository::ProductStore;

/// Fresh, migrated in-memory SQLite database for the current test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_sqlite_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Every store implementation, each starting empty.
pub async fn all_stores() -> Result<Vec<(&'static str, Arc<dyn ProductStore>)>, anyhow::Error> {
    let db = get_db().await?;
    Ok(vec![
        ("memory", Arc::new(InMemoryProductStore::new()) as Arc<dyn ProductStore>),
        ("seaorm", Arc::new(SeaOrmProductRepository::new(db)) as Arc<dyn ProductStore>),
    ])
}
