use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::debug;

use models::product::{self, Category, Model, Product, ProductId};

use crate::errors::ServiceError;
use crate::product::repository::{ProductRepository, ProductStore, ProductTransaction};

/// SeaORM-backed repository. Over a `DatabaseConnection` it is the store;
/// over a `DatabaseTransaction` it is the unit of work handed out by `begin`.
pub struct SeaOrmProductRepository<C = DatabaseConnection> {
    pub conn: C,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { conn: db } }
}

#[async_trait]
impl<C> ProductRepository for SeaOrmProductRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn save(&self, p: Product) -> Result<Model, ServiceError> {
        let id = p.id;
        let am = p.into_active_model();
        let res = match id {
            None => am.insert(&self.conn).await,
            Some(_) => am.update(&self.conn).await,
        };
        match res {
            Ok(m) => { debug!(id = m.id, "product_row_saved"); Ok(m) }
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::product_not_found(id.unwrap_or_default())),
            Err(e) => Err(ServiceError::db(e)),
        }
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Model>, ServiceError> {
        product::Entity::find_by_id(id).one(&self.conn).await.map_err(ServiceError::db)
    }

    async fn find_all(&self) -> Result<Vec<Model>, ServiceError> {
        product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.conn)
            .await
            .map_err(ServiceError::db)
    }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Model>, ServiceError> {
        product::Entity::find()
            .filter(product::Column::Category.eq(category))
            .order_by_asc(product::Column::Id)
            .all(&self.conn)
            .await
            .map_err(ServiceError::db)
    }

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ServiceError> {
        let n = product::Entity::find_by_id(id).count(&self.conn).await.map_err(ServiceError::db)?;
        Ok(n > 0)
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), ServiceError> {
        let res = product::Entity::delete_by_id(id).exec(&self.conn).await.map_err(ServiceError::db)?;
        debug!(id, rows_affected = res.rows_affected, "product_row_deleted");
        Ok(())
    }
}

#[async_trait]
impl ProductStore for SeaOrmProductRepository<DatabaseConnection> {
    async fn begin(&self) -> Result<Box<dyn ProductTransaction>, ServiceError> {
        let txn = self.conn.begin().await.map_err(ServiceError::db)?;
        Ok(Box::new(SeaOrmProductRepository { conn: txn }))
    }
}

#[async_trait]
impl ProductTransaction for SeaOrmProductRepository<DatabaseTransaction> {
    async fn commit(self: Box<Self>) -> Result<(), ServiceError> {
        let SeaOrmProductRepository { conn } = *self;
        conn.commit().await.map_err(ServiceError::db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn sample(name: &str, category: Category) -> Product {
        Product { id: None, name: name.into(), description: None, price: 2.5, stock: 1, category }
    }

    #[tokio::test]
    async fn save_inserts_then_updates() -> Result<(), anyhow::Error> {
        let repo = SeaOrmProductRepository::new(get_db().await?);

        let created = repo.save(sample("Lampara", Category::Hogar)).await?;
        assert!(repo.exists_by_id(created.id).await?);

        let mut p: Product = created.clone().into();
        p.price = 3.75;
        let updated = repo.save(p).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.price, 3.75);
        assert_eq!(repo.find_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn save_with_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        let repo = SeaOrmProductRepository::new(get_db().await?);
        let ghost = Product { id: Some(404), ..sample("Fantasma", Category::Otros) };
        assert!(matches!(repo.save(ghost).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_absent_is_noop_and_ids_are_not_reused() -> Result<(), anyhow::Error> {
        let repo = SeaOrmProductRepository::new(get_db().await?);
        repo.delete_by_id(99).await?;

        let a = repo.save(sample("Primero", Category::Libros)).await?;
        let b = repo.save(sample("Segundo", Category::Libros)).await?;
        repo.delete_by_id(b.id).await?;
        let c = repo.save(sample("Tercero", Category::Libros)).await?;
        assert!(c.id > b.id && b.id > a.id);
        assert!(repo.find_by_id(b.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() -> Result<(), anyhow::Error> {
        let repo = SeaOrmProductRepository::new(get_db().await?);
        {
            let tx = repo.begin().await?;
            tx.save(sample("Temporal", Category::Juguetes)).await?;
        }
        assert!(repo.find_all().await?.is_empty());

        let tx = repo.begin().await?;
        tx.save(sample("Definitivo", Category::Juguetes)).await?;
        tx.commit().await?;
        assert_eq!(repo.find_by_category(Category::Juguetes).await?.len(), 1);
        Ok(())
    }
}
