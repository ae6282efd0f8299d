//! In-memory product store.
//!
//! A transaction takes the table lock for its whole lifetime, works on a
//! staged copy and publishes it on commit; dropping it discards the copy.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use models::product::{Category, Model, Product, ProductId};

use crate::errors::ServiceError;
use crate::product::repository::{ProductRepository, ProductStore, ProductTransaction};

#[derive(Debug, Default, Clone)]
struct Table {
    last_id: ProductId,
    rows: BTreeMap<ProductId, Model>,
}

impl Table {
    fn save(&mut self, p: Product) -> Result<Model, ServiceError> {
        let id = match p.id {
            Some(id) if self.rows.contains_key(&id) => id,
            Some(id) => return Err(ServiceError::product_not_found(id)),
            None => {
                self.last_id += 1;
                self.last_id
            }
        };
        let m = p.into_model(id);
        self.rows.insert(id, m.clone());
        Ok(m)
    }

    fn find_by_id(&self, id: ProductId) -> Option<Model> { self.rows.get(&id).cloned() }

    fn find_all(&self) -> Vec<Model> { self.rows.values().cloned().collect() }

    fn find_by_category(&self, category: Category) -> Vec<Model> {
        self.rows.values().filter(|m| m.category == category).cloned().collect()
    }

    fn exists_by_id(&self, id: ProductId) -> bool { self.rows.contains_key(&id) }

    fn delete_by_id(&mut self, id: ProductId) { self.rows.remove(&id); }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryProductStore {
    table: Arc<Mutex<Table>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl ProductRepository for InMemoryProductStore {
    async fn save(&self, p: Product) -> Result<Model, ServiceError> { self.table.lock().await.save(p) }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Model>, ServiceError> {
        Ok(self.table.lock().await.find_by_id(id))
    }

    async fn find_all(&self) -> Result<Vec<Model>, ServiceError> { Ok(self.table.lock().await.find_all()) }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Model>, ServiceError> {
        Ok(self.table.lock().await.find_by_category(category))
    }

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ServiceError> {
        Ok(self.table.lock().await.exists_by_id(id))
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), ServiceError> {
        self.table.lock().await.delete_by_id(id);
        Ok(())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn begin(&self) -> Result<Box<dyn ProductTransaction>, ServiceError> {
        let committed = Arc::clone(&self.table).lock_owned().await;
        let staged = Mutex::new((*committed).clone());
        Ok(Box::new(InMemoryTransaction { committed, staged }))
    }
}

pub struct InMemoryTransaction {
    committed: OwnedMutexGuard<Table>,
    staged: Mutex<Table>,
}

#[async_trait]
impl ProductRepository for InMemoryTransaction {
    async fn save(&self, p: Product) -> Result<Model, ServiceError> { self.staged.lock().await.save(p) }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Model>, ServiceError> {
        Ok(self.staged.lock().await.find_by_id(id))
    }

    async fn find_all(&self) -> Result<Vec<Model>, ServiceError> { Ok(self.staged.lock().await.find_all()) }

    async fn find_by_category(&self, category: Category) -> Result<Vec<Model>, ServiceError> {
        Ok(self.staged.lock().await.find_by_category(category))
    }

    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ServiceError> {
        Ok(self.staged.lock().await.exists_by_id(id))
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), ServiceError> {
        self.staged.lock().await.delete_by_id(id);
        Ok(())
    }
}

#[async_trait]
impl ProductTransaction for InMemoryTransaction {
    async fn commit(self: Box<Self>) -> Result<(), ServiceError> {
        let InMemoryTransaction { mut committed, staged } = *self;
        *committed = staged.into_inner();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample(name: &str, category: Category) -> Product {
        Product { id: None, name: name.into(), description: None, price: 1.0, stock: 0, category }
    }

    #[tokio::test]
    async fn ids_are_monotonic_and_never_reused() {
        let store = InMemoryProductStore::new();
        let a = store.save(sample("Uno", Category::Otros)).await.unwrap();
        let b = store.save(sample("Dos", Category::Otros)).await.unwrap();
        store.delete_by_id(b.id).await.unwrap();
        let c = store.save(sample("Tres", Category::Otros)).await.unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
    }

    #[tokio::test]
    async fn rollback_on_drop_and_publish_on_commit() {
        let store = InMemoryProductStore::new();
        {
            let tx = store.begin().await.unwrap();
            tx.save(sample("Borrador", Category::Hogar)).await.unwrap();
            assert_eq!(tx.find_all().await.unwrap().len(), 1);
        }
        assert!(store.find_all().await.unwrap().is_empty());

        let tx = store.begin().await.unwrap();
        let saved = tx.save(sample("Final", Category::Hogar)).await.unwrap();
        tx.commit().await.unwrap();
        assert_eq!(store.find_by_id(saved.id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn open_transaction_isolates_readers() {
        let store = InMemoryProductStore::new();
        let tx = store.begin().await.unwrap();
        tx.save(sample("Aislado", Category::Libros)).await.unwrap();

        // the table lock is held until commit, so a reader cannot get in at all
        assert!(store.table.try_lock().is_err());
        let blocked = tokio::time::timeout(Duration::from_millis(50), store.find_all()).await;
        assert!(blocked.is_err());

        tx.commit().await.unwrap();
        assert!(store.table.try_lock().is_ok());
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }
}
