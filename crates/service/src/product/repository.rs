use async_trait::async_trait;
use models::product::{Category, Model, Product, ProductId};

use crate::errors::ServiceError;

/// Repository abstraction for product persistence.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert when `product.id` is `None`, otherwise update the row with that id.
    async fn save(&self, product: Product) -> Result<Model, ServiceError>;
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Model>, ServiceError>;
    /// All rows in ascending id order.
    async fn find_all(&self) -> Result<Vec<Model>, ServiceError>;
    async fn find_by_category(&self, category: Category) -> Result<Vec<Model>, ServiceError>;
    async fn exists_by_id(&self, id: ProductId) -> Result<bool, ServiceError>;
    /// Deleting an absent id is a no-op.
    async fn delete_by_id(&self, id: ProductId) -> Result<(), ServiceError>;
}

/// Unit of work. Dropping it without `commit` discards every change made through it.
#[async_trait]
pub trait ProductTransaction: ProductRepository {
    async fn commit(self: Box<Self>) -> Result<(), ServiceError>;
}

/// A repository that can open transactions.
#[async_trait]
pub trait ProductStore: ProductRepository {
    async fn begin(&self) -> Result<Box<dyn ProductTransaction>, ServiceError>;
}
