use std::sync::Arc;

use models::errors::ModelError;
use models::product::{validate_stock, Category, ProductId};
use tracing::{info, instrument};

use super::domain::{ProductInput, ProductResponse};
use super::repository::ProductStore;
use crate::errors::ServiceError;
use crate::validation::Validate;

/// Product catalog service independent of web framework.
///
/// Every mutation runs inside one transaction opened on the store; reads go
/// straight to the store.
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self { Self { store } }

    /// Create a product and return it with its assigned id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::product::Category;
    /// use service::product::{ProductService, domain::ProductInput, repo::memory::InMemoryProductStore};
    /// let svc = ProductService::new(Arc::new(InMemoryProductStore::new()));
    /// let input = ProductInput { name: "Mouse".into(), description: None, price: 10.0, stock: 5, category: Category::Electronica };
    /// let created = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(created.stock, 5);
    /// ```
    #[instrument(skip(self, input), fields(category = %input.category))]
    pub async fn create(&self, input: ProductInput) -> Result<ProductResponse, ServiceError> {
        input.validate()?;
        let tx = self.store.begin().await?;
        let saved = tx.save(input.into_product(None)).await?;
        tx.commit().await?;
        info!(id = saved.id, name = %saved.name, "product_created");
        Ok(saved.into())
    }

    pub async fn list_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let rows = self.store.find_all().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: ProductId) -> Result<ProductResponse, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ServiceError::product_not_found(id))
    }

    pub async fn list_by_category(&self, category: Category) -> Result<Vec<ProductResponse>, ServiceError> {
        let rows = self.store.find_by_category(category).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Full replacement of every mutable field.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ProductId, input: ProductInput) -> Result<ProductResponse, ServiceError> {
        input.validate()?;
        let tx = self.store.begin().await?;
        let existing = tx.find_by_id(id).await?.ok_or_else(|| ServiceError::product_not_found(id))?;
        let saved = tx.save(input.into_product(Some(existing.id))).await?;
        tx.commit().await?;
        info!(id, "product_updated");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn update_stock(&self, id: ProductId, stock: i32) -> Result<ProductResponse, ServiceError> {
        validate_stock(stock).map_err(|e| ModelError::Validation(vec![e]))?;
        let tx = self.store.begin().await?;
        let existing = tx.find_by_id(id).await?.ok_or_else(|| ServiceError::product_not_found(id))?;
        let previous = existing.stock;
        let mut product: models::product::Product = existing.into();
        product.stock = stock;
        let saved = tx.save(product).await?;
        tx.commit().await?;
        info!(id, previous, stock, "product_stock_updated");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        let tx = self.store.begin().await?;
        if !tx.exists_by_id(id).await? {
            return Err(ServiceError::product_not_found(id));
        }
        tx.delete_by_id(id).await?;
        tx.commit().await?;
        info!(id, "product_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::all_stores;
    use sea_orm::Iterable;

    fn input(name: &str, price: f64, stock: i32, category: Category) -> ProductInput {
        ProductInput { name: name.into(), description: Some(format!("{name} de prueba")), price, stock, category }
    }

    fn assert_matches_input(out: &ProductResponse, inp: &ProductInput) {
        assert_eq!(out.name, inp.name);
        assert_eq!(out.description, inp.description);
        assert_eq!(out.price, inp.price);
        assert_eq!(out.stock, inp.stock);
        assert_eq!(out.category, inp.category);
    }

    #[tokio::test]
    async fn create_then_get_returns_input_with_id() -> Result<(), anyhow::Error> {
        for (name, store) in all_stores().await? {
            let svc = ProductService::new(store);
            let inp = input("Auriculares", 59.9, 12, Category::Electronica);
            let created = svc.create(inp.clone()).await?;
            let fetched = svc.get_by_id(created.id).await?;
            assert_eq!(fetched, created, "store {name}");
            assert_matches_input(&fetched, &inp);
        }
        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        for (name, store) in all_stores().await? {
            let svc = ProductService::new(store);
            assert!(matches!(svc.get_by_id(4242).await, Err(ServiceError::NotFound(_))), "store {name}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn list_by_category_is_exact_subset() -> Result<(), anyhow::Error> {
        for (name, store) in all_stores().await? {
            let svc = ProductService::new(store);
            let seed = [
                ("Televisor", Category::Electronica),
                ("Campera", Category::Ropa),
                ("Notebook", Category::Electronica),
                ("Novela", Category::Libros),
                ("Yerba", Category::Alimentos),
            ];
            for (n, c) in seed {
                svc.create(input(n, 10.0, 1, c)).await?;
            }
            let all = svc.list_all().await?;
            assert_eq!(all.len(), seed.len(), "store {name}");
            for c in Category::iter() {
                let expected: Vec<_> = all.iter().filter(|p| p.category == c).cloned().collect();
                assert_eq!(svc.list_by_category(c).await?, expected, "store {name}, category {c}");
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_every_field() -> Result<(), anyhow::Error> {
        for (name, store) in all_stores().await? {
            let svc = ProductService::new(store);
            let created = svc.create(input("Silla", 80.0, 3, Category::Hogar)).await?;
            let replacement = ProductInput { description: None, ..input("Silla gamer", 120.5, 7, Category::Otros) };
            let updated = svc.update(created.id, replacement.clone()).await?;
            assert_eq!(updated.id, created.id, "store {name}");
            let fetched = svc.get_by_id(created.id).await?;
            assert_matches_input(&fetched, &replacement);
        }
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        for (name, store) in all_stores().await? {
            let svc = ProductService::new(store);
            let res = svc.update(77, input("Nada", 1.0, 1, Category::Otros)).await;
            assert!(matches!(res, Err(ServiceError::NotFound(_))), "store {name}");
            assert!(svc.list_all().await?.is_empty());
        }
        Ok(())
    }

    #[tokio::test]
    async fn update_stock_changes_only_stock() -> Result<(), anyhow::Error> {
        for (name, store) in all_stores().await? {
            let svc = ProductService::new(store);
            let before = svc.create(input("Pelota", 15.0, 10, Category::Deportes)).await?;
            let after = svc.update_stock(before.id, 0).await?;
            assert_eq!(after, ProductResponse { stock: 0, ..before.clone() }, "store {name}");
            assert_eq!(svc.get_by_id(before.id).await?, after);

            assert!(matches!(svc.update_stock(before.id, -1).await, Err(ServiceError::Model(_))));
            assert!(matches!(svc.update_stock(999, 1).await, Err(ServiceError::NotFound(_))));
        }
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_get_and_delete_again_are_not_found() -> Result<(), anyhow::Error> {
        for (name, store) in all_stores().await? {
            let svc = ProductService::new(store);
            let created = svc.create(input("Muñeca", 25.0, 2, Category::Juguetes)).await?;
            svc.delete(created.id).await?;
            assert!(matches!(svc.get_by_id(created.id).await, Err(ServiceError::NotFound(_))), "store {name}");
            assert!(matches!(svc.delete(created.id).await, Err(ServiceError::NotFound(_))));
            assert!(matches!(svc.delete(31337).await, Err(ServiceError::NotFound(_))));
        }
        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_storage() -> Result<(), anyhow::Error> {
        for (name, store) in all_stores().await? {
            let svc = ProductService::new(store);
            let err = svc.create(input("ab", 0.0, -1, Category::Ropa)).await.unwrap_err();
            match err {
                ServiceError::Model(ModelError::Validation(fields)) => assert_eq!(fields.len(), 3, "store {name}"),
                other => panic!("unexpected error: {other}"),
            }
            assert!(svc.list_all().await?.is_empty());

            // boundaries accepted
            svc.create(input("abc", 0.01, 0, Category::Ropa)).await?;
            svc.create(input(&"n".repeat(100), 0.01, 0, Category::Ropa)).await?;
        }
        Ok(())
    }
}
