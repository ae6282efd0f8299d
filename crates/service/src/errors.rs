use models::product::ProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn product_not_found(id: ProductId) -> Self { Self::not_found(&format!("product with id {id}")) }

    pub fn db(err: impl std::fmt::Display) -> Self { Self::Db(err.to_string()) }
}
