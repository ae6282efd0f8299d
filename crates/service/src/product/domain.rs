use models::errors::ModelError;
use models::product::{self, Category, Model, Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::validation::Validate;

/// Create / full-update input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: i32,
    #[serde(rename = "categoria")]
    pub category: Category,
}

impl ProductInput {
    /// Build the storage record; `id` is `None` for inserts.
    pub fn into_product(self, id: Option<ProductId>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
        }
    }
}

impl Validate for ProductInput {
    fn validate(&self) -> Result<(), ModelError> {
        product::validate_fields(&self.name, self.description.as_deref(), self.price, self.stock)
    }
}

/// Stock-only update input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub stock: i32,
}

impl Validate for StockUpdate {
    fn validate(&self) -> Result<(), ModelError> {
        product::validate_stock(self.stock).map_err(|e| ModelError::Validation(vec![e]))
    }
}

/// Externally visible product (output shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    pub stock: i32,
    #[serde(rename = "categoria")]
    pub category: Category,
}

impl From<Model> for ProductResponse {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            price: m.price,
            stock: m.stock,
            category: m.category,
        }
    }
}
