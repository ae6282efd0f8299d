use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, ModelError};

pub type ProductId = i64;

/// Wire names of the product fields, used to key validation errors.
pub const FIELD_NAME: &str = "nombre";
pub const FIELD_DESCRIPTION: &str = "descripcion";
pub const FIELD_PRICE: &str = "precio";
pub const FIELD_STOCK: &str = "stock";

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const MIN_PRICE: f64 = 0.01;

/// Closed set of catalog categories, stored and serialized by literal name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum Category {
    #[sea_orm(string_value = "ELECTRONICA")]
    #[serde(rename = "ELECTRONICA")]
    Electronica,
    #[sea_orm(string_value = "ROPA")]
    #[serde(rename = "ROPA")]
    Ropa,
    #[sea_orm(string_value = "HOGAR")]
    #[serde(rename = "HOGAR")]
    Hogar,
    #[sea_orm(string_value = "DEPORTES")]
    #[serde(rename = "DEPORTES")]
    Deportes,
    #[sea_orm(string_value = "LIBROS")]
    #[serde(rename = "LIBROS")]
    Libros,
    #[sea_orm(string_value = "JUGUETES")]
    #[serde(rename = "JUGUETES")]
    Juguetes,
    #[sea_orm(string_value = "ALIMENTOS")]
    #[serde(rename = "ALIMENTOS")]
    Alimentos,
    #[sea_orm(string_value = "OTROS")]
    #[serde(rename = "OTROS")]
    Otros,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronica => "ELECTRONICA",
            Category::Ropa => "ROPA",
            Category::Hogar => "HOGAR",
            Category::Deportes => "DEPORTES",
            Category::Libros => "LIBROS",
            Category::Juguetes => "JUGUETES",
            Category::Alimentos => "ALIMENTOS",
            Category::Otros => "OTROS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category: Category,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A product as handed to storage. `id` stays `None` until the first save.
#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category: Category,
}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Self {
            id: Some(m.id),
            name: m.name,
            description: m.description,
            price: m.price,
            stock: m.stock,
            category: m.category,
        }
    }
}

impl Product {
    /// Insert when `id` is unset, otherwise an update keyed by the existing id.
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: match self.id {
                Some(id) => Unchanged(id),
                None => NotSet,
            },
            name: Set(self.name),
            description: Set(self.description),
            price: Set(self.price),
            stock: Set(self.stock),
            category: Set(self.category),
        }
    }

    /// Materialize the stored row once an id has been assigned.
    pub fn into_model(self, id: ProductId) -> Model {
        Model {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category: self.category,
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_fields(&self.name, self.description.as_deref(), self.price, self.stock)
    }
}

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError::new(FIELD_NAME, "name must not be blank"));
    }
    let len = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(FieldError::new(
            FIELD_NAME,
            format!("name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"),
        ));
    }
    Ok(())
}

pub fn validate_description(description: Option<&str>) -> Result<(), FieldError> {
    match description {
        Some(d) if d.chars().count() > DESCRIPTION_MAX_CHARS => Err(FieldError::new(
            FIELD_DESCRIPTION,
            format!("description must not exceed {DESCRIPTION_MAX_CHARS} characters"),
        )),
        _ => Ok(()),
    }
}

pub fn validate_price(price: f64) -> Result<(), FieldError> {
    if !price.is_finite() || price < MIN_PRICE {
        return Err(FieldError::new(FIELD_PRICE, format!("price must be at least {MIN_PRICE}")));
    }
    Ok(())
}

pub fn validate_stock(stock: i32) -> Result<(), FieldError> {
    if stock < 0 {
        return Err(FieldError::new(FIELD_STOCK, "stock must not be negative"));
    }
    Ok(())
}

/// Check every field and report all violations together.
pub fn validate_fields(name: &str, description: Option<&str>, price: f64, stock: i32) -> Result<(), ModelError> {
    let errors: Vec<FieldError> = [
        validate_name(name),
        validate_description(description),
        validate_price(price),
        validate_stock(stock),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ModelError::Validation(errors))
    }
}
