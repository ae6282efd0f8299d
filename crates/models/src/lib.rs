//! Persistence models: SeaORM entities, field validation and connection helpers.

pub mod errors;
pub mod db;
pub mod product;

#[cfg(test)]
mod tests;
