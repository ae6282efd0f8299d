//! Product catalog: three-layer architecture (domain, repository, service).
//!
//! Storage backends live under `repo`; both SeaORM and the in-memory store
//! satisfy the same `ProductStore` contract.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::ProductService;
