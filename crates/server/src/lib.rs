pub mod routes;
pub mod startup;
pub mod products;
pub mod errors;
pub mod extract;
pub mod openapi;

pub use startup::run_with_config;
