pub mod manager;
pub mod models;
pub mod query_builder;
pub mod repository;
pub mod schema;
pub mod service;

pub use manager::{DatabaseError, Store};
pub use repository::Repository;
pub use schema::Entity;
