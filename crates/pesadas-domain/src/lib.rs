//! Domain module containing weighing records, input rules and storage traits

pub mod model;
pub mod repository;
pub mod service;

pub use model::*;
pub use repository::KeyValueStorage;
