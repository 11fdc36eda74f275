//! Storage access shared by the services.
//!
//! Repositories are stateless; every method takes the connection to run on,
//! so the same call works against the pool or inside a [`crate::db::Transaction`].

pub mod bom_repository;
pub mod codes;
pub mod history_repository;
pub mod inventory_repository;

pub use bom_repository::BomRepository;
pub use codes::CodeKind;
pub use history_repository::{HistoryEntry, HistoryRepository};
pub use inventory_repository::InventoryRepository;
