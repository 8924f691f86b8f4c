//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;
pub mod service;
pub mod storage;
pub mod memory;

// Re-export commonly used database components
pub use connection::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use repositories::{StandupRepository, GroupRepository, StanduperRepository};
pub use service::DatabaseService;
pub use storage::{Storage, Upserted};
pub use memory::{MemoryStorage, StorageOp};
