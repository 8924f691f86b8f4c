//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod standup;
pub mod group;
pub mod standuper;

// Re-export repositories
pub use standup::StandupRepository;
pub use group::GroupRepository;
pub use standuper::StanduperRepository;
