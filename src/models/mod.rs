//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod standup;
pub mod group;
pub mod standuper;
pub mod update;

// Re-export commonly used models
pub use standup::{Standup, CreateStandupRequest};
pub use group::{Group, CreateGroupRequest, DEFAULT_STANDUP_DEADLINE, DEFAULT_TIMEZONE, DEFAULT_GROUP_LANGUAGE};
pub use standuper::{Standuper, CreateStanduperRequest};
pub use update::{ChatKind, ChatInfo, ChatMember, InboundMessage, InboundUpdate};
