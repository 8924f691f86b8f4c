//! Utility modules
//!
//! This module contains common utilities used throughout the application,
//! including error handling, logging setup, per-key locking and helper functions.

pub mod errors;
pub mod logging;
pub mod locks;
pub mod helpers;

pub use errors::{StandupBotError, Result};
pub use locks::KeyedLocks;
