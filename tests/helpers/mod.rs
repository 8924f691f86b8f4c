//! Test helpers module
//!
//! This module provides utilities and helpers for testing the standup bot.
//! It includes a recording messenger, a fake pull request source, test data
//! builders, a test context wiring everything to in-memory storage and a
//! PostgreSQL helper for the repository tests.

#![allow(dead_code)]

pub mod database_helper;
pub mod messenger_mock;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use messenger_mock::*;
pub use test_context::*;
pub use test_data::*;
