//! Helpers for tests that run against real process trees.

pub mod fixtures;
pub mod process;
