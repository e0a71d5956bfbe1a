//! Shared utilities.

pub mod env;
pub mod format;
