//! bedcheck - AWS Bedrock access checker.
//!
//! Verifies that AWS credentials, regions, the Bedrock runtime, and key
//! foundation models are usable from this machine, and reports the result as
//! a per-category dashboard with optional export.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod core;
pub mod error;
pub mod export;
pub mod probes;
pub mod render;
pub mod util;

pub use error::{BedcheckError, Result};
