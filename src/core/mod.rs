//! Core check logic: the ledger, status derivation, and the run
//! orchestrator.

pub mod catalog;
pub mod ledger;
pub mod logging;
pub mod orchestrator;
pub mod status;
pub mod version;
