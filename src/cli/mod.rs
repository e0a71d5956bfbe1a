//! CLI layer: argument parsing, interactive prompts, and the check command.

pub mod args;
pub mod check;
pub mod prompt;

pub use args::Cli;
