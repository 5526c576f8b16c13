//! CLI argument types and run configuration.
mod cli;
mod config;

#[cfg(test)]
mod tests;

pub use cli::CliArgs;
pub use config::{RunConfig, RunMode};
