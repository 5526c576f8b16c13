//! Core library for the `reqvolley` CLI.
//!
//! This crate provides the internal building blocks used by the binary:
//! CLI argument types, request-file parsing, the worker run-loop, the
//! shared live terminal display, and the run controller. The primary
//! user-facing interface is the `reqvolley` command-line application.
pub mod app;
pub mod args;
pub mod entry;
pub mod error;
pub mod logger;
pub mod request;
pub mod shutdown;
pub mod stats;
pub mod transport;
pub mod ui;
pub mod worker;
