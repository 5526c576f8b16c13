//! Worker run-loop: repeated request cycles under a termination policy.
mod run;


pub use run::{Worker, WorkerExit};
