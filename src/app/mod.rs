//! Run orchestration: display setup, worker fan-out, shutdown wiring.
mod runner;

pub use runner::execute_run;
