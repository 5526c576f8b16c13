//! Shared live terminal display: full-screen repaint under one lock.
mod display;


pub use display::{LiveDisplay, TerminalSession};
