//! Library half of the `gha` binary, so commands can be tested without
//! spawning a process.

pub mod commands;
mod tracing_setup;

pub use tracing_setup::init_tracing;
