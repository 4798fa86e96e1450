// Application layer: flagctl command handling on top of the core set.

pub mod commands;

pub use commands::{ensure_persisted, run_command};
