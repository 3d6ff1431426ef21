//! `mealcheck-cli` library crate.
//!
//! Re-exports the shell modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod command;
pub mod render;
pub mod shell;
