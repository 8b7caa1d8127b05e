//! Command-line interface module
//!
//! Parses the command line, applies the helper's settings and prints the
//! invocation that would be handed to the process layer.

pub mod commands;

pub use commands::{execute_command, pacman_command, run};
