//! Utility modules for common functionality
//!
//! Provides reusable utilities for input handling, file operations and
//! environment lookups.

pub mod env;
pub mod fs;
pub mod input;

pub use env::EnvUtils;
pub use fs::FileSystemUtils;
pub use input::Input;
