//! Core argument handling
//!
//! Contains the flag grammar, the parsed argument structure and the
//! tokenizer that fills it.

pub mod arguments;
pub mod flags;
pub mod parser;

pub use arguments::{Arguments, Opt};
pub use flags::{FlagKind, FlagSpec};
pub use parser::{DEFAULT_INVOCATION, DEFAULT_OPERATION};
