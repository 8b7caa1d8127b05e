//! # yay-args
//!
//! Command line handling for an AUR helper that wraps pacman. The parser
//! accepts pacman's full grammar plus the helper's own operations and
//! settings flags, and can serialize what is left back into the exact
//! token sequence pacman expects.
//!
//! ## Features
//!
//! - Combined short flags, glued values, `--long=value` and `--`
//! - Repeated flags are counted, so `-dd` is forwarded as two `-d`
//! - Extra targets read from standard input with `-`
//! - Helper-only flags are moved into a persisted [`config::Configuration`]
//!
//! ## Example
//!
//! ```no_run
//! use yay_args::{config::Configuration, core::Arguments, utils::Input};
//!
//! let mut input = Input::stdin();
//! let mut args = Arguments::parse(&["-S", "--sortby=votes", "pkgname"], &mut input)?;
//! let mut config = Configuration::default();
//! config.extract_options(&mut args);
//! println!("{:?}", args.format_args());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
///
/// Logs go to stderr so stdout only carries command output.
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
