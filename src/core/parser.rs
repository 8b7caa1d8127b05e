//! Command line tokenizer
//!
//! Walks the argument vector once with a single token of lookahead,
//! following pacman's conventions:
//!
//! - `-Syu` bundles several short switches behind one dash
//! - `-b/some/path` glues a value to a short flag, `-b /some/path` takes the
//!   next token
//! - `--dbpath=/some/path` and `--dbpath /some/path` are equivalent
//! - everything after `--` is a target
//! - `-` reads extra targets from standard input

use crate::{
    core::{Arguments, flags},
    error::{ArgsError, Result},
    utils::input::Input,
};
use tracing::{debug, instrument};

/// Invocation used when no arguments are given at all
pub const DEFAULT_INVOCATION: &str = "-Syu";

/// Operation used when none is given, routing bare targets to search-and-install
pub const DEFAULT_OPERATION: &str = "Y";

impl Arguments {
    /// Parse a full argument vector, excluding the program name
    ///
    /// Targets are read from `input` when `-` is present, after which
    /// `input` is reattached to its terminal.
    #[instrument(skip_all, fields(argc = args.len()))]
    pub fn parse<S: AsRef<str>>(args: &[S], input: &mut Input) -> Result<Self> {
        let mut parsed = Self::new();

        if args.is_empty() {
            parsed.parse_short_option(DEFAULT_INVOCATION, "")?;
        } else {
            let mut used_next = false;

            for (k, arg) in args.iter().enumerate() {
                if used_next {
                    used_next = false;
                    continue;
                }

                let arg = arg.as_ref();
                let next = args.get(k + 1).map_or("", |next| next.as_ref());

                used_next = if parsed.exists_arg(&["--"]) {
                    parsed.add_target([arg]);
                    false
                } else if arg.starts_with("--") {
                    parsed.parse_long_option(arg, next)?
                } else if arg.starts_with('-') {
                    parsed.parse_short_option(arg, next)?
                } else {
                    parsed.add_target([arg]);
                    false
                };
            }
        }

        if parsed.op.is_empty() {
            parsed.op = DEFAULT_OPERATION.to_string();
        }

        if parsed.exists_arg(&["-"]) {
            let targets = input.read_targets()?;
            parsed.add_target(targets);
            parsed.del_arg(&["-"]);
            input.reattach()?;
        }

        debug!(
            "Parsed op={} options={} globals={} targets={}",
            parsed.op,
            parsed.options.len(),
            parsed.globals.len(),
            parsed.targets.len()
        );
        Ok(parsed)
    }

    /// Handle a short option bundle such as `-Syu`, `-b/some/path` or `-`
    ///
    /// Returns whether `next` was consumed as a value.
    fn parse_short_option(&mut self, arg: &str, next: &str) -> Result<bool> {
        if arg == "-" {
            self.add_arg(&["-"])?;
            return Ok(false);
        }

        let bundle = &arg[1..];

        for (k, c) in bundle.char_indices() {
            let mut buf = [0; 4];
            let name: &str = c.encode_utf8(&mut buf);
            let token = format!("-{name}");

            if flags::takes_value(name) {
                let rest = &bundle[k + c.len_utf8()..];
                if rest.is_empty() {
                    self.add_param(name, next).map_err(|e| respell(e, &token))?;
                    return Ok(true);
                }
                self.add_param(name, rest).map_err(|e| respell(e, &token))?;
                return Ok(false);
            }

            self.add_param(name, "").map_err(|e| respell(e, &token))?;
        }

        Ok(false)
    }

    /// Handle a long option such as `--sync`, `--dbpath=/x`, `--dbpath /x` or `--`
    ///
    /// Returns whether `next` was consumed as a value.
    fn parse_long_option(&mut self, arg: &str, next: &str) -> Result<bool> {
        if arg == "--" {
            self.add_arg(&["--"])?;
            return Ok(false);
        }

        let name = &arg[2..];

        if let Some((flag, value)) = name.split_once('=') {
            // `--=x` has no flag part to point at, so report the whole token
            let token = if flag.is_empty() { arg } else { &arg[..2 + flag.len()] };
            self.add_param(flag, value).map_err(|e| respell(e, token))?;
            Ok(false)
        } else if flags::takes_value(name) {
            self.add_param(name, next)?;
            Ok(true)
        } else {
            self.add_param(name, "").map_err(|e| respell(e, arg))?;
            Ok(false)
        }
    }
}

/// Name an unknown flag the way it was typed on the command line
fn respell(err: ArgsError, token: &str) -> ArgsError {
    match err {
        ArgsError::InvalidOption { .. } => ArgsError::invalid_option(token),
        other => other,
    }
}
