//! Parsed argument state
//!
//! [`Arguments`] keeps the chosen operation, local options, global options
//! and positional targets apart so the dispatcher can query them and the
//! process layer can serialize them back into pacman's token grammar.

use crate::{
    config::TargetMode,
    core::flags::{self, format_flag},
    error::{ArgsError, Result},
};
use std::collections::BTreeMap;

/// Every value recorded for one flag, in command-line order
///
/// Switches record an empty string per occurrence, so `-dd` holds two
/// entries and `len() >= 2` means "asked twice".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opt {
    pub args: Vec<String>,
}

impl Opt {
    /// Record another occurrence
    pub fn add(&mut self, arg: impl Into<String>) {
        self.args.push(arg.into());
    }

    /// First recorded value, or an empty string
    pub fn first(&self) -> &str {
        self.args.first().map_or("", String::as_str)
    }

    /// Replace every occurrence with a single value
    pub fn set(&mut self, arg: impl Into<String>) {
        self.args = vec![arg.into()];
    }

    /// Number of recorded occurrences
    pub fn count(&self) -> usize {
        self.args.len()
    }
}

/// Structured command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    /// Operation name as spelled on the command line, empty when unset
    pub op: String,
    pub options: BTreeMap<String, Opt>,
    pub globals: BTreeMap<String, Opt>,
    pub targets: Vec<String>,
}

impl Arguments {
    /// Create an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Independent copy of the whole structure
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Copy holding only the global options
    pub fn copy_globals(&self) -> Self {
        Self {
            globals: self.globals.clone(),
            ..Self::default()
        }
    }

    fn add_op(&mut self, op: &str) -> Result<()> {
        if !self.op.is_empty() {
            return Err(ArgsError::multiple_operations(
                format_flag(&self.op),
                format_flag(op),
            ));
        }

        self.op = op.to_string();
        Ok(())
    }

    /// Register one occurrence of `option` carrying `arg`
    ///
    /// Operations fill the operation slot, globals and locals are appended
    /// to their own maps.
    pub fn add_param(&mut self, option: &str, arg: &str) -> Result<()> {
        let Some(spec) = flags::lookup(option) else {
            return Err(ArgsError::invalid_option(format_flag(option)));
        };

        let map = match spec.kind {
            flags::FlagKind::Operation => return self.add_op(option),
            flags::FlagKind::Global => &mut self.globals,
            flags::FlagKind::Local => &mut self.options,
        };
        map.entry(option.to_string()).or_default().add(arg);
        Ok(())
    }

    /// Register each name as a bare switch
    pub fn add_arg(&mut self, options: &[&str]) -> Result<()> {
        for option in options {
            self.add_param(option, "")?;
        }
        Ok(())
    }

    /// Remove flags by name from both maps
    pub fn del_arg(&mut self, options: &[&str]) {
        for option in options {
            self.options.remove(*option);
            self.globals.remove(*option);
        }
    }

    fn find(&self, options: &[&str]) -> Option<&Opt> {
        options
            .iter()
            .find_map(|option| self.options.get(*option).or_else(|| self.globals.get(*option)))
    }

    /// True if any of the given spellings was recorded
    pub fn exists_arg(&self, options: &[&str]) -> bool {
        self.find(options).is_some()
    }

    /// True if the first recorded spelling was given at least twice
    pub fn exists_double(&self, options: &[&str]) -> bool {
        self.find(options).is_some_and(|opt| opt.count() >= 2)
    }

    /// First value of the first recorded spelling, with "given twice" and
    /// "given at all" indicators
    pub fn get_arg(&self, options: &[&str]) -> (String, bool, bool) {
        match self.find(options) {
            Some(opt) => (opt.first().to_string(), opt.count() >= 2, opt.count() >= 1),
            None => (String::new(), false, false),
        }
    }

    pub fn add_target<I, S>(&mut self, targets: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets.extend(targets.into_iter().map(Into::into));
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    /// Whether running the wrapped tool for this invocation needs root
    pub fn need_root(&self, mode: TargetMode) -> bool {
        if self.exists_arg(&["h", "help"]) {
            return false;
        }

        match self.op.as_str() {
            "D" | "database" => !self.exists_arg(&["k", "check"]),
            "F" | "files" => self.exists_arg(&["y", "refresh"]),
            "Q" | "query" => self.exists_arg(&["k", "check"]),
            "R" | "remove" => !self.exists_arg(&["p", "print", "print-format"]),
            "S" | "sync" => {
                if self.exists_arg(&["y", "refresh"]) {
                    return true;
                }
                let read_only = self.exists_arg(&["p", "print", "print-format"])
                    || self.exists_arg(&["s", "search"])
                    || self.exists_arg(&["l", "list"])
                    || self.exists_arg(&["g", "groups"])
                    || self.exists_arg(&["i", "info"])
                    || (self.exists_arg(&["c", "clean"]) && mode == TargetMode::Aur);
                !read_only
            }
            "U" | "upgrade" => true,
            _ => false,
        }
    }

    /// Operation followed by every local option
    ///
    /// The first element is always the operation token, or an empty string
    /// when no operation is set.
    pub fn format_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.op.is_empty() {
            args.push(String::new());
        } else {
            args.push(format_flag(&self.op));
        }

        for (option, opt) in &self.options {
            if option == "--" {
                continue;
            }
            push_occurrences(&mut args, option, opt);
        }

        args
    }

    /// Every global option, repeated as many times as it was given
    pub fn format_globals(&self) -> Vec<String> {
        let mut args = Vec::new();
        for (option, opt) in &self.globals {
            push_occurrences(&mut args, option, opt);
        }
        args
    }
}

fn push_occurrences(args: &mut Vec<String>, option: &str, opt: &Opt) {
    let formatted = format_flag(option);
    let with_value = flags::takes_value(option);

    for value in &opt.args {
        args.push(formatted.clone());
        if with_value {
            args.push(value.clone());
        }
    }
}
