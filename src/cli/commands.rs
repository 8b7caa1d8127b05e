//! Command dispatch for the CLI
//!
//! Nothing is executed here: pacman operations are rendered as the token
//! list the process layer would run, and the helper's own operations are
//! reported as the flow they route to.

use crate::{
    config::Configuration,
    core::Arguments,
    setup_logging,
    utils::Input,
};
use anyhow::Context;
use std::io::Write;
use tracing::{debug, info, instrument};

/// Parse `argv`, apply persisted and command-line settings, then dispatch
pub fn run<S: AsRef<str>>(argv: &[S], input: &mut Input, out: &mut impl Write) -> anyhow::Result<()> {
    setup_logging(debug_requested(argv))?;

    let mut args = Arguments::parse(argv, input)?;

    let config_path = Configuration::default_path();
    let mut config = Configuration::load(&config_path).context("Failed to load configuration")?;
    config.extract_options(&mut args);

    if config.runtime.save_config {
        config
            .save(&config_path)
            .context("Failed to save configuration")?;
    }

    execute_command(&config, &args, out)
}

/// Whether pacman's `--debug` appears before any `--` separator
///
/// Checked on the raw vector so that parsing itself is logged.
pub fn debug_requested<S: AsRef<str>>(argv: &[S]) -> bool {
    argv.iter()
        .map(|arg| arg.as_ref())
        .take_while(|arg| *arg != "--")
        .any(|arg| arg == "--debug")
}

/// Execute the appropriate command based on the parsed operation
#[instrument(skip_all, fields(op = %args.op))]
pub fn execute_command(
    config: &Configuration,
    args: &Arguments,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match args.op.as_str() {
        "Y" | "yay" => execute_yay_command(config, args, out),
        "P" | "show" => execute_show_command(config, args, out),
        "G" | "getpkgbuild" => execute_getpkgbuild_command(args, out),
        _ => execute_pacman_command(config, args, out),
    }
}

/// Build the full pacman invocation for the parsed arguments
///
/// Privilege escalation is prepended when the operation needs root.
pub fn pacman_command(config: &Configuration, args: &Arguments) -> Vec<String> {
    let mut cmd = Vec::new();

    if args.need_root(config.runtime.mode) {
        cmd.push(config.sudo_bin.clone());
        cmd.extend(config.sudo_flags.split_whitespace().map(str::to_string));
    }

    cmd.push(config.pacman_bin.clone());

    let mut formatted = args.format_args();
    // an empty leading token means no operation was set
    if formatted.first().is_some_and(String::is_empty) {
        formatted.remove(0);
    }
    cmd.extend(formatted);

    if config.no_confirm {
        cmd.push("--noconfirm".to_string());
    }
    cmd.push("--config".to_string());
    cmd.push(config.pacman_conf.clone());
    cmd.extend(args.format_globals());

    if !args.targets.is_empty() {
        cmd.push("--".to_string());
        cmd.extend(args.targets.iter().cloned());
    }

    cmd
}

fn execute_pacman_command(
    config: &Configuration,
    args: &Arguments,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let cmd = pacman_command(config, args);
    debug!("pacman invocation: {:?}", cmd);
    writeln!(out, "{}", cmd.join(" ")).context("Failed to write command")?;
    Ok(())
}

fn execute_yay_command(
    config: &Configuration,
    args: &Arguments,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if args.exists_arg(&["gendb"]) {
        writeln!(out, "gendb {}", config.build_dir)?;
    } else if args.exists_arg(&["c", "clean"]) {
        writeln!(out, "clean-dependencies")?;
    } else if args.targets.is_empty() {
        info!("No targets given");
    } else {
        writeln!(
            out,
            "search-and-install {} {}",
            config.runtime.rpc_url,
            args.targets.join(" ")
        )?;
    }
    Ok(())
}

fn execute_show_command(
    config: &Configuration,
    args: &Arguments,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if args.exists_arg(&["currentconfig"]) {
        writeln!(out, "{}", config.to_json()?)?;
    } else if args.exists_arg(&["s", "stats"]) {
        writeln!(out, "stats")?;
    } else if args.exists_arg(&["w", "news"]) {
        writeln!(out, "news {}", if args.exists_double(&["w", "news"]) { "all" } else { "unread" })?;
    } else if args.exists_arg(&["complete"]) {
        writeln!(out, "complete {}", config.completion_interval)?;
    } else {
        info!("Nothing to show");
    }
    Ok(())
}

fn execute_getpkgbuild_command(args: &Arguments, out: &mut impl Write) -> anyhow::Result<()> {
    if args.targets.is_empty() {
        anyhow::bail!("no targets specified");
    }
    writeln!(out, "getpkgbuild {}", args.targets.join(" "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::TargetMode, utils::input::TERMINAL_DEVICE};
    use std::io::Cursor;

    fn parsed(argv: &[&str]) -> (Configuration, Arguments) {
        let mut input = Input::new(Cursor::new(""), TERMINAL_DEVICE);
        let mut args = Arguments::parse(argv, &mut input).unwrap();
        let mut config = Configuration::default();
        config.extract_options(&mut args);
        (config, args)
    }

    fn output(argv: &[&str]) -> String {
        let (config, args) = parsed(argv);
        let mut out = Vec::new();
        execute_command(&config, &args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_debug_requested() {
        assert!(debug_requested(&["-S", "--debug", "pkg"]));
        assert!(!debug_requested(&["-S", "pkg"]));
        assert!(!debug_requested(&["-S", "--", "--debug"]));
        let empty: [&str; 0] = [];
        assert!(!debug_requested(&empty));
    }

    #[test]
    fn test_pacman_command_for_sync() {
        let (config, args) = parsed(&["-S", "--needed", "--sortby=votes", "pkgname"]);
        assert_eq!(
            pacman_command(&config, &args),
            vec!["sudo", "pacman", "-S", "--needed", "--config", "/etc/pacman.conf", "--", "pkgname"]
        );
    }

    #[test]
    fn test_pacman_command_without_root() {
        let (config, args) = parsed(&["-Qq", "-b", "/db"]);
        assert_eq!(
            pacman_command(&config, &args),
            vec!["pacman", "-Q", "-q", "--config", "/etc/pacman.conf", "-b", "/db"]
        );
    }

    #[test]
    fn test_pacman_command_forwards_repeats_and_settings() {
        let (config, args) = parsed(&[
            "-Rdd",
            "--noconfirm",
            "--config=/tmp/pacman.conf",
            "--sudo=doas",
            "--sudoflags=-n",
            "foo",
        ]);
        assert_eq!(
            pacman_command(&config, &args),
            vec![
                "doas", "-n", "pacman", "-R", "-d", "-d", "--noconfirm", "--config",
                "/tmp/pacman.conf", "--", "foo"
            ]
        );
    }

    #[test]
    fn test_pacman_command_drops_empty_operation() {
        let mut config = Configuration::default();
        config.runtime.mode = TargetMode::Any;
        let mut args = Arguments::new();
        args.add_arg(&["needed"]).unwrap();
        assert_eq!(
            pacman_command(&config, &args),
            vec!["pacman", "--needed", "--config", "/etc/pacman.conf"]
        );
    }

    #[test]
    fn test_execute_yay_with_targets() {
        let out = output(&["foo", "bar"]);
        assert_eq!(
            out,
            "search-and-install https://aur.archlinux.org/rpc.php? foo bar\n"
        );
    }

    #[test]
    fn test_execute_show_current_config() {
        let out = output(&["-P", "--currentconfig", "--sortby", "name"]);
        assert!(out.contains("\"sortby\": \"name\""));
    }

    #[test]
    fn test_execute_getpkgbuild_requires_targets() {
        let (config, args) = parsed(&["-G"]);
        let mut out = Vec::new();
        assert!(execute_command(&config, &args, &mut out).is_err());
        assert_eq!(output(&["-G", "yay"]), "getpkgbuild yay\n");
    }
}
