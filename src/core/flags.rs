//! Flag classification table
//!
//! The whole grammar lives in [`FLAGS`]: every recognised flag name maps to
//! a kind (operation, global or local) and whether it consumes a value.
//! Short and long spellings of the same flag are listed together but are
//! looked up independently.

/// Where a flag belongs once it is parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Top-level verb, at most one per invocation
    Operation,
    /// Forwarded under every operation
    Global,
    /// Only meaningful to the current operation
    Local,
}

/// One row of the flag table
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec {
    /// Every spelling of the flag, short form first when one exists
    pub names: &'static [&'static str],
    pub kind: FlagKind,
    pub takes_value: bool,
}

const fn op(names: &'static [&'static str]) -> FlagSpec {
    FlagSpec {
        names,
        kind: FlagKind::Operation,
        takes_value: false,
    }
}

const fn global(names: &'static [&'static str], takes_value: bool) -> FlagSpec {
    FlagSpec {
        names,
        kind: FlagKind::Global,
        takes_value,
    }
}

const fn switch(names: &'static [&'static str]) -> FlagSpec {
    FlagSpec {
        names,
        kind: FlagKind::Local,
        takes_value: false,
    }
}

const fn valued(names: &'static [&'static str]) -> FlagSpec {
    FlagSpec {
        names,
        kind: FlagKind::Local,
        takes_value: true,
    }
}

/// The complete pacman grammar plus the front end's own flags
pub static FLAGS: &[FlagSpec] = &[
    // operations
    op(&["V", "version"]),
    op(&["D", "database"]),
    op(&["F", "files"]),
    op(&["Q", "query"]),
    op(&["R", "remove"]),
    op(&["S", "sync"]),
    op(&["T", "deptest"]),
    op(&["U", "upgrade"]),
    op(&["Y", "yay"]),
    op(&["P", "show"]),
    op(&["G", "getpkgbuild"]),
    // globals
    global(&["b", "dbpath"], true),
    global(&["r", "root"], true),
    global(&["v", "verbose"], false),
    global(&["arch"], true),
    global(&["cachedir"], true),
    global(&["color"], true),
    global(&["config"], true),
    global(&["debug"], false),
    global(&["gpgdir"], true),
    global(&["hookdir"], true),
    global(&["logfile"], true),
    global(&["noconfirm"], false),
    global(&["confirm"], false),
    // pacman locals
    switch(&["-"]),
    switch(&["--"]),
    switch(&["h", "help"]),
    valued(&["ask"]),
    switch(&["disable-download-timeout"]),
    valued(&["sysroot"]),
    switch(&["d", "nodeps"]),
    valued(&["assume-installed"]),
    switch(&["dbonly"]),
    switch(&["noprogressbar"]),
    switch(&["noscriptlet"]),
    switch(&["p", "print"]),
    valued(&["print-format"]),
    switch(&["asdeps"]),
    switch(&["asexplicit"]),
    valued(&["ignore"]),
    valued(&["ignoregroup"]),
    switch(&["needed"]),
    valued(&["overwrite"]),
    switch(&["f", "force"]),
    switch(&["c", "changelog"]),
    switch(&["deps"]),
    switch(&["e", "explicit"]),
    switch(&["g", "groups"]),
    switch(&["i", "info"]),
    switch(&["k", "check"]),
    switch(&["l", "list"]),
    switch(&["m", "foreign"]),
    switch(&["n", "native"]),
    switch(&["o", "owns"]),
    switch(&["file"]),
    switch(&["q", "quiet"]),
    switch(&["s", "search"]),
    switch(&["t", "unrequired"]),
    switch(&["u", "upgrades"]),
    switch(&["cascade"]),
    switch(&["nosave"]),
    switch(&["recursive"]),
    switch(&["unneeded"]),
    switch(&["clean"]),
    switch(&["sysupgrade"]),
    switch(&["w", "downloadonly"]),
    switch(&["y", "refresh"]),
    switch(&["x", "regex"]),
    switch(&["machinereadable"]),
    // front end flags
    valued(&["aururl"]),
    switch(&["save"]),
    switch(&["afterclean", "cleanafter"]),
    switch(&["noafterclean", "nocleanafter"]),
    switch(&["devel"]),
    switch(&["nodevel"]),
    switch(&["timeupdate"]),
    switch(&["notimeupdate"]),
    switch(&["topdown"]),
    switch(&["bottomup"]),
    valued(&["completioninterval"]),
    valued(&["sortby"]),
    valued(&["searchby"]),
    switch(&["redownload"]),
    switch(&["redownloadall"]),
    switch(&["noredownload"]),
    switch(&["rebuild"]),
    switch(&["rebuildall"]),
    switch(&["rebuildtree"]),
    switch(&["norebuild"]),
    switch(&["batchinstall"]),
    switch(&["nobatchinstall"]),
    valued(&["answerclean"]),
    switch(&["noanswerclean"]),
    valued(&["answerdiff"]),
    switch(&["noanswerdiff"]),
    valued(&["answeredit"]),
    switch(&["noansweredit"]),
    valued(&["answerupgrade"]),
    switch(&["noanswerupgrade"]),
    valued(&["gpgflags"]),
    valued(&["mflags"]),
    valued(&["gitflags"]),
    valued(&["builddir"]),
    valued(&["absdir"]),
    valued(&["editor"]),
    valued(&["editorflags"]),
    valued(&["makepkg"]),
    valued(&["makepkgconf"]),
    switch(&["nomakepkgconf"]),
    valued(&["pacman"]),
    valued(&["git"]),
    valued(&["gpg"]),
    valued(&["sudo"]),
    valued(&["sudoflags"]),
    valued(&["requestsplitn"]),
    switch(&["sudoloop"]),
    switch(&["nosudoloop"]),
    switch(&["provides"]),
    switch(&["noprovides"]),
    switch(&["pgpfetch"]),
    switch(&["nopgpfetch"]),
    switch(&["upgrademenu"]),
    switch(&["noupgrademenu"]),
    switch(&["cleanmenu"]),
    switch(&["nocleanmenu"]),
    switch(&["diffmenu"]),
    switch(&["nodiffmenu"]),
    switch(&["editmenu"]),
    switch(&["noeditmenu"]),
    switch(&["useask"]),
    switch(&["nouseask"]),
    switch(&["combinedupgrade"]),
    switch(&["nocombinedupgrade"]),
    switch(&["a", "aur"]),
    switch(&["repo"]),
    switch(&["removemake"]),
    switch(&["noremovemake"]),
    switch(&["askremovemake"]),
    switch(&["complete"]),
    switch(&["stats"]),
    switch(&["news"]),
    switch(&["gendb"]),
    switch(&["currentconfig"]),
];

/// Find the table row for a flag name
pub fn lookup(name: &str) -> Option<&'static FlagSpec> {
    FLAGS.iter().find(|spec| spec.names.contains(&name))
}

/// True for any flag the grammar knows about
pub fn is_valid(name: &str) -> bool {
    lookup(name).is_some()
}

/// True for operation tokens such as `S` or `sync`
pub fn is_operation(name: &str) -> bool {
    lookup(name).is_some_and(|spec| spec.kind == FlagKind::Operation)
}

/// True for flags forwarded under every operation
pub fn is_global(name: &str) -> bool {
    lookup(name).is_some_and(|spec| spec.kind == FlagKind::Global)
}

/// True for flags that consume an argument
pub fn takes_value(name: &str) -> bool {
    lookup(name).is_some_and(|spec| spec.takes_value)
}

/// Render a flag name the way pacman expects it on the command line
pub fn format_flag(name: &str) -> String {
    if name.chars().count() > 1 {
        format!("--{name}")
    } else {
        format!("-{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_no_name_listed_twice() {
        let mut seen = HashSet::new();
        for spec in FLAGS {
            for name in spec.names {
                assert!(seen.insert(*name), "duplicate flag name: {name}");
            }
        }
    }

    #[test]
    fn test_operations() {
        for name in ["S", "sync", "R", "remove", "Y", "yay", "G", "getpkgbuild"] {
            assert!(is_operation(name), "{name} should be an operation");
        }
        assert!(!is_operation("y"));
        assert!(!is_operation("refresh"));
    }

    #[test]
    fn test_globals() {
        for name in ["b", "dbpath", "r", "root", "config", "color", "v", "noconfirm"] {
            assert!(is_global(name), "{name} should be global");
        }
        assert!(!is_global("nodeps"));
        assert!(!is_global("sysroot"));
    }

    #[test]
    fn test_takes_value() {
        assert!(takes_value("b"));
        assert!(takes_value("dbpath"));
        assert!(takes_value("sysroot"));
        assert!(takes_value("sortby"));
        assert!(takes_value("color"));
        assert!(!takes_value("d"));
        assert!(!takes_value("devel"));
        assert!(!takes_value("unknown"));
    }

    #[test]
    fn test_validity_is_superset() {
        assert!(is_valid("-"));
        assert!(is_valid("--"));
        assert!(is_valid("cleanafter"));
        assert!(is_valid("afterclean"));
        assert!(!is_valid("z"));
        assert!(!is_valid("frobnicate"));
        for spec in FLAGS {
            for name in spec.names {
                assert!(is_valid(name));
            }
        }
    }

    #[test]
    fn test_format_flag() {
        assert_eq!(format_flag("S"), "-S");
        assert_eq!(format_flag("sync"), "--sync");
        assert_eq!(format_flag("-"), "--");
        assert_eq!(format_flag("--"), "----");
    }
}
