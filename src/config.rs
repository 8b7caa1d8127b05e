//! Front end configuration
//!
//! Holds the persisted preferences of the AUR helper and the extraction pass
//! that strips the helper's own flags out of parsed [`Arguments`] so they are
//! never forwarded to pacman.

use crate::{
    core::Arguments,
    error::{ArgsError, Result},
    utils::{env::EnvUtils, fs::FileSystemUtils},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Order in which search results are numbered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    BottomUp,
    TopDown,
}

/// When to download PKGBUILDs that are already present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Redownload {
    #[default]
    No,
    Yes,
    All,
}

/// When to rebuild packages that are already up to date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rebuild {
    #[default]
    No,
    Yes,
    All,
    Tree,
}

/// What to do with make dependencies after a build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoveMake {
    Yes,
    No,
    #[default]
    Ask,
}

/// Which package sources an operation considers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetMode {
    #[default]
    Any,
    Aur,
    Repo,
}

/// State that only lives for the current invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Runtime {
    /// Persist the configuration after extraction
    pub save_config: bool,
    pub mode: TargetMode,
    /// Endpoint handed to the AUR query client
    pub rpc_url: String,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    #[serde(rename = "aururl")]
    pub aur_url: String,
    #[serde(rename = "buildDir")]
    pub build_dir: String,
    #[serde(rename = "absdir")]
    pub abs_dir: String,
    pub editor: String,
    #[serde(rename = "editorflags")]
    pub editor_flags: String,
    #[serde(rename = "makepkgbin")]
    pub makepkg_bin: String,
    #[serde(rename = "makepkgconf")]
    pub makepkg_conf: String,
    #[serde(rename = "pacmanbin")]
    pub pacman_bin: String,
    #[serde(rename = "pacmanconf")]
    pub pacman_conf: String,
    pub redownload: Redownload,
    pub rebuild: Rebuild,
    #[serde(rename = "answerclean")]
    pub answer_clean: String,
    #[serde(rename = "answerdiff")]
    pub answer_diff: String,
    #[serde(rename = "answeredit")]
    pub answer_edit: String,
    #[serde(rename = "answerupgrade")]
    pub answer_upgrade: String,
    #[serde(rename = "gitbin")]
    pub git_bin: String,
    #[serde(rename = "gpgbin")]
    pub gpg_bin: String,
    #[serde(rename = "gpgflags")]
    pub gpg_flags: String,
    pub mflags: String,
    #[serde(rename = "sortby")]
    pub sort_by: String,
    #[serde(rename = "searchby")]
    pub search_by: String,
    #[serde(rename = "gitflags")]
    pub git_flags: String,
    #[serde(rename = "removemake")]
    pub remove_make: RemoveMake,
    #[serde(rename = "sudobin")]
    pub sudo_bin: String,
    #[serde(rename = "sudoflags")]
    pub sudo_flags: String,
    #[serde(rename = "requestsplitn")]
    pub request_split_n: i32,
    #[serde(rename = "sortmode")]
    pub sort_mode: SortMode,
    /// Days between completion cache refreshes, negative disables refresh
    #[serde(rename = "completionrefreshtime")]
    pub completion_interval: i32,
    #[serde(rename = "sudoloop")]
    pub sudo_loop: bool,
    #[serde(rename = "timeupdate")]
    pub time_update: bool,
    pub devel: bool,
    #[serde(rename = "cleanAfter")]
    pub clean_after: bool,
    pub provides: bool,
    #[serde(rename = "pgpfetch")]
    pub pgp_fetch: bool,
    #[serde(rename = "upgrademenu")]
    pub upgrade_menu: bool,
    #[serde(rename = "cleanmenu")]
    pub clean_menu: bool,
    #[serde(rename = "diffmenu")]
    pub diff_menu: bool,
    #[serde(rename = "editmenu")]
    pub edit_menu: bool,
    #[serde(rename = "combinedupgrade")]
    pub combined_upgrade: bool,
    #[serde(rename = "useask")]
    pub use_ask: bool,
    #[serde(rename = "batchinstall")]
    pub batch_install: bool,
    #[serde(skip)]
    pub no_confirm: bool,
    #[serde(skip)]
    pub runtime: Runtime,
}

impl Default for Configuration {
    fn default() -> Self {
        let build_dir = EnvUtils::cache_dir().join("yay");

        Self {
            aur_url: "https://aur.archlinux.org".to_string(),
            abs_dir: build_dir.join("abs").display().to_string(),
            build_dir: build_dir.display().to_string(),
            editor: String::new(),
            editor_flags: String::new(),
            makepkg_bin: "makepkg".to_string(),
            makepkg_conf: String::new(),
            pacman_bin: "pacman".to_string(),
            pacman_conf: "/etc/pacman.conf".to_string(),
            redownload: Redownload::No,
            rebuild: Rebuild::No,
            answer_clean: String::new(),
            answer_diff: String::new(),
            answer_edit: String::new(),
            answer_upgrade: String::new(),
            git_bin: "git".to_string(),
            gpg_bin: "gpg".to_string(),
            gpg_flags: String::new(),
            mflags: String::new(),
            sort_by: "votes".to_string(),
            search_by: "name-desc".to_string(),
            git_flags: String::new(),
            remove_make: RemoveMake::Ask,
            sudo_bin: "sudo".to_string(),
            sudo_flags: String::new(),
            request_split_n: 150,
            sort_mode: SortMode::BottomUp,
            completion_interval: 7,
            sudo_loop: false,
            time_update: false,
            devel: false,
            clean_after: false,
            provides: true,
            pgp_fetch: true,
            upgrade_menu: true,
            clean_menu: true,
            diff_menu: true,
            edit_menu: false,
            combined_upgrade: false,
            use_ask: false,
            batch_install: false,
            no_confirm: false,
            runtime: Runtime::default(),
        }
    }
}

impl Configuration {
    /// Default location of the persisted configuration
    pub fn default_path() -> PathBuf {
        EnvUtils::config_dir().join("yay").join("config.json")
    }

    /// Load persisted settings, falling back to defaults when the file is absent
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let fs_utils = FileSystemUtils::new();
        if !fs_utils.is_file(path) {
            debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs_utils
            .read_file_to_string(path)
            .map_err(|e| ArgsError::file_system("read", path, e))?;

        serde_json::from_str(&content).map_err(|e| {
            ArgsError::config_with_source(format!("malformed {}", path.display()), e)
        })
    }

    /// Persist settings as pretty-printed JSON
    #[instrument(skip(self))]
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_json()?;
        FileSystemUtils::new()
            .write_file(path, content)
            .map_err(|e| ArgsError::file_system("write", path, e))?;

        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ArgsError::config_with_source("failed to serialize configuration", e))
    }

    /// Move every front end flag from `args` into this configuration
    ///
    /// Consumed flags are deleted from `args`. Also normalizes the AUR URL
    /// and derives the RPC endpoint.
    #[instrument(skip_all)]
    pub fn extract_options(&mut self, args: &mut Arguments) {
        let candidates: Vec<(String, String)> = args
            .options
            .iter()
            .chain(args.globals.iter())
            .map(|(option, opt)| (option.clone(), opt.first().to_string()))
            .collect();

        for (option, value) in candidates {
            if self.handle_option(&option, &value) {
                debug!("Consumed front end option '{}'", option);
                args.del_arg(&[option.as_str()]);
            }
        }

        self.aur_url = self.aur_url.trim_end_matches('/').to_string();
        self.runtime.rpc_url = format!("{}/rpc.php?", self.aur_url);
    }

    /// Apply one flag, returning whether it belongs to the front end
    pub fn handle_option(&mut self, option: &str, value: &str) -> bool {
        match option {
            "aururl" => self.aur_url = value.to_string(),
            "save" => self.runtime.save_config = true,
            "afterclean" | "cleanafter" => self.clean_after = true,
            "noafterclean" | "nocleanafter" => self.clean_after = false,
            "devel" => self.devel = true,
            "nodevel" => self.devel = false,
            "timeupdate" => self.time_update = true,
            "notimeupdate" => self.time_update = false,
            "topdown" => self.sort_mode = SortMode::TopDown,
            "bottomup" => self.sort_mode = SortMode::BottomUp,
            "completioninterval" => match value.parse() {
                Ok(n) => self.completion_interval = n,
                Err(_) => debug!("Ignoring completioninterval '{}'", value),
            },
            "sortby" => self.sort_by = value.to_string(),
            "searchby" => self.search_by = value.to_string(),
            "noconfirm" => self.no_confirm = true,
            "config" => self.pacman_conf = value.to_string(),
            "redownload" => self.redownload = Redownload::Yes,
            "redownloadall" => self.redownload = Redownload::All,
            "noredownload" => self.redownload = Redownload::No,
            "rebuild" => self.rebuild = Rebuild::Yes,
            "rebuildall" => self.rebuild = Rebuild::All,
            "rebuildtree" => self.rebuild = Rebuild::Tree,
            "norebuild" => self.rebuild = Rebuild::No,
            "batchinstall" => self.batch_install = true,
            "nobatchinstall" => self.batch_install = false,
            "answerclean" => self.answer_clean = value.to_string(),
            "noanswerclean" => self.answer_clean.clear(),
            "answerdiff" => self.answer_diff = value.to_string(),
            "noanswerdiff" => self.answer_diff.clear(),
            "answeredit" => self.answer_edit = value.to_string(),
            "noansweredit" => self.answer_edit.clear(),
            "answerupgrade" => self.answer_upgrade = value.to_string(),
            "noanswerupgrade" => self.answer_upgrade.clear(),
            "gpgflags" => self.gpg_flags = value.to_string(),
            "mflags" => self.mflags = value.to_string(),
            "gitflags" => self.git_flags = value.to_string(),
            "builddir" => self.build_dir = value.to_string(),
            "absdir" => self.abs_dir = value.to_string(),
            "editor" => self.editor = value.to_string(),
            "editorflags" => self.editor_flags = value.to_string(),
            "makepkg" => self.makepkg_bin = value.to_string(),
            "makepkgconf" => self.makepkg_conf = value.to_string(),
            "nomakepkgconf" => self.makepkg_conf.clear(),
            "pacman" => self.pacman_bin = value.to_string(),
            "git" => self.git_bin = value.to_string(),
            "gpg" => self.gpg_bin = value.to_string(),
            "sudo" => self.sudo_bin = value.to_string(),
            "sudoflags" => self.sudo_flags = value.to_string(),
            "requestsplitn" => match value.parse::<i32>() {
                Ok(n) if n > 0 => self.request_split_n = n,
                _ => debug!("Ignoring requestsplitn '{}'", value),
            },
            "sudoloop" => self.sudo_loop = true,
            "nosudoloop" => self.sudo_loop = false,
            "provides" => self.provides = true,
            "noprovides" => self.provides = false,
            "pgpfetch" => self.pgp_fetch = true,
            "nopgpfetch" => self.pgp_fetch = false,
            "upgrademenu" => self.upgrade_menu = true,
            "noupgrademenu" => self.upgrade_menu = false,
            "cleanmenu" => self.clean_menu = true,
            "nocleanmenu" => self.clean_menu = false,
            "diffmenu" => self.diff_menu = true,
            "nodiffmenu" => self.diff_menu = false,
            "editmenu" => self.edit_menu = true,
            "noeditmenu" => self.edit_menu = false,
            "useask" => self.use_ask = true,
            "nouseask" => self.use_ask = false,
            "combinedupgrade" => self.combined_upgrade = true,
            "nocombinedupgrade" => self.combined_upgrade = false,
            "a" | "aur" => self.runtime.mode = TargetMode::Aur,
            "repo" => self.runtime.mode = TargetMode::Repo,
            "removemake" => self.remove_make = RemoveMake::Yes,
            "noremovemake" => self.remove_make = RemoveMake::No,
            "askremovemake" => self.remove_make = RemoveMake::Ask,
            _ => return false,
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args_from(options: &[(&str, &str)]) -> Arguments {
        let mut args = Arguments::new();
        args.add_arg(&["S"]).unwrap();
        for (option, value) in options {
            args.add_param(option, value).unwrap();
        }
        args
    }

    #[test]
    fn test_extract_strips_front_end_flags() {
        let mut config = Configuration::default();
        let mut args = args_from(&[("sortby", "popularity"), ("devel", ""), ("needed", "")]);
        args.add_target(["pkgname"]);

        config.extract_options(&mut args);

        assert_eq!(config.sort_by, "popularity");
        assert!(config.devel);
        assert!(!args.exists_arg(&["sortby", "devel"]));
        assert!(args.exists_arg(&["needed"]));
        assert_eq!(args.targets, vec!["pkgname"]);
    }

    #[test]
    fn test_extract_consumes_globals() {
        let mut config = Configuration::default();
        let mut args = args_from(&[("config", "/tmp/pacman.conf"), ("noconfirm", ""), ("b", "/db")]);

        config.extract_options(&mut args);

        assert_eq!(config.pacman_conf, "/tmp/pacman.conf");
        assert!(config.no_confirm);
        assert!(!args.exists_arg(&["config", "noconfirm"]));
        assert!(args.exists_arg(&["b"]));
    }

    #[test]
    fn test_paired_switches() {
        let mut config = Configuration::default();
        assert!(config.handle_option("cleanafter", ""));
        assert!(config.clean_after);
        assert!(config.handle_option("noafterclean", ""));
        assert!(!config.clean_after);
        assert!(config.handle_option("topdown", ""));
        assert_eq!(config.sort_mode, SortMode::TopDown);
        assert!(config.handle_option("rebuildtree", ""));
        assert_eq!(config.rebuild, Rebuild::Tree);
        assert!(config.handle_option("aur", ""));
        assert_eq!(config.runtime.mode, TargetMode::Aur);
    }

    #[test]
    fn test_clearing_answers() {
        let mut config = Configuration::default();
        config.handle_option("answerdiff", "All");
        assert_eq!(config.answer_diff, "All");
        config.handle_option("noanswerdiff", "");
        assert!(config.answer_diff.is_empty());
    }

    #[test]
    fn test_pacman_flags_are_not_handled() {
        let mut config = Configuration::default();
        assert!(!config.handle_option("nodeps", ""));
        assert!(!config.handle_option("b", "/db"));
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_bad_integers_are_ignored() {
        let mut config = Configuration::default();
        assert!(config.handle_option("requestsplitn", "0"));
        assert!(config.handle_option("requestsplitn", "lots"));
        assert_eq!(config.request_split_n, 150);
        assert!(config.handle_option("requestsplitn", "50"));
        assert_eq!(config.request_split_n, 50);

        assert!(config.handle_option("completioninterval", "soon"));
        assert_eq!(config.completion_interval, 7);
        assert!(config.handle_option("completioninterval", "-1"));
        assert_eq!(config.completion_interval, -1);
    }

    #[test]
    fn test_ignored_integer_is_still_stripped() {
        let mut config = Configuration::default();
        let mut args = args_from(&[("requestsplitn", "-3")]);
        config.extract_options(&mut args);
        assert_eq!(config.request_split_n, 150);
        assert!(!args.exists_arg(&["requestsplitn"]));
    }

    #[test]
    fn test_aur_url_normalized() {
        let mut config = Configuration::default();
        let mut args = args_from(&[("aururl", "https://aur.example.org//")]);
        config.extract_options(&mut args);
        assert_eq!(config.aur_url, "https://aur.example.org");
        assert_eq!(config.runtime.rpc_url, "https://aur.example.org/rpc.php?");
    }

    #[test]
    fn test_first_value_wins() {
        let mut config = Configuration::default();
        let mut args = args_from(&[("builddir", "/one"), ("builddir", "/two")]);
        config.extract_options(&mut args);
        assert_eq!(config.build_dir, "/one");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Configuration::load(&temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("yay").join("config.json");

        let mut config = Configuration::default();
        config.sort_by = "popularity".to_string();
        config.remove_make = RemoveMake::No;
        config.runtime.save_config = true;
        config.save(&path).unwrap();

        let loaded = Configuration::load(&path).unwrap();
        assert_eq!(loaded.sort_by, "popularity");
        assert_eq!(loaded.remove_make, RemoveMake::No);
        assert!(!loaded.runtime.save_config);
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"sortby": "name", "devel": true}"#).unwrap();

        let config = Configuration::load(&path).unwrap();
        assert_eq!(config.sort_by, "name");
        assert!(config.devel);
        assert_eq!(config.pacman_bin, "pacman");
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Configuration::load(&path).unwrap_err();
        assert!(matches!(err, ArgsError::Config { .. }));
    }
}
