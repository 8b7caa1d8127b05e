//! Environment lookups
//!
//! Resolves the XDG base directories used for persisted settings and the
//! build cache.

use std::{env, path::PathBuf};

/// Environment variable utilities
#[derive(Debug)]
pub struct EnvUtils;

impl EnvUtils {
    /// Get an environment variable with a default value
    pub fn get_var_or_default(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Non-empty value of an environment variable
    fn non_empty_var(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }

    /// Home directory, `/` when `HOME` is unset
    pub fn home_dir() -> PathBuf {
        PathBuf::from(Self::get_var_or_default("HOME", "/"))
    }

    /// `$XDG_CONFIG_HOME`, falling back to `~/.config`
    pub fn config_dir() -> PathBuf {
        Self::non_empty_var("XDG_CONFIG_HOME")
            .map_or_else(|| Self::home_dir().join(".config"), PathBuf::from)
    }

    /// `$XDG_CACHE_HOME`, falling back to `~/.cache`
    pub fn cache_dir() -> PathBuf {
        Self::non_empty_var("XDG_CACHE_HOME")
            .map_or_else(|| Self::home_dir().join(".cache"), PathBuf::from)
    }

    /// Set environment variable (mainly for testing)
    pub fn set_var<K, V>(key: K, value: V)
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        unsafe { env::set_var(key.as_ref(), value.as_ref()) }
    }

    /// Remove environment variable (mainly for testing)
    pub fn remove_var<K: AsRef<str>>(key: K) {
        unsafe { env::remove_var(key.as_ref()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_var_or_default() {
        let value = EnvUtils::get_var_or_default("YAY_ARGS_NONEXISTENT_VAR", "default");
        assert_eq!(value, "default");

        EnvUtils::set_var("YAY_ARGS_TEST_VAR", "test_value");
        let value = EnvUtils::get_var_or_default("YAY_ARGS_TEST_VAR", "default");
        assert_eq!(value, "test_value");
        EnvUtils::remove_var("YAY_ARGS_TEST_VAR");
    }

    #[test]
    fn test_xdg_directories_are_absolute_or_home_relative() {
        let config = EnvUtils::config_dir();
        let cache = EnvUtils::cache_dir();
        assert!(config.ends_with(".config") || env::var("XDG_CONFIG_HOME").is_ok());
        assert!(cache.ends_with(".cache") || env::var("XDG_CACHE_HOME").is_ok());
    }
}
