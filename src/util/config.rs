//! Configuration file support.
//!
//! Two locations are read:
//! - Global: `~/.buildroot-cdt/config.toml` - User-wide defaults
//! - Explicit: the file passed with `--config`
//!
//! The explicit file takes precedence over the global one.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::BuildOptions;
use crate::core::manifest::default_manifest_path;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discovery settings
    pub discovery: DiscoveryConfig,
}

/// Settings of toolchain discovery.
///
/// Unset fields fall back to their defaults so that merging only overrides
/// what a file actually states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Toolchain manifest to read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    /// Build the Autotools descriptors (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autotools: Option<bool>,

    /// Contribute launch configurations (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch: Option<bool>,

    /// Create missing gdbinit files (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gdbinit: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist
    /// or can't be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let discovery = other.discovery;
        if discovery.manifest.is_some() {
            self.discovery.manifest = discovery.manifest;
        }
        if discovery.autotools.is_some() {
            self.discovery.autotools = discovery.autotools;
        }
        if discovery.launch.is_some() {
            self.discovery.launch = discovery.launch;
        }
        if discovery.gdbinit.is_some() {
            self.discovery.gdbinit = discovery.gdbinit;
        }
    }

    /// Manifest path: configured, or the one in the home directory.
    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.discovery.manifest.clone().or_else(default_manifest_path)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            autotools: self.discovery.autotools.unwrap_or(true),
        }
    }

    pub fn launch_enabled(&self) -> bool {
        self.discovery.launch.unwrap_or(true)
    }

    pub fn gdbinit_enabled(&self) -> bool {
        self.discovery.gdbinit.unwrap_or(true)
    }
}

/// Get the global config directory (`~/.buildroot-cdt`).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".buildroot-cdt"))
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Load the effective configuration.
///
/// A broken global file is logged and ignored; a broken explicit file is an
/// error since the user asked for it.
pub fn load_config(global_path: Option<&Path>, explicit_path: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global) = global_path {
        config.merge(Config::load_or_default(global));
    }

    if let Some(explicit) = explicit_path {
        config.merge(Config::load(explicit)?);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.discovery.manifest.is_none());
        assert!(config.build_options().autotools);
        assert!(config.launch_enabled());
        assert!(config.gdbinit_enabled());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[discovery]
manifest = "/srv/toolchains.txt"
autotools = false
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(
            config.discovery.manifest,
            Some(PathBuf::from("/srv/toolchains.txt"))
        );
        assert!(!config.build_options().autotools);
        assert!(config.launch_enabled());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.discovery.manifest = Some(PathBuf::from("/a"));
        base.discovery.gdbinit = Some(false);

        let mut override_cfg = Config::default();
        override_cfg.discovery.manifest = Some(PathBuf::from("/b"));

        base.merge(override_cfg);

        assert_eq!(base.discovery.manifest, Some(PathBuf::from("/b")));
        assert!(!base.gdbinit_enabled()); // Not overridden
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let explicit = tmp.path().join("explicit.toml");

        std::fs::write(
            &global,
            "[discovery]\nmanifest = \"/global\"\nlaunch = false\n",
        )
        .unwrap();
        std::fs::write(&explicit, "[discovery]\nmanifest = \"/explicit\"\n").unwrap();

        let config = load_config(Some(&global), Some(&explicit)).unwrap();
        assert_eq!(config.manifest_path(), Some(PathBuf::from("/explicit")));
        assert!(!config.launch_enabled());

        let config = load_config(Some(&global), None).unwrap();
        assert_eq!(config.manifest_path(), Some(PathBuf::from("/global")));
    }

    #[test]
    fn test_load_config_missing_global() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(Some(&tmp.path().join("nope.toml")), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_broken_explicit() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("broken.toml");
        std::fs::write(&explicit, "[discovery\n").unwrap();

        let err = load_config(None, Some(&explicit)).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config file"));
    }
}
