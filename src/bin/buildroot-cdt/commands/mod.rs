//! Command implementations

pub mod completions;
pub mod env;
pub mod generate;
pub mod list;
pub mod register;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use buildroot_cdt::core::DiscoveryError;
use buildroot_cdt::util::config::{global_config_path, load_config};
use buildroot_cdt::util::diagnostic::emit;
use buildroot_cdt::util::Config;

/// Settings shared by every command.
pub struct Context {
    pub config: Config,
    pub manifest: PathBuf,
    pub color: bool,
}

impl Context {
    /// Resolve configuration and the manifest path.
    ///
    /// Manifest precedence: `--manifest` (or `BUILDROOT_CDT_MANIFEST`), then
    /// the configuration, then the home directory default.
    pub fn load(manifest: Option<PathBuf>, config_path: Option<&Path>, color: bool) -> Result<Self> {
        let global = global_config_path();
        let config = load_config(global.as_deref(), config_path)?;

        let manifest = match manifest {
            Some(path) => path,
            None => config
                .manifest_path()
                .context("could not determine the home directory; pass --manifest")?,
        };
        tracing::debug!("using manifest {}", manifest.display());

        Ok(Context {
            config,
            manifest,
            color,
        })
    }

    /// Print problems collected during a pass.
    pub fn report_problems(&self, problems: &[DiscoveryError]) {
        for problem in problems {
            emit(&problem.to_diagnostic(), self.color);
        }
    }
}
