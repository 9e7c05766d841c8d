//! Contributing descriptors to a build host.
//!
//! Descriptors are handed over as plug-in fragments, one per contribution.
//! The host side is behind [`Registrar`] so discovery can run against a real
//! host, a directory of fragment files, or a test double.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::builder::ToolchainDescriptors;
use crate::emit::xml::{
    build_definitions_extension, launch_extensions, plugin_fragment, scanner_profile_extension,
    MarkupError,
};
use crate::util::fs::{ensure_dir, write_string};

/// One contribution: a complete plug-in fragment and the id it is known by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFragment {
    pub id: String,
    pub xml: String,
}

/// Receiver of contributions.
pub trait Registrar {
    /// Hand one fragment to the host. An error means the host refused it.
    fn register(&mut self, fragment: &ExtensionFragment) -> Result<()>;
}

/// Registrar writing each fragment to `{dir}/{id}.xml`.
///
/// Path separators in an id become `_`, so every file lands directly in
/// `dir`. A file already written by this registrar is never replaced: the
/// second fragment mapping to it is refused.
#[derive(Debug, Clone)]
pub struct DirectoryRegistrar {
    dir: PathBuf,
    written: HashSet<PathBuf>,
}

impl DirectoryRegistrar {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectoryRegistrar {
            dir: dir.into(),
            written: HashSet::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a fragment is written to.
    pub fn fragment_path(&self, id: &str) -> PathBuf {
        let file_name = id.replace(['/', '\\'], "_");
        self.dir.join(format!("{}.xml", file_name))
    }
}

impl Registrar for DirectoryRegistrar {
    fn register(&mut self, fragment: &ExtensionFragment) -> Result<()> {
        let path = self.fragment_path(&fragment.id);
        if self.written.contains(&path) {
            bail!("{} was already written by this pass", path.display());
        }

        ensure_dir(&self.dir)?;
        write_string(&path, &fragment.xml)?;
        self.written.insert(path.clone());
        tracing::debug!("wrote {}", path.display());
        Ok(())
    }
}

/// Fragments contributed for one toolchain, in registration order:
/// build definitions, scanner profiles, then the launch configuration.
pub fn fragments_for(
    descriptors: &ToolchainDescriptors,
    launch: bool,
) -> Result<Vec<ExtensionFragment>, MarkupError> {
    let toolchain = &descriptors.toolchain;
    let mut fragments = vec![ExtensionFragment {
        id: toolchain.id().to_string(),
        xml: plugin_fragment([build_definitions_extension(
            toolchain.id(),
            toolchain.name().unwrap_or_default(),
            descriptors.nodes(),
        )])?,
    }];

    for profile in &descriptors.scanner_profiles {
        fragments.push(ExtensionFragment {
            id: profile.id.clone(),
            xml: plugin_fragment([scanner_profile_extension(profile)])?,
        });
    }

    if launch {
        fragments.push(ExtensionFragment {
            id: descriptors.launch.type_id.clone(),
            xml: plugin_fragment(launch_extensions(&descriptors.launch))?,
        });
    }

    Ok(fragments)
}
