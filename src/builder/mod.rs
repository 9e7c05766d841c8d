//! Descriptor builders.
//!
//! Everything here is pure: given a validated toolchain install, build the
//! descriptor trees and side descriptions (scanner profiles, launch
//! configuration, environment). Registration and file writes happen in
//! [`crate::ops`].

pub mod autotools;
pub mod environment;
pub mod launch;
pub mod project;
pub mod tool;
pub mod toolchain;

pub use autotools::{build_autotools_project_type, build_autotools_toolchain};
pub use environment::{build_environment, EnvOp, EnvVar};
pub use launch::{build_launch, DebuggerConfig, LaunchDescriptor};
pub use project::{build_configuration, build_project_type, build_project_types, ArtefactKind, BuildVariant};
pub use tool::{build_tool, scanner_profile, CompilerLanguage, ScannerProfile, ToolKind};
pub use toolchain::build_toolchain;

use serde::Serialize;

use crate::core::manifest::ToolchainInstall;
use crate::core::node::ConfigNode;

pub(crate) const ALL: &str = "all";
pub(crate) const FALSE: &str = "false";
pub(crate) const LINUX: &str = "linux";
pub(crate) const STRING: &str = "string";

pub const COMMAND_LINE_GENERATOR: &str =
    "org.eclipse.cdt.managedbuilder.internal.core.ManagedCommandLineGenerator";
pub const ENVIRONMENT_SUPPLIER: &str = "org.buildroot.cdt.toolchain.BuildrootEnvironmentVariableSupplier";
/// Environment supplier named by project types; differs from the toolchain one.
pub const PROJECT_ENVIRONMENT_SUPPLIER: &str =
    "org.buildroot.cdt.toolchain.managedbuilder.toolchain.BuildrootEnvironmentVariableSupplier";

/// Which descriptor families to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub autotools: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions { autotools: true }
    }
}

/// Every descriptor and side description built for one toolchain.
#[derive(Debug, Clone, Serialize)]
pub struct ToolchainDescriptors {
    #[serde(flatten)]
    pub install: ToolchainInstall,
    pub toolchain: ConfigNode,
    pub project_types: Vec<ConfigNode>,
    pub autotools_toolchain: Option<ConfigNode>,
    pub autotools_project_type: Option<ConfigNode>,
    pub scanner_profiles: Vec<ScannerProfile>,
    pub launch: LaunchDescriptor,
}

impl ToolchainDescriptors {
    /// Top-level descriptor nodes, in registration order.
    pub fn nodes(&self) -> Vec<&ConfigNode> {
        let mut nodes = vec![&self.toolchain];
        nodes.extend(self.project_types.iter());
        nodes.extend(self.autotools_toolchain.iter());
        nodes.extend(self.autotools_project_type.iter());
        nodes
    }
}

/// Build all descriptors for one toolchain.
pub fn build_all(install: &ToolchainInstall, options: BuildOptions) -> ToolchainDescriptors {
    let path = install.install_path();
    let toolchain = build_toolchain(install);
    let project_types = build_project_types(path, &toolchain);

    let (autotools_toolchain, autotools_project_type) = if options.autotools {
        let tc = build_autotools_toolchain(install);
        let pt = build_autotools_project_type(path, &tc);
        (Some(tc), Some(pt))
    } else {
        (None, None)
    };

    let mut languages = vec![CompilerLanguage::C];
    if install.has_cxx {
        languages.push(CompilerLanguage::Cxx);
    }
    let scanner_profiles = languages
        .into_iter()
        .map(|lang| scanner_profile(&install.entry, lang))
        .collect();

    ToolchainDescriptors {
        install: install.clone(),
        toolchain,
        project_types,
        autotools_toolchain,
        autotools_project_type,
        scanner_profiles,
        launch: build_launch(&install.entry),
    }
}
