//! Project types and build configurations.
//!
//! Each toolchain gets one project type per artefact kind, and each project
//! type a debug and a release configuration. Configurations refer to the
//! toolchain by id through a toolchain reference node; they never embed a
//! copy of it.

use std::fmt;

use serde::Serialize;

use crate::core::naming::{identifier, Suffix};
use crate::core::node::{Attr, ConfigNode, NodeKind};

use super::{FALSE, PROJECT_ENVIRONMENT_SUPPLIER};

pub const ARTEFACT_TYPE_PREFIX: &str = "org.eclipse.cdt.build.core.buildArtefactType";
pub const BUILD_TYPE_PROPERTY: &str = "org.eclipse.cdt.build.core.buildType";
pub const GNU_CONFIGURATION_PARENT: &str = "cdt.managedbuild.config.gnu.base";
pub const CLEAN_COMMAND: &str = "rm -rf";

/// What a project produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArtefactKind {
    Executable,
    StaticLibrary,
    SharedLibrary,
}

impl ArtefactKind {
    pub const ALL: [ArtefactKind; 3] = [
        ArtefactKind::Executable,
        ArtefactKind::StaticLibrary,
        ArtefactKind::SharedLibrary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtefactKind::Executable => "exe",
            ArtefactKind::StaticLibrary => "staticLib",
            ArtefactKind::SharedLibrary => "sharedLib",
        }
    }

    /// Artefact type id understood by the host.
    pub fn artefact_type(&self) -> String {
        format!("{}.{}", ARTEFACT_TYPE_PREFIX, self.as_str())
    }
}

impl fmt::Display for ArtefactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build flavor of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuildVariant {
    Debug,
    Release,
}

impl BuildVariant {
    pub const ALL: [BuildVariant; 2] = [BuildVariant::Debug, BuildVariant::Release];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildVariant::Debug => "debug",
            BuildVariant::Release => "release",
        }
    }

    /// `buildProperties` value selecting this variant.
    pub fn build_properties(&self) -> String {
        format!("{0}={0}.{1}", BUILD_TYPE_PROPERTY, self.as_str())
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a project type with its debug and release configurations.
///
/// `toolchain` must be the toolchain descriptor of the same install; only
/// its id is used.
pub fn build_project_type(
    install_path: &str,
    toolchain: &ConfigNode,
    artefact: ArtefactKind,
) -> ConfigNode {
    let configurations = BuildVariant::ALL
        .into_iter()
        .map(|variant| build_configuration(install_path, toolchain.id(), variant, artefact));

    ConfigNode::builder(
        NodeKind::ProjectType,
        identifier(install_path, Suffix::ProjectType(artefact)),
    )
    .attr(Attr::IsAbstract, FALSE)
    .attr(Attr::IsTest, FALSE)
    .attr(Attr::BuildArtefactType, artefact.artefact_type())
    .attr(Attr::ProjectEnvironmentSupplier, PROJECT_ENVIRONMENT_SUPPLIER)
    .children(configurations)
    .build()
}

/// Build project types for every artefact kind.
pub fn build_project_types(install_path: &str, toolchain: &ConfigNode) -> Vec<ConfigNode> {
    ArtefactKind::ALL
        .into_iter()
        .map(|artefact| build_project_type(install_path, toolchain, artefact))
        .collect()
}

/// Build one configuration referring to `toolchain_id`.
pub fn build_configuration(
    install_path: &str,
    toolchain_id: &str,
    variant: BuildVariant,
    artefact: ArtefactKind,
) -> ConfigNode {
    let reference = toolchain_ref(
        identifier(install_path, Suffix::ToolchainRef(artefact, variant)),
        toolchain_id,
    );

    ConfigNode::builder(
        NodeKind::Configuration,
        identifier(install_path, Suffix::Configuration(artefact, variant)),
    )
    .name(variant.as_str())
    .attr(Attr::Parent, GNU_CONFIGURATION_PARENT)
    .attr(Attr::BuildProperties, variant.build_properties())
    .attr(Attr::CleanCommand, CLEAN_COMMAND)
    .child(reference)
    .build()
}

/// A toolchain node that only names its superclass.
pub(crate) fn toolchain_ref(id: String, toolchain_id: &str) -> ConfigNode {
    ConfigNode::builder(NodeKind::Toolchain, id)
        .attr(Attr::SuperClass, toolchain_id)
        .build()
}
