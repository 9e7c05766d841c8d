//! Toolchain descriptors.
//!
//! A toolchain node owns its settings options, target platform, tools and
//! builder, in this order:
//!
//! 1. option category, path option, prefix option
//! 2. target platform
//! 3. assembler, C compiler, C linker
//! 4. C++ compiler and C++ linker, when `g++` was found
//! 5. archiver, pkg-config
//! 6. builder

use crate::core::manifest::{ToolchainInstall, ToolchainManifestEntry};
use crate::core::naming::{human_name, identifier, Suffix};
use crate::core::node::{Attr, ConfigNode, NodeKind};

use super::tool::{build_tool_for, ToolKind};
use super::{ALL, ENVIRONMENT_SUPPLIER, FALSE, LINUX, STRING};

pub const GNU_ELF_PARSER: &str = "org.eclipse.cdt.core.GNU_ELF";
pub const GNU_BUILDER: &str = "cdt.managedbuild.target.gnu.builder";
pub const SETTINGS_CATEGORY_NAME: &str = "Generic Buildroot Settings";

/// Tools of a toolchain, in descriptor order.
pub fn tool_kinds(has_cxx: bool) -> Vec<ToolKind> {
    let mut kinds = vec![ToolKind::Assembler, ToolKind::CCompiler, ToolKind::CLinker];
    if has_cxx {
        kinds.extend([ToolKind::CxxCompiler, ToolKind::CxxLinker]);
    }
    kinds.extend([ToolKind::Archiver, ToolKind::PkgConfig]);
    kinds
}

/// Id of the toolchain descriptor.
pub fn toolchain_id(install_path: &str) -> String {
    identifier(install_path, Suffix::ToolchainBase)
}

/// Build the descriptor of a toolchain.
pub fn build_toolchain(install: &ToolchainInstall) -> ConfigNode {
    let entry = &install.entry;
    let path = entry.install_path.as_str();
    let id = toolchain_id(path);

    let has_cxx = install.has_cxx;
    let tools = tool_kinds(has_cxx)
        .into_iter()
        .map(|kind| build_tool_for(entry, kind));

    tracing::debug!("building toolchain {} (c++: {})", id, has_cxx);

    ConfigNode::builder(NodeKind::Toolchain, id.clone())
        .name(human_name(&entry.architecture, path, None))
        .attr(Attr::ArchList, ALL)
        .attr(Attr::OsList, LINUX)
        .attr(Attr::IsAbstract, FALSE)
        .attr(Attr::ConfigurationEnvironmentSupplier, ENVIRONMENT_SUPPLIER)
        .children(build_settings_options(entry, &id))
        .child(build_target_platform(entry))
        .children(tools)
        .child(build_builder(path))
        .build()
}

/// Settings shared by every toolchain flavor: an option category holding
/// the binary directory and the tool prefix.
///
/// The host reads these options back (by `{toolchain id}.option.path` and
/// `.option.prefix`) when it sets up the build environment.
pub fn build_settings_options(entry: &ToolchainManifestEntry, toolchain_id: &str) -> Vec<ConfigNode> {
    let category_id = format!("{}.optionCategory", toolchain_id);

    let category = ConfigNode::builder(NodeKind::OptionCategory, category_id.clone())
        .name(SETTINGS_CATEGORY_NAME)
        .build();

    let option = |suffix: &str, name: &str, value: String| {
        ConfigNode::builder(NodeKind::Option, format!("{}.option.{}", toolchain_id, suffix))
            .name(name)
            .attr(Attr::Category, category_id.as_str())
            .attr(Attr::IsAbstract, FALSE)
            .attr(Attr::ResourceFilter, ALL)
            .attr(Attr::Value, value)
            .attr(Attr::ValueType, STRING)
            .build()
    };

    vec![
        category,
        option("path", "Path", entry.bin_dir()),
        option("prefix", "Prefix", entry.prefix.clone()),
    ]
}

fn build_target_platform(entry: &ToolchainManifestEntry) -> ConfigNode {
    let path = entry.install_path.as_str();
    ConfigNode::builder(NodeKind::TargetPlatform, identifier(path, Suffix::PlatformBase))
        .name(human_name(&entry.architecture, path, Some("Platform")))
        .attr(Attr::ArchList, ALL)
        .attr(Attr::OsList, LINUX)
        .attr(Attr::IsAbstract, FALSE)
        .attr(Attr::BinaryParser, GNU_ELF_PARSER)
        .build()
}

fn build_builder(path: &str) -> ConfigNode {
    ConfigNode::builder(NodeKind::Builder, identifier(path, Suffix::Builder))
        .attr(Attr::SuperClass, GNU_BUILDER)
        .build()
}
