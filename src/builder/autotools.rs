//! Autotools flavor of the descriptors.
//!
//! Mirrors the native toolchain under the Autotools plug-in's superclasses
//! and adds a `configure` tool whose `Host` option defaults to the tool
//! prefix without its trailing `-` (`arm-linux-gnueabi`).

use crate::core::manifest::{ToolchainInstall, ToolchainManifestEntry};
use crate::core::naming::{human_name, identifier, Suffix};
use crate::core::node::{Attr, ConfigNode, NodeKind};

use super::project::toolchain_ref;
use super::tool::{build_input_type, CompilerLanguage};
use super::toolchain::build_settings_options;
use super::{ALL, COMMAND_LINE_GENERATOR, ENVIRONMENT_SUPPLIER, FALSE, LINUX, STRING};

const AUTOTOOLS_CORE: &str = "org.eclipse.linuxtools.cdt.autotools.core";

pub const AUTOTOOLS_TOOLCHAIN: &str = "org.eclipse.linuxtools.cdt.autotools.core.toolChain";
pub const AUTOTOOLS_CONFIGURE_TOOL: &str = "org.eclipse.linuxtools.cdt.autotools.core.tool.configure";
pub const AUTOTOOLS_HOST_OPTION: &str =
    "org.eclipse.linuxtools.cdt.autotools.core.option.configure.host";
pub const AUTOTOOLS_ARTEFACT_TYPE: &str =
    "org.eclipse.linuxtools.cdt.autotools.core.buildArtefactType.autotools";
pub const AUTOTOOLS_BUILD_TYPE: &str = "org.eclipse.linuxtools.cdt.autotools.core.buildType.default";
pub const AUTOTOOLS_CONFIGURATION_PARENT: &str =
    "org.eclipse.linuxtools.cdt.autotools.core.configuration.build";

/// Id of the Autotools toolchain descriptor.
pub fn autotools_toolchain_id(install_path: &str) -> String {
    identifier(install_path, Suffix::AutotoolsToolchainBase)
}

fn display_name(entry: &ToolchainManifestEntry, description: Option<&str>) -> String {
    format!(
        "Autotools {}",
        human_name(&entry.architecture, &entry.install_path, description)
    )
}

/// Build the Autotools toolchain descriptor.
pub fn build_autotools_toolchain(install: &ToolchainInstall) -> ConfigNode {
    let entry = &install.entry;
    let id = autotools_toolchain_id(&entry.install_path);

    let mut compilers = vec![build_autotools_compiler(entry, CompilerLanguage::C)];
    if install.has_cxx {
        compilers.push(build_autotools_compiler(entry, CompilerLanguage::Cxx));
    }

    ConfigNode::builder(NodeKind::Toolchain, id.clone())
        .name(display_name(entry, None))
        .attr(Attr::ArchList, ALL)
        .attr(Attr::OsList, LINUX)
        .attr(Attr::IsAbstract, FALSE)
        .attr(Attr::SuperClass, AUTOTOOLS_TOOLCHAIN)
        .attr(Attr::ConfigurationEnvironmentSupplier, ENVIRONMENT_SUPPLIER)
        .children(build_settings_options(entry, &id))
        .child(build_configure_tool(entry))
        .children(compilers)
        .build()
}

fn build_configure_tool(entry: &ToolchainManifestEntry) -> ConfigNode {
    let path = entry.install_path.as_str();

    let host = ConfigNode::builder(NodeKind::Option, identifier(path, Suffix::AutotoolsHostOption))
        .name("Host")
        .attr(Attr::IsAbstract, FALSE)
        .attr(Attr::SuperClass, AUTOTOOLS_HOST_OPTION)
        .attr(Attr::ResourceFilter, ALL)
        .attr(Attr::ValueType, STRING)
        .attr(Attr::DefaultValue, entry.host_triple())
        .build();

    ConfigNode::builder(NodeKind::Tool, identifier(path, Suffix::AutotoolsConfigure))
        .attr(Attr::IsAbstract, FALSE)
        .attr(Attr::SuperClass, AUTOTOOLS_CONFIGURE_TOOL)
        .child(host)
        .build()
}

fn build_autotools_compiler(entry: &ToolchainManifestEntry, lang: CompilerLanguage) -> ConfigNode {
    let path = entry.install_path.as_str();
    let kind = lang.compiler();

    let (tool_suffix, input_suffix, superclass_tool) = match lang {
        CompilerLanguage::C => (Suffix::AutotoolsCCompiler, Suffix::AutotoolsCInput, "gcc"),
        CompilerLanguage::Cxx => (Suffix::AutotoolsCxxCompiler, Suffix::AutotoolsCxxInput, "gpp"),
    };

    ConfigNode::builder(NodeKind::Tool, identifier(path, tool_suffix))
        .name(display_name(entry, Some(kind.description())))
        .attr(Attr::Command, kind.command(entry))
        .attr(Attr::CommandLineGenerator, COMMAND_LINE_GENERATOR)
        .attr(Attr::IsAbstract, FALSE)
        .attr(Attr::NatureFilter, kind.nature_filter())
        .attr(
            Attr::SuperClass,
            format!("{}.toolchain.tool.{}", AUTOTOOLS_CORE, superclass_tool),
        )
        .child(build_input_type(
            identifier(path, input_suffix),
            lang,
            lang.profile_id(path, &entry.architecture),
        ))
        .build()
}

/// Build the Autotools project type with its single default configuration.
pub fn build_autotools_project_type(install_path: &str, toolchain: &ConfigNode) -> ConfigNode {
    let configuration = ConfigNode::builder(
        NodeKind::Configuration,
        identifier(install_path, Suffix::AutotoolsConfiguration),
    )
    .name("Configuration")
    .attr(Attr::Parent, AUTOTOOLS_CONFIGURATION_PARENT)
    .attr(Attr::BuildProperties, AUTOTOOLS_BUILD_TYPE)
    .child(toolchain_ref(
        identifier(install_path, Suffix::AutotoolsToolchainRef),
        toolchain.id(),
    ))
    .build();

    ConfigNode::builder(
        NodeKind::ProjectType,
        identifier(install_path, Suffix::AutotoolsProjectType),
    )
    .attr(Attr::IsAbstract, FALSE)
    .attr(Attr::BuildArtefactType, AUTOTOOLS_ARTEFACT_TYPE)
    .child(configuration)
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install(has_cxx: bool) -> ToolchainInstall {
        ToolchainInstall::assume(
            ToolchainManifestEntry::new("/opt/br/arm", "arm-linux-gnueabi-", "arm"),
            has_cxx,
        )
    }

    #[test]
    fn test_autotools_toolchain() {
        let tc = build_autotools_toolchain(&install(true));

        assert_eq!(tc.id(), "org.buildroot.opt.br.arm.autotools.toolchain.base");
        assert_eq!(tc.name(), Some("Autotools Buildroot ARM (/opt/br/arm)"));
        assert_eq!(tc.attr(Attr::SuperClass), Some(AUTOTOOLS_TOOLCHAIN));

        let tools: Vec<&str> = tc.children_of(NodeKind::Tool).map(|t| t.id()).collect();
        assert_eq!(
            tools,
            vec![
                "org.buildroot.opt.br.arm.autotools.tool.configure",
                "org.buildroot.opt.br.arm.autotools.c.compiler",
                "org.buildroot.opt.br.arm.autotools.cc.compiler",
            ]
        );
        assert!(tc
            .child("org.buildroot.opt.br.arm.autotools.toolchain.base.option.prefix")
            .is_some());
    }

    #[test]
    fn test_autotools_without_cxx() {
        let tc = build_autotools_toolchain(&install(false));
        assert_eq!(tc.children_of(NodeKind::Tool).count(), 2);
    }

    #[test]
    fn test_configure_host_option() {
        let tc = build_autotools_toolchain(&install(false));
        let configure = tc.child("org.buildroot.opt.br.arm.autotools.tool.configure").unwrap();
        let host = &configure.children()[0];

        assert_eq!(host.kind(), NodeKind::Option);
        assert_eq!(host.name(), Some("Host"));
        assert_eq!(host.attr(Attr::DefaultValue), Some("arm-linux-gnueabi"));
        assert_eq!(host.attr(Attr::SuperClass), Some(AUTOTOOLS_HOST_OPTION));
    }

    #[test]
    fn test_autotools_compiler_superclass() {
        let tc = build_autotools_toolchain(&install(true));
        let gpp = tc.child("org.buildroot.opt.br.arm.autotools.cc.compiler").unwrap();
        assert_eq!(
            gpp.attr(Attr::SuperClass),
            Some("org.eclipse.linuxtools.cdt.autotools.core.toolchain.tool.gpp")
        );
        assert_eq!(gpp.name(), Some("Autotools Buildroot ARM C++ Compiler (/opt/br/arm)"));
        assert_eq!(
            gpp.children()[0].attr(Attr::ScannerConfigDiscoveryProfileId),
            Some("org.buildroot.opt.br.arm.ARM_ManagedMakePerProjectProfileCPP")
        );
    }

    #[test]
    fn test_autotools_project_type() {
        let tc = build_autotools_toolchain(&install(false));
        let pt = build_autotools_project_type("/opt/br/arm", &tc);

        assert_eq!(pt.id(), "org.buildroot.opt.br.arm.autotools");
        assert_eq!(pt.attr(Attr::BuildArtefactType), Some(AUTOTOOLS_ARTEFACT_TYPE));

        let config = &pt.children()[0];
        assert_eq!(config.id(), "org.buildroot.opt.br.arm.autotools.default");
        assert_eq!(config.children()[0].attr(Attr::SuperClass), Some(tc.id()));
    }
}
