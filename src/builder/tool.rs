//! Tool descriptors.
//!
//! One descriptor per [`ToolKind`]. Compilers also carry an input type that
//! names the scanner discovery profile the host uses to learn the
//! compiler's built-in include paths and defines.

use serde::Serialize;

use crate::core::manifest::ToolchainManifestEntry;
use crate::core::naming::{human_name, identifier, Suffix};
use crate::core::node::{Attr, ConfigNode, NodeKind};

use super::{COMMAND_LINE_GENERATOR, FALSE};

pub const C_COMPILER_INPUT: &str = "cdt.managedbuild.tool.gnu.c.compiler.input";
pub const CPP_COMPILER_INPUT: &str = "cdt.managedbuild.tool.gnu.cpp.compiler.input";

/// A tool of a Buildroot toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    Assembler,
    CCompiler,
    CxxCompiler,
    CLinker,
    CxxLinker,
    Archiver,
    PkgConfig,
}

impl ToolKind {
    /// Binary name, without the toolchain prefix.
    pub fn binary_name(&self) -> &'static str {
        match self {
            ToolKind::Assembler => "as",
            ToolKind::CCompiler | ToolKind::CLinker => "gcc",
            ToolKind::CxxCompiler | ToolKind::CxxLinker => "g++",
            ToolKind::Archiver => "ar",
            ToolKind::PkgConfig => "pkg-config",
        }
    }

    /// Project natures this tool applies to.
    pub fn nature_filter(&self) -> &'static str {
        match self {
            ToolKind::Assembler | ToolKind::CCompiler | ToolKind::Archiver | ToolKind::PkgConfig => {
                "both"
            }
            ToolKind::CLinker => "cnature",
            ToolKind::CxxCompiler | ToolKind::CxxLinker => "ccnature",
        }
    }

    pub fn suffix(&self) -> Suffix {
        match self {
            ToolKind::Assembler => Suffix::Assembler,
            ToolKind::CCompiler => Suffix::CCompiler,
            ToolKind::CxxCompiler => Suffix::CxxCompiler,
            ToolKind::CLinker => Suffix::CLinker,
            ToolKind::CxxLinker => Suffix::CxxLinker,
            ToolKind::Archiver => Suffix::Archiver,
            ToolKind::PkgConfig => Suffix::PkgConfig,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::Assembler => "Assembler",
            ToolKind::CCompiler => "C Compiler",
            ToolKind::CxxCompiler => "C++ Compiler",
            ToolKind::CLinker => "C Linker",
            ToolKind::CxxLinker => "C++ Linker",
            ToolKind::Archiver => "Archiver",
            ToolKind::PkgConfig => "Pkg config",
        }
    }

    /// Host tool this descriptor specializes.
    pub fn superclass(&self) -> &'static str {
        match self {
            ToolKind::Assembler => "cdt.managedbuild.tool.gnu.assembler",
            ToolKind::CCompiler => "cdt.managedbuild.tool.gnu.c.compiler",
            ToolKind::CxxCompiler => "cdt.managedbuild.tool.gnu.cpp.compiler",
            ToolKind::CLinker => "cdt.managedbuild.tool.gnu.c.linker",
            ToolKind::CxxLinker => "cdt.managedbuild.tool.gnu.cpp.linker",
            ToolKind::Archiver => "cdt.managedbuild.tool.gnu.archiver",
            ToolKind::PkgConfig => "org.eclipse.cdt.managedbuilder.pkgconfig.tool",
        }
    }

    pub fn is_compiler(&self) -> bool {
        matches!(self, ToolKind::CCompiler | ToolKind::CxxCompiler)
    }

    pub fn is_cxx(&self) -> bool {
        matches!(self, ToolKind::CxxCompiler | ToolKind::CxxLinker)
    }

    /// Absolute command for this tool. pkg-config is a host tool and is
    /// not prefixed.
    pub fn command(&self, entry: &ToolchainManifestEntry) -> String {
        match self {
            ToolKind::PkgConfig => entry.host_tool_path(self.binary_name()),
            _ => entry.prefixed_tool_path(self.binary_name()),
        }
    }
}

/// Language of a compiler input type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompilerLanguage {
    C,
    Cxx,
}

impl CompilerLanguage {
    /// Language compiled by a tool, if it is a compiler.
    pub fn of(kind: ToolKind) -> Option<CompilerLanguage> {
        match kind {
            ToolKind::CCompiler => Some(CompilerLanguage::C),
            ToolKind::CxxCompiler => Some(CompilerLanguage::Cxx),
            _ => None,
        }
    }

    pub fn compiler(&self) -> ToolKind {
        match self {
            CompilerLanguage::C => ToolKind::CCompiler,
            CompilerLanguage::Cxx => ToolKind::CxxCompiler,
        }
    }

    /// Specs file fed to the compiler during scanner discovery.
    pub fn specs_file(&self) -> &'static str {
        match self {
            CompilerLanguage::C => "specs.c",
            CompilerLanguage::Cxx => "specs.cpp",
        }
    }

    pub fn input_superclass(&self) -> &'static str {
        match self {
            CompilerLanguage::C => C_COMPILER_INPUT,
            CompilerLanguage::Cxx => CPP_COMPILER_INPUT,
        }
    }

    fn profile_suffix(&self, architecture: &str) -> Suffix {
        match self {
            CompilerLanguage::C => Suffix::ScannerProfileC(architecture.to_string()),
            CompilerLanguage::Cxx => Suffix::ScannerProfileCxx(architecture.to_string()),
        }
    }

    /// Id of the scanner discovery profile for this language.
    pub fn profile_id(&self, install_path: &str, architecture: &str) -> String {
        identifier(install_path, self.profile_suffix(architecture))
    }
}

/// Build the descriptor of one tool.
pub fn build_tool(
    install_path: &str,
    prefix: &str,
    architecture: &str,
    kind: ToolKind,
) -> ConfigNode {
    let entry = ToolchainManifestEntry::new(install_path, prefix, architecture);
    build_tool_for(&entry, kind)
}

pub(crate) fn build_tool_for(entry: &ToolchainManifestEntry, kind: ToolKind) -> ConfigNode {
    let path = entry.install_path.as_str();
    let arch = entry.architecture.as_str();

    let mut tool = ConfigNode::builder(NodeKind::Tool, identifier(path, kind.suffix()))
        .name(human_name(arch, path, Some(kind.description())))
        .attr(Attr::Command, kind.command(entry))
        .attr(Attr::CommandLineGenerator, COMMAND_LINE_GENERATOR)
        .attr(Attr::IsAbstract, FALSE)
        .attr(Attr::NatureFilter, kind.nature_filter())
        .attr(Attr::SuperClass, kind.superclass());

    if let Some(lang) = CompilerLanguage::of(kind) {
        let input_suffix = match lang {
            CompilerLanguage::C => Suffix::CInput,
            CompilerLanguage::Cxx => Suffix::CxxInput,
        };
        tool = tool.child(build_input_type(
            identifier(path, input_suffix),
            lang,
            lang.profile_id(path, arch),
        ));
    }

    tracing::debug!("built {:?} descriptor for {}", kind, path);
    tool.build()
}

/// Build a compiler input type referring to a scanner discovery profile.
pub(crate) fn build_input_type(id: String, lang: CompilerLanguage, profile_id: String) -> ConfigNode {
    ConfigNode::builder(NodeKind::InputType, id)
        .attr(Attr::SuperClass, lang.input_superclass())
        .attr(Attr::ScannerConfigDiscoveryProfileId, profile_id)
        .build()
}

/// Scanner configuration discovery profile for one compiler.
///
/// The host runs `command -E -P -v -dD <specs file>` and parses the output
/// to learn built-in include paths and macros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannerProfile {
    pub id: String,
    pub name: String,
    pub language: CompilerLanguage,
    pub command: String,
}

/// Collects the compiler's built-in settings for the whole project.
pub const SCANNER_INFO_COLLECTOR: &str = "org.buildroot.cdt.toolchain.DefaultGCCScannerInfoCollector";
/// Parses build output for include paths and defines.
pub const BUILD_OUTPUT_PARSER: &str = "org.buildroot.cdt.toolchain.ManagedGCCScannerInfoConsoleParser";
/// Runs the compiler on a specs file.
pub const SPECS_RUN_PROVIDER: &str =
    "org.eclipse.cdt.make.internal.core.scannerconfig2.GCCSpecsRunSIProvider";
/// Parses the specs run output.
pub const SPECS_CONSOLE_PARSER: &str =
    "org.eclipse.cdt.make.internal.core.scannerconfig.gnu.GCCSpecsConsoleParser";

impl ScannerProfile {
    /// Arguments passed to the compiler during discovery.
    pub fn arguments(&self) -> String {
        format!(
            "-E -P -v -dD ${{plugin_state_location}}/{}",
            self.language.specs_file()
        )
    }
}

/// Describe the scanner discovery profile of a compiler.
pub fn scanner_profile(entry: &ToolchainManifestEntry, lang: CompilerLanguage) -> ScannerProfile {
    let profile_name = match lang {
        CompilerLanguage::C => "Buildroot ManagedMakePerProjectProfileC",
        CompilerLanguage::Cxx => "Buildroot ManagedMakePerProjectProfileCPP",
    };
    ScannerProfile {
        id: lang.profile_id(&entry.install_path, &entry.architecture),
        name: profile_name.to_string(),
        language: lang,
        command: lang.compiler().command(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/opt/br/arm";
    const PREFIX: &str = "arm-linux-gnueabi-";

    #[test]
    fn test_c_compiler_descriptor() {
        let tool = build_tool(PATH, PREFIX, "arm", ToolKind::CCompiler);

        assert_eq!(tool.kind(), NodeKind::Tool);
        assert_eq!(tool.id(), "org.buildroot.opt.br.arm.c.compiler");
        assert_eq!(tool.name(), Some("Buildroot ARM C Compiler (/opt/br/arm)"));
        assert_eq!(
            tool.attr(Attr::Command),
            Some("/opt/br/arm/host/usr/bin/arm-linux-gnueabi-gcc")
        );
        assert_eq!(tool.attr(Attr::NatureFilter), Some("both"));
        assert_eq!(tool.attr(Attr::SuperClass), Some("cdt.managedbuild.tool.gnu.c.compiler"));
        assert_eq!(tool.attr(Attr::IsAbstract), Some("false"));

        let inputs: Vec<&ConfigNode> = tool.children_of(NodeKind::InputType).collect();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].id(), "org.buildroot.opt.br.arm.c.input");
        assert_eq!(inputs[0].attr(Attr::SuperClass), Some(C_COMPILER_INPUT));
        assert_eq!(
            inputs[0].attr(Attr::ScannerConfigDiscoveryProfileId),
            Some("org.buildroot.opt.br.arm.ARM_ManagedMakePerProjectProfileC")
        );
    }

    #[test]
    fn test_cxx_compiler_input_type() {
        let tool = build_tool(PATH, PREFIX, "arm", ToolKind::CxxCompiler);
        let input = &tool.children()[0];
        assert_eq!(input.id(), "org.buildroot.opt.br.arm.cpp.input");
        assert_eq!(
            input.attr(Attr::ScannerConfigDiscoveryProfileId),
            Some("org.buildroot.opt.br.arm.ARM_ManagedMakePerProjectProfileCPP")
        );
        assert_eq!(tool.attr(Attr::NatureFilter), Some("ccnature"));
    }

    #[test]
    fn test_non_compilers_have_no_input_type() {
        for kind in [
            ToolKind::Assembler,
            ToolKind::CLinker,
            ToolKind::CxxLinker,
            ToolKind::Archiver,
            ToolKind::PkgConfig,
        ] {
            assert!(build_tool(PATH, PREFIX, "arm", kind).children().is_empty());
        }
    }

    #[test]
    fn test_pkg_config_is_not_prefixed() {
        let tool = build_tool(PATH, PREFIX, "arm", ToolKind::PkgConfig);
        assert_eq!(tool.attr(Attr::Command), Some("/opt/br/arm/host/usr/bin/pkg-config"));
        assert_eq!(tool.id(), "org.buildroot.opt.br.arm.pkgconfig");
    }

    #[test]
    fn test_linker_natures() {
        assert_eq!(ToolKind::CLinker.nature_filter(), "cnature");
        assert_eq!(ToolKind::CxxLinker.binary_name(), "g++");
    }

    #[test]
    fn test_scanner_profile() {
        let entry = ToolchainManifestEntry::new(PATH, PREFIX, "arm");
        let profile = scanner_profile(&entry, CompilerLanguage::Cxx);
        assert_eq!(profile.id, "org.buildroot.opt.br.arm.ARM_ManagedMakePerProjectProfileCPP");
        assert_eq!(profile.command, "/opt/br/arm/host/usr/bin/arm-linux-gnueabi-g++");
        assert_eq!(profile.arguments(), "-E -P -v -dD ${plugin_state_location}/specs.cpp");
    }
}
