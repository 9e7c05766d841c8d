//! Identifier and display-name scheme.
//!
//! Every descriptor id is derived from the toolchain install path plus a
//! role suffix, so the same manifest always yields the same ids:
//!
//! ```text
//! /home/user/buildroot/output + toolchain.base
//!   -> org.buildroot.home.user.buildroot.output.toolchain.base
//! ```

use std::fmt;

use crate::builder::project::{ArtefactKind, BuildVariant};

/// Namespace prepended to every generated identifier.
pub const ID_NAMESPACE: &str = "org.buildroot";

/// Build a dotted identifier from an install path and a suffix.
///
/// Path separators become dots; one leading and one trailing dot are
/// stripped before the namespace and suffix are attached.
pub fn identifier(path: &str, suffix: impl fmt::Display) -> String {
    let dotted = path.replace(['/', '\\'], ".");
    let dotted = dotted.strip_suffix('.').unwrap_or(&dotted);
    let dotted = dotted.strip_prefix('.').unwrap_or(dotted);

    format!("{}.{}.{}", ID_NAMESPACE, dotted, suffix)
}

/// Human-readable name shown by the host for a toolchain element.
///
/// `Buildroot ARM C Compiler (/opt/br/arm)` or, without a description,
/// `Buildroot ARM (/opt/br/arm)`.
pub fn human_name(architecture: &str, path: &str, description: Option<&str>) -> String {
    let arch = architecture.to_uppercase();
    match description {
        Some(desc) => format!("Buildroot {} {} ({})", arch, desc, path),
        None => format!("Buildroot {} ({})", arch, path),
    }
}

/// Role suffixes used to derive identifiers.
///
/// Each generated node uses exactly one of these, which keeps ids unique
/// within the trees built for one toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Suffix {
    ToolchainBase,
    PlatformBase,
    Builder,
    Assembler,
    CCompiler,
    CxxCompiler,
    CLinker,
    CxxLinker,
    Archiver,
    PkgConfig,
    CInput,
    CxxInput,
    /// Scanner discovery profile, keyed by upper-cased architecture.
    ScannerProfileC(String),
    ScannerProfileCxx(String),
    ProjectType(ArtefactKind),
    Configuration(ArtefactKind, BuildVariant),
    ToolchainRef(ArtefactKind, BuildVariant),
    AutotoolsToolchainBase,
    AutotoolsCCompiler,
    AutotoolsCxxCompiler,
    AutotoolsCInput,
    AutotoolsCxxInput,
    AutotoolsConfigure,
    AutotoolsHostOption,
    AutotoolsProjectType,
    AutotoolsConfiguration,
    AutotoolsToolchainRef,
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suffix::ToolchainBase => f.write_str("toolchain.base"),
            Suffix::PlatformBase => f.write_str("platform.base"),
            Suffix::Builder => f.write_str("builder"),
            Suffix::Assembler => f.write_str("assembler"),
            Suffix::CCompiler => f.write_str("c.compiler"),
            Suffix::CxxCompiler => f.write_str("cc.compiler"),
            Suffix::CLinker => f.write_str("c.linker"),
            Suffix::CxxLinker => f.write_str("cc.linker"),
            Suffix::Archiver => f.write_str("archiver"),
            Suffix::PkgConfig => f.write_str("pkgconfig"),
            Suffix::CInput => f.write_str("c.input"),
            Suffix::CxxInput => f.write_str("cpp.input"),
            Suffix::ScannerProfileC(arch) => write!(f, "{}_ManagedMakePerProjectProfileC", arch),
            Suffix::ScannerProfileCxx(arch) => {
                write!(f, "{}_ManagedMakePerProjectProfileCPP", arch)
            }
            Suffix::ProjectType(artefact) => f.write_str(artefact.as_str()),
            Suffix::Configuration(artefact, variant) => {
                write!(f, "{}.{}", artefact.as_str(), variant.as_str())
            }
            Suffix::ToolchainRef(artefact, variant) => {
                write!(f, "{}.{}.toolchain", artefact.as_str(), variant.as_str())
            }
            Suffix::AutotoolsToolchainBase => f.write_str("autotools.toolchain.base"),
            Suffix::AutotoolsCCompiler => f.write_str("autotools.c.compiler"),
            Suffix::AutotoolsCxxCompiler => f.write_str("autotools.cc.compiler"),
            Suffix::AutotoolsCInput => f.write_str("autotools.c.input"),
            Suffix::AutotoolsCxxInput => f.write_str("autotools.cpp.input"),
            Suffix::AutotoolsConfigure => f.write_str("autotools.tool.configure"),
            Suffix::AutotoolsHostOption => f.write_str("autotools.toolChain.option.host"),
            Suffix::AutotoolsProjectType => f.write_str("autotools"),
            Suffix::AutotoolsConfiguration => f.write_str("autotools.default"),
            Suffix::AutotoolsToolchainRef => f.write_str("autotools.default.toolchain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn vocabulary() -> Vec<Suffix> {
        let mut all = vec![
            Suffix::ToolchainBase,
            Suffix::PlatformBase,
            Suffix::Builder,
            Suffix::Assembler,
            Suffix::CCompiler,
            Suffix::CxxCompiler,
            Suffix::CLinker,
            Suffix::CxxLinker,
            Suffix::Archiver,
            Suffix::PkgConfig,
            Suffix::CInput,
            Suffix::CxxInput,
            Suffix::ScannerProfileC("ARM".to_string()),
            Suffix::ScannerProfileCxx("ARM".to_string()),
            Suffix::AutotoolsToolchainBase,
            Suffix::AutotoolsCCompiler,
            Suffix::AutotoolsCxxCompiler,
            Suffix::AutotoolsCInput,
            Suffix::AutotoolsCxxInput,
            Suffix::AutotoolsConfigure,
            Suffix::AutotoolsHostOption,
            Suffix::AutotoolsProjectType,
            Suffix::AutotoolsConfiguration,
            Suffix::AutotoolsToolchainRef,
        ];
        for artefact in ArtefactKind::ALL {
            all.push(Suffix::ProjectType(artefact));
            for variant in BuildVariant::ALL {
                all.push(Suffix::Configuration(artefact, variant));
                all.push(Suffix::ToolchainRef(artefact, variant));
            }
        }
        all
    }

    #[test]
    fn test_identifier_from_absolute_path() {
        assert_eq!(
            identifier("/home/user/buildroot/output", Suffix::ToolchainBase),
            "org.buildroot.home.user.buildroot.output.toolchain.base"
        );
    }

    #[test]
    fn test_identifier_strips_trailing_separator() {
        assert_eq!(
            identifier("/opt/br/arm/", "builder"),
            "org.buildroot.opt.br.arm.builder"
        );
    }

    #[test]
    fn test_identifier_relative_path() {
        assert_eq!(identifier("out/arm", "builder"), "org.buildroot.out.arm.builder");
    }

    #[test]
    fn test_identifier_strips_only_one_dot() {
        // A doubled separator keeps its inner dot.
        assert_eq!(identifier("//opt", "x"), "org.buildroot..opt.x");
    }

    #[test]
    fn test_suffix_vocabulary_never_collides() {
        let path = "/opt/br/arm";
        let all = vocabulary();
        let ids: HashSet<String> = all.iter().map(|s| identifier(path, s)).collect();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_human_name() {
        assert_eq!(human_name("arm", "/opt/br/arm", None), "Buildroot ARM (/opt/br/arm)");
        assert_eq!(
            human_name("ARM", "/opt/br/arm", Some("C Compiler")),
            "Buildroot ARM C Compiler (/opt/br/arm)"
        );
    }
}
