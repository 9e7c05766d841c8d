//! The discovery pass.
//!
//! Reads the toolchain manifest, builds descriptors for every usable
//! toolchain, hands them to a [`Registrar`] and creates missing gdbinit
//! files. Nothing in here aborts the pass: every problem is logged and
//! collected into the [`DiscoveryReport`].

use std::path::{Path, PathBuf};

use crate::builder::{build_all, BuildOptions, ToolchainDescriptors};
use crate::core::error::DiscoveryError;
use crate::core::manifest::{parse_manifest_with, read_manifest, FsProbe, ToolProbe, ToolchainInstall};
use crate::util::config::Config;

use super::gdbinit::ensure_gdbinit;
use super::register::{fragments_for, Registrar};

/// Options for a discovery pass.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Toolchain manifest to read
    pub manifest: PathBuf,
    /// Descriptor families to build
    pub build: BuildOptions,
    /// Contribute launch configurations
    pub launch: bool,
    /// Create missing gdbinit files
    pub gdbinit: bool,
}

impl DiscoveryOptions {
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        DiscoveryOptions {
            manifest: manifest.into(),
            build: BuildOptions::default(),
            launch: true,
            gdbinit: true,
        }
    }

    /// Options from configuration, reading `manifest`.
    pub fn from_config(config: &Config, manifest: impl Into<PathBuf>) -> Self {
        DiscoveryOptions {
            manifest: manifest.into(),
            build: config.build_options(),
            launch: config.launch_enabled(),
            gdbinit: config.gdbinit_enabled(),
        }
    }
}

/// Usable toolchains of a manifest, and the problems met reading it.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub installs: Vec<ToolchainInstall>,
    pub problems: Vec<DiscoveryError>,
}

/// Read and validate the manifest without building anything.
pub fn scan(manifest: &Path, probe: &dyn ToolProbe) -> ScanResult {
    let text = match read_manifest(manifest) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("{}", e);
            return ScanResult {
                installs: Vec::new(),
                problems: vec![e],
            };
        }
    };

    let parsed = parse_manifest_with(&text, probe);
    ScanResult {
        installs: parsed.installs,
        problems: parsed
            .skipped
            .into_iter()
            .map(|problem| problem.in_manifest(manifest))
            .collect(),
    }
}

/// Outcome of a discovery pass.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// Descriptors built, one entry per usable toolchain in manifest order
    pub toolchains: Vec<ToolchainDescriptors>,
    /// Ids of fragments the registrar accepted
    pub registered: Vec<String>,
    /// gdbinit files created by this pass
    pub gdbinit_created: Vec<PathBuf>,
    /// Everything that went wrong
    pub problems: Vec<DiscoveryError>,
}

impl DiscoveryReport {
    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }
}

/// Run a discovery pass against the real filesystem.
pub fn discover(options: &DiscoveryOptions, registrar: &mut dyn Registrar) -> DiscoveryReport {
    discover_with(options, &FsProbe, registrar)
}

/// Run a discovery pass, checking toolchain binaries with `probe`.
pub fn discover_with(
    options: &DiscoveryOptions,
    probe: &dyn ToolProbe,
    registrar: &mut dyn Registrar,
) -> DiscoveryReport {
    let scanned = scan(&options.manifest, probe);
    let mut report = DiscoveryReport {
        problems: scanned.problems,
        ..Default::default()
    };

    for install in &scanned.installs {
        let descriptors = build_all(install, options.build);
        tracing::info!(
            "discovered {} toolchain at {}",
            install.architecture(),
            install.install_path()
        );

        let fragments = match fragments_for(&descriptors, options.launch) {
            Ok(fragments) => fragments,
            Err(e) => {
                let problem = DiscoveryError::RegistrationRejected {
                    id: descriptors.toolchain.id().to_string(),
                    reason: e.to_string(),
                };
                tracing::warn!("{}", problem);
                report.problems.push(problem);
                Vec::new()
            }
        };

        for fragment in fragments {
            match registrar.register(&fragment) {
                Ok(()) => report.registered.push(fragment.id),
                Err(e) => {
                    let problem = DiscoveryError::RegistrationRejected {
                        id: fragment.id,
                        reason: format!("{:#}", e),
                    };
                    tracing::warn!("{}", problem);
                    report.problems.push(problem);
                }
            }
        }

        if options.launch && options.gdbinit {
            match ensure_gdbinit(&descriptors.launch.debugger) {
                Ok(true) => report
                    .gdbinit_created
                    .push(PathBuf::from(&descriptors.launch.debugger.gdbinit_path)),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("{}", e);
                    report.problems.push(e);
                }
            }
        }

        report.toolchains.push(descriptors);
    }

    report
}

#[cfg(test)]
mod tests {
    use anyhow::{bail, Result};
    use tempfile::TempDir;

    use super::*;
    use crate::core::manifest::tests::SetProbe;
    use crate::ops::register::{DirectoryRegistrar, ExtensionFragment};

    /// Registrar remembering what it was given.
    #[derive(Default)]
    struct Recording(Vec<ExtensionFragment>);

    impl Registrar for Recording {
        fn register(&mut self, fragment: &ExtensionFragment) -> Result<()> {
            self.0.push(fragment.clone());
            Ok(())
        }
    }

    /// Registrar refusing fragments whose id contains a marker.
    struct Rejecting(&'static str, Vec<String>);

    impl Registrar for Rejecting {
        fn register(&mut self, fragment: &ExtensionFragment) -> Result<()> {
            if fragment.id.contains(self.0) {
                bail!("duplicate contribution");
            }
            self.1.push(fragment.id.clone());
            Ok(())
        }
    }

    fn options(tmp: &TempDir, manifest: &str) -> DiscoveryOptions {
        let path = tmp.path().join("toolchains");
        std::fs::write(&path, manifest).unwrap();
        let mut options = DiscoveryOptions::new(path);
        options.gdbinit = false;
        options
    }

    #[test]
    fn test_missing_manifest_yields_empty_report() {
        let tmp = TempDir::new().unwrap();
        let options = DiscoveryOptions::new(tmp.path().join("absent"));
        let mut registrar = Recording::default();

        let report = discover_with(&options, &SetProbe::with(&[]), &mut registrar);

        assert!(report.toolchains.is_empty());
        assert!(registrar.0.is_empty());
        assert!(matches!(
            report.problems.as_slice(),
            [DiscoveryError::ManifestNotFound { .. }]
        ));
    }

    #[test]
    fn test_discover_registers_every_toolchain() {
        let tmp = TempDir::new().unwrap();
        let options = options(
            &tmp,
            "/opt/br/arm:arm-linux-gnueabi-:arm\n/opt/br/mips:mips-linux-gnu-:mips\n",
        );
        let probe = SetProbe::with(&[
            "/opt/br/arm/host/usr/bin/arm-linux-gnueabi-gcc",
            "/opt/br/mips/host/usr/bin/mips-linux-gnu-gcc",
            "/opt/br/mips/host/usr/bin/mips-linux-gnu-g++",
        ]);
        let mut registrar = Recording::default();

        let report = discover_with(&options, &probe, &mut registrar);

        assert!(!report.has_problems());
        assert_eq!(report.toolchains.len(), 2);
        // arm: definitions, C profile, launch; mips adds a C++ profile
        assert_eq!(registrar.0.len(), 7);
        assert_eq!(report.registered.len(), 7);
        assert!(!report.toolchains[0].install.has_cxx);
        assert!(report.toolchains[1].install.has_cxx);
    }

    #[test]
    fn test_bad_lines_are_reported_and_skipped() {
        let tmp = TempDir::new().unwrap();
        let options = options(
            &tmp,
            "garbage\n/opt/br/gone:x-:x\n/opt/br/arm:arm-linux-gnueabi-:arm\n",
        );
        let probe = SetProbe::with(&["/opt/br/arm/host/usr/bin/arm-linux-gnueabi-gcc"]);
        let mut registrar = Recording::default();

        let report = discover_with(&options, &probe, &mut registrar);

        assert_eq!(report.toolchains.len(), 1);
        assert_eq!(report.problems.len(), 2);
        assert!(report.problems.iter().all(|p| p.is_line_level()));
    }

    #[test]
    fn test_rejection_does_not_stop_later_toolchains() {
        let tmp = TempDir::new().unwrap();
        let options = options(
            &tmp,
            "/opt/br/arm:arm-linux-gnueabi-:arm\n/opt/br/mips:mips-linux-gnu-:mips\n",
        );
        let probe = SetProbe::with(&[
            "/opt/br/arm/host/usr/bin/arm-linux-gnueabi-gcc",
            "/opt/br/mips/host/usr/bin/mips-linux-gnu-gcc",
        ]);
        let mut registrar = Rejecting("opt.br.arm", Vec::new());

        let report = discover_with(&options, &probe, &mut registrar);

        assert_eq!(report.toolchains.len(), 2);
        assert_eq!(report.problems.len(), 2);
        assert!(report
            .problems
            .iter()
            .all(|p| matches!(p, DiscoveryError::RegistrationRejected { .. })));
        assert!(registrar.1.iter().any(|id| id.contains("opt.br.mips")));
    }

    #[test]
    fn test_gdbinit_created_once() {
        let tmp = TempDir::new().unwrap();
        let install = tmp.path().join("br");
        let manifest = format!("{}:arm-linux-:arm\n", install.display());
        let compiler = install.join("host/usr/bin/arm-linux-gcc");
        let probe = SetProbe::with(&[compiler.to_str().unwrap()]);

        let mut options = options(&tmp, &manifest);
        options.gdbinit = true;

        let first = discover_with(&options, &probe, &mut Recording::default());
        assert_eq!(first.gdbinit_created.len(), 1);
        assert!(first.gdbinit_created[0].exists());

        let second = discover_with(&options, &probe, &mut Recording::default());
        assert!(second.gdbinit_created.is_empty());
        assert!(!second.has_problems());
    }

    #[test]
    fn test_launch_disabled_skips_launch_and_gdbinit() {
        let tmp = TempDir::new().unwrap();
        let install = tmp.path().join("br");
        let manifest = format!("{}:arm-linux-:arm\n", install.display());
        let compiler = install.join("host/usr/bin/arm-linux-gcc");
        let probe = SetProbe::with(&[compiler.to_str().unwrap()]);

        let mut options = options(&tmp, &manifest);
        options.gdbinit = true;
        options.launch = false;
        let mut registrar = Recording::default();

        let report = discover_with(&options, &probe, &mut registrar);
        assert_eq!(registrar.0.len(), 2);
        assert!(report.gdbinit_created.is_empty());
        assert!(!install.join("staging").exists());
    }

    #[test]
    fn test_line_problems_name_the_manifest() {
        let tmp = TempDir::new().unwrap();
        let options = options(&tmp, "only:two\n");

        let scanned = scan(&options.manifest, &SetProbe::with(&[]));
        let diagnostic = scanned.problems[0].to_diagnostic();
        assert_eq!(diagnostic.location, Some(options.manifest.clone()));
    }

    #[test]
    fn test_duplicate_install_paths_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let options = options(
            &tmp,
            "/opt/br/arm:arm-linux-gnueabi-:arm\n/opt/br/arm:arm-linux-gnueabi-:arm\n",
        );
        let tools = SetProbe::with(&["/opt/br/arm/host/usr/bin/arm-linux-gnueabi-gcc"]);
        let mut registrar = DirectoryRegistrar::new(tmp.path().join("out"));

        let report = discover_with(&options, &tools, &mut registrar);

        assert_eq!(report.registered.len(), 3);
        assert_eq!(report.problems.len(), 3);
        assert!(report
            .problems
            .iter()
            .all(|p| matches!(p, DiscoveryError::RegistrationRejected { .. })));
    }
}
