//! Toolchain manifest parsing.
//!
//! Buildroot built with `BR2_ECLIPSE_REGISTER` appends one line per
//! toolchain to `~/.buildroot-eclipse.toolchains`:
//!
//! ```text
//! /home/opt/project-arm:arm-none-linux-gnueabi-:arm
//! /home/opt/project-mips:mips-linux-gnu-:mipsel
//! ```
//!
//! Each line is `{install path}:{tool prefix}:{architecture}`. Lines that do
//! not have exactly three fields, or whose C compiler is missing, are
//! skipped with a warning; the remaining lines are still used.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::error::DiscoveryError;

/// File name of the manifest inside the user's home directory.
pub const MANIFEST_FILE_NAME: &str = ".buildroot-eclipse.toolchains";

/// Directory holding the toolchain binaries, relative to the install path.
pub const HOST_BIN_DIR: &str = "host/usr/bin";

/// Directory holding the target sysroot, relative to the install path.
pub const STAGING_DIR: &str = "staging";

/// Compiler that must exist for a toolchain to be used.
pub const REQUIRED_COMPILER: &str = "gcc";

/// Compiler whose presence enables the C++ tools.
pub const CXX_COMPILER: &str = "g++";

/// One line of the toolchain manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainManifestEntry {
    /// Buildroot output directory
    pub install_path: String,
    /// Tool prefix, e.g. `arm-linux-gnueabi-`
    pub prefix: String,
    /// Architecture label, upper-cased
    pub architecture: String,
}

impl ToolchainManifestEntry {
    pub fn new(
        install_path: impl Into<String>,
        prefix: impl Into<String>,
        architecture: impl AsRef<str>,
    ) -> Self {
        ToolchainManifestEntry {
            install_path: install_path.into(),
            prefix: prefix.into(),
            architecture: architecture.as_ref().to_uppercase(),
        }
    }

    /// Parse a single manifest line.
    ///
    /// `line_no` is 1-based and only used for error reporting.
    pub fn parse_line(line_no: usize, line: &str) -> Result<Self, DiscoveryError> {
        let fields: Vec<&str> = line.split(':').collect();
        match fields.as_slice() {
            [path, prefix, arch] => Ok(ToolchainManifestEntry::new(*path, *prefix, arch)),
            _ => Err(DiscoveryError::ManifestLineMalformed {
                line: line_no,
                fields: fields.len(),
                content: line.to_string(),
                manifest: None,
            }),
        }
    }

    fn root(&self) -> &str {
        match self.install_path.trim_end_matches('/') {
            "" => "/",
            root => root,
        }
    }

    /// Directory holding the toolchain binaries.
    pub fn bin_dir(&self) -> String {
        join(self.root(), HOST_BIN_DIR)
    }

    /// Path of a prefixed toolchain binary, e.g. `.../arm-linux-gnueabi-gcc`.
    pub fn prefixed_tool_path(&self, tool: &str) -> String {
        format!("{}/{}{}", self.bin_dir(), self.prefix, tool)
    }

    /// Path of an unprefixed host binary, e.g. `.../pkg-config`.
    pub fn host_tool_path(&self, tool: &str) -> String {
        format!("{}/{}", self.bin_dir(), tool)
    }

    /// Target sysroot directory.
    pub fn staging_dir(&self) -> String {
        join(self.root(), STAGING_DIR)
    }

    /// Tool prefix without its trailing separator (`arm-linux-gnueabi`).
    pub fn host_triple(&self) -> &str {
        self.prefix.strip_suffix('-').unwrap_or(&self.prefix)
    }
}

fn join(root: &str, rel: &str) -> String {
    if root.ends_with('/') {
        format!("{}{}", root, rel)
    } else {
        format!("{}/{}", root, rel)
    }
}

/// Filesystem existence checks, behind a trait so discovery can be tested
/// without real toolchains.
pub trait ToolProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl ToolProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// A manifest entry whose C compiler was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainInstall {
    #[serde(flatten)]
    pub entry: ToolchainManifestEntry,
    /// Whether a C++ compiler was found. Checked once per toolchain.
    pub has_cxx: bool,
}

impl ToolchainInstall {
    /// Validate an entry against the filesystem.
    pub fn probe(
        entry: ToolchainManifestEntry,
        probe: &dyn ToolProbe,
    ) -> Result<Self, DiscoveryError> {
        let compiler = PathBuf::from(entry.prefixed_tool_path(REQUIRED_COMPILER));
        if !probe.exists(&compiler) {
            return Err(DiscoveryError::ToolchainIncomplete {
                install_path: entry.install_path,
                compiler,
            });
        }

        let has_cxx = probe.exists(Path::new(&entry.prefixed_tool_path(CXX_COMPILER)));
        Ok(ToolchainInstall { entry, has_cxx })
    }

    /// Build an install without probing. Used when the caller already knows
    /// the toolchain layout.
    pub fn assume(entry: ToolchainManifestEntry, has_cxx: bool) -> Self {
        ToolchainInstall { entry, has_cxx }
    }

    pub fn install_path(&self) -> &str {
        &self.entry.install_path
    }

    pub fn prefix(&self) -> &str {
        &self.entry.prefix
    }

    pub fn architecture(&self) -> &str {
        &self.entry.architecture
    }
}

/// Parse every non-blank line, keeping per-line failures.
pub fn parse_manifest_lines(text: &str) -> Vec<Result<ToolchainManifestEntry, DiscoveryError>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| ToolchainManifestEntry::parse_line(line_no, line))
        .collect()
}

/// Result of parsing a manifest against a probe.
#[derive(Debug, Default)]
pub struct ParsedManifest {
    /// Usable toolchains, in file order
    pub installs: Vec<ToolchainInstall>,
    /// Lines that were skipped
    pub skipped: Vec<DiscoveryError>,
}

/// Parse a manifest, probing each toolchain with `probe`.
pub fn parse_manifest_with(text: &str, probe: &dyn ToolProbe) -> ParsedManifest {
    let mut parsed = ParsedManifest::default();

    for line in parse_manifest_lines(text) {
        match line.and_then(|entry| ToolchainInstall::probe(entry, probe)) {
            Ok(install) => {
                tracing::debug!(
                    "found toolchain {} at {} (c++: {})",
                    install.prefix(),
                    install.install_path(),
                    install.has_cxx
                );
                parsed.installs.push(install);
            }
            Err(e) => {
                tracing::warn!("skipping manifest entry: {}", e);
                parsed.skipped.push(e);
            }
        }
    }

    parsed
}

/// Parse a manifest against the real filesystem, returning usable toolchains.
pub fn parse_manifest(text: &str) -> Vec<ToolchainInstall> {
    parse_manifest_with(text, &FsProbe).installs
}

/// Read the manifest file.
pub fn read_manifest(path: &Path) -> Result<String, DiscoveryError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(DiscoveryError::ManifestNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(DiscoveryError::ManifestUnreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Default manifest location (`~/.buildroot-eclipse.toolchains`).
pub fn default_manifest_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(MANIFEST_FILE_NAME))
}
