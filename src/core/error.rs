//! Discovery error types.

use std::path::{Path, PathBuf};

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// A problem met during a discovery pass.
///
/// None of these abort the pass: line-level problems skip one toolchain,
/// the rest are reported alongside whatever was built.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum DiscoveryError {
    #[error("toolchain manifest not found: {}", path.display())]
    #[diagnostic(
        code(buildroot_cdt::manifest::not_found),
        help("Build Buildroot with BR2_ECLIPSE_REGISTER=y, or pass --manifest")
    )]
    ManifestNotFound { path: PathBuf },

    #[error("failed to read toolchain manifest: {}", path.display())]
    #[diagnostic(code(buildroot_cdt::manifest::unreadable))]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest line {line}: expected 3 fields, found {fields}")]
    #[diagnostic(
        code(buildroot_cdt::manifest::malformed_line),
        help("Each line reads `installPath:prefix:architecture`")
    )]
    ManifestLineMalformed {
        line: usize,
        fields: usize,
        content: String,
        /// Manifest the line was read from, once known
        manifest: Option<PathBuf>,
    },

    #[error("toolchain at {install_path} has no C compiler at {}", compiler.display())]
    #[diagnostic(code(buildroot_cdt::toolchain::incomplete))]
    ToolchainIncomplete {
        install_path: String,
        compiler: PathBuf,
    },

    #[error("host rejected contribution `{id}`: {reason}")]
    #[diagnostic(code(buildroot_cdt::registration::rejected))]
    RegistrationRejected { id: String, reason: String },

    #[error("failed to write {}", path.display())]
    #[diagnostic(code(buildroot_cdt::resource::write_failed))]
    ResourceWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DiscoveryError {
    /// Whether this problem only cost one manifest line.
    pub fn is_line_level(&self) -> bool {
        matches!(
            self,
            DiscoveryError::ManifestLineMalformed { .. } | DiscoveryError::ToolchainIncomplete { .. }
        )
    }

    /// Record the manifest a line-level problem came from.
    pub fn in_manifest(self, path: &Path) -> Self {
        match self {
            DiscoveryError::ManifestLineMalformed {
                line,
                fields,
                content,
                ..
            } => DiscoveryError::ManifestLineMalformed {
                line,
                fields,
                content,
                manifest: Some(path.to_path_buf()),
            },
            other => other,
        }
    }

    /// Convert to a user-facing diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DiscoveryError::ManifestNotFound { path } => Diagnostic::error(self.to_string())
                .with_location(path)
                .with_suggestion(suggestions::NO_MANIFEST),
            DiscoveryError::ManifestUnreadable { path, source } => {
                Diagnostic::error(self.to_string())
                    .with_location(path)
                    .with_context(source.to_string())
            }
            DiscoveryError::ManifestLineMalformed {
                content, manifest, ..
            } => {
                let diagnostic = Diagnostic::warning(self.to_string())
                    .with_context(format!("line: `{}`", content))
                    .with_suggestion(suggestions::LINE_FORMAT);
                match manifest {
                    Some(path) => diagnostic.with_location(path.clone()),
                    None => diagnostic,
                }
            }
            DiscoveryError::ToolchainIncomplete { .. } => Diagnostic::warning(self.to_string())
                .with_suggestion(suggestions::INCOMPLETE_TOOLCHAIN),
            DiscoveryError::RegistrationRejected { .. } => Diagnostic::warning(self.to_string()),
            DiscoveryError::ResourceWriteFailed { path, source } => {
                Diagnostic::error(self.to_string())
                    .with_location(path)
                    .with_context(source.to_string())
            }
        }
    }
}
