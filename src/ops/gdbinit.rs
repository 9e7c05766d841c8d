//! gdbinit files for toolchain debugging.

use std::path::PathBuf;

use crate::builder::DebuggerConfig;
use crate::core::error::DiscoveryError;
use crate::util::fs::write_if_absent;

/// Create the gdbinit file of a toolchain unless it already exists.
///
/// Returns whether a file was written. An existing file is never touched,
/// so user edits survive later discovery passes.
pub fn ensure_gdbinit(debugger: &DebuggerConfig) -> Result<bool, DiscoveryError> {
    let path = PathBuf::from(&debugger.gdbinit_path);
    let created = write_if_absent(&path, &debugger.gdbinit_contents())
        .map_err(|source| DiscoveryError::ResourceWriteFailed {
            path: path.clone(),
            source,
        })?;

    if created {
        tracing::info!("created {}", path.display());
    }
    Ok(created)
}
