//! Build environment of a toolchain.
//!
//! Builds driven by the host see the toolchain binaries first on `PATH` and
//! get `CC`, `CXX` and `LD` set to the prefixed tools.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::core::manifest::{ToolProbe, ToolchainManifestEntry};

/// How a variable combines with an existing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvOp {
    /// Put the value in front of the existing list
    Prepend,
    /// Overwrite the existing value
    Replace,
}

/// One environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
    pub op: EnvOp,
}

impl EnvVar {
    fn replace(name: &str, value: String) -> Self {
        EnvVar {
            name: name.to_string(),
            value,
            op: EnvOp::Replace,
        }
    }

    /// Value after applying this variable on top of `current`.
    pub fn apply(&self, current: Option<&str>) -> String {
        match (self.op, current) {
            (EnvOp::Prepend, Some(cur)) if !cur.is_empty() => {
                format!("{}{}{}", self.value, path_delimiter(), cur)
            }
            _ => self.value.clone(),
        }
    }
}

impl fmt::Display for EnvVar {
    /// Render as a POSIX shell `export` line. The value is single-quoted;
    /// only the existing `$NAME` of a prepend is expanded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            EnvOp::Prepend => {
                let value = shell_quote(&format!("{}{}", self.value, path_delimiter()));
                write!(f, "export {0}={1}\"${0}\"", self.name, value)
            }
            EnvOp::Replace => write!(f, "export {}={}", self.name, shell_quote(&self.value)),
        }
    }
}

/// Quote `value` for a POSIX shell. `'` becomes `'\''`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn path_delimiter() -> char {
    if cfg!(windows) {
        ';'
    } else {
        ':'
    }
}

/// Compute the build environment of a toolchain.
///
/// `PATH` gets the toolchain binary directory, or its `bin` subdirectory
/// when one exists.
pub fn build_environment(entry: &ToolchainManifestEntry, probe: &dyn ToolProbe) -> Vec<EnvVar> {
    let bin_dir = entry.bin_dir();
    let nested = format!("{}/bin", bin_dir);
    let path = if probe.exists(Path::new(&nested)) {
        nested
    } else {
        bin_dir
    };

    vec![
        EnvVar {
            name: "PATH".to_string(),
            value: path,
            op: EnvOp::Prepend,
        },
        EnvVar::replace("CC", format!("{}gcc", entry.prefix)),
        EnvVar::replace("CXX", format!("{}g++", entry.prefix)),
        EnvVar::replace("LD", format!("{}ld", entry.prefix)),
    ]
}
