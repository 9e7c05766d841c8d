//! Launch configuration and debugger settings for a toolchain.
//!
//! Each toolchain contributes a remote-run launch configuration type and a
//! gdb setup: the prefixed `gdb`, the staging sysroot, and a gdbinit file
//! that points gdb at that sysroot.

use serde::Serialize;

use crate::core::manifest::ToolchainManifestEntry;
use crate::core::naming::human_name;

const LAUNCH_NAMESPACE: &str = "org.buildroot.cdt.toolchain";

pub const REMOTE_RUN_DELEGATE: &str =
    "org.eclipse.cdt.launch.remote.launching.RemoteRunLaunchDelegate";
pub const TAB_GROUP_CLASS: &str = "org.buildroot.cdt.toolchain.BuildrootLaunchConfigurationTabGroup";
pub const SOURCE_LOCATOR: &str = "org.eclipse.cdt.debug.core.sourceLocator";
pub const SOURCE_PATH_COMPUTER: &str = "org.eclipse.cdt.debug.core.sourcePathComputer";
pub const LAUNCH_ICON: &str = "icons/br.png";

/// Directory of the gdbinit file, relative to the staging sysroot.
pub const GDBINIT_DIR: &str = "usr/share/buildroot";

/// Debugger settings of a toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebuggerConfig {
    /// Prefixed gdb binary
    pub gdb: String,
    /// Shared library search path (the staging sysroot)
    pub solib_path: String,
    /// gdbinit file created on first discovery
    pub gdbinit_path: String,
}

impl DebuggerConfig {
    pub fn new(entry: &ToolchainManifestEntry) -> Self {
        let staging = entry.staging_dir();
        DebuggerConfig {
            gdb: entry.prefixed_tool_path("gdb"),
            gdbinit_path: format!("{}/{}/gdbinit", staging, GDBINIT_DIR),
            solib_path: staging,
        }
    }

    /// Contents written to a fresh gdbinit file.
    pub fn gdbinit_contents(&self) -> String {
        format!("set sysroot {}\n", self.solib_path)
    }
}

/// Launch configuration contributed for one toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchDescriptor {
    pub type_id: String,
    pub tab_group_id: String,
    pub image_id: String,
    pub name: String,
    pub modes: &'static str,
    pub debugger: DebuggerConfig,
}

/// Describe the launch configuration of a toolchain.
pub fn build_launch(entry: &ToolchainManifestEntry) -> LaunchDescriptor {
    let key = format!("{}.{}", entry.prefix, entry.architecture);
    let type_id = format!("{}.launchConfigurationType.{}", LAUNCH_NAMESPACE, key);

    LaunchDescriptor {
        tab_group_id: format!("{}TabGroup", type_id),
        image_id: format!("{}.launchConfigurationTypeImage.{}", LAUNCH_NAMESPACE, key),
        type_id,
        name: human_name(&entry.architecture, &entry.install_path, None),
        modes: "run,debug",
        debugger: DebuggerConfig::new(entry),
    }
}
