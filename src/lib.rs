//! buildroot-cdt - Eclipse CDT descriptors for Buildroot cross-toolchains
//!
//! This crate reads the toolchain manifest Buildroot writes when built with
//! `BR2_ECLIPSE_REGISTER`, and describes each toolchain to an IDE build
//! system: toolchain, tool and project-type descriptors, scanner discovery
//! profiles, launch configurations and the build environment.

pub mod builder;
pub mod core;
pub mod emit;
pub mod ops;
pub mod util;

pub use crate::core::{ConfigNode, DiscoveryError, ToolchainInstall, ToolchainManifestEntry};

pub use builder::{build_all, BuildOptions, ToolchainDescriptors};
pub use ops::{discover, DiscoveryOptions, DiscoveryReport, Registrar};
