//! Core data structures.
//!
//! This module contains the foundational types used throughout the crate:
//! - The descriptor tree (`ConfigNode`) and its attribute vocabulary
//! - Toolchain manifest entries and validated installs
//! - Identifier and display-name scheme
//! - Discovery errors

pub mod error;
pub mod manifest;
pub mod naming;
pub mod node;

pub use error::DiscoveryError;
pub use manifest::{ToolProbe, ToolchainInstall, ToolchainManifestEntry};
pub use naming::{human_name, identifier, Suffix};
pub use node::{Attr, ConfigNode, NodeBuilder, NodeKind};
