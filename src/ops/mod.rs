//! High-level operations.
//!
//! This module contains the side-effecting half of the crate: reading the
//! manifest, registering descriptors with a host and writing gdbinit files.

pub mod discover;
pub mod gdbinit;
pub mod register;

pub use discover::{discover, discover_with, scan, DiscoveryOptions, DiscoveryReport, ScanResult};
pub use gdbinit::ensure_gdbinit;
pub use register::{fragments_for, DirectoryRegistrar, ExtensionFragment, Registrar};
