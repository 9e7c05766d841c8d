//! Serialization of descriptors.
//!
//! - [`xml`]: extension markup, plug-in fragments, reading markup back
//! - [`host`]: read-only element view for build hosts
//!
//! JSON output goes through `serde` directly on the builder types.

pub mod host;
pub mod xml;

pub use host::{to_host_objects, HostConfigElement, HostElement};
pub use xml::{parse_nodes, plugin_fragment, serialize, Element, MarkupError};
