//! Read-only host view of descriptor trees.
//!
//! Build hosts walk contributed configuration as generic elements: a tag
//! name, string-keyed attributes and child elements. [`HostElement`] exposes
//! a [`ConfigNode`] that way without copying it.

use crate::core::node::{Attr, ConfigNode};

/// Generic configuration element as seen by a build host.
pub trait HostConfigElement: Sized {
    /// Element (tag) name.
    fn name(&self) -> &str;

    /// Attribute value by its markup key.
    fn attribute(&self, key: &str) -> Option<&str>;

    fn children(&self) -> Vec<Self>;

    /// Children whose tag is `tag`.
    fn children_named(&self, tag: &str) -> Vec<Self> {
        self.children()
            .into_iter()
            .filter(|child| child.name() == tag)
            .collect()
    }
}

/// Borrowed host view of one node.
#[derive(Debug, Clone, Copy)]
pub struct HostElement<'a> {
    node: &'a ConfigNode,
}

impl<'a> HostConfigElement for HostElement<'a> {
    fn name(&self) -> &str {
        self.node.kind().element_name()
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "id" => Some(self.node.id()),
            "name" => self.node.name(),
            other => other.parse::<Attr>().ok().and_then(|attr| self.node.attr(attr)),
        }
    }

    fn children(&self) -> Vec<Self> {
        self.node.children().iter().map(to_host_objects).collect()
    }
}

/// Expose a descriptor tree to a host.
pub fn to_host_objects(node: &ConfigNode) -> HostElement<'_> {
    HostElement { node }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_toolchain;
    use crate::core::manifest::{ToolchainInstall, ToolchainManifestEntry};

    fn toolchain() -> ConfigNode {
        build_toolchain(&ToolchainInstall::assume(
            ToolchainManifestEntry::new("/opt/br/arm", "arm-linux-gnueabi-", "arm"),
            true,
        ))
    }

    #[test]
    fn test_host_lookup() {
        let tc = toolchain();
        let host = to_host_objects(&tc);

        assert_eq!(host.name(), "toolChain");
        assert_eq!(host.attribute("id"), Some("org.buildroot.opt.br.arm.toolchain.base"));
        assert_eq!(host.attribute("osList"), Some("linux"));
        assert_eq!(host.attribute("noSuchKey"), None);
    }

    #[test]
    fn test_children_named() {
        let tc = toolchain();
        let host = to_host_objects(&tc);

        assert_eq!(host.children_named("tool").len(), 7);
        assert_eq!(host.children_named("targetPlatform").len(), 1);
        assert_eq!(host.children_named("builder").len(), 1);
        assert_eq!(host.children().len(), tc.children().len());
    }

    #[test]
    fn test_nested_input_type() {
        let tc = toolchain();
        let host = to_host_objects(&tc);

        let gcc = host
            .children_named("tool")
            .into_iter()
            .find(|t| t.attribute("id") == Some("org.buildroot.opt.br.arm.c.compiler"))
            .unwrap();
        let inputs = gcc.children_named("inputType");
        assert_eq!(inputs.len(), 1);
        assert_eq!(
            inputs[0].attribute("scannerConfigDiscoveryProfileId"),
            Some("org.buildroot.opt.br.arm.ARM_ManagedMakePerProjectProfileC")
        );
    }
}
