//! The descriptor tree.
//!
//! A [`ConfigNode`] is one managed-build concept (toolchain, tool, option,
//! project type, ...) with an id, an optional display name, a set of typed
//! attributes and owned children. Nodes are assembled with a
//! [`NodeBuilder`] and are read-only once built.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of a descriptor node. Determines the markup element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    #[serde(rename = "toolChain")]
    Toolchain,
    Tool,
    InputType,
    TargetPlatform,
    Builder,
    Option,
    OptionCategory,
    ProjectType,
    Configuration,
}

impl NodeKind {
    pub const ALL: [NodeKind; 9] = [
        NodeKind::Toolchain,
        NodeKind::Tool,
        NodeKind::InputType,
        NodeKind::TargetPlatform,
        NodeKind::Builder,
        NodeKind::Option,
        NodeKind::OptionCategory,
        NodeKind::ProjectType,
        NodeKind::Configuration,
    ];

    /// Element name registered for this kind in the build-definitions schema.
    pub fn element_name(&self) -> &'static str {
        match self {
            NodeKind::Toolchain => "toolChain",
            NodeKind::Tool => "tool",
            NodeKind::InputType => "inputType",
            NodeKind::TargetPlatform => "targetPlatform",
            NodeKind::Builder => "builder",
            NodeKind::Option => "option",
            NodeKind::OptionCategory => "optionCategory",
            NodeKind::ProjectType => "projectType",
            NodeKind::Configuration => "configuration",
        }
    }

    /// Look up a kind by its element name.
    pub fn from_element_name(name: &str) -> Option<NodeKind> {
        NodeKind::ALL.into_iter().find(|k| k.element_name() == name)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// Attribute vocabulary of the build-definitions schema.
///
/// `id` and `name` are not part of this set; they are node fields.
/// Declaration order is the serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attr {
    ArchList,
    OsList,
    IsAbstract,
    IsTest,
    SuperClass,
    Parent,
    Category,
    Command,
    CommandLineGenerator,
    NatureFilter,
    BinaryParser,
    ScannerConfigDiscoveryProfileId,
    ResourceFilter,
    Value,
    ValueType,
    DefaultValue,
    BuildArtefactType,
    BuildProperties,
    CleanCommand,
    ConfigurationEnvironmentSupplier,
    ProjectEnvironmentSupplier,
}

impl Attr {
    pub const ALL: [Attr; 21] = [
        Attr::ArchList,
        Attr::OsList,
        Attr::IsAbstract,
        Attr::IsTest,
        Attr::SuperClass,
        Attr::Parent,
        Attr::Category,
        Attr::Command,
        Attr::CommandLineGenerator,
        Attr::NatureFilter,
        Attr::BinaryParser,
        Attr::ScannerConfigDiscoveryProfileId,
        Attr::ResourceFilter,
        Attr::Value,
        Attr::ValueType,
        Attr::DefaultValue,
        Attr::BuildArtefactType,
        Attr::BuildProperties,
        Attr::CleanCommand,
        Attr::ConfigurationEnvironmentSupplier,
        Attr::ProjectEnvironmentSupplier,
    ];

    /// Attribute name as it appears in markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            Attr::ArchList => "archList",
            Attr::OsList => "osList",
            Attr::IsAbstract => "isAbstract",
            Attr::IsTest => "isTest",
            Attr::SuperClass => "superClass",
            Attr::Parent => "parent",
            Attr::Category => "category",
            Attr::Command => "command",
            Attr::CommandLineGenerator => "commandLineGenerator",
            Attr::NatureFilter => "natureFilter",
            Attr::BinaryParser => "binaryParser",
            Attr::ScannerConfigDiscoveryProfileId => "scannerConfigDiscoveryProfileId",
            Attr::ResourceFilter => "resourceFilter",
            Attr::Value => "value",
            Attr::ValueType => "valueType",
            Attr::DefaultValue => "defaultValue",
            Attr::BuildArtefactType => "buildArtefactType",
            Attr::BuildProperties => "buildProperties",
            Attr::CleanCommand => "cleanCommand",
            Attr::ConfigurationEnvironmentSupplier => "configurationEnvironmentSupplier",
            Attr::ProjectEnvironmentSupplier => "projectEnvironmentSupplier",
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an attribute name is outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAttr(pub String);

impl fmt::Display for UnknownAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown descriptor attribute '{}'", self.0)
    }
}

impl std::error::Error for UnknownAttr {}

impl FromStr for Attr {
    type Err = UnknownAttr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attr::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAttr(s.to_string()))
    }
}

/// One node of a descriptor tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigNode {
    kind: NodeKind,
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<Attr, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Start building a node of the given kind.
    pub fn builder(kind: NodeKind, id: impl Into<String>) -> NodeBuilder {
        NodeBuilder {
            node: ConfigNode {
                kind,
                id: id.into(),
                name: None,
                attributes: BTreeMap::new(),
                children: Vec::new(),
            },
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get a typed attribute value.
    pub fn attr(&self, attr: Attr) -> Option<&str> {
        self.attributes.get(&attr).map(String::as_str)
    }

    /// Attributes in serialization order.
    pub fn attributes(&self) -> impl Iterator<Item = (Attr, &str)> {
        self.attributes.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn children(&self) -> &[ConfigNode] {
        &self.children
    }

    /// Children of one kind, in order.
    pub fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &ConfigNode> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Find a direct child by id.
    pub fn child(&self, id: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.id == id)
    }

    /// Depth-first, pre-order walk over this node and all descendants.
    pub fn walk(&self) -> Vec<&ConfigNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }
}

/// Builder for [`ConfigNode`]. Consumed by [`NodeBuilder::build`].
#[derive(Debug)]
pub struct NodeBuilder {
    node: ConfigNode,
}

impl NodeBuilder {
    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.node.name = Some(name.into());
        self
    }

    /// Set an attribute. Setting the same attribute twice keeps the last value.
    pub fn attr(mut self, attr: Attr, value: impl Into<String>) -> Self {
        self.node.attributes.insert(attr, value.into());
        self
    }

    /// Append a child.
    pub fn child(mut self, child: ConfigNode) -> Self {
        self.node.children.push(child);
        self
    }

    /// Append several children, keeping their order.
    pub fn children(mut self, children: impl IntoIterator<Item = ConfigNode>) -> Self {
        self.node.children.extend(children);
        self
    }

    /// Finish the node.
    pub fn build(self) -> ConfigNode {
        self.node
    }
}
