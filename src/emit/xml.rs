//! XML markup for descriptor trees and extension fragments.
//!
//! Markup is produced from a small element tree ([`Element`]) and written
//! with `quick_xml`, two-space indented. Attribute values survive a read
//! back unchanged: tab, newline and carriage return are written as
//! character references, since parsers normalize them to spaces otherwise.

use std::borrow::Cow;
use std::io;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesPI, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use thiserror::Error;

use crate::builder::launch::{
    LaunchDescriptor, LAUNCH_ICON, REMOTE_RUN_DELEGATE, SOURCE_LOCATOR, SOURCE_PATH_COMPUTER,
    TAB_GROUP_CLASS,
};
use crate::builder::tool::{
    ScannerProfile, BUILD_OUTPUT_PARSER, SCANNER_INFO_COLLECTOR, SPECS_CONSOLE_PARSER,
    SPECS_RUN_PROVIDER,
};
use crate::core::node::{Attr, ConfigNode, NodeKind, UnknownAttr};

/// Processing instruction declaring the plug-in manifest version.
pub const ECLIPSE_INSTRUCTION: &str = r#"eclipse version="3.4""#;

pub const BUILD_DEFINITIONS_POINT: &str = "org.eclipse.cdt.managedbuilder.core.buildDefinitions";
pub const SCANNER_PROFILE_POINT: &str = "org.eclipse.cdt.make.core.ScannerConfigurationDiscoveryProfile";
pub const LAUNCH_TYPES_POINT: &str = "org.eclipse.debug.core.launchConfigurationTypes";
pub const LAUNCH_TAB_GROUPS_POINT: &str = "org.eclipse.debug.ui.launchConfigurationTabGroups";
pub const LAUNCH_IMAGES_POINT: &str = "org.eclipse.debug.ui.launchConfigurationTypeImages";

/// Build-definitions schema revision declared by generated fragments.
pub const MANAGED_BUILD_REVISION: &str = "4.0.0";

/// A generic markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    fn write_to<W: io::Write>(&self, writer: &mut Writer<W>) -> Result<(), MarkupError> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute(Attribute {
                key: QName(name.as_bytes()),
                value: Cow::Owned(escape(value).into_bytes()),
            });
        }

        if self.children.is_empty() {
            return writer.write_event(Event::Empty(start)).map_err(MarkupError::write);
        }

        let end = start.to_end().into_owned();
        writer.write_event(Event::Start(start)).map_err(MarkupError::write)?;
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer.write_event(Event::End(end)).map_err(MarkupError::write)
    }

    /// Render this element alone.
    pub fn to_xml(&self) -> Result<String, MarkupError> {
        let mut writer = indented_writer();
        self.write_to(&mut writer)?;
        finish(writer)
    }
}

impl From<&ConfigNode> for Element {
    fn from(node: &ConfigNode) -> Self {
        let mut element = Element::new(node.kind().element_name()).attr("id", node.id());
        if let Some(name) = node.name() {
            element = element.attr("name", name);
        }
        for (attr, value) in node.attributes() {
            element = element.attr(attr.as_str(), value);
        }
        element.children(node.children().iter().map(Element::from))
    }
}

fn indented_writer() -> Writer<Vec<u8>> {
    Writer::new_with_indent(Vec::new(), b' ', 2)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String, MarkupError> {
    let mut text = String::from_utf8(writer.into_inner()).map_err(MarkupError::write)?;
    text.push('\n');
    Ok(text)
}

/// Escape a value for use inside a double-quoted attribute.
///
/// Markup characters go through `quick_xml`; tab, newline and carriage
/// return become character references so they are not normalized away.
pub fn escape(value: &str) -> String {
    let escaped = quick_xml::escape::escape(value);
    let mut out = String::with_capacity(escaped.len());
    for c in escaped.chars() {
        match c {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c => out.push(c),
        }
    }
    out
}

/// Serialize one descriptor tree.
pub fn serialize(node: &ConfigNode) -> Result<String, MarkupError> {
    Element::from(node).to_xml()
}

/// Wrap extensions in a complete plug-in fragment.
pub fn plugin_fragment(extensions: impl IntoIterator<Item = Element>) -> Result<String, MarkupError> {
    let plugin = Element::new("plugin").children(extensions);

    let mut writer = indented_writer();
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(MarkupError::write)?;
    writer
        .write_event(Event::PI(BytesPI::new(ECLIPSE_INSTRUCTION)))
        .map_err(MarkupError::write)?;
    plugin.write_to(&mut writer)?;
    finish(writer)
}

/// An extension element for `point`.
pub fn extension(point: &str) -> Element {
    Element::new("extension").attr("point", point)
}

/// Build-definitions extension carrying descriptor trees.
pub fn build_definitions_extension<'a>(
    id: &str,
    name: &str,
    nodes: impl IntoIterator<Item = &'a ConfigNode>,
) -> Element {
    extension(BUILD_DEFINITIONS_POINT)
        .attr("id", id)
        .attr("name", name)
        .child(Element::new("managedBuildRevision").attr("fileVersion", MANAGED_BUILD_REVISION))
        .children(nodes.into_iter().map(Element::from))
}

/// Scanner configuration discovery profile extension.
pub fn scanner_profile_extension(profile: &ScannerProfile) -> Element {
    let collector = Element::new("scannerInfoCollector")
        .attr("class", SCANNER_INFO_COLLECTOR)
        .attr("scope", "project");

    let build_output = Element::new("buildOutputProvider")
        .child(Element::new("open"))
        .child(Element::new("scannerInfoConsoleParser").attr("class", BUILD_OUTPUT_PARSER));

    let provider = Element::new("scannerInfoProvider")
        .attr("providerId", "specsFile")
        .child(
            Element::new("run")
                .attr("arguments", profile.arguments())
                .attr("class", SPECS_RUN_PROVIDER)
                .attr("command", profile.command.as_str()),
        )
        .child(Element::new("scannerInfoConsoleParser").attr("class", SPECS_CONSOLE_PARSER));

    Element::new("extension")
        .attr("id", profile.id.as_str())
        .attr("name", profile.name.as_str())
        .attr("point", SCANNER_PROFILE_POINT)
        .child(collector)
        .child(build_output)
        .child(provider)
}

/// Launch configuration type, tab group and image extensions.
pub fn launch_extensions(launch: &LaunchDescriptor) -> Vec<Element> {
    let launch_type = Element::new("launchConfigurationType")
        .attr("delegate", REMOTE_RUN_DELEGATE)
        .attr("id", launch.type_id.as_str())
        .attr("modes", launch.modes)
        .attr("name", launch.name.as_str())
        .attr("public", "true")
        .attr("sourceLocatorId", SOURCE_LOCATOR)
        .attr("sourcePathComputerId", SOURCE_PATH_COMPUTER);

    let tab_group = Element::new("launchConfigurationTabGroup")
        .attr("class", TAB_GROUP_CLASS)
        .attr("id", launch.tab_group_id.as_str())
        .attr("type", launch.type_id.as_str());

    let image = Element::new("launchConfigurationTypeImage")
        .attr("configTypeID", launch.type_id.as_str())
        .attr("icon", LAUNCH_ICON)
        .attr("id", launch.image_id.as_str());

    vec![
        extension(LAUNCH_TYPES_POINT).child(launch_type),
        extension(LAUNCH_TAB_GROUPS_POINT).child(tab_group),
        extension(LAUNCH_IMAGES_POINT).child(image),
    ]
}

/// Error writing descriptor markup or reading it back.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("failed to write XML: {0}")]
    Write(Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("<{element}> has no id attribute")]
    MissingId { element: String },

    #[error(transparent)]
    UnknownAttribute(#[from] UnknownAttr),
}

impl MarkupError {
    fn write(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        MarkupError::Write(Box::new(e))
    }
}

/// Read descriptor trees from markup.
///
/// Accepts a bare descriptor element or a whole plug-in fragment; wrapper
/// elements (`plugin`, `extension`, ...) are looked through and every
/// outermost descriptor element becomes one tree.
pub fn parse_nodes(text: &str) -> Result<Vec<ConfigNode>, MarkupError> {
    let doc = roxmltree::Document::parse(text)?;
    let mut nodes = Vec::new();
    collect_nodes(doc.root_element(), &mut nodes)?;
    Ok(nodes)
}

fn collect_nodes(element: roxmltree::Node, out: &mut Vec<ConfigNode>) -> Result<(), MarkupError> {
    match NodeKind::from_element_name(element.tag_name().name()) {
        Some(kind) => out.push(parse_node(element, kind)?),
        None => {
            for child in element.children().filter(|c| c.is_element()) {
                collect_nodes(child, out)?;
            }
        }
    }
    Ok(())
}

fn parse_node(element: roxmltree::Node, kind: NodeKind) -> Result<ConfigNode, MarkupError> {
    let id = element.attribute("id").ok_or_else(|| MarkupError::MissingId {
        element: kind.element_name().to_string(),
    })?;

    let mut builder = ConfigNode::builder(kind, id);
    for attribute in element.attributes() {
        match attribute.name() {
            "id" => {}
            "name" => builder = builder.name(attribute.value()),
            other => builder = builder.attr(other.parse::<Attr>()?, attribute.value()),
        }
    }

    for child in element.children().filter(|c| c.is_element()) {
        if let Some(child_kind) = NodeKind::from_element_name(child.tag_name().name()) {
            builder = builder.child(parse_node(child, child_kind)?);
        }
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_all, BuildOptions};
    use crate::core::manifest::{ToolchainInstall, ToolchainManifestEntry};

    fn install() -> ToolchainInstall {
        ToolchainInstall::assume(
            ToolchainManifestEntry::new("/opt/br/arm", "arm-linux-gnueabi-", "arm"),
            true,
        )
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b>&"c"'"#), "a&lt;b&gt;&amp;&quot;c&quot;&apos;");
    }

    #[test]
    fn test_serialize_leaf() {
        let node = ConfigNode::builder(NodeKind::Builder, "org.buildroot.x.builder")
            .attr(Attr::SuperClass, "cdt.managedbuild.target.gnu.builder")
            .build();
        assert_eq!(
            serialize(&node).unwrap(),
            "<builder id=\"org.buildroot.x.builder\" superClass=\"cdt.managedbuild.target.gnu.builder\"/>\n"
        );
    }

    #[test]
    fn test_serialize_nests_children() {
        let node = ConfigNode::builder(NodeKind::Tool, "t")
            .name("Tool")
            .child(ConfigNode::builder(NodeKind::InputType, "i").build())
            .build();
        assert_eq!(
            serialize(&node).unwrap(),
            "<tool id=\"t\" name=\"Tool\">\n  <inputType id=\"i\"/>\n</tool>\n"
        );
    }

    #[test]
    fn test_round_trip_toolchain() {
        let all = build_all(&install(), BuildOptions::default());
        for node in all.nodes() {
            let parsed = parse_nodes(&serialize(node).unwrap()).unwrap();
            assert_eq!(parsed.len(), 1);
            assert_eq!(&parsed[0], node);
        }
    }

    #[test]
    fn test_round_trip_preserves_tool_attributes() {
        let all = build_all(&install(), BuildOptions::default());
        let text = serialize(&all.toolchain).unwrap();
        let parsed = parse_nodes(&text).unwrap().remove(0);

        let original = all.toolchain.child("org.buildroot.opt.br.arm.cc.compiler").unwrap();
        let tool = parsed.child(original.id()).unwrap();
        assert_eq!(tool.name(), original.name());
        assert_eq!(tool.attr(Attr::SuperClass), original.attr(Attr::SuperClass));
        assert_eq!(tool.attr(Attr::NatureFilter), Some("ccnature"));
    }

    #[test]
    fn test_round_trip_escapes_awkward_paths() {
        let install = ToolchainInstall::assume(
            ToolchainManifestEntry::new("/opt/a&b/\"x\"", "arm-", "arm"),
            false,
        );
        let tc = crate::builder::build_toolchain(&install);
        let parsed = parse_nodes(&serialize(&tc).unwrap()).unwrap();
        assert_eq!(parsed[0], tc);
    }

    #[test]
    fn test_escape_keeps_whitespace_characters() {
        assert_eq!(escape("a\tb\nc\rd"), "a&#9;b&#10;c&#13;d");
    }

    #[test]
    fn test_round_trip_keeps_tabs_and_newlines() {
        let install = ToolchainInstall::assume(
            ToolchainManifestEntry::new("/opt/my\tbr/arm\nx\r", "arm-", "arm"),
            true,
        );
        let tc = crate::builder::build_toolchain(&install);
        let parsed = parse_nodes(&serialize(&tc).unwrap()).unwrap();

        assert_eq!(parsed[0].id(), "org.buildroot.opt.my\tbr.arm\nx\r.toolchain.base");
        assert_eq!(parsed[0], tc);
    }

    #[test]
    fn test_empty_plugin_fragment() {
        let text = plugin_fragment(Vec::new()).unwrap();
        assert!(text.ends_with("<plugin/>\n"));
    }

    #[test]
    fn test_build_definitions_fragment() {
        let all = build_all(&install(), BuildOptions::default());
        let text = plugin_fragment([build_definitions_extension(
            "org.buildroot.opt.br.arm",
            "Buildroot ARM",
            all.nodes(),
        )])
        .unwrap();

        assert!(text.starts_with(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<?eclipse version=\"3.4\"?>\n<plugin>\n"
        ));
        let doc = roxmltree::Document::parse(&text).unwrap();
        let ext = doc.root_element().first_element_child().unwrap();
        assert_eq!(ext.attribute("point"), Some(BUILD_DEFINITIONS_POINT));

        let parsed = parse_nodes(&text).unwrap();
        assert_eq!(parsed.len(), 6);
    }

    #[test]
    fn test_scanner_profile_extension() {
        let all = build_all(&install(), BuildOptions::default());
        let text = plugin_fragment([scanner_profile_extension(&all.scanner_profiles[0])]).unwrap();

        let doc = roxmltree::Document::parse(&text).unwrap();
        let run = doc
            .descendants()
            .find(|n| n.has_tag_name("run"))
            .unwrap();
        assert_eq!(
            run.attribute("arguments"),
            Some("-E -P -v -dD ${plugin_state_location}/specs.c")
        );
        assert_eq!(
            run.attribute("command"),
            Some("/opt/br/arm/host/usr/bin/arm-linux-gnueabi-gcc")
        );
        let ext = doc.root_element().first_element_child().unwrap();
        assert_eq!(
            ext.attribute("id"),
            Some("org.buildroot.opt.br.arm.ARM_ManagedMakePerProjectProfileC")
        );
    }

    #[test]
    fn test_launch_extensions() {
        let all = build_all(&install(), BuildOptions::default());
        let text = plugin_fragment(launch_extensions(&all.launch)).unwrap();

        let doc = roxmltree::Document::parse(&text).unwrap();
        let points: Vec<&str> = doc
            .root_element()
            .children()
            .filter(|n| n.is_element())
            .filter_map(|n| n.attribute("point"))
            .collect();
        assert_eq!(
            points,
            vec![LAUNCH_TYPES_POINT, LAUNCH_TAB_GROUPS_POINT, LAUNCH_IMAGES_POINT]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_attribute() {
        let err = parse_nodes(r#"<tool id="t" bogus="1"/>"#).unwrap_err();
        assert!(matches!(err, MarkupError::UnknownAttribute(_)));

        let err = parse_nodes(r#"<tool name="t"/>"#).unwrap_err();
        assert!(matches!(err, MarkupError::MissingId { .. }));
    }
}
