//! Small helpers over `xot` for namespace-aware element dispatch.

use xot::{Node, ValueType, Xot};

pub const SCH_NS: &str = "http://purl.oclc.org/dsdl/schematron";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Direct element children of `node`, in document order.
pub fn element_children<'a>(xot: &'a Xot, node: Node) -> impl Iterator<Item = Node> + 'a {
    xot.children(node)
        .filter(move |&c| xot.value_type(c) == ValueType::Element)
}

/// Direct element children in the Schematron namespace, in document order.
pub fn sch_children<'a>(xot: &'a Xot, node: Node) -> impl Iterator<Item = Node> + 'a {
    element_children(xot, node).filter(move |&c| namespace_of(xot, c).as_deref() == Some(SCH_NS))
}

pub fn local_name(xot: &Xot, node: Node) -> Option<String> {
    xot.node_name(node).map(|id| xot.name_ns_str(id).1.to_string())
}

pub fn namespace_of(xot: &Xot, node: Node) -> Option<String> {
    xot.node_name(node).map(|id| xot.name_ns_str(id).0.to_string())
}

pub fn is_sch_element(xot: &Xot, node: Node, local: &str) -> bool {
    xot.value_type(node) == ValueType::Element
        && namespace_of(xot, node).as_deref() == Some(SCH_NS)
        && local_name(xot, node).as_deref() == Some(local)
}

/// An unprefixed, unnamespaced attribute value (every Schematron attribute
/// other than `xml:lang`/`xml:space` lives in no namespace).
pub fn attr(xot: &Xot, node: Node, local: &str) -> Option<String> {
    xot.attributes(node).find_map(|(name_id, value)| {
        let (ns, ln) = xot.name_ns_str(name_id);
        if ns.is_empty() && ln == local {
            Some(value.get().to_string())
        } else {
            None
        }
    })
}

pub fn xml_attr(xot: &Xot, node: Node, local: &str) -> Option<String> {
    xot.attributes(node).find_map(|(name_id, value)| {
        let (ns, ln) = xot.name_ns_str(name_id);
        if ns == XML_NS && ln == local {
            Some(value.get().to_string())
        } else {
            None
        }
    })
}

pub fn text_content(xot: &Xot, node: Node) -> String {
    xot.text_content(node)
}
