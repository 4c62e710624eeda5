//! XML node descriptors (§3.3): a sum type over the four node kinds
//! Schematron rules and checks ever match against. Text nodes are never
//! wrapped; the validator's node walk skips them before reaching here.

use xot::{Node, Xot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNodeDescriptor {
    Element(ElementNode),
    Attribute(AttributeNode),
    Comment(CommentNode),
    ProcessingInstruction(ProcessingInstructionNode),
}

impl XmlNodeDescriptor {
    pub fn node(&self) -> Node {
        match self {
            Self::Element(n) => n.node,
            Self::Attribute(n) => n.node,
            Self::Comment(n) => n.node,
            Self::ProcessingInstruction(n) => n.node,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Element(n) => &n.path,
            Self::Attribute(n) => &n.path,
            Self::Comment(n) => &n.path,
            Self::ProcessingInstruction(n) => &n.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub node: Node,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeNode {
    pub node: Node,
    pub parent: Node,
    pub name: String,
    pub value: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    pub node: Node,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingInstructionNode {
    pub node: Node,
    pub path: String,
}

/// Wraps `node` as a descriptor, or `None` for node kinds the validator
/// never visits (document, text, namespace).
pub fn describe_node(xot: &Xot, node: Node) -> Option<XmlNodeDescriptor> {
    match xot.value(node) {
        xot::Value::Element(_) => Some(XmlNodeDescriptor::Element(ElementNode {
            node,
            path: canonical_path(xot, node),
        })),
        xot::Value::Attribute(attr) => {
            let parent = xot.parent(node)?;
            Some(XmlNodeDescriptor::Attribute(AttributeNode {
                node,
                parent,
                name: xot.name_string(attr.name()),
                value: attr.value().get().to_string(),
                path: canonical_path(xot, node),
            }))
        }
        xot::Value::Comment(_) => Some(XmlNodeDescriptor::Comment(CommentNode {
            node,
            path: canonical_path(xot, node),
        })),
        xot::Value::ProcessingInstruction(_) => Some(XmlNodeDescriptor::ProcessingInstruction(
            ProcessingInstructionNode {
                node,
                path: canonical_path(xot, node),
            },
        )),
        _ => None,
    }
}

/// A hand-rolled canonical path (`/root[1]/item[2]/@id`), computed by
/// walking the parent chain and counting same-kind preceding siblings.
/// Deliberately simpler than the engine's own `fn:path()` (no `Q{ns}`
/// braces) — see DESIGN.md for why this crate doesn't route through it.
pub fn canonical_path(xot: &Xot, node: Node) -> String {
    if let xot::Value::Attribute(attr) = xot.value(node) {
        let name = xot.name_string(attr.name());
        return match xot.parent(node) {
            Some(parent) => format!("{}/@{name}", element_path(xot, parent)),
            None => format!("@{name}"),
        };
    }
    element_path(xot, node)
}

enum SiblingKind<'a> {
    Element(&'a str),
    Comment,
    ProcessingInstruction(&'a str),
}

fn element_path(xot: &Xot, node: Node) -> String {
    let mut segments = Vec::new();
    let mut current = Some(node);
    while let Some(n) = current {
        let parent = xot.parent(n);
        match xot.value(n) {
            xot::Value::Element(element) => {
                let name = xot.name_string(element.name());
                let position = position_among_siblings(xot, parent, n, SiblingKind::Element(&name));
                segments.push(format!("{name}[{position}]"));
            }
            xot::Value::Comment(_) => {
                let position = position_among_siblings(xot, parent, n, SiblingKind::Comment);
                segments.push(format!("comment()[{position}]"));
            }
            xot::Value::ProcessingInstruction(pi) => {
                let target = pi.target().to_string();
                let position = position_among_siblings(xot, parent, n, SiblingKind::ProcessingInstruction(&target));
                segments.push(format!("processing-instruction('{target}')[{position}]"));
            }
            _ => {}
        }
        current = parent;
    }
    segments.reverse();
    format!("/{}", segments.join("/"))
}

fn position_among_siblings(xot: &Xot, parent: Option<Node>, node: Node, kind: SiblingKind<'_>) -> usize {
    let Some(parent) = parent else {
        return 1;
    };
    let mut count = 0;
    for child in xot.children(parent) {
        let matches = match (&kind, xot.value(child)) {
            (SiblingKind::Element(name), xot::Value::Element(e)) => xot.name_string(e.name()) == *name,
            (SiblingKind::Comment, xot::Value::Comment(_)) => true,
            (SiblingKind::ProcessingInstruction(target), xot::Value::ProcessingInstruction(pi)) => {
                pi.target() == *target
            }
            _ => false,
        };
        if matches {
            count += 1;
        }
        if child == node {
            return count;
        }
    }
    count.max(1)
}
