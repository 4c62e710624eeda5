//! Generic AST visitor protocol.
//!
//! Rather than double dispatch through per-node-type visit methods, every
//! node is wrapped into the single [`AstNode`] sum type and a visitor
//! implements one `visit` method, matching on the variant it cares about.
//! This mirrors the source's `GenericASTNode`/`GenericASTVisitor` pair
//! without relying on runtime reflection: [`children`] is hand-written per
//! variant instead of walking dataclass fields.

use crate::{
    AbstractPattern, AbstractRule, Check, ConcretePattern, ConcreteRule, Diagnostic, Diagnostics,
    Extends, ExternalRule, InstancePattern, Pattern, Phase, Property, Properties, Rule, Schema,
    Str, Variable,
};

/// Any node in a Schematron AST, for use with a generic [`AstVisitor`].
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Schema(Schema),
    Pattern(Pattern),
    Rule(Rule),
    Extends(Extends),
    Check(Check),
    Variable(Variable),
    Diagnostics(Diagnostics),
    Diagnostic(Diagnostic),
    Properties(Properties),
    Property(Property),
    Phase(Phase),
}

/// A node that can report its own Schematron `id` attribute, if any.
///
/// Used by `FindIdVisitor`-style lookups: `extends`/`is-a` references are
/// resolved by scanning for the [`AstNode`] whose `id()` matches.
impl AstNode {
    pub fn id(&self) -> Option<Str> {
        match self {
            AstNode::Schema(s) => s.id.clone(),
            AstNode::Pattern(p) => p.id(),
            AstNode::Rule(Rule::Abstract(r)) => Some(r.id.clone()),
            AstNode::Rule(Rule::Concrete(r)) => r.id.clone(),
            AstNode::Rule(Rule::External(r)) => r.id.clone(),
            AstNode::Check(c) => c.body().id.clone(),
            AstNode::Diagnostic(d) => Some(d.id.clone()),
            AstNode::Property(p) => Some(p.id.clone()),
            AstNode::Phase(p) => Some(p.id.clone()),
            _ => None,
        }
    }

    /// All direct child nodes, bundled into one list, preserving schema
    /// order. Mirrors `GenericASTNode.get_children`.
    pub fn children(&self) -> Vec<AstNode> {
        match self {
            AstNode::Schema(s) => {
                let mut out: Vec<AstNode> = s.patterns.iter().cloned().map(AstNode::Pattern).collect();
                out.extend(s.phases.iter().cloned().map(AstNode::Phase));
                out.extend(s.variables.iter().cloned().map(AstNode::Variable));
                if let Some(d) = &s.diagnostics {
                    out.push(AstNode::Diagnostics(d.clone()));
                }
                if let Some(p) = &s.properties {
                    out.push(AstNode::Properties(p.clone()));
                }
                out
            }
            AstNode::Pattern(Pattern::Concrete(ConcretePattern { rules, variables, .. }))
            | AstNode::Pattern(Pattern::Abstract(AbstractPattern { rules, variables, .. })) => {
                let mut out: Vec<AstNode> = rules.iter().cloned().map(AstNode::Rule).collect();
                out.extend(variables.iter().cloned().map(AstNode::Variable));
                out
            }
            AstNode::Pattern(Pattern::Instance(InstancePattern { .. })) => Vec::new(),
            AstNode::Rule(rule) => {
                let mut out: Vec<AstNode> = rule.checks().iter().cloned().map(AstNode::Check).collect();
                out.extend(rule.extends().iter().cloned().map(AstNode::Extends));
                out
            }
            AstNode::Extends(Extends::External(ext)) => {
                vec![AstNode::Rule(Rule::External((*ext.rule).clone()))]
            }
            AstNode::Diagnostics(d) => d.diagnostics.iter().cloned().map(AstNode::Diagnostic).collect(),
            AstNode::Properties(p) => p.properties.iter().cloned().map(AstNode::Property).collect(),
            AstNode::Phase(p) => p.variables.iter().cloned().map(AstNode::Variable).collect(),
            AstNode::Check(_)
            | AstNode::Variable(_)
            | AstNode::Diagnostic(_)
            | AstNode::Property(_)
            | AstNode::Extends(Extends::ById(_)) => Vec::new(),
        }
    }
}

/// A visitor over [`AstNode`]s with a polymorphic return type, mirroring
/// `GenericASTVisitor[T]`.
pub trait AstVisitor<T> {
    fn visit(&mut self, node: &AstNode) -> T;
}

/// Depth-first search for the first node whose `id()` equals `target`.
pub fn find_by_id(root: &AstNode, target: &str) -> Option<AstNode> {
    if root.id().as_deref() == Some(target) {
        return Some(root.clone());
    }
    root.children().iter().find_map(|child| find_by_id(child, target))
}

/// Collect every node for which `predicate` returns true, depth-first.
pub fn collect_where(root: &AstNode, predicate: &impl Fn(&AstNode) -> bool, out: &mut Vec<AstNode>) {
    if predicate(root) {
        out.push(root.clone());
    }
    for child in root.children() {
        collect_where(&child, predicate, out);
    }
}

/// Map every `id()`-bearing node reachable from `root` to itself, mirroring
/// `GetIDMappingVisitor`. Later occurrences of a duplicate id overwrite
/// earlier ones, matching a plain `dict` build-up in the source.
pub fn id_mapping(root: &AstNode) -> std::collections::HashMap<String, AstNode> {
    let mut map = std::collections::HashMap::new();
    fn walk(node: &AstNode, map: &mut std::collections::HashMap<String, AstNode>) {
        if let Some(id) = node.id() {
            map.insert(id.to_string(), node.clone());
        }
        for child in node.children() {
            walk(&child, map);
        }
    }
    walk(root, &mut map);
    map
}
