use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use xee_xpath::Documents;
use xot::Node;

use crate::tree::DocumentTree;

/// Immutable evaluation context. Every `with_*` call returns a new value;
/// `with_context_item` is a no-op (returns a clone sharing the same `Rc`s)
/// when the node is already current, since the validator calls it once per
/// visited node on the hot path.
#[derive(Clone)]
pub struct EvaluationContext {
    documents: Rc<RefCell<Documents>>,
    context_node: Option<Node>,
    namespaces: Rc<HashMap<String, String>>,
    variables: Rc<HashMap<String, String>>,
}

impl EvaluationContext {
    pub fn with_xml_root(tree: &DocumentTree) -> Self {
        Self {
            documents: Rc::clone(tree.documents()),
            context_node: Some(tree.root()),
            namespaces: Rc::new(HashMap::new()),
            variables: Rc::new(HashMap::new()),
        }
    }

    pub fn with_context_item(&self, node: Node) -> Self {
        if self.context_node == Some(node) {
            return self.clone();
        }
        Self {
            context_node: Some(node),
            ..self.clone()
        }
    }

    pub fn context_node(&self) -> Option<Node> {
        self.context_node
    }

    pub fn with_namespaces(&self, namespaces: &HashMap<String, String>) -> Self {
        if namespaces.is_empty() {
            return self.clone();
        }
        let mut merged = (*self.namespaces).clone();
        merged.extend(namespaces.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            namespaces: Rc::new(merged),
            ..self.clone()
        }
    }

    /// `overwrite=false` keeps any existing binding of the same name (later
    /// scopes take precedence only when they ask to overwrite); Schematron's
    /// own shadowing (inner scope wins) is expressed by the caller passing
    /// `overwrite=true` when layering rule variables atop pattern variables.
    pub fn with_variables(&self, variables: &HashMap<String, String>, overwrite: bool) -> Self {
        if variables.is_empty() {
            return self.clone();
        }
        let mut merged = (*self.variables).clone();
        for (name, value) in variables {
            if overwrite || !merged.contains_key(name) {
                merged.insert(name.clone(), value.clone());
            }
        }
        Self {
            variables: Rc::new(merged),
            ..self.clone()
        }
    }

    pub(crate) fn documents(&self) -> &Rc<RefCell<Documents>> {
        &self.documents
    }

    pub(crate) fn namespace_map(&self) -> &HashMap<String, String> {
        &self.namespaces
    }

    pub(crate) fn variable_map(&self) -> &HashMap<String, String> {
        &self.variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_context_item_is_noop_for_same_node() {
        let tree = DocumentTree::parse("<root/>").unwrap();
        let ctx = EvaluationContext::with_xml_root(&tree);
        let root = tree.root();
        let reapplied = ctx.with_context_item(root);
        assert_eq!(reapplied.context_node(), Some(root));
    }

    #[test]
    fn with_variables_respects_overwrite_flag() {
        let tree = DocumentTree::parse("<root/>").unwrap();
        let ctx = EvaluationContext::with_xml_root(&tree);
        let mut first = HashMap::new();
        first.insert("x".to_string(), "1".to_string());
        let ctx = ctx.with_variables(&first, false);

        let mut second = HashMap::new();
        second.insert("x".to_string(), "2".to_string());
        let kept = ctx.with_variables(&second, false);
        assert_eq!(kept.variable_map().get("x"), Some(&"1".to_string()));

        let overwritten = ctx.with_variables(&second, true);
        assert_eq!(overwritten.variable_map().get("x"), Some(&"2".to_string()));
    }
}
