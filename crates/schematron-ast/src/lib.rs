//! Immutable node algebra for ISO Schematron schemas.
//!
//! Every node here is a plain, `Clone`-able value type. Child sequences and
//! interned strings are `Rc`-backed so that a "with-updated" copy of a node
//! (the pattern used throughout `schematron-transform`) is a cheap shallow
//! clone that reuses every untouched field instead of deep-copying subtrees.

mod check;
mod diagnostics;
mod pattern;
mod richtext;
mod rule;
mod schema;
mod variable;
pub mod visitor;

pub use check::{Check, CheckBody};
pub use diagnostics::{Diagnostic, Diagnostics, Property, Properties};
pub use pattern::{AbstractPattern, ConcretePattern, InstancePattern, Pattern, PatternParameter};
pub use richtext::{NameNode, Paragraph, RichTextItem, Title, ValueOf};
pub use rule::{AbstractRule, ConcreteRule, Extends, ExtendsById, ExtendsExternal, ExternalRule, Rule};
pub use schema::{ActivePhase, Namespace, Phase, Schema};
pub use variable::{QueryVariable, Variable, XMLVariable};
pub use visitor::AstNode;

use std::rc::Rc;

/// Interned, reference-counted string. Clones are pointer copies.
pub type Str = Rc<str>;

/// Ordered, fixed-length, reference-counted child sequence.
pub type Seq<T> = Rc<[T]>;

/// A query expressed in the schema's declared `queryBinding` language.
///
/// Distinct from [`XPathExpression`] because ISO Schematron mandates that
/// `subject=` attributes are always XPath, regardless of the schema's
/// query binding; conflating the two would let a non-XPath `subject` slip
/// past compile-time checking in the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(pub Str);

impl Query {
    pub fn new(source: impl Into<Str>) -> Self {
        Self(source.into())
    }

    pub fn source(&self) -> &str {
        &self.0
    }
}

/// An XPath expression, independent of the schema's query binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XPathExpression(pub Str);

impl XPathExpression {
    pub fn new(source: impl Into<Str>) -> Self {
        Self(source.into())
    }

    pub fn source(&self) -> &str {
        &self.0
    }
}

pub fn str_seq<I, S>(items: I) -> Seq<Str>
where
    I: IntoIterator<Item = S>,
    S: Into<Str>,
{
    items.into_iter().map(Into::into).collect::<Vec<_>>().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::{find_by_id, AstNode};

    fn empty_schema() -> Schema {
        Schema {
            title: None,
            namespaces: Seq::from(vec![]),
            phases: Seq::from(vec![]),
            patterns: Seq::from(vec![]),
            diagnostics: None,
            properties: None,
            variables: Seq::from(vec![]),
            paragraphs: Seq::from(vec![]),
            default_phase: None,
            query_binding: None,
            schema_version: None,
            id: None,
            fpi: None,
            icon: None,
            see: None,
            xml_lang: None,
            xml_space: None,
        }
    }

    #[test]
    fn abstract_rule_is_findable_by_id() {
        let abstract_rule = AbstractRule {
            id: "base-rule".into(),
            checks: Seq::from(vec![]),
            variables: Seq::from(vec![]),
            paragraphs: Seq::from(vec![]),
            extends: Seq::from(vec![]),
            flag: None,
            fpi: None,
            icon: None,
            role: None,
            see: None,
            subject: None,
            xml_lang: None,
            xml_space: None,
        };
        let pattern = ConcretePattern {
            id: Some("p1".into()),
            title: None,
            rules: str_seq_rule(abstract_rule.clone()),
            variables: Seq::from(vec![]),
            paragraphs: Seq::from(vec![]),
            documents: None,
            fpi: None,
            icon: None,
            see: None,
            xml_lang: None,
            xml_space: None,
        };
        let mut schema = empty_schema();
        schema.patterns = Seq::from(vec![Pattern::Concrete(pattern)]);

        let found = find_by_id(&AstNode::Schema(schema), "base-rule");
        assert_eq!(found, Some(AstNode::Rule(Rule::Abstract(abstract_rule))));
    }

    fn str_seq_rule(rule: AbstractRule) -> Seq<Rule> {
        Seq::from(vec![Rule::Abstract(rule)])
    }
}
