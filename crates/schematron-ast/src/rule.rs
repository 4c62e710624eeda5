use crate::{Check, Paragraph, Query, Seq, Str, XPathExpression};
use crate::variable::Variable;
use std::rc::Rc;

/// `<rule>` is polymorphic: `abstract="true"` forbids `context` and requires
/// `id`; a present `context` yields a [`ConcreteRule`]; otherwise the rule is
/// an [`ExternalRule`] awaiting inclusion via `<extends href>`.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Concrete(ConcreteRule),
    Abstract(AbstractRule),
    External(ExternalRule),
}

impl Rule {
    pub fn checks(&self) -> &[Check] {
        match self {
            Rule::Concrete(r) => &r.checks,
            Rule::Abstract(r) => &r.checks,
            Rule::External(r) => &r.checks,
        }
    }

    pub fn extends(&self) -> &[Extends] {
        match self {
            Rule::Concrete(r) => &r.extends,
            Rule::Abstract(r) => &r.extends,
            Rule::External(r) => &r.extends,
        }
    }

    pub fn variables(&self) -> &[Variable] {
        match self {
            Rule::Concrete(r) => &r.variables,
            Rule::Abstract(r) => &r.variables,
            Rule::External(r) => &r.variables,
        }
    }
}

macro_rules! rule_common_fields {
    () => {
        pub checks: Seq<Check>,
        pub variables: Seq<Variable>,
        pub paragraphs: Seq<Paragraph>,
        pub extends: Seq<Extends>,
        pub flag: Option<Str>,
        pub fpi: Option<Str>,
        pub icon: Option<Str>,
        pub role: Option<Str>,
        pub see: Option<Str>,
        pub subject: Option<XPathExpression>,
        pub xml_lang: Option<Str>,
        pub xml_space: Option<Str>,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteRule {
    pub context: Query,
    pub id: Option<Str>,
    rule_common_fields!();
}

/// A template rule, extended by id from other rules. Never matched directly.
#[derive(Debug, Clone, PartialEq)]
pub struct AbstractRule {
    pub id: Str,
    rule_common_fields!();
}

/// A rule loaded via `<extends href>`, never matched directly; exists only to
/// be inlined into the extending rule by [`ExtendsExternal`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalRule {
    pub id: Option<Str>,
    pub source_path: Option<Str>,
    rule_common_fields!();
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extends {
    ById(ExtendsById),
    External(ExtendsExternal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendsById {
    pub rule_id: Str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtendsExternal {
    pub rule: Rc<ExternalRule>,
    pub href: Str,
}
