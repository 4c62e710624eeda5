use crate::{Paragraph, Query, Rule, Seq, Str, Title};
use crate::variable::Variable;

/// `<pattern>` is polymorphic on `abstract="true"` / `is-a="..."` / neither.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Concrete(ConcretePattern),
    Abstract(AbstractPattern),
    Instance(InstancePattern),
}

impl Pattern {
    pub fn id(&self) -> Option<Str> {
        match self {
            Pattern::Concrete(p) => p.id.clone(),
            Pattern::Abstract(p) => Some(p.id.clone()),
            Pattern::Instance(p) => p.id.clone(),
        }
    }

    pub fn as_concrete(&self) -> Option<&ConcretePattern> {
        match self {
            Pattern::Concrete(p) => Some(p),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConcretePattern {
    pub id: Option<Str>,
    pub title: Option<Title>,
    pub rules: Seq<Rule>,
    pub variables: Seq<Variable>,
    pub paragraphs: Seq<Paragraph>,
    pub documents: Option<Query>,
    pub fpi: Option<Str>,
    pub icon: Option<Str>,
    pub see: Option<Str>,
    pub xml_lang: Option<Str>,
    pub xml_space: Option<Str>,
}

/// A template pattern, never itself selected for validation; only
/// [`InstancePattern`] instantiations of it survive `ResolveAbstractPatterns`.
#[derive(Debug, Clone, PartialEq)]
pub struct AbstractPattern {
    pub id: Str,
    pub title: Option<Title>,
    pub rules: Seq<Rule>,
    pub variables: Seq<Variable>,
    pub paragraphs: Seq<Paragraph>,
    pub documents: Option<Query>,
    pub fpi: Option<Str>,
    pub icon: Option<Str>,
    pub see: Option<Str>,
    pub xml_lang: Option<Str>,
    pub xml_space: Option<Str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstancePattern {
    pub id: Option<Str>,
    pub abstract_id_ref: Str,
    pub parameters: Seq<PatternParameter>,
    pub documents: Option<Query>,
    pub fpi: Option<Str>,
    pub icon: Option<Str>,
    pub see: Option<Str>,
    pub xml_lang: Option<Str>,
    pub xml_space: Option<Str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternParameter {
    pub name: Str,
    pub value: Str,
}
