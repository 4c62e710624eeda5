use crate::{Paragraph, Pattern, Seq, Str, Title};
use crate::diagnostics::{Diagnostics, Properties};
use crate::variable::Variable;

/// The root of a Schematron AST.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub title: Option<Title>,
    pub namespaces: Seq<Namespace>,
    pub phases: Seq<Phase>,
    pub patterns: Seq<Pattern>,
    pub diagnostics: Option<Diagnostics>,
    pub properties: Option<Properties>,
    pub variables: Seq<Variable>,
    pub paragraphs: Seq<Paragraph>,

    pub default_phase: Option<Str>,
    pub query_binding: Option<Str>,
    pub schema_version: Option<Str>,
    pub id: Option<Str>,
    pub fpi: Option<Str>,
    pub icon: Option<Str>,
    pub see: Option<Str>,
    pub xml_lang: Option<Str>,
    pub xml_space: Option<Str>,
}

impl Schema {
    /// The effective query binding, defaulting to `xslt` per ISO Schematron
    /// when the schema does not declare one.
    pub fn query_binding_or_default(&self) -> &str {
        self.query_binding.as_deref().unwrap_or("xslt")
    }

    pub fn phase_by_id(&self, id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| &*p.id == id)
    }

    pub fn pattern_by_id(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id().as_deref() == Some(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: Str,
    pub uri: Str,
}

/// A named, orderable set of pattern ids that may be selected for activation.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub id: Str,
    pub active: Seq<ActivePhase>,
    pub variables: Seq<Variable>,
    pub paragraphs: Seq<Paragraph>,
    pub fpi: Option<Str>,
    pub icon: Option<Str>,
    pub see: Option<Str>,
    pub xml_lang: Option<Str>,
    pub xml_space: Option<Str>,
}

impl Phase {
    pub fn activates(&self, pattern_id: &str) -> bool {
        self.active.iter().any(|a| &*a.pattern == pattern_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePhase {
    pub pattern: Str,
}
