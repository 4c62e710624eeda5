//! Reduces a schema to the patterns active under one phase (§4.2.3).
//!
//! `#ALL` (the default when the schema declares no `defaultPhase` and the
//! caller requests none) keeps every pattern. A named phase keeps only the
//! patterns it activates and brings the phase's own `<let>` bindings into
//! scope alongside the schema's top-level variables.

use schematron_ast::{Pattern, Schema, Variable};

use crate::error::{Result, TransformError};

pub fn select_phase(schema: &Schema, requested: Option<&str>) -> Result<Schema> {
    let requested_name = requested.or(schema.default_phase.as_deref()).unwrap_or("#ALL");

    let resolved_name = if requested_name == "#DEFAULT" {
        schema.default_phase.as_deref().ok_or_else(|| TransformError::UnresolvedReference {
            kind: "phase",
            id: "#DEFAULT".to_string(),
        })?
    } else {
        requested_name
    };

    if resolved_name == "#ALL" {
        return Ok(schema.clone());
    }

    let phase = schema.phase_by_id(resolved_name).ok_or_else(|| TransformError::UnresolvedReference {
        kind: "phase",
        id: resolved_name.to_string(),
    })?;

    let patterns: Vec<Pattern> = schema
        .patterns
        .iter()
        .filter(|p| p.id().is_some_and(|id| phase.activates(&id)))
        .cloned()
        .collect();

    let mut variables: Vec<Variable> = schema.variables.iter().cloned().collect();
    variables.extend(phase.variables.iter().cloned());
    let phase = phase.clone();

    Ok(Schema {
        patterns: patterns.into(),
        variables: variables.into(),
        phases: vec![phase].into(),
        ..schema.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematron_ast::*;

    fn schema_with(patterns: Vec<Pattern>, phases: Vec<Phase>, default_phase: Option<&str>) -> Schema {
        Schema {
            title: None,
            namespaces: Seq::from(vec![]),
            phases: phases.into(),
            patterns: patterns.into(),
            diagnostics: None,
            properties: None,
            variables: Seq::from(vec![]),
            paragraphs: Seq::from(vec![]),
            default_phase: default_phase.map(Into::into),
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

    fn bare_pattern(id: &str) -> Pattern {
        Pattern::Concrete(ConcretePattern {
            id: Some(id.into()),
            title: None,
            rules: Seq::from(vec![]),
            variables: Seq::from(vec![]),
            paragraphs: Seq::from(vec![]),
            documents: None,
            fpi: None,
            icon: None,
            see: None,
            xml_lang: None,
            xml_space: None,
        })
    }

    #[test]
    fn named_phase_keeps_only_activated_patterns() {
        let phase = Phase {
            id: "p-phase".into(),
            active: Seq::from(vec![ActivePhase { pattern: "p1".into() }]),
            variables: Seq::from(vec![]),
            paragraphs: Seq::from(vec![]),
            fpi: None,
            icon: None,
            see: None,
            xml_lang: None,
            xml_space: None,
        };
        let schema = schema_with(vec![bare_pattern("p1"), bare_pattern("p2")], vec![phase], None);
        let reduced = select_phase(&schema, Some("p-phase")).unwrap();
        assert_eq!(reduced.patterns.len(), 1);
        assert_eq!(reduced.patterns[0].id().as_deref(), Some("p1"));
        assert_eq!(reduced.phases.len(), 1);
        assert_eq!(&*reduced.phases[0].id, "p-phase");
    }

    #[test]
    fn no_phase_requested_and_no_default_keeps_all() {
        let schema = schema_with(vec![bare_pattern("p1"), bare_pattern("p2")], vec![], None);
        let reduced = select_phase(&schema, None).unwrap();
        assert_eq!(reduced.patterns.len(), 2);
    }

    #[test]
    fn unknown_phase_errors() {
        let schema = schema_with(vec![bare_pattern("p1")], vec![], None);
        assert!(select_phase(&schema, Some("nope")).is_err());
    }
}
