//! AST-to-AST transform passes that reduce a freshly parsed [`Schema`] down
//! to the form the query and validator layers consume: every rule concrete,
//! every pattern concrete, and only the patterns active under the requested
//! phase.
//!
//! The three passes run in a fixed order — [`resolve_extends`] must run
//! before [`resolve_abstract_patterns`] (an abstract pattern's rules may
//! themselves carry `extends`), and [`phase_selection::select_phase`] runs
//! last so it only ever sees concrete pattern ids.

mod error;
mod phase_selection;
mod resolve_abstract_patterns;
mod resolve_extends;

pub use error::{Result, TransformError};
pub use phase_selection::select_phase;
pub use resolve_abstract_patterns::resolve_abstract_patterns;
pub use resolve_extends::resolve_extends;

use schematron_ast::Schema;

/// Runs all three passes in order, reducing `schema` to the patterns active
/// under `phase` (`None` defers to the schema's `defaultPhase`, or `#ALL`
/// if it declares none).
pub fn reduce(schema: &Schema, phase: Option<&str>) -> Result<Schema> {
    let schema = resolve_extends(schema)?;
    let schema = resolve_abstract_patterns(&schema)?;
    select_phase(&schema, phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematron_ast::*;

    #[test]
    fn reduce_on_trivial_schema_is_a_no_op() {
        let pattern = Pattern::Concrete(ConcretePattern {
            id: Some("p1".into()),
            title: None,
            rules: Seq::from(vec![Rule::Concrete(ConcreteRule {
                context: Query::new("item"),
                id: None,
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
            })]),
            variables: Seq::from(vec![]),
            paragraphs: Seq::from(vec![]),
            documents: None,
            fpi: None,
            icon: None,
            see: None,
            xml_lang: None,
            xml_space: None,
        });
        let schema = Schema {
            title: None,
            namespaces: Seq::from(vec![]),
            phases: Seq::from(vec![]),
            patterns: Seq::from(vec![pattern]),
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
        };
        let reduced = reduce(&schema, None).unwrap();
        assert_eq!(reduced.patterns.len(), 1);
    }
}
