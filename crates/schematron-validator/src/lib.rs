//! Two-phase Schematron validator: compiles a reduced schema into a
//! pattern/rule/check hierarchy (Phase A) and walks a target document
//! producing the full result tree (Phase B). See [`Validator`].

mod check;
mod error;
mod node;
mod pattern;
mod richtext;
mod rule;
mod variable;

pub mod result;
pub mod validator;

pub use error::{Result, ValidatorError};
pub use node::{AttributeNode, CommentNode, ElementNode, ProcessingInstructionNode, XmlNodeDescriptor};
pub use result::{
    CheckResult, DiagnosticResult, FiredRuleResult, FullNodeResult, PatternResult, PropertyResult, RuleResult,
    SuppressedRuleResult, XMLDocumentValidationResult,
};
pub use validator::Validator;

#[cfg(test)]
mod tests {
    use super::*;
    use schematron_query::{DefaultQueryProcessorFactory, DocumentTree};

    fn validate(schema_xml: &str, document_xml: &str, phase: Option<&str>) -> XMLDocumentValidationResult {
        let schema = schematron_parser::parse_schema_str(schema_xml, None).expect("schema parses");
        let validator = Validator::compile(&schema, phase, &DefaultQueryProcessorFactory).expect("compiles");
        let tree = DocumentTree::parse(document_xml).expect("document parses");
        validator.validate_xml(&tree).expect("validates")
    }

    fn fired_rules(result: &XMLDocumentValidationResult) -> usize {
        result
            .node_results
            .iter()
            .flat_map(|n| &n.pattern_results)
            .flat_map(|p| &p.rule_results)
            .filter(|r| matches!(r, RuleResult::Fired(_)))
            .count()
    }

    fn suppressed_rules(result: &XMLDocumentValidationResult) -> usize {
        result
            .node_results
            .iter()
            .flat_map(|n| &n.pattern_results)
            .flat_map(|p| &p.rule_results)
            .filter(|r| matches!(r, RuleResult::Suppressed(_)))
            .count()
    }

    #[test]
    fn s1_trivial_passing_assert() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root"><assert test="true()">X</assert></rule></pattern>
</schema>"#;
        let result = validate(schema, "<root/>", None);
        assert!(result.is_valid());
        assert_eq!(fired_rules(&result), 1);
    }

    #[test]
    fn s2_failing_assert() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root"><assert test="false()">X</assert></rule></pattern>
</schema>"#;
        let result = validate(schema, "<root/>", None);
        assert!(!result.is_valid());
        let check = result
            .node_results
            .iter()
            .flat_map(|n| &n.pattern_results)
            .flat_map(|p| &p.rule_results)
            .find_map(|r| match r {
                RuleResult::Fired(f) => f.checks.first(),
                _ => None,
            })
            .expect("one fired check");
        assert!(check.fails_or_fires());
        assert_eq!(check.text, "X");
    }

    #[test]
    fn s3_firing_report() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root/fruit"><report test="true()">banana</report></rule></pattern>
</schema>"#;
        let result = validate(schema, "<root><fruit/></root>", None);
        assert!(!result.is_valid());
        assert_eq!(fired_rules(&result), 1);
    }

    #[test]
    fn s4_shadowing() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1">
    <rule context="*"><assert test="true()">ok</assert></rule>
    <rule context="*"><assert test="false()">never</assert></rule>
  </pattern>
</schema>"#;
        let result = validate(schema, "<root><a/></root>", None);
        assert!(result.is_valid());
        assert_eq!(fired_rules(&result), 2);
        assert_eq!(suppressed_rules(&result), 2);
    }

    #[test]
    fn s6_phase_pruning_excludes_other_pattern() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <phase id="Q"><active pattern="p1"/></phase>
  <pattern id="p1"><rule context="/root"><assert test="true()">a</assert></rule></pattern>
  <pattern id="p2"><rule context="/root"><assert test="false()">b</assert></rule></pattern>
</schema>"#;
        let result = validate(schema, "<root/>", Some("Q"));
        let pattern_ids: Vec<_> = result
            .node_results
            .iter()
            .flat_map(|n| &n.pattern_results)
            .filter(|p| p.has_fired_rule())
            .map(|p| p.pattern_id.clone())
            .collect();
        assert!(pattern_ids.iter().all(|id| id.as_deref() == Some("p1")));
        assert!(result.is_valid());
    }
}
