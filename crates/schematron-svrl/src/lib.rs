//! SVRL (Schematron Validation Reporting Language) output: builds an
//! [`svrl::SchematronOutput`] from a validator result and serializes it to
//! XML (§4.7, §6.4).

mod builder;
mod error;
mod svrl;
mod writer;

pub use builder::build;
pub use error::{Result, SvrlError};
pub use svrl::{
    ActivePattern, CheckEvent, DiagnosticReference, FiredRule, MetaData, NsPrefixInAttributeValues,
    PropertyReference, SchematronOutput, SuppressedRule, Text, ValidationEvent,
};
pub use writer::write;

/// Builds and serializes in one step.
pub fn to_xml(result: &schematron_validator::XMLDocumentValidationResult, document_uri: Option<&str>) -> String {
    write(&build(result, document_uri))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematron_query::{DefaultQueryProcessorFactory, DocumentTree};
    use schematron_validator::Validator;

    fn svrl_for(schema_xml: &str, document_xml: &str) -> String {
        let schema = schematron_parser::parse_schema_str(schema_xml, None).expect("schema parses");
        let validator = Validator::compile(&schema, None, &DefaultQueryProcessorFactory).expect("compiles");
        let tree = DocumentTree::parse(document_xml).expect("document parses");
        let result = validator.validate_xml(&tree).expect("validates");
        to_xml(&result, Some("doc.xml"))
    }

    #[test]
    fn failing_assert_produces_active_pattern_and_failed_assert() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root"><assert test="false()">must hold</assert></rule></pattern>
</schema>"#;
        let xml = svrl_for(schema, "<root/>");
        assert!(xml.contains("svrl:schematron-output"));
        assert!(xml.contains(r#"svrl:active-pattern id="p1""#));
        assert!(xml.contains("svrl:failed-assert"));
        assert!(xml.contains("must hold"));
        assert!(!xml.contains("svrl:successful-report"));
    }

    #[test]
    fn passing_assert_produces_no_check_events() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root"><assert test="true()">ok</assert></rule></pattern>
</schema>"#;
        let xml = svrl_for(schema, "<root/>");
        assert!(!xml.contains("svrl:failed-assert"));
        assert!(!xml.contains("svrl:active-pattern"));
    }

    #[test]
    fn firing_report_produces_successful_report() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root/fruit"><report test="true()">banana</report></rule></pattern>
</schema>"#;
        let xml = svrl_for(schema, "<root><fruit/></root>");
        assert!(xml.contains("svrl:successful-report"));
        assert!(xml.contains("banana"));
    }

    #[test]
    fn active_pattern_and_fired_rule_carry_file_prefixed_document_uri() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root"><assert test="false()">must hold</assert></rule></pattern>
</schema>"#;
        let xml = svrl_for(schema, "<root/>");
        assert!(xml.contains(r#"svrl:active-pattern id="p1" documents="file:doc.xml""#));
        assert!(xml.contains(r#"document="file:doc.xml""#));
    }

    #[test]
    fn metadata_includes_document_uri_as_file_uri() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root"><assert test="true()">ok</assert></rule></pattern>
</schema>"#;
        let xml = svrl_for(schema, "<root/>");
        assert!(xml.contains("file:doc.xml"));
    }

    #[test]
    fn escapes_reserved_xml_characters_in_check_text() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root"><assert test="false()">a &lt; b &amp; c</assert></rule></pattern>
</schema>"#;
        let xml = svrl_for(schema, "<root/>");
        assert!(xml.contains("a &lt; b &amp; c"));
    }
}
