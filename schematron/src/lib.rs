//! Public API for ISO Schematron validation in direct mode (§6.1): compile
//! a schema once with [`Factory`], then run any number of documents through
//! the resulting [`Validator`] to get a [`ValidationResult`] (an `is_valid`
//! boolean plus an SVRL report).
//!
//! [`validate_document`] and [`validate_documents`] are one-shot
//! convenience wrappers around the same pipeline for callers who don't need
//! to hold onto a compiled validator.

mod custom_function;
mod error;
mod factory;
mod result;
mod source;
mod validator;

pub use custom_function::Function as CustomFunction;
pub use error::{Result, SchematronError};
pub use factory::Factory;
pub use result::ValidationResult;
pub use source::{SchemaSource, XmlSource};
pub use validator::Validator;

/// Compiles `schema` and validates one `xml` document against it.
pub fn validate_document(
    xml: impl Into<XmlSource>,
    schema: impl Into<SchemaSource>,
    phase: Option<&str>,
    custom_functions: Option<Vec<(String, Vec<CustomFunction>, Option<String>)>>,
) -> Result<ValidationResult> {
    let validator = build_validator(schema, phase, custom_functions)?;
    validator.validate(xml)
}

/// Compiles `schema` once and validates every document in `xmls` against
/// the same [`Validator`], returning one result per document in order.
pub fn validate_documents(
    xmls: impl IntoIterator<Item = impl Into<XmlSource>>,
    schema: impl Into<SchemaSource>,
    phase: Option<&str>,
    custom_functions: Option<Vec<(String, Vec<CustomFunction>, Option<String>)>>,
) -> Result<Vec<ValidationResult>> {
    let validator = build_validator(schema, phase, custom_functions)?;
    xmls.into_iter().map(|xml| validator.validate(xml)).collect()
}

fn build_validator(
    schema: impl Into<SchemaSource>,
    phase: Option<&str>,
    custom_functions: Option<Vec<(String, Vec<CustomFunction>, Option<String>)>>,
) -> Result<Validator> {
    let mut factory = Factory::new().set_schema(schema).set_phase(phase);
    for (query_binding, functions, base_query_binding) in custom_functions.into_iter().flatten() {
        factory = factory.add_custom_functions(query_binding, functions, base_query_binding);
    }
    factory.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn trivial_passing_schema_validates() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root"><assert test="true()">X</assert></rule></pattern>
</schema>"#;
        let document = "<root/>";
        let parsed_schema = schematron_parser::parse_schema_str(schema, None).unwrap();
        let result = validate_document(
            schematron_query::DocumentTree::parse(document).unwrap(),
            parsed_schema,
            None,
            None,
        )
        .unwrap();
        assert!(result.is_valid());
        assert!(result.get_svrl_xml().contains("schematron-output"));
    }

    #[test]
    fn missing_schema_errors() {
        let err = Factory::new().build().unwrap_err();
        assert!(matches!(err, SchematronError::MissingSchema));
    }

    #[test]
    fn validate_documents_reuses_one_compiled_validator() {
        let schema = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root/fruit"><report test="true()">banana</report></rule></pattern>
</schema>"#;
        let parsed_schema = schematron_parser::parse_schema_str(schema, None).unwrap();
        let docs = vec![
            schematron_query::DocumentTree::parse("<root><fruit/></root>").unwrap(),
            schematron_query::DocumentTree::parse("<root/>").unwrap(),
        ];
        let results = validate_documents(docs, parsed_schema, None, None).unwrap();
        assert_eq!(results.len(), 2);
        assert!(!results[0].is_valid());
        assert!(results[1].is_valid());
    }

    #[test]
    fn from_paths_compiles() {
        let dir = tempfile::tempdir().unwrap();
        let schema_path = dir.path().join("rules.sch");
        std::fs::write(
            &schema_path,
            r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1"><rule context="/root"><assert test="true()">X</assert></rule></pattern>
</schema>"#,
        )
        .unwrap();
        let xml_path: PathBuf = dir.path().join("doc.xml");
        std::fs::write(&xml_path, "<root/>").unwrap();

        let validator = Factory::new().set_schema(schema_path.as_path()).build().unwrap();
        let result = validator.validate(xml_path.as_path()).unwrap();
        assert!(result.is_valid());
    }
}
