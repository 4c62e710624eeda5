//! Element-dispatched XML-to-AST parser for ISO Schematron schemas.
//!
//! [`parse_schema_file`]/[`parse_schema_str`] turn a Schematron document
//! into a [`schematron_ast::Schema`], resolving `<include href>` eagerly at
//! parse time. The element dispatch table ([`dispatch::ParserTable`]) is a
//! plain struct of function pointers, swappable by callers who need
//! specialized node types without forking this crate.

pub mod check;
pub mod ctx;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod include;
pub mod pattern;
pub mod richtext;
pub mod rule;
pub mod schema;
pub mod variable;
pub mod xotutil;

use std::path::Path;

use schematron_ast::Schema;

pub use dispatch::ParserTable;
pub use error::{ParseError, Result};

/// Parses a Schematron schema from disk. `<include href>` paths resolve
/// relative to the file's own directory.
pub fn parse_schema_file(path: &Path) -> Result<Schema> {
    let xml = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().map(std::path::PathBuf::from);
    parse_schema_str(&xml, base.as_deref())
}

/// Parses a Schematron schema from an in-memory XML string. `base_path`, if
/// given, is the directory `<include href>` paths resolve against.
pub fn parse_schema_str(xml: &str, base_path: Option<&Path>) -> Result<Schema> {
    parse_schema_str_with(xml, base_path, &ParserTable::default())
}

/// As [`parse_schema_str`], with a caller-supplied dispatch table.
pub fn parse_schema_str_with(
    xml: &str,
    base_path: Option<&Path>,
    table: &ParserTable,
) -> Result<Schema> {
    let mut xot = xot::Xot::new();
    let doc = xot
        .parse(xml)
        .map_err(|e| ParseError::Xml(e.to_string()))?;
    let root = xot.document_element(doc).ok_or_else(|| ParseError::Xml(
        "document has no root element".to_string(),
    ))?;
    let ctx = ctx::ParseCtx {
        xot: &xot,
        base_path: base_path.map(std::path::PathBuf::from),
        table,
    };
    tracing::debug!(?base_path, "parsing Schematron schema");
    schema::parse_schema_element(&ctx, root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trivial_schema() {
        let xml = r#"<?xml version="1.0"?>
<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1">
    <rule context="/root">
      <assert test="true()">ok</assert>
    </rule>
  </pattern>
</schema>"#;
        let schema = parse_schema_str(xml, None).expect("parses");
        assert_eq!(schema.patterns.len(), 1);
        let pattern = schema.patterns[0].as_concrete().expect("concrete pattern");
        assert_eq!(pattern.id.as_deref(), Some("p1"));
        assert_eq!(pattern.rules.len(), 1);
    }

    #[test]
    fn abstract_rule_without_id_is_rejected() {
        let xml = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1">
    <rule abstract="true">
      <assert test="true()">x</assert>
    </rule>
  </pattern>
</schema>"#;
        assert!(parse_schema_str(xml, None).is_err());
    }

    #[test]
    fn let_without_value_becomes_xml_variable() {
        let xml = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <let name="frag"><item/></let>
  <pattern id="p1"><rule context="/"><assert test="true()">x</assert></rule></pattern>
</schema>"#;
        let schema = parse_schema_str(xml, None).expect("parses");
        match &schema.variables[0] {
            schematron_ast::Variable::Xml(v) => assert_eq!(&*v.name, "frag"),
            _ => panic!("expected XMLVariable"),
        }
    }

    /// Property 1 (§8): parsing the same source twice yields equal ASTs, and
    /// parsing is insensitive to incidental whitespace/attribute-order
    /// differences that carry no schema meaning.
    #[test]
    fn parse_is_structurally_idempotent() {
        let xml = r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron" id="s1">
  <pattern id="p1">
    <rule context="/root" id="r1">
      <assert test="true()" id="a1">ok</assert>
      <report test="false()">never</report>
    </rule>
  </pattern>
</schema>"#;
        let reordered = r#"<schema id="s1" xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="p1">
    <rule id="r1" context="/root">
      <assert id="a1" test="true()">ok</assert>
      <report test="false()">never</report>
    </rule>
  </pattern>
</schema>"#;
        let first = parse_schema_str(xml, None).expect("parses");
        let second = parse_schema_str(reordered, None).expect("parses");
        assert_eq!(first, second);

        let reparsed = parse_schema_str(xml, None).expect("parses again");
        assert_eq!(first, reparsed);
    }

    /// Property 9 (§8): an `<include href>` pointing at a `<pattern>` lands
    /// in the enclosing schema's `patterns` at the include element's
    /// position, not appended at the end.
    #[test]
    fn include_merges_pattern_at_its_position() {
        let dir = tempfile::tempdir().expect("tempdir");
        let included_path = dir.path().join("included.sch");
        std::fs::write(
            &included_path,
            r#"<pattern xmlns="http://purl.oclc.org/dsdl/schematron" id="included">
  <rule context="/root"><assert test="true()">included</assert></rule>
</pattern>"#,
        )
        .expect("write include target");

        let xml = format!(
            r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <pattern id="before"><rule context="/root"><assert test="true()">before</assert></rule></pattern>
  <include href="included.sch"/>
  <pattern id="after"><rule context="/root"><assert test="true()">after</assert></rule></pattern>
</schema>"#
        );
        let schema = parse_schema_str(&xml, Some(dir.path())).expect("parses with include");
        let ids: Vec<Option<String>> = schema
            .patterns
            .iter()
            .map(|p| p.id().map(|s| s.to_string()))
            .collect();
        assert_eq!(
            ids,
            vec![Some("before".to_string()), Some("included".to_string()), Some("after".to_string())]
        );
    }
}
