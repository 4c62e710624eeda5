//! Property 8 (§8): a variable bound at schema, pattern and rule level under
//! the same name resolves at check time to the innermost definition; removing
//! a level falls back to the next one out.

use schematron::Factory;

fn schema_with_levels(pattern_let: bool, rule_let: bool) -> String {
    let pattern_let = if pattern_let { r#"<let name="v" value="'pattern'"/>"# } else { "" };
    let rule_let = if rule_let { r#"<let name="v" value="'rule'"/>"# } else { "" };
    format!(
        r#"<schema xmlns="http://purl.oclc.org/dsdl/schematron">
  <let name="v" value="'schema'"/>
  <pattern id="p1">
    {pattern_let}
    <rule context="/root">
      {rule_let}
      <assert test="$v = 'expected'">wrong value of $v</assert>
    </rule>
  </pattern>
</schema>"#
    )
}

fn assert_resolves_to(pattern_let: bool, rule_let: bool, expected: &str) {
    let xml = schema_with_levels(pattern_let, rule_let).replace("'expected'", &format!("'{expected}'"));
    let schema = schematron_parser::parse_schema_str(&xml, None).expect("parses");
    let validator = Factory::new().set_schema(schema).build().expect("compiles");
    let doc = schematron_query::DocumentTree::parse("<root/>").expect("parses doc");
    let result = validator.validate(doc).expect("validates");
    assert!(result.is_valid(), "expected $v to resolve to {expected:?} but the assert failed");
}

#[test]
fn rule_level_binding_wins_over_pattern_and_schema() {
    assert_resolves_to(true, true, "rule");
}

#[test]
fn pattern_level_binding_wins_when_rule_level_absent() {
    assert_resolves_to(true, false, "pattern");
}

#[test]
fn schema_level_binding_used_when_no_inner_binding() {
    assert_resolves_to(false, false, "schema");
}
