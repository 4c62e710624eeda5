//! End-to-end scenarios S1-S6 (spec §8), driven entirely through the public
//! API against the fixture pairs under `tests/fixtures/`.

use std::path::{Path, PathBuf};

use schematron::Factory;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn validate(schema: &str, doc: &str, phase: Option<&str>) -> schematron::ValidationResult {
    let validator = Factory::new()
        .set_schema(fixture(schema).as_path())
        .set_phase(phase)
        .build()
        .expect("validator compiles");
    validator.validate(fixture(doc).as_path()).expect("document validates")
}

#[test]
fn s1_trivial_passing() {
    let result = validate("s1_schema.sch", "s1_doc.xml", None);
    assert!(result.is_valid());
    let svrl = result.get_svrl_xml();
    assert_eq!(svrl.matches("svrl:active-pattern").count(), 1);
    assert_eq!(svrl.matches("svrl:fired-rule").count(), 1);
    assert_eq!(svrl.matches("svrl:failed-assert").count(), 0);
}

#[test]
fn s2_failing_assert() {
    let result = validate("s2_schema.sch", "s1_doc.xml", None);
    assert!(!result.is_valid());
    let svrl = result.get_svrl_xml();
    assert!(svrl.contains("svrl:failed-assert"));
    assert!(svrl.contains(">X<"));
    assert!(svrl.contains(r#"location="/root[1]""#));
}

#[test]
fn s3_firing_report() {
    let result = validate("s3_schema.sch", "s3_doc.xml", None);
    assert!(!result.is_valid());
    let svrl = result.get_svrl_xml();
    assert_eq!(svrl.matches("svrl:successful-report").count(), 1);
}

#[test]
fn s4_shadowing() {
    let result = validate("s4_schema.sch", "s4_doc.xml", None);
    assert!(result.is_valid());
    let svrl = result.get_svrl_xml();
    assert_eq!(svrl.matches("svrl:fired-rule").count(), 1);
    assert_eq!(svrl.matches("svrl:suppressed-rule").count(), 1);
}

#[test]
fn s5_abstract_pattern_instantiation() {
    let result = validate("s5_schema.sch", "s5_doc.xml", None);
    assert!(!result.is_valid());
    let svrl = result.get_svrl_xml();
    assert_eq!(svrl.matches("svrl:fired-rule").count(), 2);
    assert_eq!(svrl.matches("svrl:failed-assert").count(), 1);
}

#[test]
fn s6_phase_pruning_excludes_other_pattern() {
    let result = validate("s6_schema.sch", "s6_doc.xml", Some("Q"));
    assert!(result.is_valid());
    let svrl = result.get_svrl_xml();
    assert!(svrl.contains(r#"svrl:active-pattern id="p1""#));
    assert!(!svrl.contains(r#"svrl:active-pattern id="p2""#));
}

/// Property 10 (§8): two validators compiled independently from the same
/// schema text, run against the same document, agree on every fixed field
/// (the `dct:created` timestamp is the only field expected to vary).
#[test]
fn caching_determinism_across_independent_compiles() {
    let first = validate("s2_schema.sch", "s1_doc.xml", None);
    let second = validate("s2_schema.sch", "s1_doc.xml", None);
    assert_eq!(strip_created(&first.get_svrl_xml()), strip_created(&second.get_svrl_xml()));
}

fn strip_created(svrl: &str) -> String {
    let start = svrl.find("<dct:created").expect("metadata has a created element");
    let end = svrl[start..].find("</dct:created>").expect("created element closes") + start;
    format!("{}{}", &svrl[..start], &svrl[end..])
}
