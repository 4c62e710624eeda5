//! Builds a [`SchematronOutput`] from a validation result (§4.7).

use chrono::Local;
use schematron_ast::{Check, RichTextItem};
use schematron_validator::{CheckResult, FullNodeResult, RuleResult, XMLDocumentValidationResult};

use crate::svrl::{
    ActivePattern, CheckEvent, DiagnosticReference, FiredRule, MetaData, NsPrefixInAttributeValues,
    PropertyReference, SchematronOutput, SuppressedRule, Text, ValidationEvent,
};

const TOOL_NAME: &str = "x-rs schematron";
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `document_uri`, if given, becomes the metadata's source description and
/// is prefixed with `file:` per §4.7.
pub fn build(result: &XMLDocumentValidationResult, document_uri: Option<&str>) -> SchematronOutput {
    let schema = &result.schema;

    let texts = schema
        .paragraphs
        .iter()
        .map(|p| Text {
            content: render_plain(&p.content),
            id: p.id.as_deref().map(str::to_string),
            class: p.class.as_deref().map(str::to_string),
            icon: p.icon.as_deref().map(str::to_string),
            xml_lang: p.xml_lang.as_deref().map(str::to_string),
        })
        .collect();

    let ns_prefixes = schema
        .namespaces
        .iter()
        .map(|ns| NsPrefixInAttributeValues {
            prefix: ns.prefix.to_string(),
            uri: ns.uri.to_string(),
        })
        .collect();

    let metadata = MetaData {
        creator_agent: format!("{TOOL_NAME} {TOOL_VERSION}"),
        created: Local::now().to_rfc3339(),
        source_description: document_uri.map(|uri| format!("file:{uri}")),
    };

    SchematronOutput {
        title: schema.title.as_ref().map(|t| render_plain(&t.content)),
        schema_version: schema.schema_version.as_deref().map(str::to_string),
        phase: result.phase.clone(),
        texts,
        ns_prefixes,
        metadata,
        events: build_events(result, document_uri),
    }
}

/// Renders schema-level rich text (titles, `<p>`) without a live document
/// context: literal fragments render verbatim; `value-of`/`name` fragments
/// fall back to their raw query source, since there is no node to evaluate
/// them against at this stage (see DESIGN.md).
fn render_plain(content: &[RichTextItem]) -> String {
    let mut out = String::new();
    for item in content {
        match item {
            RichTextItem::Text(s) => out.push_str(s),
            RichTextItem::ValueOf(value_of) => out.push_str(value_of.select.source()),
            RichTextItem::Name(name) => {
                if let Some(path) = &name.path {
                    out.push_str(path.source());
                }
            }
        }
    }
    out.trim().to_string()
}

/// Groups `node_results` by pattern (patterns share a fixed order across
/// every node, since they come from the same compiled validator), emitting
/// one `ActivePattern` per pattern that fired anywhere in the document,
/// followed by its fired/suppressed rule events in document order.
fn build_events(result: &XMLDocumentValidationResult, document_uri: Option<&str>) -> Vec<ValidationEvent> {
    let document = document_uri.map(|uri| format!("file:{uri}"));
    let pattern_count = result.node_results.first().map_or(0, |n| n.pattern_results.len());
    let mut events = Vec::new();

    for pattern_index in 0..pattern_count {
        let mut pattern_events = Vec::new();
        let mut has_fired = false;
        let mut pattern_id = None;

        for node_result in &result.node_results {
            let Some(pattern_result) = node_result.pattern_results.get(pattern_index) else {
                continue;
            };
            pattern_id = pattern_result.pattern_id.clone();

            for rule_result in &pattern_result.rule_results {
                match rule_result {
                    RuleResult::Skipped => {}
                    RuleResult::Suppressed(suppressed) => {
                        pattern_events.push(ValidationEvent::SuppressedRule(SuppressedRule {
                            context: suppressed.context.clone(),
                            id: suppressed.id.clone(),
                            role: suppressed.role.clone(),
                        }));
                    }
                    RuleResult::Fired(fired) => {
                        has_fired = true;
                        pattern_events.push(ValidationEvent::FiredRule(FiredRule {
                            context: fired.context.clone(),
                            id: fired.id.clone(),
                            role: fired.role.clone(),
                            document: document.clone(),
                        }));
                        for check in &fired.checks {
                            if let Some(event) = check_event(check, node_result) {
                                pattern_events.push(event);
                            }
                        }
                    }
                }
            }
        }

        if has_fired {
            events.push(ValidationEvent::ActivePattern(ActivePattern {
                id: pattern_id,
                documents: document.clone(),
            }));
            events.extend(pattern_events);
        }
    }

    events
}

/// `None` when the check's derived outcome was a pass (§4.5) — passing
/// asserts and non-firing reports produce no SVRL event.
fn check_event(check: &CheckResult, node_result: &FullNodeResult) -> Option<ValidationEvent> {
    if !check.fails_or_fires() {
        return None;
    }
    let body = check.check.body();
    let event = CheckEvent {
        test: body.test.source().to_string(),
        location: node_result.node.path().to_string(),
        text: check.text.clone(),
        id: body.id.as_deref().map(str::to_string),
        role: body.role.as_deref().map(str::to_string),
        flag: body.flag.as_deref().map(str::to_string),
        subject_location: check.subject_node.as_ref().map(|n| n.path().to_string()),
        diagnostics: check
            .diagnostics
            .iter()
            .map(|d| DiagnosticReference {
                diagnostic: d.id.clone(),
                text: d.text.clone(),
            })
            .collect(),
        properties: check
            .properties
            .iter()
            .map(|p| PropertyReference {
                property: p.id.clone(),
                text: p.text.clone(),
                role: p.role.clone(),
            })
            .collect(),
    };
    Some(match &check.check {
        Check::Assert(_) => ValidationEvent::FailedAssert(event),
        Check::Report(_) => ValidationEvent::SuccessfulReport(event),
    })
}
