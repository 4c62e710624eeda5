//! Serializes a [`SchematronOutput`] to SVRL XML (§6.4), `svrl:` as the
//! default content namespace with schema namespaces merged in as extra
//! declarations on the root element.

use crate::svrl::{SchematronOutput, ValidationEvent};

const SVRL_NS: &str = "http://purl.oclc.org/dsdl/svrl";

pub fn write(output: &SchematronOutput) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');

    let mut root_attrs = vec![("xmlns:svrl".to_string(), SVRL_NS.to_string())];
    for (i, ns) in output.ns_prefixes.iter().enumerate() {
        root_attrs.push((format!("xmlns:{}", ns.prefix), ns.uri.clone()));
        let _ = i;
    }
    if let Some(title) = &output.title {
        root_attrs.push(("title".to_string(), title.clone()));
    }
    if let Some(schema_version) = &output.schema_version {
        root_attrs.push(("schemaVersion".to_string(), schema_version.clone()));
    }
    if let Some(phase) = &output.phase {
        root_attrs.push(("phase".to_string(), phase.clone()));
    }

    open_tag(&mut xml, "svrl:schematron-output", &attr_refs(&root_attrs));

    for ns in &output.ns_prefixes {
        empty_tag(
            &mut xml,
            "svrl:ns-prefix-in-attribute-values",
            &[("prefix", &ns.prefix), ("uri", &ns.uri)],
        );
    }

    write_metadata(&mut xml, output);

    for text in &output.texts {
        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if let Some(id) = &text.id {
            attrs.push(("id", id));
        }
        if let Some(class) = &text.class {
            attrs.push(("class", class));
        }
        if let Some(icon) = &text.icon {
            attrs.push(("icon", icon));
        }
        if let Some(lang) = &text.xml_lang {
            attrs.push(("xml:lang", lang));
        }
        open_tag(&mut xml, "svrl:text", &attrs);
        xml.push_str(&escape_text(&text.content));
        close_tag(&mut xml, "svrl:text");
    }

    for event in &output.events {
        write_event(&mut xml, event);
    }

    close_tag(&mut xml, "svrl:schematron-output");
    xml
}

fn write_metadata(xml: &mut String, output: &SchematronOutput) {
    open_tag(xml, "svrl:metadata", &[]);
    xml.push_str(r#"<dct:creator xmlns:dct="http://purl.org/dc/terms/">"#);
    xml.push_str(&escape_text(&output.metadata.creator_agent));
    xml.push_str("</dct:creator>");
    xml.push_str(r#"<dct:created xmlns:dct="http://purl.org/dc/terms/">"#);
    xml.push_str(&escape_text(&output.metadata.created));
    xml.push_str("</dct:created>");
    if let Some(source) = &output.metadata.source_description {
        xml.push_str(r#"<dct:source xmlns:dct="http://purl.org/dc/terms/">"#);
        xml.push_str(&escape_text(source));
        xml.push_str("</dct:source>");
    }
    close_tag(xml, "svrl:metadata");
}

fn write_event(xml: &mut String, event: &ValidationEvent) {
    match event {
        ValidationEvent::ActivePattern(p) => {
            let mut attrs: Vec<(&str, &str)> = Vec::new();
            if let Some(id) = &p.id {
                attrs.push(("id", id));
            }
            if let Some(documents) = &p.documents {
                attrs.push(("documents", documents));
            }
            empty_tag(xml, "svrl:active-pattern", &attrs);
        }
        ValidationEvent::FiredRule(r) => {
            let mut attrs: Vec<(&str, &str)> = vec![("context", &r.context)];
            if let Some(id) = &r.id {
                attrs.push(("id", id));
            }
            if let Some(role) = &r.role {
                attrs.push(("role", role));
            }
            if let Some(document) = &r.document {
                attrs.push(("document", document));
            }
            empty_tag(xml, "svrl:fired-rule", &attrs);
        }
        ValidationEvent::SuppressedRule(r) => {
            let mut attrs: Vec<(&str, &str)> = vec![("context", &r.context)];
            if let Some(id) = &r.id {
                attrs.push(("id", id));
            }
            if let Some(role) = &r.role {
                attrs.push(("role", role));
            }
            empty_tag(xml, "svrl:suppressed-rule", &attrs);
        }
        ValidationEvent::FailedAssert(c) => write_check_event(xml, "svrl:failed-assert", c),
        ValidationEvent::SuccessfulReport(c) => write_check_event(xml, "svrl:successful-report", c),
    }
}

fn write_check_event(xml: &mut String, tag: &str, event: &crate::svrl::CheckEvent) {
    let mut attrs: Vec<(&str, &str)> = vec![("test", &event.test), ("location", &event.location)];
    if let Some(id) = &event.id {
        attrs.push(("id", id));
    }
    if let Some(role) = &event.role {
        attrs.push(("role", role));
    }
    if let Some(flag) = &event.flag {
        attrs.push(("flag", flag));
    }
    if let Some(subject_location) = &event.subject_location {
        attrs.push(("subject", subject_location));
    }
    open_tag(xml, tag, &attrs);
    for diag in &event.diagnostics {
        open_tag(xml, "svrl:diagnostic-reference", &[("diagnostic", &diag.diagnostic)]);
        xml.push_str(&escape_text(&diag.text));
        close_tag(xml, "svrl:diagnostic-reference");
    }
    for prop in &event.properties {
        let mut prop_attrs: Vec<(&str, &str)> = vec![("property", &prop.property)];
        if let Some(role) = &prop.role {
            prop_attrs.push(("role", role));
        }
        open_tag(xml, "svrl:property-reference", &prop_attrs);
        xml.push_str(&escape_text(&prop.text));
        close_tag(xml, "svrl:property-reference");
    }
    xml.push_str(&escape_text(&event.text));
    close_tag(xml, tag);
}

fn attr_refs(attrs: &[(String, String)]) -> Vec<(&str, &str)> {
    attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

fn open_tag(xml: &mut String, name: &str, attrs: &[(&str, &str)]) {
    xml.push('<');
    xml.push_str(name);
    write_attrs(xml, attrs);
    xml.push('>');
}

fn close_tag(xml: &mut String, name: &str) {
    xml.push_str("</");
    xml.push_str(name);
    xml.push('>');
}

fn empty_tag(xml: &mut String, name: &str, attrs: &[(&str, &str)]) {
    xml.push('<');
    xml.push_str(name);
    write_attrs(xml, attrs);
    xml.push_str("/>");
}

fn write_attrs(xml: &mut String, attrs: &[(&str, &str)]) {
    for (key, value) in attrs {
        xml.push(' ');
        xml.push_str(key);
        xml.push_str("=\"");
        xml.push_str(&escape_attr(value));
        xml.push('"');
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
