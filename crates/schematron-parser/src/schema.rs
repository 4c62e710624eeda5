//! `<schema>` (root), `<ns>`, `<phase>`, `<active>`.

use xot::Node;

use schematron_ast::{ActivePhase, Namespace, Phase, Schema};

use crate::ctx::ParseCtx;
use crate::error::{ParseError, Result};
use crate::include::{resolve_include, IncludedNode};
use crate::richtext::{parse_paragraph, parse_title};
use crate::xotutil::{attr, is_sch_element, local_name, sch_children, xml_attr, SCH_NS};

pub fn parse_schema_element(ctx: &ParseCtx, node: Node) -> Result<Schema> {
    let xot = ctx.xot;
    let local = local_name(xot, node);
    if local.as_deref() != Some("schema") {
        return Err(ParseError::UnexpectedRoot {
            expected: "schema",
            found: local.unwrap_or_else(|| "<unknown>".to_string()),
        });
    }

    let mut namespaces = Vec::new();
    let mut phases = Vec::new();
    let mut patterns = Vec::new();
    let mut diagnostics = None;
    let mut properties = None;
    let mut variables = Vec::new();
    let mut paragraphs = Vec::new();
    let mut title = None;

    for child in sch_children(xot, node) {
        let tag = local_name(xot, child).unwrap_or_default();
        match tag.as_str() {
            "ns" => namespaces.push(parse_ns(ctx, child)?),
            "phase" => phases.push(parse_phase(ctx, child)?),
            "pattern" => patterns.push((ctx.table.pattern)(ctx, child)?),
            "diagnostics" => diagnostics = Some(crate::diagnostics::parse_diagnostics(ctx, child)?),
            "properties" => properties = Some(crate::diagnostics::parse_properties(ctx, child)?),
            "let" => variables.push((ctx.table.variable)(ctx, child)?),
            "p" => paragraphs.push(parse_paragraph(ctx, child)?),
            "title" => title = Some(parse_title(ctx, child)?),
            "include" => match resolve_include(ctx, child)? {
                IncludedNode::Pattern(p) => patterns.push(p),
                IncludedNode::Namespace(n) => namespaces.push(n),
                IncludedNode::Phase(p) => phases.push(p),
                IncludedNode::Variable(v) => variables.push(v),
                IncludedNode::Paragraph(p) => paragraphs.push(p),
                IncludedNode::Title(t) => title = Some(t),
                IncludedNode::Diagnostics(d) => diagnostics = Some(d),
                IncludedNode::Properties(p) => properties = Some(p),
                IncludedNode::Rule(_) => {
                    return Err(ParseError::BadInclude {
                        href: attr(xot, child, "href").unwrap_or_default(),
                        reason: "a <rule> cannot be included directly into <schema>".into(),
                    })
                }
            },
            _ => {}
        }
    }

    Ok(Schema {
        title,
        namespaces: namespaces.into(),
        phases: phases.into(),
        patterns: patterns.into(),
        diagnostics,
        properties,
        variables: variables.into(),
        paragraphs: paragraphs.into(),
        default_phase: attr(xot, node, "defaultPhase").map(Into::into),
        query_binding: attr(xot, node, "queryBinding").map(Into::into),
        schema_version: attr(xot, node, "schemaVersion").map(Into::into),
        id: attr(xot, node, "id").map(Into::into),
        fpi: attr(xot, node, "fpi").map(Into::into),
        icon: attr(xot, node, "icon").map(Into::into),
        see: attr(xot, node, "see").map(Into::into),
        xml_lang: xml_attr(xot, node, "lang").map(Into::into),
        xml_space: xml_attr(xot, node, "space").map(Into::into),
    })
}

pub fn parse_ns(ctx: &ParseCtx, node: Node) -> Result<Namespace> {
    let xot = ctx.xot;
    let prefix = attr(xot, node, "prefix").ok_or(ParseError::MissingAttribute {
        element: "ns",
        attribute: "prefix",
    })?;
    let uri = attr(xot, node, "uri").ok_or(ParseError::MissingAttribute {
        element: "ns",
        attribute: "uri",
    })?;
    Ok(Namespace {
        prefix: prefix.into(),
        uri: uri.into(),
    })
}

pub fn parse_phase(ctx: &ParseCtx, node: Node) -> Result<Phase> {
    let xot = ctx.xot;
    let id = attr(xot, node, "id").ok_or(ParseError::MissingAttribute {
        element: "phase",
        attribute: "id",
    })?;
    let mut active = Vec::new();
    let mut variables = Vec::new();
    let mut paragraphs = Vec::new();
    for child in sch_children(xot, node) {
        if is_sch_element(xot, child, "active") {
            active.push(parse_active(xot, child)?);
        } else if is_sch_element(xot, child, "let") {
            variables.push((ctx.table.variable)(ctx, child)?);
        } else if is_sch_element(xot, child, "p") {
            paragraphs.push(parse_paragraph(ctx, child)?);
        }
    }
    Ok(Phase {
        id: id.into(),
        active: active.into(),
        variables: variables.into(),
        paragraphs: paragraphs.into(),
        fpi: attr(xot, node, "fpi").map(Into::into),
        icon: attr(xot, node, "icon").map(Into::into),
        see: attr(xot, node, "see").map(Into::into),
        xml_lang: xml_attr(xot, node, "lang").map(Into::into),
        xml_space: xml_attr(xot, node, "space").map(Into::into),
    })
}

fn parse_active(xot: &xot::Xot, node: Node) -> Result<ActivePhase> {
    let pattern = attr(xot, node, "pattern").ok_or(ParseError::MissingAttribute {
        element: "active",
        attribute: "pattern",
    })?;
    Ok(ActivePhase {
        pattern: pattern.into(),
    })
}

/// The Schematron namespace every element in `<schema>` must live in.
pub const SCHEMATRON_NAMESPACE: &str = SCH_NS;
