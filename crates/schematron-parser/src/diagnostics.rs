//! `<diagnostics>`/`<diagnostic>` and `<properties>`/`<property>`.

use xot::Node;

use schematron_ast::{Diagnostic, Diagnostics, Properties, Property};

use crate::ctx::ParseCtx;
use crate::error::{ParseError, Result};
use crate::richtext::parse_rich_text;
use crate::xotutil::{attr, is_sch_element, sch_children, xml_attr};

pub fn parse_diagnostics(ctx: &ParseCtx, node: Node) -> Result<Diagnostics> {
    let mut diagnostics = Vec::new();
    for child in sch_children(ctx.xot, node) {
        if is_sch_element(ctx.xot, child, "diagnostic") {
            diagnostics.push(parse_diagnostic(ctx, child)?);
        }
    }
    Ok(Diagnostics {
        diagnostics: diagnostics.into(),
    })
}

fn parse_diagnostic(ctx: &ParseCtx, node: Node) -> Result<Diagnostic> {
    let xot = ctx.xot;
    let id = attr(xot, node, "id").ok_or(ParseError::MissingAttribute {
        element: "diagnostic",
        attribute: "id",
    })?;
    Ok(Diagnostic {
        id: id.into(),
        content: parse_rich_text(ctx, node)?,
        fpi: attr(xot, node, "fpi").map(Into::into),
        icon: attr(xot, node, "icon").map(Into::into),
        see: attr(xot, node, "see").map(Into::into),
        xml_lang: xml_attr(xot, node, "lang").map(Into::into),
        xml_space: xml_attr(xot, node, "space").map(Into::into),
    })
}

pub fn parse_properties(ctx: &ParseCtx, node: Node) -> Result<Properties> {
    let mut properties = Vec::new();
    for child in sch_children(ctx.xot, node) {
        if is_sch_element(ctx.xot, child, "property") {
            properties.push(parse_property(ctx, child)?);
        }
    }
    Ok(Properties {
        properties: properties.into(),
    })
}

fn parse_property(ctx: &ParseCtx, node: Node) -> Result<Property> {
    let xot = ctx.xot;
    let id = attr(xot, node, "id").ok_or(ParseError::MissingAttribute {
        element: "property",
        attribute: "id",
    })?;
    Ok(Property {
        id: id.into(),
        content: parse_rich_text(ctx, node)?,
        role: attr(xot, node, "role").map(Into::into),
        scheme: attr(xot, node, "scheme").map(Into::into),
        fpi: attr(xot, node, "fpi").map(Into::into),
        icon: attr(xot, node, "icon").map(Into::into),
        see: attr(xot, node, "see").map(Into::into),
        xml_lang: xml_attr(xot, node, "lang").map(Into::into),
        xml_space: xml_attr(xot, node, "space").map(Into::into),
    })
}
