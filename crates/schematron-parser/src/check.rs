//! `<assert>`/`<report>`: same shape, different check-polarity tag.

use xot::Node;

use schematron_ast::{Check, CheckBody, Query, XPathExpression};

use crate::ctx::ParseCtx;
use crate::error::{ParseError, Result};
use crate::richtext::parse_rich_text;
use crate::xotutil::{attr, local_name, xml_attr};

fn id_refs(raw: Option<String>) -> Vec<schematron_ast::Str> {
    raw.map(|s| s.split_whitespace().map(Into::into).collect())
        .unwrap_or_default()
}

pub fn parse_check(ctx: &ParseCtx, node: Node) -> Result<Check> {
    let xot = ctx.xot;
    let local = local_name(xot, node).unwrap_or_default();
    let test = attr(xot, node, "test").ok_or(ParseError::MissingAttribute {
        element: "assert/report",
        attribute: "test",
    })?;
    let body = CheckBody {
        test: Query::new(test),
        content: parse_rich_text(ctx, node)?,
        diagnostics: id_refs(attr(xot, node, "diagnostics")).into(),
        properties: id_refs(attr(xot, node, "properties")).into(),
        flag: attr(xot, node, "flag").map(Into::into),
        id: attr(xot, node, "id").map(Into::into),
        role: attr(xot, node, "role").map(Into::into),
        see: attr(xot, node, "see").map(Into::into),
        subject: attr(xot, node, "subject").map(XPathExpression::new),
        fpi: attr(xot, node, "fpi").map(Into::into),
        icon: attr(xot, node, "icon").map(Into::into),
        xml_lang: xml_attr(xot, node, "lang").map(Into::into),
        xml_space: xml_attr(xot, node, "space").map(Into::into),
    };
    match local.as_str() {
        "assert" => Ok(Check::Assert(body)),
        "report" => Ok(Check::Report(body)),
        other => Err(ParseError::InvalidDiscriminant {
            element: "assert/report",
            reason: format!("unexpected element `{other}`"),
        }),
    }
}
