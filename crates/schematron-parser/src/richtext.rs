//! Mixed-content parsing: `<p>`, `<title>`, and the rich-text fragments
//! inside `<assert>`/`<report>`/`<diagnostic>`/`<property>`.

use regex::Regex;
use xot::{Node, ValueType, Xot};

use schematron_ast::{NameNode, Paragraph, Query, RichTextItem, Seq, Title, ValueOf};

use crate::ctx::ParseCtx;
use crate::error::{ParseError, Result};
use crate::xotutil::{attr, is_sch_element, local_name, xml_attr};

/// Walks every child of `node` (text and elements alike) in document order,
/// alternating literal text fragments with `<value-of>`/`<name>` nodes.
/// Unrecognized inline markup (`<emph>`, `<b>`, ...) is flattened into a
/// text fragment with namespace prefixes stripped — lossy by design, see
/// DESIGN.md.
pub fn parse_rich_text(ctx: &ParseCtx, node: Node) -> Result<Seq<RichTextItem>> {
    let xot = ctx.xot;
    let mut items = Vec::new();
    for child in xot.children(node) {
        match xot.value_type(child) {
            ValueType::Text => {
                if let xot::Value::Text(text) = xot.value(child) {
                    items.push(RichTextItem::Text(text.get().into()));
                }
            }
            ValueType::Element if is_sch_element(xot, child, "value-of") => {
                let select = attr(xot, child, "select").ok_or(ParseError::MissingAttribute {
                    element: "value-of",
                    attribute: "select",
                })?;
                items.push(RichTextItem::ValueOf(ValueOf {
                    select: Query::new(select),
                }));
            }
            ValueType::Element if is_sch_element(xot, child, "name") => {
                let path = attr(xot, child, "path").map(Query::new);
                items.push(RichTextItem::Name(NameNode { path }));
            }
            ValueType::Element => {
                items.push(RichTextItem::Text(strip_prefixes(xot, child)?.into()));
            }
            _ => {}
        }
    }
    Ok(items.into())
}

/// Serializes an unrecognized inline element verbatim, stripping namespace
/// prefixes (`<emph xmlns:x="...">` -> `<emph>`). This matches the source's
/// lossy treatment of stylistic markup inside rich text.
fn strip_prefixes(xot: &Xot, node: Node) -> Result<String> {
    let serialized = xot
        .to_string(node)
        .map_err(|e| ParseError::Xml(format!("serializing inline markup: {e}")))?;
    let xmlns = Regex::new(r#"\s+xmlns(:[A-Za-z0-9_.-]+)?="[^"]*""#).unwrap();
    let prefixed_tag = Regex::new(r"</?[A-Za-z_][A-Za-z0-9_.-]*:").unwrap();
    let without_xmlns = xmlns.replace_all(&serialized, "");
    let without_prefix = prefixed_tag.replace_all(&without_xmlns, |caps: &regex::Captures| {
        let whole = &caps[0];
        if let Some(stripped) = whole.strip_prefix("</") {
            format!("</{}", &stripped[stripped.find(':').map(|i| i + 1).unwrap_or(0)..])
        } else {
            let stripped = whole.trim_start_matches('<');
            format!("<{}", &stripped[stripped.find(':').map(|i| i + 1).unwrap_or(0)..])
        }
    });
    Ok(without_prefix.into_owned())
}

pub fn parse_paragraph(ctx: &ParseCtx, node: Node) -> Result<Paragraph> {
    let xot = ctx.xot;
    Ok(Paragraph {
        content: parse_rich_text(ctx, node)?,
        id: attr(xot, node, "id").map(Into::into),
        class: attr(xot, node, "class").map(Into::into),
        icon: attr(xot, node, "icon").map(Into::into),
        xml_lang: xml_attr(xot, node, "lang").map(Into::into),
        xml_space: xml_attr(xot, node, "space").map(Into::into),
    })
}

pub fn parse_title(ctx: &ParseCtx, node: Node) -> Result<Title> {
    Ok(Title {
        content: parse_rich_text(ctx, node)?,
    })
}

pub fn required_local(xot: &Xot, node: Node) -> String {
    local_name(xot, node).unwrap_or_default()
}
