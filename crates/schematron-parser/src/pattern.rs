//! `<pattern>`: polymorphic on `abstract="true"` / `is-a="..."` / neither.

use xot::Node;

use schematron_ast::{AbstractPattern, ConcretePattern, InstancePattern, Pattern, PatternParameter, Query};

use crate::ctx::ParseCtx;
use crate::error::{ParseError, Result};
use crate::include::{resolve_include, IncludedNode};
use crate::richtext::parse_paragraph;
use crate::xotutil::{attr, is_sch_element, local_name, sch_children};

pub fn parse_pattern(ctx: &ParseCtx, node: Node) -> Result<Pattern> {
    let xot = ctx.xot;
    let id = attr(xot, node, "id").map(Into::into);
    let is_abstract = attr(xot, node, "abstract").as_deref() == Some("true");
    let is_a = attr(xot, node, "is-a");

    let documents = attr(xot, node, "documents").map(Query::new);
    let fpi = attr(xot, node, "fpi").map(Into::into);
    let icon = attr(xot, node, "icon").map(Into::into);
    let see = attr(xot, node, "see").map(Into::into);
    let xml_lang = crate::xotutil::xml_attr(xot, node, "lang").map(Into::into);
    let xml_space = crate::xotutil::xml_attr(xot, node, "space").map(Into::into);

    if let Some(abstract_id_ref) = is_a {
        let mut parameters = Vec::new();
        for child in sch_children(xot, node) {
            if is_sch_element(xot, child, "param") {
                parameters.push(parse_param(xot, child)?);
            }
        }
        return Ok(Pattern::Instance(InstancePattern {
            id,
            abstract_id_ref: abstract_id_ref.into(),
            parameters: parameters.into(),
            documents,
            fpi,
            icon,
            see,
            xml_lang,
            xml_space,
        }));
    }

    let mut rules = Vec::new();
    let mut variables = Vec::new();
    let mut paragraphs = Vec::new();
    let mut title = None;
    for child in sch_children(xot, node) {
        if is_sch_element(xot, child, "rule") {
            rules.push((ctx.table.rule)(ctx, child)?);
        } else if is_sch_element(xot, child, "let") {
            variables.push((ctx.table.variable)(ctx, child)?);
        } else if is_sch_element(xot, child, "p") {
            paragraphs.push(parse_paragraph(ctx, child)?);
        } else if is_sch_element(xot, child, "title") {
            title = Some(crate::richtext::parse_title(ctx, child)?);
        } else if local_name(xot, child).as_deref() == Some("include") {
            match resolve_include(ctx, child)? {
                IncludedNode::Rule(r) => rules.push(r),
                IncludedNode::Variable(v) => variables.push(v),
                IncludedNode::Paragraph(p) => paragraphs.push(p),
                IncludedNode::Title(t) => title = Some(t),
                _ => {
                    return Err(ParseError::BadInclude {
                        href: attr(xot, child, "href").unwrap_or_default(),
                        reason: "<pattern> can only include a <rule>, <let>, <p>, or <title>"
                            .into(),
                    })
                }
            }
        }
    }

    if is_abstract {
        let id = id.ok_or(ParseError::MissingAttribute {
            element: "pattern",
            attribute: "id",
        })?;
        return Ok(Pattern::Abstract(AbstractPattern {
            id,
            title,
            rules: rules.into(),
            variables: variables.into(),
            paragraphs: paragraphs.into(),
            documents,
            fpi,
            icon,
            see,
            xml_lang,
            xml_space,
        }));
    }

    Ok(Pattern::Concrete(ConcretePattern {
        id,
        title,
        rules: rules.into(),
        variables: variables.into(),
        paragraphs: paragraphs.into(),
        documents,
        fpi,
        icon,
        see,
        xml_lang,
        xml_space,
    }))
}

fn parse_param(xot: &xot::Xot, node: Node) -> Result<PatternParameter> {
    let name = attr(xot, node, "name").ok_or(ParseError::MissingAttribute {
        element: "param",
        attribute: "name",
    })?;
    let value = attr(xot, node, "value").ok_or(ParseError::MissingAttribute {
        element: "param",
        attribute: "value",
    })?;
    Ok(PatternParameter {
        name: name.into(),
        value: value.into(),
    })
}
