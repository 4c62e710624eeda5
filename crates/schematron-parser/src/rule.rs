//! `<rule>`: polymorphic on `abstract="true"` vs. a present `context` vs.
//! neither (an [`ExternalRule`], awaiting `<extends href>`).

use std::rc::Rc;

use xot::Node;

use schematron_ast::{
    AbstractRule, ConcreteRule, Extends, ExtendsById, ExtendsExternal, ExternalRule, Query, Rule,
    XPathExpression,
};

use crate::ctx::ParseCtx;
use crate::error::{ParseError, Result};
use crate::include::{resolve_include, IncludedNode};
use crate::richtext::parse_paragraph;
use crate::xotutil::{attr, is_sch_element, local_name, sch_children, xml_attr};

pub fn parse_rule(ctx: &ParseCtx, node: Node) -> Result<Rule> {
    let xot = ctx.xot;
    let id = attr(xot, node, "id").map(Into::into);
    let is_abstract = attr(xot, node, "abstract").as_deref() == Some("true");
    let context = attr(xot, node, "context");

    let mut checks = Vec::new();
    let mut variables = Vec::new();
    let mut paragraphs = Vec::new();
    let mut extends = Vec::new();
    for child in sch_children(xot, node) {
        if is_sch_element(xot, child, "assert") || is_sch_element(xot, child, "report") {
            checks.push((ctx.table.check)(ctx, child)?);
        } else if is_sch_element(xot, child, "let") {
            variables.push((ctx.table.variable)(ctx, child)?);
        } else if is_sch_element(xot, child, "p") {
            paragraphs.push(parse_paragraph(ctx, child)?);
        } else if is_sch_element(xot, child, "extends") {
            extends.push(parse_extends(ctx, child)?);
        } else if local_name(xot, child).as_deref() == Some("include") {
            match resolve_include(ctx, child)? {
                IncludedNode::Variable(v) => variables.push(v),
                IncludedNode::Paragraph(p) => paragraphs.push(p),
                _ => {
                    return Err(ParseError::BadInclude {
                        href: attr(xot, child, "href").unwrap_or_default(),
                        reason: "<rule> can only include a <let> or <p>".into(),
                    })
                }
            }
        }
    }

    let flag = attr(xot, node, "flag").map(Into::into);
    let fpi = attr(xot, node, "fpi").map(Into::into);
    let icon = attr(xot, node, "icon").map(Into::into);
    let role = attr(xot, node, "role").map(Into::into);
    let see = attr(xot, node, "see").map(Into::into);
    let subject = attr(xot, node, "subject").map(XPathExpression::new);
    let xml_lang = xml_attr(xot, node, "lang").map(Into::into);
    let xml_space = xml_attr(xot, node, "space").map(Into::into);

    if is_abstract {
        let id = id.ok_or(ParseError::MissingAttribute {
            element: "rule",
            attribute: "id",
        })?;
        if context.is_some() {
            return Err(ParseError::InvalidDiscriminant {
                element: "rule",
                reason: "abstract rule must not declare @context".into(),
            });
        }
        return Ok(Rule::Abstract(AbstractRule {
            id,
            checks: checks.into(),
            variables: variables.into(),
            paragraphs: paragraphs.into(),
            extends: extends.into(),
            flag,
            fpi,
            icon,
            role,
            see,
            subject,
            xml_lang,
            xml_space,
        }));
    }

    if let Some(context) = context {
        return Ok(Rule::Concrete(ConcreteRule {
            context: Query::new(context),
            id,
            checks: checks.into(),
            variables: variables.into(),
            paragraphs: paragraphs.into(),
            extends: extends.into(),
            flag,
            fpi,
            icon,
            role,
            see,
            subject,
            xml_lang,
            xml_space,
        }));
    }

    Ok(Rule::External(ExternalRule {
        id,
        source_path: None,
        checks: checks.into(),
        variables: variables.into(),
        paragraphs: paragraphs.into(),
        extends: extends.into(),
        flag,
        fpi,
        icon,
        role,
        see,
        subject,
        xml_lang,
        xml_space,
    }))
}

/// `<extends rule="id"/>` or `<extends href="file.sch"/>`.
pub fn parse_extends(ctx: &ParseCtx, node: Node) -> Result<Extends> {
    let xot = ctx.xot;
    if let Some(rule_id) = attr(xot, node, "rule") {
        return Ok(Extends::ById(ExtendsById {
            rule_id: rule_id.into(),
        }));
    }
    let href = attr(xot, node, "href").ok_or(ParseError::MissingAttribute {
        element: "extends",
        attribute: "rule|href",
    })?;
    let path = ctx.resolve_href(&href);
    let xml = std::fs::read_to_string(&path).map_err(|source| ParseError::Io {
        path: path.clone(),
        source,
    })?;
    let mut file_xot = xot::Xot::new();
    let doc = file_xot
        .parse(&xml)
        .map_err(|e| ParseError::Xml(format!("{}: {e}", path.display())))?;
    let root = file_xot.document_element(doc).ok_or_else(|| ParseError::BadInclude {
        href: href.clone(),
        reason: "file has no root element".into(),
    })?;
    let file_base = path.parent().map(std::path::PathBuf::from);
    let file_ctx = ParseCtx {
        xot: &file_xot,
        base_path: file_base,
        table: ctx.table,
    };
    let rule = (ctx.table.rule)(&file_ctx, root)?;
    match rule {
        Rule::External(mut external) => {
            external.source_path = Some(href.clone().into());
            Ok(Extends::External(ExtendsExternal {
                rule: Rc::new(external),
                href: href.into(),
            }))
        }
        _ => Err(ParseError::BadInclude {
            href,
            reason: "<extends href> must reference a <rule> with no @context and no @abstract"
                .into(),
        }),
    }
}
