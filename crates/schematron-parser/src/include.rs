//! `<include href>` resolution, merged into the enclosing container by type.
//!
//! `<include>` may appear inside `<schema>`, `<pattern>`, or `<rule>`; in
//! each case the referenced file's root element is parsed by whichever
//! sub-parser matches its local name, and the result is folded into the
//! caller's own child list. [`IncludedNode`] is the union of everything an
//! include can resolve to; each container matches only the variants it can
//! legally hold and reports [`ParseError::BadInclude`] for the rest.

use xot::Node;

use schematron_ast::{Diagnostics, Namespace, Paragraph, Pattern, Phase, Properties, Rule, Title, Variable};

use crate::ctx::ParseCtx;
use crate::error::{ParseError, Result};
use crate::xotutil::{attr, local_name};

pub enum IncludedNode {
    Pattern(Pattern),
    Namespace(Namespace),
    Phase(Phase),
    Rule(Rule),
    Variable(Variable),
    Paragraph(Paragraph),
    Title(Title),
    Diagnostics(Diagnostics),
    Properties(Properties),
}

pub fn resolve_include(ctx: &ParseCtx, node: Node) -> Result<IncludedNode> {
    let href = attr(ctx.xot, node, "href").ok_or(ParseError::MissingAttribute {
        element: "include",
        attribute: "href",
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
    let file_ctx = ParseCtx {
        xot: &file_xot,
        base_path: path.parent().map(std::path::PathBuf::from),
        table: ctx.table,
    };
    let local = local_name(&file_xot, root).unwrap_or_default();
    match local.as_str() {
        "pattern" => Ok(IncludedNode::Pattern((ctx.table.pattern)(&file_ctx, root)?)),
        "ns" => Ok(IncludedNode::Namespace(crate::schema::parse_ns(&file_ctx, root)?)),
        "phase" => Ok(IncludedNode::Phase(crate::schema::parse_phase(&file_ctx, root)?)),
        "rule" => Ok(IncludedNode::Rule((ctx.table.rule)(&file_ctx, root)?)),
        "let" => Ok(IncludedNode::Variable((ctx.table.variable)(&file_ctx, root)?)),
        "p" => Ok(IncludedNode::Paragraph(crate::richtext::parse_paragraph(
            &file_ctx, root,
        )?)),
        "title" => Ok(IncludedNode::Title(crate::richtext::parse_title(&file_ctx, root)?)),
        "diagnostics" => Ok(IncludedNode::Diagnostics(crate::diagnostics::parse_diagnostics(
            &file_ctx, root,
        )?)),
        "properties" => Ok(IncludedNode::Properties(crate::diagnostics::parse_properties(
            &file_ctx, root,
        )?)),
        other => Err(ParseError::BadInclude {
            href,
            reason: format!("cannot include a root element of type `{other}`"),
        }),
    }
}
