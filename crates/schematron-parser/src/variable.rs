//! `<let>`: polymorphic on whether a `value` attribute is present.

use xot::Node;

use schematron_ast::{Query, QueryVariable, Variable, XMLVariable};

use crate::ctx::ParseCtx;
use crate::error::{ParseError, Result};
use crate::xotutil::attr;

pub fn parse_variable(ctx: &ParseCtx, node: Node) -> Result<Variable> {
    let xot = ctx.xot;
    let name = attr(xot, node, "name").ok_or(ParseError::MissingAttribute {
        element: "let",
        attribute: "name",
    })?;
    if let Some(value) = attr(xot, node, "value") {
        return Ok(Variable::Query(QueryVariable {
            name: name.into(),
            query: Query::new(value),
        }));
    }
    // No `value`: the element's inner XML, serialized verbatim, becomes an
    // XMLVariable. Per the resolved open question (DESIGN.md) this
    // substitutes into the query context as a plain string.
    let mut xml = String::new();
    for child in xot.children(node) {
        xml.push_str(
            &xot.to_string(child)
                .map_err(|e| ParseError::Xml(format!("serializing <let> body: {e}")))?,
        );
    }
    Ok(Variable::Xml(XMLVariable {
        name: name.into(),
        xml: xml.into(),
    }))
}
