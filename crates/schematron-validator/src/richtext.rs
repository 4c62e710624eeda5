//! Rich-text evaluation (§4.4 "Rich-text evaluation"): each `<assert>`,
//! `<report>`, `<diagnostic>` or `<property>` body is pre-compiled once at
//! construction into a flat list of fragments, so the hot per-node path is
//! a single iteration with no re-parsing.

use schematron_ast::RichTextItem;
use schematron_query::{EvaluationContext, Query, QueryProcessor, QueryResult};

use crate::error::Result;

pub enum TextFragment {
    Literal(String),
    Select(Query),
}

pub fn compile(items: &[RichTextItem], processor: &QueryProcessor) -> Result<Vec<TextFragment>> {
    items
        .iter()
        .map(|item| match item {
            RichTextItem::Text(s) => Ok(TextFragment::Literal(s.to_string())),
            RichTextItem::ValueOf(value_of) => Ok(TextFragment::Select(processor.parse(value_of.select.source())?)),
            RichTextItem::Name(name) => {
                let source = match &name.path {
                    Some(path) => format!("{}/name()", path.source().trim_end_matches('/')),
                    None => "./name()".to_string(),
                };
                Ok(TextFragment::Select(processor.parse(&source)?))
            }
        })
        .collect()
}

/// Concatenates every fragment's rendering, then trims the result per §4.4.
pub fn render(fragments: &[TextFragment], ctx: &EvaluationContext) -> Result<String> {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            TextFragment::Literal(s) => out.push_str(s),
            TextFragment::Select(query) => out.push_str(&stringify(&query.evaluate(ctx)?)?),
        }
    }
    Ok(out.trim().to_string())
}

/// A node-set result concatenates each node's string value; a scalar result
/// stringifies per the engine's own coercion. Distinguishing the two this
/// way (rather than truncating to the first node) matters for `value-of`
/// selecting e.g. `*` over several sibling elements.
fn stringify(result: &QueryResult) -> Result<String> {
    if result.is_empty() {
        return Ok(String::new());
    }
    let nodes = result.nodes();
    if nodes.len() == result.count() {
        Ok(result.node_texts().join(""))
    } else {
        Ok(result.to_text()?)
    }
}
