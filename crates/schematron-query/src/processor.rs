use std::collections::HashMap;

use crate::binding::QueryBinding;
use crate::context::EvaluationContext;
use crate::error::Result;
use crate::parser::{CachingQueryParser, CustomFunction, QueryParser, XeeQueryParser};
use crate::query::Query;
use crate::tree::DocumentTree;

/// A handle exposing a [`QueryParser`] for one query binding, plus a
/// constructor for the matching [`EvaluationContext`]. Both are immutable;
/// `with_*` operations on the processor itself rebuild the inner parser.
pub struct QueryProcessor {
    binding: QueryBinding,
    parser: Box<dyn QueryParser>,
    namespaces: HashMap<String, String>,
}

impl QueryProcessor {
    pub fn new(binding: QueryBinding) -> Self {
        Self {
            binding,
            parser: Box::new(CachingQueryParser::new(Box::new(XeeQueryParser::new(binding)))),
            namespaces: HashMap::new(),
        }
    }

    pub fn binding(&self) -> QueryBinding {
        self.binding
    }

    /// Merges `namespaces` into both the parser (so query source can use the
    /// prefixes) and this processor's own record of them, so that
    /// [`Self::root_context`] can seed the same bindings into the evaluation
    /// context — without this, a query recompiled with in-scope variables
    /// (`Query::recompile_with_variables`) would lose every schema-declared
    /// prefix, since that recompile builds its static context from
    /// `EvaluationContext::namespace_map` alone.
    pub fn with_namespaces(&self, namespaces: &HashMap<String, String>) -> Self {
        let mut merged = self.namespaces.clone();
        merged.extend(namespaces.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            binding: self.binding,
            parser: self.parser.with_namespaces(namespaces),
            namespaces: merged,
        }
    }

    pub fn with_custom_function(&self, function: CustomFunction) -> Result<Self> {
        Ok(Self {
            binding: self.binding,
            parser: self.parser.with_custom_function(function)?,
            namespaces: self.namespaces.clone(),
        })
    }

    pub fn parse(&self, source: &str) -> Result<Query> {
        self.parser.parse(source)
    }

    pub fn root_context(&self, tree: &DocumentTree) -> EvaluationContext {
        EvaluationContext::with_xml_root(tree).with_namespaces(&self.namespaces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_context_carries_processor_namespaces() {
        let mut namespaces = HashMap::new();
        namespaces.insert("fruit".to_string(), "urn:example:fruit".to_string());
        let processor = QueryProcessor::new(QueryBinding::Xpath31).with_namespaces(&namespaces);

        let tree = DocumentTree::parse("<root/>").unwrap();
        let ctx = processor.root_context(&tree);

        assert_eq!(
            ctx.namespace_map().get("fruit"),
            Some(&"urn:example:fruit".to_string())
        );
    }
}
